// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Load the gift catalog (from the wiki or a saved file)
// 3. Apply the user's skip lists
// 4. Run greedy set cover over the gifts
// 5. Print the chosen gifts and anyone left uncovered
// 6. Exit with proper code (0 = everyone covered, 1 = someone left out, 2 = error)
// =============================================================================

mod cli;           // src/cli.rs - command-line parsing

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use std::time::Duration;

use cli::{Cli, Commands, CoverOptions};
use valley_gift_cover::cover::{greedy_cover_sets, Cover, CoverableSet};
use valley_gift_cover::valley::{GiftCatalog, GiftForVillagers, SkipList, WikiClient, WikiConfig};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = every villager gets a loved gift
//   Ok(1) = some villagers can't be covered by the known gifts
//   Err = something went wrong fetching or parsing
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Wiki {
            base_url,
            concurrency,
            timeout_secs,
            save,
            options,
        } => {
            let mut config = WikiConfig::new(&base_url)?;
            config.concurrency = concurrency;
            config.timeout = Duration::from_secs(timeout_secs);
            config.progress = !options.json;

            if !options.json {
                println!("🔍 Reading gifts from {}", config.base_url);
            }
            let catalog = WikiClient::new(config)?.fetch_catalog().await?;

            if let Some(path) = save {
                catalog.save(&path)?;
                if !options.json {
                    println!("💾 Saved catalog to {}", path.display());
                }
            }

            handle_cover(catalog, &options)
        }
        Commands::File { path, options } => {
            if !options.json {
                println!("📄 Reading gifts from {}", path.display());
            }
            let catalog = GiftCatalog::load(&path)?;
            handle_cover(catalog, &options)
        }
    }
}

// Applies skips, runs the cover, and prints the outcome
fn handle_cover(mut catalog: GiftCatalog, options: &CoverOptions) -> Result<i32> {
    let mut skips = SkipList::new(&options.skip_villagers, &options.skip_gifts);
    skips.apply(&mut catalog);
    for villager in skips.unseen_villagers() {
        eprintln!("Warning: villager to skip was not found: {}", villager);
    }
    for gift in skips.unseen_gifts() {
        eprintln!("Warning: gift to skip was not found: {}", gift);
    }

    let universe = catalog.universe();
    let sets = catalog.gift_sets();

    if !options.json {
        println!(
            "🎁 Choosing from {} gift(s) for {} villager(s)\n",
            sets.len(),
            universe.size()
        );
    }

    let cover = greedy_cover_sets(sets)?;
    let uncovered = cover.uncovered(&universe);

    if options.json {
        print_json(&cover, &uncovered)?;
    } else {
        print_text(&cover, &universe, &uncovered);
    }

    if uncovered.size() > 0 {
        Ok(1)
    } else {
        Ok(0)
    }
}

#[derive(Debug, Serialize)]
struct ChosenGift {
    gift: String,
    count: usize,
    villagers: Vec<String>,
}

#[derive(Debug, Serialize)]
struct CoverReport {
    chosen: Vec<ChosenGift>,
    covered: Vec<String>,
    uncovered: Vec<String>,
}

impl CoverReport {
    fn new(cover: &Cover<GiftForVillagers>, uncovered: &GiftForVillagers) -> Self {
        let names = |set: &GiftForVillagers| set.villagers().map(String::from).collect::<Vec<_>>();

        CoverReport {
            chosen: cover
                .chosen
                .iter()
                .map(|set| ChosenGift {
                    gift: set.gift().to_string(),
                    count: set.size(),
                    villagers: names(set),
                })
                .collect(),
            covered: names(&cover.covered),
            uncovered: names(uncovered),
        }
    }
}

fn print_json(cover: &Cover<GiftForVillagers>, uncovered: &GiftForVillagers) -> Result<()> {
    let report = CoverReport::new(cover, uncovered);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

// One line per chosen gift, in the order the greedy pass picked them
fn print_text(
    cover: &Cover<GiftForVillagers>,
    universe: &GiftForVillagers,
    uncovered: &GiftForVillagers,
) {
    for (i, set) in cover.chosen.iter().enumerate() {
        println!("{:>3}. {}", i + 1, set);
    }

    println!();
    println!("📊 Summary:");
    println!("   🎁 Gifts: {}", cover.chosen.len());
    println!(
        "   ✅ Villagers covered: {} / {}",
        cover.covered.size(),
        universe.size()
    );

    if uncovered.size() > 0 {
        let names: Vec<&str> = uncovered.villagers().collect();
        println!("   ❌ No loved gift for: {}", names.join(", "));
    }
}
