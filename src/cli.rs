// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two ways to get the gift data:
// - wiki: scrape it from the Stardew Valley wiki (optionally saving it)
// - file: load a catalog saved earlier with `wiki --save`
//
// Both share the same output and skip options.
// =============================================================================

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use valley_gift_cover::valley::DEFAULT_BASE_URL;

#[derive(Parser, Debug)]
#[command(
    name = "valley-gift-cover",
    version = "0.1.0",
    about = "Find the fewest loved gifts that make every Stardew Valley villager happy",
    long_about = "valley-gift-cover collects which gifts each villager loves and picks a small \
                  set of gifts so that every villager gets something they love. \
                  It uses the greedy set-cover approximation, so the answer is small but not \
                  guaranteed to be the smallest possible."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scrape loved gifts from the Stardew Valley wiki
    ///
    /// Example: valley-gift-cover wiki --skip-villager Krobus --save gifts.json
    Wiki {
        /// Base URL of the wiki
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,

        /// How many villager pages to download at the same time
        #[arg(long, default_value_t = 4)]
        concurrency: usize,

        /// Per-request timeout in seconds
        #[arg(long, default_value_t = 30)]
        timeout_secs: u64,

        /// Save the scraped catalog as JSON (before skips are applied)
        #[arg(long)]
        save: Option<PathBuf>,

        #[command(flatten)]
        options: CoverOptions,
    },

    /// Use a catalog saved earlier with `wiki --save`
    ///
    /// Example: valley-gift-cover file gifts.json --json
    File {
        /// Path to the catalog JSON file
        path: PathBuf,

        #[command(flatten)]
        options: CoverOptions,
    },
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct CoverOptions {
    /// Leave this villager out (can be repeated)
    #[arg(long = "skip-villager", value_name = "NAME")]
    pub skip_villagers: Vec<String>,

    /// Never suggest this gift (can be repeated)
    #[arg(long = "skip-gift", value_name = "NAME")]
    pub skip_gifts: Vec<String>,

    /// Output results in JSON format instead of text
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wiki_defaults() {
        let cli = Cli::try_parse_from(["valley-gift-cover", "wiki"]).unwrap();
        match cli.command {
            Commands::Wiki {
                base_url,
                concurrency,
                timeout_secs,
                save,
                options,
            } => {
                assert_eq!(base_url, DEFAULT_BASE_URL);
                assert_eq!(concurrency, 4);
                assert_eq!(timeout_secs, 30);
                assert!(save.is_none());
                assert!(options.skip_villagers.is_empty());
                assert!(!options.json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_repeated_skips() {
        let cli = Cli::try_parse_from([
            "valley-gift-cover",
            "file",
            "gifts.json",
            "--skip-villager",
            "Krobus",
            "--skip-villager",
            "Dwarf",
            "--skip-gift",
            "Prismatic Shard",
            "--json",
        ])
        .unwrap();

        match cli.command {
            Commands::File { path, options } => {
                assert_eq!(path, PathBuf::from("gifts.json"));
                assert_eq!(options.skip_villagers, vec!["Krobus", "Dwarf"]);
                assert_eq!(options.skip_gifts, vec!["Prismatic Shard"]);
                assert!(options.json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_file_requires_path() {
        assert!(Cli::try_parse_from(["valley-gift-cover", "file"]).is_err());
    }
}
