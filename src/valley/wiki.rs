// src/valley/wiki.rs
// =============================================================================
// Builds a GiftCatalog from the Stardew Valley wiki.
//
// Pages used:
// 1. Villagers page: names of every giftable villager, in three sections
//    (bachelors, bachelorettes, non-marriage candidates)
// 2. One page per villager: their "Best Gifts" (loved gifts) table cell
// 3. Friendship page: the universally loved gifts, plus the list of
//    villagers who are exceptions to them
//
// The parsing functions take page HTML and never touch the network, so they
// can be tested against small fixtures. WikiClient does the fetching.
// =============================================================================

use anyhow::{anyhow, Context, Result};
use futures::stream::{self, StreamExt, TryStreamExt};
use reqwest::Client;
use std::collections::BTreeSet;
use std::time::Duration;
use url::Url;

use super::catalog::GiftCatalog;
use super::gift::{Gift, Villager};
use crate::scrape::extract_preceded_nested_text;

pub const DEFAULT_BASE_URL: &str = "https://stardewvalleywiki.com/";

// Where a piece of data lives on a page: after the `heading` element whose
// text contains `marker`, inside the `nesting` chain of elements.
struct Section {
    heading: &'static str,
    marker: &'static str,
    nesting: &'static [&'static str],
}

const BACHELORS: Section = Section {
    heading: "h3",
    marker: "Bachelors",
    nesting: &["ul", "li", "p", "a"],
};

const BACHELORETTES: Section = Section {
    heading: "h3",
    marker: "Bachelorettes",
    nesting: &["ul", "li", "p", "a"],
};

const NON_MARRIAGE_CANDIDATES: Section = Section {
    heading: "h2",
    marker: "Non-marriage candidates",
    nesting: &["ul", "li", "p", "a"],
};

// <td>Best Gifts: ...</td> <td> ... <span><a>Spaghetti</a></span> ... </td>
const BEST_GIFTS: Section = Section {
    heading: "td",
    marker: "Best Gifts",
    nesting: &["td", "span", "a"],
};

// h3/h4 rather than span: an earlier span on the page has the same text
const UNIVERSAL_LOVES: Section = Section {
    heading: "h3",
    marker: "Universal Loves",
    nesting: &["ul", "li", "span", "a"],
};

const UNIVERSAL_LOVES_EXCEPTIONS: Section = Section {
    heading: "h4",
    marker: "Universal Loves exceptions",
    nesting: &["ul", "li", "a"],
};

/// Where and how to talk to the wiki.
#[derive(Debug, Clone)]
pub struct WikiConfig {
    pub base_url: Url,
    pub villagers_page: String,
    pub friendship_page: String,
    pub timeout: Duration,
    /// How many villager pages to fetch at once.
    pub concurrency: usize,
    /// Print a line per fetched page.
    pub progress: bool,
}

impl WikiConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        // Parse the base URL so we can join page names onto it later
        let mut base_url =
            Url::parse(base_url).map_err(|e| anyhow!("Invalid URL '{}': {}", base_url, e))?;
        // Without a trailing slash, join() would replace the last path segment
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(WikiConfig {
            base_url,
            villagers_page: "Villagers".to_string(),
            friendship_page: "Friendship".to_string(),
            timeout: Duration::from_secs(30),
            concurrency: 4,
            progress: true,
        })
    }

    // Wiki page names use underscores where the title has spaces
    pub fn page_url(&self, page: &str) -> Result<Url> {
        let page = page.trim().replace(' ', "_");
        self.base_url
            .join(&page)
            .map_err(|e| anyhow!("Invalid page name '{}': {}", page, e))
    }
}

/// The universally loved gifts and who doesn't love them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniversalLoves {
    pub gifts: Vec<Gift>,
    /// (villager, gift) pairs: the villager does not love the gift.
    pub exceptions: Vec<(Villager, Gift)>,
}

fn extract_section(html: &str, section: &Section, what: &str) -> Result<Vec<String>> {
    let data = extract_preceded_nested_text(html, section.heading, section.marker, section.nesting);

    // An empty result means the page layout changed or the page is wrong
    if data.is_empty() {
        return Err(anyhow!("Failed to parse {}", what));
    }
    Ok(data)
}

/// Names of every giftable villager on the villagers page.
pub fn parse_villagers(html: &str) -> Result<Vec<Villager>> {
    // The villagers page splits everyone across three sections; we need all of them
    let mut villagers = extract_section(html, &BACHELORS, "bachelors from villagers page")?;
    villagers.extend(extract_section(
        html,
        &BACHELORETTES,
        "bachelorettes from villagers page",
    )?);
    villagers.extend(extract_section(
        html,
        &NON_MARRIAGE_CANDIDATES,
        "non-marriage candidates from villagers page",
    )?);
    Ok(villagers)
}

/// The gifts a villager loves, from their own page.
pub fn parse_best_gifts(html: &str, villager: &str) -> Result<Vec<Gift>> {
    extract_section(html, &BEST_GIFTS, &format!("gifts from {}'s page", villager))
}

pub fn parse_universal_loves(html: &str) -> Result<UniversalLoves> {
    let gifts = extract_section(html, &UNIVERSAL_LOVES, "universal loves from friendship page")?;
    let listed = extract_section(
        html,
        &UNIVERSAL_LOVES_EXCEPTIONS,
        "exceptions to universal loves from friendship page",
    )?;

    // Listed as villager, gift, villager, gift, ...
    let exceptions = listed
        .chunks_exact(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect();

    Ok(UniversalLoves { gifts, exceptions })
}

// Combines everything scraped into one catalog.
//
// A universal love goes to every villager who isn't listed as an exception
// for it, on top of anyone whose own page already lists it.
pub fn assemble_catalog(
    villagers: &[Villager],
    best_gifts: &[(Villager, Vec<Gift>)],
    universal: &UniversalLoves,
) -> GiftCatalog {
    let mut catalog = GiftCatalog::new();

    // Every villager goes in, even ones nobody found a loved gift for
    for villager in villagers {
        catalog.add_villager(villager);
    }

    // Gifts from each villager's own page
    for (villager, gifts) in best_gifts {
        for gift in gifts {
            catalog.add_love(gift, villager);
        }
    }

    for gift in &universal.gifts {
        // Who is listed as not loving this particular gift
        let excluded: BTreeSet<&str> = universal
            .exceptions
            .iter()
            .filter(|(_, excepted)| excepted == gift)
            .map(|(villager, _)| villager.as_str())
            .collect();

        for villager in villagers {
            if !excluded.contains(villager.as_str()) {
                catalog.add_love(gift, villager);
            }
        }
    }

    catalog
}

pub struct WikiClient {
    client: Client,
    config: WikiConfig,
}

impl WikiClient {
    pub fn new(config: WikiConfig) -> Result<Self> {
        // Build one HTTP client and reuse it for every page
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(WikiClient { client, config })
    }

    /// Downloads every page needed and assembles the full catalog.
    pub async fn fetch_catalog(&self) -> Result<GiftCatalog> {
        // Step 1: who are the villagers?
        let villagers_html = self.fetch_page(&self.config.villagers_page).await?;
        let villagers = parse_villagers(&villagers_html)?;

        if self.config.progress {
            println!("👥 Found {} villager(s)", villagers.len());
        }

        // Step 2: what does each villager love?
        // buffered() keeps the villager order while fetching a few at a time
        let best_gifts: Vec<(Villager, Vec<Gift>)> = stream::iter(villagers.iter().cloned())
            .map(|villager| async move {
                let html = self.fetch_page(&villager).await?;
                let gifts = parse_best_gifts(&html, &villager)?;
                if self.config.progress {
                    println!("   {} loves {} gift(s)", villager, gifts.len());
                }
                Ok::<_, anyhow::Error>((villager, gifts))
            })
            .buffered(self.config.concurrency.max(1))
            .try_collect()
            .await?;

        // Step 3: what does (almost) everyone love?
        let friendship_html = self.fetch_page(&self.config.friendship_page).await?;
        let universal = parse_universal_loves(&friendship_html)?;

        if self.config.progress {
            println!(
                "💝 Found {} universal love(s) with {} exception(s)",
                universal.gifts.len(),
                universal.exceptions.len()
            );
        }

        Ok(assemble_catalog(&villagers, &best_gifts, &universal))
    }

    // Fetches a wiki page and returns its HTML content
    async fn fetch_page(&self, page: &str) -> Result<String> {
        let url = self.config.page_url(page)?;

        // Send GET request and wait for the response
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;

        // Check if the request was successful (status 200-299)
        if !response.status().is_success() {
            return Err(anyhow!("Failed to fetch {}: HTTP {}", url, response.status()));
        }

        // Read the response body as text
        let html = response.text().await?;
        if html.trim().is_empty() {
            return Err(anyhow!("Empty page at {}", url));
        }
        Ok(html)
    }
}
