// src/lib.rs
// =============================================================================
// Library side of valley-gift-cover.
//
// - cover: a bucket priority queue and the greedy set-cover driver on top
// - scrape: pulling text out of wiki HTML by position
// - valley: gifts, villagers, the catalog, and the wiki client
//
// The binary in src/main.rs wires these together behind a CLI.
// =============================================================================

pub mod cover;
pub mod scrape;
pub mod valley;

// Re-exports to flatten the crate.
pub use cover::{greedy_cover, greedy_cover_sets, BucketQueue, Cover, CoverableSet};
pub use valley::{GiftCatalog, GiftForVillagers};
