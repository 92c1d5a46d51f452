// src/valley/mod.rs
// =============================================================================
// Stardew Valley data: villagers, the gifts they love, and where to get them.
//
// Submodules:
// - gift: GiftForVillagers, the set type handed to the bucket queue
// - catalog: the full gift -> villagers mapping, skip lists, JSON save/load
// - wiki: scraping the catalog from the Stardew Valley wiki
// =============================================================================

mod catalog;
mod gift;
mod wiki;

pub use catalog::{GiftCatalog, SkipList};
pub use gift::{Gift, GiftForVillagers, Villager};
pub use wiki::{
    assemble_catalog, parse_best_gifts, parse_universal_loves, parse_villagers, UniversalLoves,
    WikiClient, WikiConfig, DEFAULT_BASE_URL,
};
