// src/valley/catalog.rs
// =============================================================================
// Which villagers love which gifts.
//
// The catalog is what the wiki scraper produces and what the cover step
// consumes. It can be saved to / loaded from JSON so a slow wiki crawl only
// has to happen once.
//
// JSON shape:
//   {
//     "villagers": ["Abigail", "Alex", ...],
//     "loved_gifts": { "Amethyst": ["Abigail"], ... }
//   }
// =============================================================================

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use super::gift::{Gift, GiftForVillagers, Villager};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftCatalog {
    /// Every villager that needs a gift, including ones who love nothing
    /// we know about.
    #[serde(default)]
    pub villagers: BTreeSet<Villager>,
    /// Gift -> villagers who love it.
    pub loved_gifts: BTreeMap<Gift, BTreeSet<Villager>>,
}

impl GiftCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_villager(&mut self, villager: &str) {
        self.villagers.insert(villager.to_string());
    }

    // Records that `villager` loves `gift` (and that the villager exists).
    pub fn add_love(&mut self, gift: &str, villager: &str) {
        self.add_villager(villager);
        self.loved_gifts
            .entry(gift.to_string())
            .or_default()
            .insert(villager.to_string());
    }

    /// One candidate set per gift, ready for the bucket queue.
    pub fn gift_sets(&self) -> Vec<GiftForVillagers> {
        self.loved_gifts
            .iter()
            .map(|(gift, villagers)| GiftForVillagers::new(gift.as_str(), villagers.iter().cloned()))
            .collect()
    }

    /// Everyone who has to be covered.
    pub fn universe(&self) -> GiftForVillagers {
        let everyone = self
            .villagers
            .iter()
            .chain(self.loved_gifts.values().flatten())
            .cloned();
        GiftForVillagers::new("", everyone)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        let catalog = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse catalog {}", path.display()))?;
        Ok(catalog)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)
            .with_context(|| format!("Failed to write catalog {}", path.display()))?;
        Ok(())
    }
}

// Villagers and gifts the user wants left out of the cover.
//
// Each entry remembers whether it matched anything, so typos can be
// reported instead of silently ignored.
#[derive(Debug, Clone, Default)]
pub struct SkipList {
    villagers: BTreeMap<Villager, bool>,
    gifts: BTreeMap<Gift, bool>,
}

impl SkipList {
    pub fn new(villagers: &[String], gifts: &[String]) -> Self {
        SkipList {
            villagers: villagers.iter().map(|v| (v.clone(), false)).collect(),
            gifts: gifts.iter().map(|g| (g.clone(), false)).collect(),
        }
    }

    // Removes skipped villagers everywhere, drops skipped gifts, and then
    // drops gifts nobody is left to love.
    pub fn apply(&mut self, catalog: &mut GiftCatalog) {
        for (villager, seen) in self.villagers.iter_mut() {
            if catalog.villagers.remove(villager) {
                *seen = true;
            }
            for lovers in catalog.loved_gifts.values_mut() {
                if lovers.remove(villager) {
                    *seen = true;
                }
            }
        }

        for (gift, seen) in self.gifts.iter_mut() {
            if catalog.loved_gifts.remove(gift).is_some() {
                *seen = true;
            }
        }

        catalog.loved_gifts.retain(|_, lovers| !lovers.is_empty());
    }

    pub fn unseen_villagers(&self) -> Vec<&str> {
        unseen(&self.villagers)
    }

    pub fn unseen_gifts(&self) -> Vec<&str> {
        unseen(&self.gifts)
    }
}

fn unseen(entries: &BTreeMap<String, bool>) -> Vec<&str> {
    entries
        .iter()
        .filter(|(_, seen)| !**seen)
        .map(|(name, _)| name.as_str())
        .collect()
}
