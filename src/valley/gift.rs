// src/valley/gift.rs
// =============================================================================
// A gift together with the villagers who love it.
//
// This is the concrete set type the bucket queue works on: the "elements"
// are villager names, and the gift name is the label we print.
//
// Ordering (needed so the queue can spot duplicate inserts):
// 1. gift name
// 2. number of villagers
// 3. villager names, in sorted order
// =============================================================================

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use crate::cover::CoverableSet;

pub type Villager = String;
pub type Gift = String;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GiftForVillagers {
    gift: Gift,
    villagers: BTreeSet<Villager>,
}

impl GiftForVillagers {
    pub fn new<G, I, V>(gift: G, villagers: I) -> Self
    where
        G: Into<Gift>,
        I: IntoIterator<Item = V>,
        V: Into<Villager>,
    {
        GiftForVillagers {
            gift: gift.into(),
            villagers: villagers.into_iter().map(Into::into).collect(),
        }
    }

    pub fn gift(&self) -> &str {
        &self.gift
    }

    /// Villagers in alphabetical order.
    pub fn villagers(&self) -> impl Iterator<Item = &str> {
        self.villagers.iter().map(String::as_str)
    }
}

impl Ord for GiftForVillagers {
    fn cmp(&self, other: &Self) -> Ordering {
        self.gift
            .cmp(&other.gift)
            .then_with(|| self.villagers.len().cmp(&other.villagers.len()))
            .then_with(|| self.villagers.iter().cmp(other.villagers.iter()))
    }
}

impl PartialOrd for GiftForVillagers {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl CoverableSet for GiftForVillagers {
    fn size(&self) -> usize {
        self.villagers.len()
    }

    fn add_elements(&mut self, other: &Self) {
        self.villagers.extend(other.villagers.iter().cloned());
    }

    // Walks whichever side is smaller; the covered set usually dwarfs a gift.
    fn remove_elements(&mut self, other: &Self) -> usize {
        let before = self.villagers.len();
        if other.villagers.len() < before {
            for villager in &other.villagers {
                self.villagers.remove(villager);
            }
        } else {
            self.villagers.retain(|villager| !other.villagers.contains(villager));
        }
        before - self.villagers.len()
    }
}

// ex. "4 Prismatic Shard items for Abigail, Lewis, Marnie, Penny"
impl fmt::Display for GiftForVillagers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.size();
        write!(f, "{} {} item", count, self.gift)?;
        if count > 1 {
            write!(f, "s")?;
        }
        write!(f, " for ")?;

        if self.villagers.is_empty() {
            return write!(f, "no one");
        }
        let names: Vec<&str> = self.villagers().collect();
        write!(f, "{}", names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_plural() {
        let gift = GiftForVillagers::new("Prismatic Shard", ["Penny", "Lewis", "Marnie", "Abigail"]);
        assert_eq!(
            gift.to_string(),
            "4 Prismatic Shard items for Abigail, Lewis, Marnie, Penny"
        );
    }

    #[test]
    fn test_display_singular_and_empty() {
        let one = GiftForVillagers::new("Pufferfish", ["Willy"]);
        assert_eq!(one.to_string(), "1 Pufferfish item for Willy");

        let none = GiftForVillagers::new("Trash", Vec::<String>::new());
        assert_eq!(none.to_string(), "0 Trash item for no one");
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut covered = GiftForVillagers::default();
        let gift = GiftForVillagers::new("Wine", ["Harvey", "Pam"]);
        covered.add_elements(&gift);
        covered.add_elements(&gift);
        assert_eq!(covered.size(), 2);
        assert_eq!(covered.gift(), "");
    }

    #[test]
    fn test_remove_counts_only_present_villagers() {
        let mut gift = GiftForVillagers::new("Wine", ["Harvey", "Pam", "Gus"]);
        let covered = GiftForVillagers::new("", ["Pam", "Linus"]);
        assert_eq!(gift.remove_elements(&covered), 1);
        assert_eq!(gift.villagers().collect::<Vec<_>>(), vec!["Gus", "Harvey"]);

        // Larger `other` takes the retain path
        let everyone = GiftForVillagers::new("", ["Gus", "Harvey", "Pam", "Linus", "Robin"]);
        assert_eq!(gift.remove_elements(&everyone), 2);
        assert_eq!(gift.size(), 0);
    }

    #[test]
    fn test_ordering() {
        let a = GiftForVillagers::new("Amethyst", ["Abigail"]);
        let b = GiftForVillagers::new("Beer", ["Pam"]);
        assert!(a < b);

        // Same gift: fewer villagers first, then by names
        let small = GiftForVillagers::new("Wine", ["Pam"]);
        let large = GiftForVillagers::new("Wine", ["Gus", "Harvey"]);
        assert!(small < large);

        let gus = GiftForVillagers::new("Wine", ["Gus"]);
        assert!(gus < small);
        assert_eq!(gus.cmp(&GiftForVillagers::new("Wine", ["Gus"])), Ordering::Equal);
    }
}
