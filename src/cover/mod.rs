// src/cover/mod.rs
// =============================================================================
// Greedy set cover on top of a bucket priority queue.
//
// Submodules:
// - set: the CoverableSet trait every stored type implements
// - queue: the BucketQueue itself
// - greedy: the driver that repeatedly takes the best remaining set
// - error: what the queue reports when it is misused or inconsistent
//
// Nothing here does I/O; the wiki and the CLI feed it and print its output.
// =============================================================================

mod error;
mod greedy;
mod queue;
mod set;

pub use error::{ErrorKind, QueueError};
pub use greedy::{greedy_cover, greedy_cover_sets, Cover};
pub use queue::{BucketQueue, SetId};
pub use set::CoverableSet;

// A tiny set type for exercising the queue without any wiki data.
#[cfg(test)]
pub(crate) mod testing {
    use super::CoverableSet;
    use std::collections::BTreeSet;
    use std::fmt;

    #[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
    pub(crate) struct NamedSet {
        pub(crate) name: String,
        pub(crate) elements: BTreeSet<u32>,
    }

    pub(crate) fn named(name: &str, elements: &[u32]) -> NamedSet {
        NamedSet {
            name: name.to_string(),
            elements: elements.iter().copied().collect(),
        }
    }

    impl fmt::Display for NamedSet {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}{:?}", self.name, self.elements)
        }
    }

    impl CoverableSet for NamedSet {
        fn size(&self) -> usize {
            self.elements.len()
        }

        fn add_elements(&mut self, other: &Self) {
            self.elements.extend(other.elements.iter().copied());
        }

        fn remove_elements(&mut self, other: &Self) -> usize {
            let before = self.elements.len();
            self.elements.retain(|e| !other.elements.contains(e));
            before - self.elements.len()
        }
    }
}
