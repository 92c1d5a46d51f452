// src/cover/greedy.rs
// =============================================================================
// The greedy set-cover driver.
//
// Loop:
// 1. Peek the set that currently covers the most uncovered elements
// 2. If it covers nothing new (or the queue is empty), stop
// 3. Otherwise record it and delete it from the queue, which re-buckets
//    everything it overlapped with
//
// This gives the classic ln(n)-approximation, not an optimal cover.
// =============================================================================

use super::error::QueueError;
use super::queue::BucketQueue;
use super::set::CoverableSet;

/// Result of a greedy run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cover<T> {
    /// Chosen sets in selection order. Each holds only the elements it newly
    /// covered when it was picked.
    pub chosen: Vec<T>,
    /// Union of every chosen set.
    pub covered: T,
}

impl<T: CoverableSet> Cover<T> {
    /// Elements of `universe` that no chosen set covers.
    pub fn uncovered(&self, universe: &T) -> T {
        let mut rest = universe.clone();
        rest.remove_elements(&self.covered);
        rest
    }

    pub fn is_complete(&self, universe: &T) -> bool {
        self.uncovered(universe).size() == 0
    }
}

/// Runs the greedy loop over an already-populated queue.
pub fn greedy_cover<T: CoverableSet>(mut queue: BucketQueue<T>) -> Result<Cover<T>, QueueError> {
    let mut chosen = Vec::new();

    while let Some(best) = queue.peek_highest_priority() {
        if best.size() == 0 {
            break;
        }
        match queue.delete_highest_priority()? {
            Some(set) => chosen.push(set),
            None => break,
        }
    }

    Ok(Cover {
        chosen,
        covered: queue.into_covered_elements(),
    })
}

/// Builds a queue from `sets` and runs [`greedy_cover`] on it.
pub fn greedy_cover_sets<T, I>(sets: I) -> Result<Cover<T>, QueueError>
where
    T: CoverableSet,
    I: IntoIterator<Item = T>,
{
    greedy_cover(BucketQueue::from_sets(sets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cover::testing::{named, NamedSet};

    #[test]
    fn test_example_cover() {
        let cover = greedy_cover_sets(vec![
            named("A", &[1, 2, 3]),
            named("B", &[2, 4]),
            named("C", &[3, 4, 5]),
            named("D", &[5]),
        ])
        .unwrap();

        let names: Vec<&str> = cover.chosen.iter().map(|set| set.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
        assert_eq!(cover.chosen[1], named("C", &[4, 5]));

        let universe = named("", &[1, 2, 3, 4, 5]);
        assert!(cover.is_complete(&universe));
        assert_eq!(cover.uncovered(&universe).size(), 0);
    }

    #[test]
    fn test_ties_pick_the_smallest_set_first() {
        let cover = greedy_cover_sets(vec![
            named("b", &[1, 2]),
            named("a", &[2, 3]),
            named("c", &[3, 4]),
        ])
        .unwrap();

        // Every pick is a tie, so the order follows the sets' own ordering
        let names: Vec<&str> = cover.chosen.iter().map(|set| set.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(cover.chosen[1], named("b", &[1]));
    }

    #[test]
    fn test_empty_input() {
        let cover = greedy_cover_sets(Vec::<NamedSet>::new()).unwrap();
        assert!(cover.chosen.is_empty());
        assert_eq!(cover.covered, NamedSet::default());
    }

    #[test]
    fn test_incomplete_cover_reports_remainder() {
        let cover = greedy_cover_sets(vec![named("A", &[1, 2]), named("B", &[2, 3])]).unwrap();
        let universe = named("", &[1, 2, 3, 4, 6]);

        assert!(!cover.is_complete(&universe));
        assert_eq!(cover.uncovered(&universe), named("", &[4, 6]));
    }

    #[test]
    fn test_redundant_sets_are_not_chosen() {
        let cover = greedy_cover_sets(vec![
            named("big", &[1, 2, 3, 4]),
            named("inside", &[2, 3]),
            named("empty", &[]),
        ])
        .unwrap();
        assert_eq!(cover.chosen, vec![named("big", &[1, 2, 3, 4])]);
    }

    #[test]
    fn test_picks_by_marginal_gain_not_original_size() {
        // After "wide" is taken, "overlap" (size 3) only adds one element
        // while "fresh" (size 2) adds two.
        let cover = greedy_cover_sets(vec![
            named("wide", &[1, 2, 3, 4, 5]),
            named("overlap", &[1, 2, 6]),
            named("fresh", &[7, 8]),
        ])
        .unwrap();

        let names: Vec<&str> = cover.chosen.iter().map(|set| set.name.as_str()).collect();
        assert_eq!(names, vec!["wide", "fresh", "overlap"]);
        assert_eq!(cover.chosen[2], named("overlap", &[6]));
    }

    #[test]
    fn test_chosen_sets_shrink_monotonically() {
        let cover = greedy_cover_sets(vec![
            named("a", &[1, 2, 3, 4]),
            named("b", &[3, 4, 5, 6, 7]),
            named("c", &[7, 8]),
            named("d", &[1, 9]),
        ])
        .unwrap();

        for pair in cover.chosen.windows(2) {
            assert!(pair[0].size() >= pair[1].size());
        }
        assert_eq!(cover.covered, named("", &[1, 2, 3, 4, 5, 6, 7, 8, 9]));
    }
}
