// src/cover/set.rs
// =============================================================================
// The capabilities a type needs before the bucket queue can hold it.
//
// A "coverable set" is a named collection of base elements. The queue uses:
// - size() as the set's priority
// - add_elements() to fold a chosen set into the covered accumulator
// - remove_elements() to strip already-covered elements from the rest
// - Ord to recognise when two inserted values are the same set
// - Display so callers can print what was chosen
// - Default as the empty starting value of the covered accumulator
// =============================================================================

use std::fmt;

pub trait CoverableSet: Ord + Clone + Default + fmt::Display {
    /// Number of base elements in the set. Should be O(1).
    fn size(&self) -> usize;

    /// Union `other`'s elements into `self`. Adding an element twice is a no-op.
    fn add_elements(&mut self, other: &Self);

    /// Remove every element of `other` from `self`, returning how many
    /// elements were actually removed.
    fn remove_elements(&mut self, other: &Self) -> usize;
}
