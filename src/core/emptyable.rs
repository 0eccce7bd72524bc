//! Purpose: Equality and hashing over element sequences that ignore empty elements.
//! Exports: `Emptyable`, `eq_ignoring_empty`, `hash_ignoring_empty`.
//! Role: Shared comparison semantics for `Message` and `SendableMessage`.
//! Invariants: An empty element never influences equality or the hash.
//! Invariants: Non-empty elements compare pairwise in original order.

use std::hash::{Hash, Hasher};

/// An element that may carry no visible content at all.
pub trait Emptyable {
    fn is_empty(&self) -> bool;
}

/// Lock-step walk over both slices, skipping empty elements on either side.
///
/// Two sequences are equal when, with every empty element deleted, the
/// remainders are pairwise equal in order.
pub fn eq_ignoring_empty<T>(left: &[T], right: &[T]) -> bool
where
    T: Emptyable + PartialEq,
{
    let mut i = 0;
    let mut j = 0;
    loop {
        while i < left.len() && left[i].is_empty() {
            i += 1;
        }
        while j < right.len() && right[j].is_empty() {
            j += 1;
        }
        match (i < left.len(), j < right.len()) {
            (false, false) => return true,
            (true, true) => {
                if left[i] != right[j] {
                    return false;
                }
                i += 1;
                j += 1;
            }
            _ => return false,
        }
    }
}

/// Accumulates only non-empty elements, so sequences that are
/// `eq_ignoring_empty` hash identically.
pub fn hash_ignoring_empty<T, H>(elements: &[T], state: &mut H)
where
    T: Emptyable + Hash,
    H: Hasher,
{
    for element in elements {
        if !element.is_empty() {
            element.hash(state);
        }
    }
}
