//! Purpose: Merge adjacent identically formatted elements and drop empty ones.
//! Exports: `Merge`, `compact`.
//! Role: Canonicalization pass run when messages are constructed.
//! Invariants: Single forward pass, original order preserved.
//! Invariants: Merged text keeps the earlier element's text first.
//! Invariants: Running the pass twice yields the same result as once.

use crate::core::emptyable::Emptyable;

/// An element that can be merged with a same-format neighbour.
pub trait Merge: Emptyable + Sized {
    /// True when two adjacent elements render under identical formatting.
    fn same_format(&self, other: &Self) -> bool;

    /// Combine two same-format elements; `self` came first.
    fn merge(self, other: Self) -> Self;
}

pub fn compact<T: Merge>(elements: &mut Vec<T>) {
    let mut out: Vec<T> = Vec::with_capacity(elements.len());
    for element in elements.drain(..) {
        if element.is_empty() {
            continue;
        }
        match out.pop() {
            Some(prev) if prev.same_format(&element) => out.push(prev.merge(element)),
            Some(prev) => {
                out.push(prev);
                out.push(element);
            }
            None => out.push(element),
        }
    }
    *elements = out;
}

#[cfg(test)]
mod tests {
    use super::{Merge, compact};
    use crate::core::emptyable::Emptyable;

    #[derive(Debug, PartialEq)]
    struct Run {
        text: String,
        colour: u8,
    }

    fn run(text: &str, colour: u8) -> Run {
        Run {
            text: text.to_string(),
            colour,
        }
    }

    impl Emptyable for Run {
        fn is_empty(&self) -> bool {
            self.text.is_empty()
        }
    }

    impl Merge for Run {
        fn same_format(&self, other: &Self) -> bool {
            self.colour == other.colour
        }

        fn merge(mut self, other: Self) -> Self {
            self.text.push_str(&other.text);
            self
        }
    }

    #[test]
    fn adjacent_same_format_runs_merge_in_order() {
        let mut runs = vec![run("Hello ", 1), run("World", 1), run("!", 2)];
        compact(&mut runs);
        assert_eq!(runs, vec![run("Hello World", 1), run("!", 2)]);
    }

    #[test]
    fn empty_runs_are_dropped() {
        let mut runs = vec![run("", 1), run("a", 1), run("", 2), run("b", 1)];
        compact(&mut runs);
        // The empty colour-2 run carries nothing, so the colour-1 runs become adjacent.
        assert_eq!(runs, vec![run("ab", 1)]);
    }

    #[test]
    fn compaction_is_idempotent() {
        let mut runs = vec![run("a", 1), run("b", 1), run("", 3), run("c", 2)];
        compact(&mut runs);
        let first = format!("{runs:?}");
        compact(&mut runs);
        assert_eq!(format!("{runs:?}"), first);
    }

    #[test]
    fn all_empty_input_compacts_to_nothing() {
        let mut runs = vec![run("", 1), run("", 2)];
        compact(&mut runs);
        assert!(runs.is_empty());
    }
}
