//! Combination generator: every ordering of the five non-corner blocks
//!
//! Orderings are enumerated lexicographically, starting from the identity
//! `[0, 1, 2, 3, 4]` and ending at `[4, 3, 2, 1, 0]`. Candidate `i` is always
//! built from ordering `i`, so the sequence can be restarted or indexed
//! directly without keeping earlier candidates around.

use std::iter::FusedIterator;

use crate::models::{BlockGrid, Candidate, NON_CORNER_COUNT};

/// Number of candidates (5!)
pub const CANDIDATE_COUNT: usize = 120;

/// The block ordering at lexicographic rank `index`
///
/// Returns `None` when `index >= 120`.
pub fn permutation_at(index: usize) -> Option<[usize; NON_CORNER_COUNT]> {
    if index >= CANDIDATE_COUNT {
        return None;
    }

    let mut remaining: Vec<usize> = (0..NON_CORNER_COUNT).collect();
    let mut order = [0usize; NON_CORNER_COUNT];
    let mut rank = index;
    for (slot, value) in order.iter_mut().enumerate() {
        let radix = factorial(NON_CORNER_COUNT - 1 - slot);
        *value = remaining.remove(rank / radix);
        rank %= radix;
    }
    Some(order)
}

/// Lexicographic rank of a block ordering, the inverse of [`permutation_at`]
pub fn permutation_index(order: &[usize; NON_CORNER_COUNT]) -> Option<usize> {
    let mut remaining: Vec<usize> = (0..NON_CORNER_COUNT).collect();
    let mut rank = 0;
    for (slot, value) in order.iter().enumerate() {
        let pos = remaining.iter().position(|v| v == value)?;
        rank += pos * factorial(NON_CORNER_COUNT - 1 - slot);
        remaining.remove(pos);
    }
    Some(rank)
}

fn factorial(n: usize) -> usize {
    (1..=n).product()
}

impl BlockGrid {
    /// Lazily generate all 120 candidates in enumeration order
    pub fn combinations(&self) -> Combinations<'_> {
        Combinations {
            grid: self,
            next: 0,
        }
    }

    /// Rebuild candidate `index` without walking the sequence
    pub fn candidate(&self, index: usize) -> Option<Candidate> {
        let order = permutation_at(index)?;
        let image = self.assemble(&order)?;
        Some(Candidate {
            index,
            order,
            image,
        })
    }
}

/// Iterator over the candidates of a [`BlockGrid`]
///
/// Cloning the iterator restarts from the clone's current position; calling
/// [`BlockGrid::combinations`] again restarts from the beginning.
#[derive(Debug, Clone)]
pub struct Combinations<'a> {
    grid: &'a BlockGrid,
    next: usize,
}

impl Iterator for Combinations<'_> {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        let candidate = self.grid.candidate(self.next)?;
        self.next += 1;
        Some(candidate)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = CANDIDATE_COUNT.saturating_sub(self.next);
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<Candidate> {
        self.next = self.next.saturating_add(n).min(CANDIDATE_COUNT);
        self.next()
    }
}

impl ExactSizeIterator for Combinations<'_> {}

impl FusedIterator for Combinations<'_> {}
