//! Lazy enumeration of unordered index pairs.
//!
//! [`PairIndices`] yields `(i, j)` with `i < j` over `0..n`, row by row, so
//! each unordered pair appears exactly once and no index is paired with
//! itself. A range of outer rows can be enumerated on its own, which is how
//! the linker splits work across threads.

use std::ops::Range;

/// Number of unordered pairs among `n` items.
pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Pairs contributed by rows `start..end` (each row `r` pairs with `r+1..n`).
fn pairs_in_rows(n: usize, start: usize, end: usize) -> usize {
    if start >= end {
        return 0;
    }
    let rows = end - start;
    // sum of (n - 1 - r) for r in start..end
    rows * (n - 1) - rows * (start + end - 1) / 2
}

/// Iterator over `(i, j)` index pairs with `i < j < n`.
#[derive(Debug, Clone)]
pub struct PairIndices {
    n: usize,
    i: usize,
    j: usize,
    row_end: usize,
}

impl PairIndices {
    /// Every pair among `n` items.
    pub fn new(n: usize) -> Self {
        Self::rows(n, 0..n)
    }

    /// Pairs whose first index lies in `rows`.
    pub fn rows(n: usize, rows: Range<usize>) -> Self {
        let row_end = rows.end.min(n);
        let i = rows.start.min(row_end);
        Self {
            n,
            i,
            j: i + 1,
            row_end,
        }
    }

    fn remaining(&self) -> usize {
        if self.i >= self.row_end {
            return 0;
        }
        self.n.saturating_sub(self.j) + pairs_in_rows(self.n, self.i + 1, self.row_end)
    }
}

impl Iterator for PairIndices {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while self.i < self.row_end {
            if self.j < self.n {
                let pair = (self.i, self.j);
                self.j += 1;
                return Some(pair);
            }
            self.i += 1;
            self.j = self.i + 1;
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.remaining();
        (left, Some(left))
    }
}

impl ExactSizeIterator for PairIndices {}

impl std::iter::FusedIterator for PairIndices {}

/// Split rows `0..n` into at most `parts` contiguous ranges of roughly equal
/// pair counts. Ranges cover `0..n` in order; empty when `n` is zero.
pub fn balanced_row_ranges(n: usize, parts: usize) -> Vec<Range<usize>> {
    if n == 0 {
        return Vec::new();
    }
    let parts = parts.max(1);
    let target = pair_count(n).div_ceil(parts).max(1);

    let mut ranges = Vec::with_capacity(parts);
    let mut start = 0;
    let mut acc = 0;
    for row in 0..n {
        acc += n - 1 - row;
        if acc >= target {
            ranges.push(start..row + 1);
            start = row + 1;
            acc = 0;
        }
    }
    if start < n {
        // trailing rows with few or no pairs join the last range
        let merge = acc == 0 || ranges.len() >= parts;
        match ranges.last_mut() {
            Some(last) if merge => last.end = n,
            _ => ranges.push(start..n),
        }
    }
    ranges
}
