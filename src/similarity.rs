//! Contiguous-matching-block similarity.
//!
//! The ratio of two strings is `2 * M / T`, where `T` is their combined
//! length and `M` the number of characters covered by matching blocks. Blocks
//! are found by taking the longest common substring, then repeating on the
//! unmatched text to its left and to its right in both inputs.
//!
//! Lengths count Unicode scalar values. The scorer never changes case;
//! callers wanting a case-insensitive comparison lower-case first.

use serde::{Deserialize, Serialize};

/// A run of `len` equal characters at `a[a_start..]` and `b[b_start..]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchingBlock {
    /// Start in the first string, in chars.
    pub a_start: usize,
    /// Start in the second string, in chars.
    pub b_start: usize,
    /// Run length in chars.
    pub len: usize,
}

/// Longest common run within `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Ties go to the run starting earliest in `a`, then earliest in `b`.
/// Returns a zero-length block when the ranges share no character.
fn longest_match(
    a: &[char],
    b: &[char],
    (alo, ahi): (usize, usize),
    (blo, bhi): (usize, usize),
) -> MatchingBlock {
    let width = bhi - blo;
    let mut best = MatchingBlock {
        a_start: alo,
        b_start: blo,
        len: 0,
    };
    // run[k] = length of the common run ending at a[i], b[blo + k]
    let mut prev = vec![0usize; width];
    let mut run = vec![0usize; width];

    for i in alo..ahi {
        for k in 0..width {
            run[k] = if a[i] == b[blo + k] {
                if k > 0 { prev[k - 1] + 1 } else { 1 }
            } else {
                0
            };
            if run[k] > best.len {
                best = MatchingBlock {
                    a_start: i + 1 - run[k],
                    b_start: blo + k + 1 - run[k],
                    len: run[k],
                };
            }
        }
        std::mem::swap(&mut prev, &mut run);
    }
    best
}

fn blocks_of(a: &[char], b: &[char]) -> Vec<MatchingBlock> {
    let mut blocks = Vec::new();
    let mut pending = vec![((0, a.len()), (0, b.len()))];

    while let Some(((alo, ahi), (blo, bhi))) = pending.pop() {
        if alo >= ahi || blo >= bhi {
            continue;
        }
        let m = longest_match(a, b, (alo, ahi), (blo, bhi));
        if m.len == 0 {
            continue;
        }
        pending.push(((alo, m.a_start), (blo, m.b_start)));
        pending.push(((m.a_start + m.len, ahi), (m.b_start + m.len, bhi)));
        blocks.push(m);
    }

    blocks.sort_unstable();
    blocks
}

/// Orders an input pair canonically so the tie-breaking in
/// [`longest_match`] cannot make the ratio depend on argument order.
fn canonical<'s>(a: &'s str, b: &'s str) -> (&'s str, &'s str, bool) {
    let ka = (a.chars().count(), a);
    let kb = (b.chars().count(), b);
    if kb < ka { (b, a, true) } else { (a, b, false) }
}

/// Matching blocks of `a` against `b`, ascending by position.
pub fn matching_blocks(a: &str, b: &str) -> Vec<MatchingBlock> {
    let (first, second, swapped) = canonical(a, b);
    let first: Vec<char> = first.chars().collect();
    let second: Vec<char> = second.chars().collect();
    let mut blocks = blocks_of(&first, &second);
    if swapped {
        for block in &mut blocks {
            std::mem::swap(&mut block.a_start, &mut block.b_start);
        }
        blocks.sort_unstable();
    }
    blocks
}

/// Similarity ratio of `a` and `b` in `[0.0, 1.0]`.
///
/// Two empty strings are identical (`1.0`); one empty string matches
/// nothing (`0.0`). Symmetric in its arguments.
pub fn similarity(a: &str, b: &str) -> f64 {
    let total = a.chars().count() + b.chars().count();
    if total == 0 {
        return 1.0;
    }
    let matched: usize = matching_blocks(a, b).iter().map(|m| m.len).sum();
    2.0 * matched as f64 / total as f64
}
