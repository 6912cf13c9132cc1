#![forbid(unsafe_code)]

//! Bounded best-first placement search.
//!
//! Pure greedy (always the shortest column) is cheap but myopic: one bad
//! placement can lock in an imbalance later items cannot correct. Full
//! search is exponential. The middle ground here is a beam: at each step
//! keep only the `beam_width` best partial layouts, scoring each child by a
//! deterministic greedy playout of all remaining items.
//!
//! Determinism: items are processed strictly in input order, children are
//! generated in (candidate, column) order, and only stable sorts are used,
//! so equal scores preserve generation order.

use mosaic_core::Tile;
use smallvec::{SmallVec, smallvec};

/// Per-column bottom edges of a partial layout.
type Bottoms = SmallVec<[i32; 8]>;

/// Lexicographic balance score: minimize the tallest column's bottom first,
/// then the spread between the tallest and shortest column.
type Score = (i32, i32);

/// A partial layout under exploration: the processed prefix of items is
/// placed, the suffix is not.
#[derive(Debug, Clone)]
struct Candidate {
    columns: Vec<Vec<Tile>>,
    bottoms: Bottoms,
    score: Score,
}

impl Candidate {
    fn empty(columns: usize) -> Self {
        Self {
            columns: vec![Vec::new(); columns],
            bottoms: smallvec![0; columns],
            score: (0, 0),
        }
    }

    /// Branch off a child with `item` appended to column `col`.
    ///
    /// Structural copy-on-branch: siblings never observe each other's
    /// mutations.
    fn place(&self, col: usize, item: usize, height: i32, item_width: i32, gap: i32) -> Self {
        let mut child = self.clone();
        let top = if child.columns[col].is_empty() {
            0
        } else {
            child.bottoms[col].saturating_add(gap)
        };
        let left = (col as i32).saturating_mul(item_width.saturating_add(gap));
        child.columns[col].push(Tile::new(top, left, item_width, height, item));
        child.bottoms[col] = top.saturating_add(height);
        child
    }
}

/// Index of the lowest column bottom, ties to the lowest column index.
fn shortest(bottoms: &[i32]) -> usize {
    debug_assert!(!bottoms.is_empty());
    let mut best = 0;
    for (idx, &bottom) in bottoms.iter().enumerate() {
        if bottom < bottoms[best] {
            best = idx;
        }
    }
    best
}

/// Position of column `col` in the descending height ranking: the number of
/// columns strictly taller than it. Columns tied at the top all rank 0.
fn height_rank(bottoms: &[i32], col: usize) -> usize {
    bottoms.iter().filter(|&&b| b > bottoms[col]).count()
}

/// Score a candidate by greedily playing out the remaining item heights
/// into whichever column is currently shortest, without branching.
fn playout(seed: &Candidate, remaining: &[i32], gap: i32) -> Score {
    let mut bottoms = seed.bottoms.clone();
    let mut occupied: SmallVec<[bool; 8]> =
        seed.columns.iter().map(|col| !col.is_empty()).collect();
    for &height in remaining {
        let col = shortest(&bottoms);
        let top = if occupied[col] {
            bottoms[col].saturating_add(gap)
        } else {
            0
        };
        bottoms[col] = top.saturating_add(height);
        occupied[col] = true;
    }
    profile_score(&bottoms)
}

/// Balance score of a final per-column height profile. Reductions over an
/// empty profile default to 0.
fn profile_score(bottoms: &[i32]) -> Score {
    let max = bottoms.iter().copied().max().unwrap_or(0);
    let min = bottoms.iter().copied().min().unwrap_or(0);
    (max, max.saturating_sub(min))
}

/// Place every item height into `columns` columns and return the committed
/// column layout of the best final candidate.
///
/// `heights` must already be derived at `item_width`; the playout and the
/// committed placement both consume the same values.
pub(crate) fn place_all(
    heights: &[i32],
    columns: usize,
    item_width: i32,
    gap: i32,
    beam_width: usize,
) -> Vec<Vec<Tile>> {
    if columns == 0 {
        return Vec::new();
    }
    let beam_width = beam_width.max(1);
    // A column ranked in the top half of the descending height ranking
    // keeps winning under shortest-column playout; refuse to grow it.
    let reject_below = columns.div_ceil(2);

    let mut beam = vec![Candidate::empty(columns)];
    for (item, &height) in heights.iter().enumerate() {
        let remaining = &heights[item + 1..];
        let mut children: Vec<Candidate> = Vec::with_capacity(beam.len() * columns);

        for cand in &beam {
            for col in 0..columns {
                if columns > 1 && height_rank(&cand.bottoms, col) < reject_below {
                    continue;
                }
                children.push(cand.place(col, item, height, item_width, gap));
            }
        }

        if children.is_empty() {
            // Every column was filtered out (e.g. all bottoms tied). One
            // greedy placement per candidate keeps the step from stalling.
            for cand in &beam {
                let col = shortest(&cand.bottoms);
                children.push(cand.place(col, item, height, item_width, gap));
            }
        }

        for child in &mut children {
            child.score = playout(child, remaining, gap);
        }
        children.sort_by_key(|cand| cand.score);
        children.truncate(beam_width);
        beam = children;
    }

    match beam.into_iter().next() {
        Some(best) => best.columns,
        None => vec![Vec::new(); columns],
    }
}
