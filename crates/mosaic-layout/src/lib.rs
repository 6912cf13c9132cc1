#![forbid(unsafe_code)]

//! Masonry layout solver with incremental reflow and viewport virtualization.
//!
//! This crate lays out a list of variable-aspect items into balanced columns:
//!
//! - [`Masonry`] - the layout engine: column derivation plus a bounded
//!   best-first (beam) search that approximates minimal height variance
//! - [`MasonryLayout`] - the committed per-column placement result
//! - [`cache::MasonryCache`] - incremental wrapper that reflows geometry
//!   without re-searching when the column count is unchanged
//! - [`viewport::Virtualizer`] - visible-tile windowing over a committed
//!   layout for scroll virtualization
//!
//! The engine is a pure function of its inputs: no I/O, no hidden state, no
//! scheduling. Identical inputs always produce byte-identical layouts
//! (integer pixel math, truncation, stable tie-breaks on input order).
//!
//! # Example
//!
//! ```
//! use mosaic_layout::{IntrinsicSize, Masonry};
//!
//! let engine = Masonry::new().with_min_item_width(256).with_gap(16);
//! let items = vec![
//!     Some(IntrinsicSize::new(1920.0, 1080.0)),
//!     Some(IntrinsicSize::new(1080.0, 1920.0)),
//!     None, // unknown aspect: placeholder height
//! ];
//!
//! let layout = engine.compute(&items, 1056);
//! assert_eq!(layout.column_count(), 3);
//! assert_eq!(layout.item_width(), 341);
//! assert_eq!(layout.len(), items.len());
//! ```

pub mod cache;
mod search;
pub mod viewport;

pub use cache::MasonryCache;
pub use mosaic_core::{IntrinsicSize, MasonryItem, Tile};
use serde::{Deserialize, Serialize};
pub use viewport::Virtualizer;

/// Default lower bound on a column's pixel width (used only to derive the
/// column count).
pub const DEFAULT_MIN_ITEM_WIDTH: i32 = 256;
/// Default pixel spacing between a column's successive tiles and between
/// adjacent columns.
pub const DEFAULT_GAP: i32 = 16;
/// Default height for items without a usable intrinsic aspect.
pub const DEFAULT_PLACEHOLDER_HEIGHT: i32 = 128;
/// Default beam width. Larger values trade compute for balance quality.
pub const DEFAULT_BEAM_WIDTH: usize = 5;

/// The masonry layout engine.
///
/// Configured once at construction; every call to [`Masonry::compute`] is a
/// pure function of `(items, container_width)` under that configuration.
///
/// # Example
///
/// ```
/// use mosaic_layout::Masonry;
///
/// let engine = Masonry::new()
///     .with_min_item_width(256)
///     .with_gap(16)
///     .with_placeholder_height(128)
///     .with_beam_width(5);
///
/// assert_eq!(engine.column_count(1056), 3);
/// assert_eq!(engine.item_width(1056), 341);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Masonry {
    /// Lower bound on a column's pixel width.
    min_item_width: i32,
    /// Spacing between successive tiles and between adjacent columns.
    gap: i32,
    /// Height assigned to items without a usable aspect.
    placeholder_height: i32,
    /// Number of candidate layouts retained per search step.
    beam_width: usize,
}

impl Default for Masonry {
    fn default() -> Self {
        Self {
            min_item_width: DEFAULT_MIN_ITEM_WIDTH,
            gap: DEFAULT_GAP,
            placeholder_height: DEFAULT_PLACEHOLDER_HEIGHT,
            beam_width: DEFAULT_BEAM_WIDTH,
        }
    }
}

impl Masonry {
    /// Create an engine with the default configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum item width. Clamped to at least 1 pixel.
    #[must_use]
    pub fn with_min_item_width(mut self, px: i32) -> Self {
        self.min_item_width = px.max(1);
        self
    }

    /// Set the gap between tiles and between columns. Clamped non-negative.
    #[must_use]
    pub fn with_gap(mut self, px: i32) -> Self {
        self.gap = px.max(0);
        self
    }

    /// Set the placeholder height for items without a usable aspect.
    /// Clamped non-negative.
    #[must_use]
    pub fn with_placeholder_height(mut self, px: i32) -> Self {
        self.placeholder_height = px.max(0);
        self
    }

    /// Set the beam width. Clamped to at least 1.
    #[must_use]
    pub fn with_beam_width(mut self, width: usize) -> Self {
        self.beam_width = width.max(1);
        self
    }

    /// The configured minimum item width.
    #[inline]
    #[must_use]
    pub fn min_item_width(&self) -> i32 {
        self.min_item_width
    }

    /// The configured gap.
    #[inline]
    #[must_use]
    pub fn gap(&self) -> i32 {
        self.gap
    }

    /// The configured placeholder height.
    #[inline]
    #[must_use]
    pub fn placeholder_height(&self) -> i32 {
        self.placeholder_height
    }

    /// The configured beam width.
    #[inline]
    #[must_use]
    pub fn beam_width(&self) -> usize {
        self.beam_width
    }

    /// Number of columns derived from a container width.
    ///
    /// `max(1, (width + gap) / (min_item_width + gap))` for positive widths;
    /// a non-positive width has nothing to lay out and yields 0.
    #[must_use]
    pub fn column_count(&self, container_width: i32) -> usize {
        if container_width <= 0 {
            return 0;
        }
        let per_column = self.min_item_width.saturating_add(self.gap);
        let count = container_width.saturating_add(self.gap) / per_column;
        count.max(1) as usize
    }

    /// Pixel width of every tile at the given container width: the width
    /// remaining after inter-column gaps, divided evenly and truncated.
    #[must_use]
    pub fn item_width(&self, container_width: i32) -> i32 {
        let columns = self.column_count(container_width) as i32;
        if columns == 0 {
            return 0;
        }
        let gaps = self.gap.saturating_mul(columns - 1);
        ((container_width - gaps) / columns).max(0)
    }

    /// Height of a tile at the given item width.
    ///
    /// Items with a valid intrinsic aspect scale to the item width with the
    /// fractional pixel truncated; anything else gets the placeholder
    /// height. Both the committed placement and the search's greedy playout
    /// use this one derivation.
    #[must_use]
    pub fn tile_height(&self, item_width: i32, intrinsic: Option<IntrinsicSize>) -> i32 {
        let Some(size) = intrinsic.and_then(IntrinsicSize::validated) else {
            return self.placeholder_height;
        };
        let height = (item_width as f32 / size.width * size.height).floor();
        if height.is_finite() {
            (height as i32).max(0)
        } else {
            self.placeholder_height
        }
    }

    /// Whether a resize from `old_width` to `new_width` crosses a
    /// column-count breakpoint (and would therefore force a full re-search
    /// in [`MasonryCache::update`]).
    #[must_use]
    pub fn breakpoint_crossed(&self, old_width: i32, new_width: i32) -> bool {
        self.column_count(old_width) != self.column_count(new_width)
    }

    /// Lay out `items` into a committed column layout.
    ///
    /// A non-positive width or an empty item list yields the empty layout
    /// (zero columns); that is a valid "nothing to lay out yet" state, not
    /// an error. Otherwise every item is placed in input order by a
    /// beam search scored with a greedy playout of the remaining items; see
    /// the crate docs for the balance objective.
    #[must_use]
    pub fn compute<T: MasonryItem>(&self, items: &[T], container_width: i32) -> MasonryLayout {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "masonry_compute",
            items = items.len(),
            width = container_width,
            beam_width = self.beam_width
        )
        .entered();

        if container_width <= 0 || items.is_empty() {
            return MasonryLayout::empty();
        }

        let columns = self.column_count(container_width);
        let item_width = self.item_width(container_width);
        let heights: Vec<i32> = items
            .iter()
            .map(|item| self.tile_height(item_width, item.intrinsic_size()))
            .collect();

        let placed = search::place_all(&heights, columns, item_width, self.gap, self.beam_width);
        MasonryLayout {
            columns: placed,
            item_width,
        }
    }
}

/// A committed masonry layout: columns ordered left to right, each an
/// ordered stack of tiles.
///
/// Invariants upheld by the engine:
/// - every input item appears in exactly one tile
/// - within a column, `next.top >= prev.top + prev.height` (no overlap)
/// - all geometry is non-negative integer pixels
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasonryLayout {
    /// Tiles per column, in placement order (equivalently increasing top).
    pub(crate) columns: Vec<Vec<Tile>>,
    /// The tile width shared by every column.
    pub(crate) item_width: i32,
}

impl MasonryLayout {
    /// The empty layout: zero columns, zero content height.
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of columns.
    #[inline]
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// All columns, left to right.
    #[inline]
    #[must_use]
    pub fn columns(&self) -> &[Vec<Tile>] {
        &self.columns
    }

    /// Tiles of one column, or `None` when out of bounds.
    #[inline]
    #[must_use]
    pub fn column(&self, idx: usize) -> Option<&[Tile]> {
        self.columns.get(idx).map(Vec::as_slice)
    }

    /// The tile width shared by every column.
    #[inline]
    #[must_use]
    pub fn item_width(&self) -> i32 {
        self.item_width
    }

    /// Total number of tiles (equals the input item count).
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    /// Whether the layout holds no tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(Vec::is_empty)
    }

    /// Iterate over all tiles, column by column.
    pub fn iter_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.columns.iter().flatten()
    }

    /// Bottom edge of each column: the last tile's bottom, 0 when empty.
    #[must_use]
    pub fn column_heights(&self) -> Vec<i32> {
        self.columns
            .iter()
            .map(|col| col.last().map_or(0, Tile::bottom))
            .collect()
    }

    /// Total content height: the tallest column's bottom edge, 0 for the
    /// empty layout. This is the virtual height a scroll container should
    /// report.
    #[must_use]
    pub fn content_height(&self) -> i32 {
        self.column_heights().into_iter().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_derivation_worked_example() {
        // 1056 px container, 256 px minimum, 16 px gap.
        let engine = Masonry::new().with_min_item_width(256).with_gap(16);
        assert_eq!(engine.column_count(1056), 3); // floor(1072 / 272)
        assert_eq!(engine.item_width(1056), 341); // floor((1056 - 32) / 3)
    }

    #[test]
    fn narrow_container_still_gets_one_column() {
        let engine = Masonry::new().with_min_item_width(256).with_gap(16);
        assert_eq!(engine.column_count(100), 1);
        // Single column: no inter-column gap, full width.
        assert_eq!(engine.item_width(100), 100);
    }

    #[test]
    fn non_positive_width_has_zero_columns() {
        let engine = Masonry::new();
        assert_eq!(engine.column_count(0), 0);
        assert_eq!(engine.column_count(-50), 0);
        assert_eq!(engine.item_width(0), 0);
    }

    #[test]
    fn tile_height_truncates_toward_zero() {
        let engine = Masonry::new();
        // 341 / 1920 * 1080 = 191.8125
        let aspect = Some(IntrinsicSize::new(1920.0, 1080.0));
        assert_eq!(engine.tile_height(341, aspect), 191);
    }

    #[test]
    fn tile_height_placeholder_for_missing_or_bad_aspect() {
        let engine = Masonry::new().with_placeholder_height(96);
        assert_eq!(engine.tile_height(341, None), 96);
        assert_eq!(engine.tile_height(341, Some(IntrinsicSize::new(0.0, 400.0))), 96);
        assert_eq!(
            engine.tile_height(341, Some(IntrinsicSize::new(f32::NAN, 400.0))),
            96
        );
        assert_eq!(
            engine.tile_height(341, Some(IntrinsicSize::new(400.0, f32::INFINITY))),
            96
        );
    }

    #[test]
    fn placeholder_height_ignores_container_width() {
        let items = vec![None::<IntrinsicSize>];
        let engine = Masonry::new();
        for width in [300, 700, 1056, 2400] {
            let layout = engine.compute(&items, width);
            let tile = layout.iter_tiles().next().copied();
            assert_eq!(tile.map(|t| t.height), Some(DEFAULT_PLACEHOLDER_HEIGHT));
        }
    }

    #[test]
    fn empty_inputs_yield_empty_layout() {
        let engine = Masonry::new();
        let no_items: Vec<Option<IntrinsicSize>> = Vec::new();
        assert_eq!(engine.compute(&no_items, 1056), MasonryLayout::empty());

        let items = vec![Some(IntrinsicSize::new(4.0, 3.0))];
        assert_eq!(engine.compute(&items, 0), MasonryLayout::empty());
        assert_eq!(engine.compute(&items, -10), MasonryLayout::empty());
        assert_eq!(MasonryLayout::empty().content_height(), 0);
    }

    #[test]
    fn every_item_appears_exactly_once() {
        let items: Vec<Option<IntrinsicSize>> = (0..40)
            .map(|i| {
                if i % 5 == 0 {
                    None
                } else {
                    Some(IntrinsicSize::new(400.0, 100.0 + i as f32 * 37.0))
                }
            })
            .collect();
        let layout = Masonry::new().compute(&items, 1056);

        assert_eq!(layout.len(), items.len());
        let mut seen = vec![false; items.len()];
        for tile in layout.iter_tiles() {
            assert!(!seen[tile.item], "item {} placed twice", tile.item);
            seen[tile.item] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn columns_never_overlap() {
        let items: Vec<Option<IntrinsicSize>> = (0..30)
            .map(|i| Some(IntrinsicSize::new(300.0, 100.0 + (i * 53 % 400) as f32)))
            .collect();
        let layout = Masonry::new().compute(&items, 1056);

        for column in layout.columns() {
            for pair in column.windows(2) {
                assert!(
                    pair[1].top >= pair[0].top + pair[0].height,
                    "tiles overlap: {:?} then {:?}",
                    pair[0],
                    pair[1]
                );
            }
        }
    }

    #[test]
    fn single_column_stacks_in_input_order() {
        let items = vec![None::<IntrinsicSize>; 3];
        let engine = Masonry::new().with_min_item_width(256).with_gap(16);
        let layout = engine.compute(&items, 300);

        assert_eq!(layout.column_count(), 1);
        let column = layout.column(0).unwrap();
        assert_eq!(column.len(), 3);
        // 128 high placeholders with 16 px gaps.
        assert_eq!(column[0].top, 0);
        assert_eq!(column[1].top, 144);
        assert_eq!(column[2].top, 288);
        assert_eq!(
            column.iter().map(|t| t.item).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert_eq!(layout.content_height(), 416);
    }

    #[test]
    fn tiles_sit_at_their_column_left_edge() {
        let items = vec![None::<IntrinsicSize>; 9];
        let engine = Masonry::new().with_min_item_width(256).with_gap(16);
        let layout = engine.compute(&items, 1056);

        for (idx, column) in layout.columns().iter().enumerate() {
            let left = idx as i32 * (341 + 16);
            for tile in column {
                assert_eq!(tile.left, left);
                assert_eq!(tile.width, 341);
            }
        }
    }

    #[test]
    fn compute_is_deterministic() {
        let items: Vec<Option<IntrinsicSize>> = (0..25)
            .map(|i| Some(IntrinsicSize::new(500.0, (i * 97 % 700 + 50) as f32)))
            .collect();
        let engine = Masonry::new().with_beam_width(7);
        assert_eq!(engine.compute(&items, 1300), engine.compute(&items, 1300));
    }

    #[test]
    fn breakpoint_detection_matches_column_count() {
        let engine = Masonry::new().with_min_item_width(256).with_gap(16);
        assert!(!engine.breakpoint_crossed(1056, 1100)); // 3 -> 3
        assert!(engine.breakpoint_crossed(1056, 800)); // 3 -> 2
        assert!(engine.breakpoint_crossed(1056, 0)); // 3 -> 0
    }

    #[test]
    fn config_clamps_degenerate_values() {
        let engine = Masonry::new()
            .with_min_item_width(-5)
            .with_gap(-3)
            .with_beam_width(0)
            .with_placeholder_height(-1);
        // min_item_width 1, gap 0: every pixel is a column.
        assert_eq!(engine.column_count(4), 4);
        let layout = engine.compute(&vec![None::<IntrinsicSize>; 2], 4);
        assert_eq!(layout.len(), 2);
        for tile in layout.iter_tiles() {
            assert_eq!(tile.height, 0);
        }
    }

    #[test]
    fn layout_serde_round_trip() {
        let items = vec![Some(IntrinsicSize::new(4.0, 3.0)), None];
        let layout = Masonry::new().compute(&items, 700);
        let json = serde_json::to_string(&layout).unwrap();
        let back: MasonryLayout = serde_json::from_str(&json).unwrap();
        assert_eq!(layout, back);
    }
}
