#![forbid(unsafe_code)]

//! Visible-tile windowing over a committed layout.
//!
//! Rendering every tile of a large collection defeats the point of
//! virtual scrolling; only the tiles intersecting the viewport band plus a
//! small overscan buffer should exist at any time. [`Virtualizer`] computes
//! that subset per column.
//!
//! Within a column both tile tops and tile bottoms are monotone
//! non-decreasing (the engine's no-overlap invariant), so both band
//! boundaries are found with `partition_point` binary searches.

use std::ops::Range;

use crate::{MasonryLayout, Tile};

/// Default number of extra tiles kept on each side of the visible band,
/// absorbing fast scrolls without flicker.
pub const DEFAULT_OVERSCAN: usize = 5;

/// Computes the visible tile window for a scroll position.
///
/// # Example
///
/// ```
/// use mosaic_layout::{IntrinsicSize, Masonry, Virtualizer};
///
/// let items = vec![Some(IntrinsicSize::new(4.0, 3.0)); 60];
/// let layout = Masonry::new().compute(&items, 1056);
///
/// let virtualizer = Virtualizer::new().with_overscan(2);
/// let visible = virtualizer.visible(&layout, 0, 600);
/// assert!(visible.len() < items.len());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Virtualizer {
    /// Extra tiles rendered outside the visible band, per side.
    overscan: usize,
}

impl Default for Virtualizer {
    fn default() -> Self {
        Self {
            overscan: DEFAULT_OVERSCAN,
        }
    }
}

impl Virtualizer {
    /// Create a virtualizer with the default overscan.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the overscan amount.
    #[must_use]
    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    /// The configured overscan.
    #[inline]
    #[must_use]
    pub fn overscan(&self) -> usize {
        self.overscan
    }

    /// The window of one column's tiles for the band
    /// `[scroll_top, scroll_top + viewport_height)`.
    ///
    /// Returns `None` when the column contributes nothing: it is empty, or
    /// every tile's bottom lies above `scroll_top` (fully scrolled past).
    /// Otherwise the range spans from the first tile whose bottom reaches
    /// the band to the first tile starting below it (or the last tile when
    /// none does), expanded by the overscan on both sides and clamped to
    /// the column bounds.
    #[must_use]
    pub fn column_range(
        &self,
        column: &[Tile],
        scroll_top: i32,
        viewport_height: i32,
    ) -> Option<Range<usize>> {
        let first = column.partition_point(|tile| tile.bottom() < scroll_top);
        if first == column.len() {
            return None;
        }

        let band_bottom = scroll_top.saturating_add(viewport_height.max(0));
        let mut last = column.partition_point(|tile| tile.top < band_bottom);
        if last == column.len() {
            last = column.len() - 1;
        }

        let start = first.saturating_sub(self.overscan);
        let end = last.saturating_add(self.overscan).min(column.len() - 1);
        Some(start..end + 1)
    }

    /// The visible tiles of every column, in source column order. Slices
    /// are concatenated, not merged or re-sorted.
    #[must_use]
    pub fn visible(&self, layout: &MasonryLayout, scroll_top: i32, viewport_height: i32) -> Vec<Tile> {
        let mut tiles = Vec::new();
        for column in layout.columns() {
            if let Some(range) = self.column_range(column, scroll_top, viewport_height) {
                tiles.extend_from_slice(&column[range]);
            }
        }
        tiles
    }

    /// Borrow-only variant of [`Virtualizer::visible`].
    #[must_use]
    pub fn visible_refs<'a>(
        &self,
        layout: &'a MasonryLayout,
        scroll_top: i32,
        viewport_height: i32,
    ) -> Vec<&'a Tile> {
        let mut tiles = Vec::new();
        for column in layout.columns() {
            if let Some(range) = self.column_range(column, scroll_top, viewport_height) {
                tiles.extend(column[range].iter());
            }
        }
        tiles
    }
}
