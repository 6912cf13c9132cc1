#![forbid(unsafe_code)]

//! Pixel-space placement records.

use serde::{Deserialize, Serialize};

/// A committed placement for one source item.
///
/// Coordinates are content pixels with the origin at the top-left of the
/// laid-out region. `item` is the index of the source item in the caller's
/// input slice; the layout engine emits exactly one tile per input item, so
/// an index never appears twice in a committed layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    /// Top edge (inclusive), in content pixels.
    pub top: i32,
    /// Left edge (inclusive), in content pixels.
    pub left: i32,
    /// Width in content pixels.
    pub width: i32,
    /// Height in content pixels.
    pub height: i32,
    /// Index of the source item in the input sequence.
    pub item: usize,
}

impl Tile {
    /// Create a new tile. Negative geometry is clamped to zero.
    #[inline]
    #[must_use]
    pub fn new(top: i32, left: i32, width: i32, height: i32, item: usize) -> Self {
        Self {
            top: top.max(0),
            left: left.max(0),
            width: width.max(0),
            height: height.max(0),
            item,
        }
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.top.saturating_add(self.height)
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.left.saturating_add(self.width)
    }

    /// Check whether the tile's vertical extent intersects the half-open
    /// band `[band_top, band_bottom)`.
    #[inline]
    #[must_use]
    pub const fn intersects_band(&self, band_top: i32, band_bottom: i32) -> bool {
        self.bottom() > band_top && self.top < band_bottom
    }
}
