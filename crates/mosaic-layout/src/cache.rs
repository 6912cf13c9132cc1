#![forbid(unsafe_code)]

//! Incremental layout state.
//!
//! Re-running the beam search on every container resize is wasteful: a
//! scrollbar appearing shifts the width by a few pixels without changing
//! the column count, and the prior item-to-column assignment is still the
//! right one. [`MasonryCache`] keeps the committed layout between updates
//! and only re-searches when the column count crosses a breakpoint (or the
//! item list itself changed); otherwise it re-walks each column and
//! refreshes tile geometry at the new item width.
//!
//! The state is owned explicitly by the caller, not hidden in a global, so
//! independent layout instances coexist and test in isolation. Callers
//! serialize `update` calls; the cache itself is single-threaded and
//! synchronous.

use crate::{Masonry, MasonryItem, MasonryLayout};

/// State carried between update cycles.
#[derive(Debug, Clone)]
struct CachedLayout {
    layout: MasonryLayout,
    column_count: usize,
    item_width: i32,
}

/// Incremental wrapper around a [`Masonry`] engine.
///
/// # Example
///
/// ```
/// use mosaic_layout::{IntrinsicSize, Masonry, MasonryCache};
///
/// let mut cache = MasonryCache::new(Masonry::new());
/// let items = vec![Some(IntrinsicSize::new(4.0, 3.0)); 12];
///
/// let first = cache.update(&items, 1056).clone();
/// // 20 px narrower: still 3 columns, so only geometry is recomputed.
/// let second = cache.update(&items, 1036);
/// assert_eq!(first.column_count(), second.column_count());
/// ```
#[derive(Debug, Clone)]
pub struct MasonryCache {
    engine: Masonry,
    state: Option<CachedLayout>,
}

impl MasonryCache {
    /// Create a cache with no prior layout.
    #[must_use]
    pub fn new(engine: Masonry) -> Self {
        Self {
            engine,
            state: None,
        }
    }

    /// The wrapped engine configuration.
    #[inline]
    #[must_use]
    pub fn engine(&self) -> &Masonry {
        &self.engine
    }

    /// The committed layout from the last update, if any.
    #[must_use]
    pub fn layout(&self) -> Option<&MasonryLayout> {
        self.state.as_ref().map(|state| &state.layout)
    }

    /// Total content height of the committed layout, 0 before the first
    /// update. This is the value to publish to the scroll-range collaborator.
    #[must_use]
    pub fn content_height(&self) -> i32 {
        self.layout().map_or(0, MasonryLayout::content_height)
    }

    /// Drop the prior layout; the next update runs a full re-search.
    pub fn reset(&mut self) {
        self.state = None;
    }

    /// Recompute the layout for the current inputs.
    ///
    /// Full re-search when there is no prior layout, the derived column
    /// count changed, or the item count no longer matches the cached tile
    /// count (stale tile indices would otherwise dangle). Otherwise the
    /// prior column membership and ordering are preserved exactly and each
    /// column is re-stacked from `top = 0` at the new item width.
    pub fn update<T: MasonryItem>(
        &mut self,
        items: &[T],
        container_width: i32,
    ) -> &MasonryLayout {
        let columns = self.engine.column_count(container_width);
        let next = match self.state.take() {
            Some(mut state)
                if state.column_count == columns && state.layout.len() == items.len() =>
            {
                let item_width = self.engine.item_width(container_width);
                reflow(&self.engine, &mut state.layout, items, item_width);
                state.item_width = item_width;
                state
            }
            _ => {
                let layout = self.engine.compute(items, container_width);
                CachedLayout {
                    column_count: layout.column_count(),
                    item_width: layout.item_width(),
                    layout,
                }
            }
        };
        &self.state.insert(next).layout
    }
}

/// Re-stack every column at the new item width, keeping membership and
/// order. Heights come from the same derivation the full search uses.
fn reflow<T: MasonryItem>(
    engine: &Masonry,
    layout: &mut MasonryLayout,
    items: &[T],
    item_width: i32,
) {
    let gap = engine.gap();
    layout.item_width = item_width;
    for (col, column) in layout.columns.iter_mut().enumerate() {
        let left = (col as i32).saturating_mul(item_width.saturating_add(gap));
        let mut running_top = 0i32;
        for tile in column.iter_mut() {
            let intrinsic = items.get(tile.item).and_then(MasonryItem::intrinsic_size);
            let height = engine.tile_height(item_width, intrinsic);
            tile.top = running_top;
            tile.left = left;
            tile.width = item_width;
            tile.height = height;
            running_top = running_top.saturating_add(height).saturating_add(gap);
        }
    }
}
