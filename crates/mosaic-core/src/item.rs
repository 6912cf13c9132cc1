#![forbid(unsafe_code)]

//! The item model consumed by the layout engine.
//!
//! Items are opaque caller-owned records. The engine only ever asks one
//! question of them: do you know your intrinsic aspect? Items without a
//! usable aspect get the configured placeholder height.

use serde::{Deserialize, Serialize};

/// Intrinsic source dimensions of an item, e.g. a thumbnail's pixel size.
///
/// Only the width:height ratio matters to layout; the absolute values are
/// never used directly. Malformed aspects (zero, negative, NaN, infinite)
/// are treated as absent rather than rejected, so one bad record can never
/// poison a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntrinsicSize {
    /// Source width. Must be finite and strictly positive to be usable.
    pub width: f32,
    /// Source height. Must be finite and strictly positive to be usable.
    pub height: f32,
}

impl IntrinsicSize {
    /// Create a new intrinsic size.
    #[inline]
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether both components are finite and strictly positive.
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.width > 0.0 && self.height.is_finite() && self.height > 0.0
    }

    /// Return `Some(self)` only when the aspect is usable.
    #[inline]
    #[must_use]
    pub fn validated(self) -> Option<Self> {
        if self.is_valid() { Some(self) } else { None }
    }
}

/// An item the masonry engine can lay out.
///
/// Implement this for your own record types; the engine addresses items by
/// their input index, so the trait carries no identity of its own.
pub trait MasonryItem {
    /// The item's intrinsic aspect, if known.
    ///
    /// Returning `None` (or an invalid size) makes the engine fall back to
    /// its fixed placeholder height.
    fn intrinsic_size(&self) -> Option<IntrinsicSize>;
}

impl MasonryItem for IntrinsicSize {
    fn intrinsic_size(&self) -> Option<IntrinsicSize> {
        Some(*self)
    }
}

impl MasonryItem for Option<IntrinsicSize> {
    fn intrinsic_size(&self) -> Option<IntrinsicSize> {
        *self
    }
}

impl MasonryItem for (f32, f32) {
    fn intrinsic_size(&self) -> Option<IntrinsicSize> {
        Some(IntrinsicSize::new(self.0, self.1))
    }
}

impl MasonryItem for (u32, u32) {
    fn intrinsic_size(&self) -> Option<IntrinsicSize> {
        Some(IntrinsicSize::new(self.0 as f32, self.1 as f32))
    }
}

impl<T: MasonryItem> MasonryItem for &T {
    fn intrinsic_size(&self) -> Option<IntrinsicSize> {
        (*self).intrinsic_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_finite_aspect_is_valid() {
        assert!(IntrinsicSize::new(1920.0, 1080.0).is_valid());
        assert!(IntrinsicSize::new(0.5, 0.25).is_valid());
    }

    #[test]
    fn degenerate_aspects_are_invalid() {
        assert!(!IntrinsicSize::new(0.0, 1080.0).is_valid());
        assert!(!IntrinsicSize::new(1920.0, 0.0).is_valid());
        assert!(!IntrinsicSize::new(-100.0, 100.0).is_valid());
        assert!(!IntrinsicSize::new(f32::NAN, 100.0).is_valid());
        assert!(!IntrinsicSize::new(100.0, f32::INFINITY).is_valid());
    }

    #[test]
    fn validated_filters_bad_aspects() {
        assert_eq!(
            IntrinsicSize::new(4.0, 3.0).validated(),
            Some(IntrinsicSize::new(4.0, 3.0))
        );
        assert_eq!(IntrinsicSize::new(f32::NAN, 3.0).validated(), None);
    }

    #[test]
    fn tuple_impls_forward_aspect() {
        assert_eq!(
            (640.0f32, 480.0f32).intrinsic_size(),
            Some(IntrinsicSize::new(640.0, 480.0))
        );
        assert_eq!(
            (640u32, 480u32).intrinsic_size(),
            Some(IntrinsicSize::new(640.0, 480.0))
        );
    }

    #[test]
    fn option_impl_passes_none_through() {
        let absent: Option<IntrinsicSize> = None;
        assert_eq!(absent.intrinsic_size(), None);
    }
}
