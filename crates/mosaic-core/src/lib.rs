#![forbid(unsafe_code)]

//! Core types for the mosaic masonry layout engine.
//!
//! # Role in mosaic
//! `mosaic-core` is the leaf crate. It owns the pixel-space placement record
//! ([`geometry::Tile`]) and the item model ([`item::MasonryItem`],
//! [`item::IntrinsicSize`]) that the layout solver consumes. It performs no
//! layout itself.
//!
//! # Units
//! All geometry is in integer content pixels (`i32`). Fractional pixels are
//! truncated, never rounded, so identical inputs always produce
//! byte-identical placements.

pub mod geometry;
pub mod item;

pub use geometry::Tile;
pub use item::{IntrinsicSize, MasonryItem};
