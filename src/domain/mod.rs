//! Pure domain types with minimal dependencies
//!
//! This module contains the point list and the edge-assignment rules.
//! Types here have no rendering dependencies (tiny-skia, image) so the
//! layout pass can be tested without a surface.

pub mod geometry;
pub mod point;

pub use geometry::*;
pub use point::*;
