//! Shared geometry calculations for callout labels
//!
//! This module contains the constants and label-placement math used by the
//! layout pass. Everything is in surface space.

use crate::domain::{Edge, Point, SurfaceSize};

/// Blank border around the image reserved for labels
pub const MARGIN: f32 = 40.0;
/// Half the side of a tag box, and the label offset inward from the true edge
pub const POINT_RADIUS: f32 = 16.0;

/// Leader line geometry constants
pub mod leader {
    /// Translucent halo stroke width
    pub const HALO_WIDTH: f32 = 5.0;
    /// Solid stroke width drawn over the halo
    pub const SOLID_WIDTH: f32 = 2.0;
}

/// Tag box geometry constants
pub mod tag {
    /// Inset of the solid inner square on each side
    pub const INSET: f32 = 2.0;
    /// Label text size relative to `POINT_RADIUS`
    pub const FONT_SCALE: f32 = 1.2;

    pub fn font_size() -> f32 {
        super::POINT_RADIUS * FONT_SCALE
    }
}

/// Label colours as straight RGBA
pub mod color {
    /// `#fff4`
    pub const HALO: [u8; 4] = [255, 255, 255, 0x44];
    pub const SOLID: [u8; 4] = [0, 0, 0, 255];
    pub const TEXT: [u8; 4] = [255, 255, 255, 255];
}

/// Position of the `rank`-th (1-based) of `count` labels along a span starting
/// at `MARGIN` and ending at `extent - MARGIN`
///
/// Gaps before the first label, between labels, and after the last label are
/// all equal.
#[inline]
pub fn slot_position(extent: f32, rank: usize, count: usize) -> f32 {
    let span = extent - 2.0 * MARGIN;
    MARGIN + span * rank as f32 / (count + 1) as f32
}

/// A label anchored on one edge of the surface
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Label {
    pub edge: Edge,
    /// Centre of the tag box
    pub anchor_x: f32,
    pub anchor_y: f32,
    /// The annotated point the leader line ends at
    pub point: Point,
}

/// Anchor for the `rank`-th (1-based) of `count` labels on `edge`
pub fn anchor(size: SurfaceSize, edge: Edge, rank: usize, count: usize) -> (f32, f32) {
    match edge {
        Edge::Left => (POINT_RADIUS, slot_position(size.height, rank, count)),
        Edge::Right => (
            size.width - POINT_RADIUS,
            slot_position(size.height, rank, count),
        ),
        Edge::Top => (slot_position(size.width, rank, count), POINT_RADIUS),
        Edge::Bottom => (
            slot_position(size.width, rank, count),
            size.height - POINT_RADIUS,
        ),
    }
}

/// Uniform display scale that fits the surface inside a container, keeping a
/// `MARGIN` of breathing room
///
/// Only affects presentation; coordinate math stays in surface space.
pub fn display_scale(size: SurfaceSize, container_width: f32, container_height: f32) -> f32 {
    let scale_w = (container_width - MARGIN) / size.width;
    let scale_h = (container_height - MARGIN) / size.height;
    scale_w.min(scale_h)
}
