//! Pure layout pass: points in, draw commands out
//!
//! Nothing here touches a pixel buffer. `render::image` executes the
//! resulting commands onto a surface.

use super::geometry::{self, Label, MARGIN, POINT_RADIUS, color, leader, tag};
use crate::domain::{Edge, EdgeSlots, Point, SurfaceSize};

/// A single drawing step, in surface space
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Blit the source image with its top-left corner at (x, y)
    Image { x: f32, y: f32 },
    /// Straight stroke with butt caps
    Line {
        from: (f32, f32),
        to: (f32, f32),
        width: f32,
        color: [u8; 4],
    },
    /// Filled axis-aligned rectangle
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: [u8; 4],
    },
    /// Bold text centred horizontally on `center_x`, sitting on `baseline_y`,
    /// shrunk if needed to fit within `max_width`
    Text {
        center_x: f32,
        baseline_y: f32,
        text: String,
        size: f32,
        max_width: f32,
        color: [u8; 4],
    },
}

/// Compute every label placement for the given points
///
/// Edges are laid out left, right, top, bottom; within an edge labels follow
/// the slot order.
pub fn labels(size: SurfaceSize, points: &[Point]) -> Vec<Label> {
    let slots = EdgeSlots::assign(size, points);
    let mut labels = Vec::with_capacity(points.len());
    for edge in [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom] {
        let group = slots.get(edge);
        for (i, point) in group.iter().enumerate() {
            let (anchor_x, anchor_y) = geometry::anchor(size, edge, i + 1, group.len());
            labels.push(Label {
                edge,
                anchor_x,
                anchor_y,
                point: *point,
            });
        }
    }
    labels
}

/// Full render of a surface: the image, then one callout per point
pub fn layout(size: SurfaceSize, points: &[Point]) -> Vec<DrawCommand> {
    let labels = labels(size, points);
    let mut commands = Vec::with_capacity(1 + labels.len() * 5);
    commands.push(DrawCommand::Image {
        x: MARGIN,
        y: MARGIN,
    });
    for label in &labels {
        push_callout(&mut commands, label);
    }
    commands
}

/// Leader line and tag box for one label
///
/// Halo strokes go first so each solid layer covers the seams below it.
fn push_callout(commands: &mut Vec<DrawCommand>, label: &Label) {
    let anchor = (label.anchor_x, label.anchor_y);
    let target = (label.point.x, label.point.y);
    let side = POINT_RADIUS * 2.0;
    let left = label.anchor_x - POINT_RADIUS;
    let top = label.anchor_y - POINT_RADIUS;

    commands.push(DrawCommand::Line {
        from: anchor,
        to: target,
        width: leader::HALO_WIDTH,
        color: color::HALO,
    });
    commands.push(DrawCommand::Rect {
        x: left,
        y: top,
        width: side,
        height: side,
        color: color::HALO,
    });
    commands.push(DrawCommand::Line {
        from: anchor,
        to: target,
        width: leader::SOLID_WIDTH,
        color: color::SOLID,
    });
    commands.push(DrawCommand::Rect {
        x: left + tag::INSET,
        y: top + tag::INSET,
        width: side - 2.0 * tag::INSET,
        height: side - 2.0 * tag::INSET,
        color: color::SOLID,
    });

    let size = tag::font_size();
    commands.push(DrawCommand::Text {
        center_x: label.anchor_x,
        baseline_y: label.anchor_y + size / 2.0,
        text: label.point.index.to_string(),
        size,
        max_width: side - 2.0 * tag::INSET,
        color: color::TEXT,
    });
}
