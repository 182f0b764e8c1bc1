//! Surface rendering using tiny-skia
//!
//! Executes the draw commands produced by `render::layout` onto a pixmap.

use tiny_skia::{Color, LineCap, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform};

use super::geometry::MARGIN;
use super::layout::{self, DrawCommand};
use super::surface::Surface;
use super::text;
use crate::capture::image::SourceImage;
use crate::domain::{Point, SurfaceSize};

fn solid_paint(color: [u8; 4]) -> Paint<'static> {
    let [r, g, b, a] = color;
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

/// Stroke a straight line with butt caps
fn draw_line(pixmap: &mut Pixmap, from: (f32, f32), to: (f32, f32), width: f32, color: [u8; 4]) {
    let mut pb = PathBuilder::new();
    pb.move_to(from.0, from.1);
    pb.line_to(to.0, to.1);
    let Some(path) = pb.finish() else {
        return;
    };

    let stroke = Stroke {
        width,
        line_cap: LineCap::Butt,
        ..Default::default()
    };
    pixmap.stroke_path(
        &path,
        &solid_paint(color),
        &stroke,
        Transform::identity(),
        None,
    );
}

fn fill_rect(pixmap: &mut Pixmap, x: f32, y: f32, width: f32, height: f32, color: [u8; 4]) {
    if let Some(rect) = tiny_skia::Rect::from_xywh(x, y, width, height) {
        pixmap.fill_rect(rect, &solid_paint(color), Transform::identity(), None);
    }
}

fn draw_text(
    pixmap: &mut Pixmap,
    origin: (f32, f32),
    txt: &str,
    size: f32,
    max_width: f32,
    color: [u8; 4],
) {
    let paint = solid_paint(color);
    let (center_x, baseline_y) = origin;
    for (x, y, w, h) in text::glyph_cells(center_x, baseline_y, txt, size, max_width) {
        if let Some(rect) = tiny_skia::Rect::from_xywh(x, y, w, h) {
            pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        }
    }
}

/// Draw a command list onto a surface, in order
///
/// `DrawCommand::Image` blits `image`; later commands paint over earlier ones.
pub fn execute(surface: &mut Surface, image: &SourceImage, commands: &[DrawCommand]) {
    let source = image.to_pixmap();
    let pixmap = surface.pixmap_mut();

    for command in commands {
        match command {
            DrawCommand::Image { x, y } => {
                if let Some(source) = source.as_ref() {
                    pixmap.draw_pixmap(
                        x.round() as i32,
                        y.round() as i32,
                        source.as_ref(),
                        &PixmapPaint::default(),
                        Transform::identity(),
                        None,
                    );
                }
            }
            DrawCommand::Line {
                from,
                to,
                width,
                color,
            } => draw_line(pixmap, *from, *to, *width, *color),
            DrawCommand::Rect {
                x,
                y,
                width,
                height,
                color,
            } => fill_rect(pixmap, *x, *y, *width, *height, *color),
            DrawCommand::Text {
                center_x,
                baseline_y,
                text,
                size,
                max_width,
                color,
            } => draw_text(pixmap, (*center_x, *baseline_y), text, *size, *max_width, *color),
        }
    }
}

/// Render `image` framed by margins with a callout for every point
///
/// Returns `None` if the surface cannot be allocated.
pub fn paint(image: &SourceImage, points: &[Point]) -> Option<Surface> {
    let size = SurfaceSize::around_image(image.width(), image.height(), MARGIN);
    let mut pixmap = Pixmap::new(size.width as u32, size.height as u32)?;
    pixmap.fill(Color::TRANSPARENT);
    log::debug!(
        "Painting {}x{} surface with {} points",
        pixmap.width(),
        pixmap.height(),
        points.len()
    );

    let mut surface = Surface::from_pixmap(pixmap);
    execute(&mut surface, image, &layout::layout(size, points));
    Some(surface)
}
