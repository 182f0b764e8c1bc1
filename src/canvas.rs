//! Annotation canvas: the editing session state
//!
//! Owns the current image and the point stack. Every mutation triggers a full
//! repaint of the surface from scratch.

use crate::capture::{ImageSource, Permission, SourceImage};
use crate::domain::{EdgeSlots, Point, PointStack, SurfaceSize};
use crate::error::{ExportError, PasteError};
use crate::export::{ExportFormat, PendingExport};
use crate::render::{self, Label, MARGIN, Surface};

/// One editing session over a single image
#[derive(Debug, Default)]
pub struct AnnotationCanvas {
    image: Option<SourceImage>,
    points: PointStack,
    surface: Option<Surface>,
}

impl AnnotationCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the image, dropping every point, and repaint
    ///
    /// An image whose framed surface cannot be allocated is rejected and the
    /// current state is kept.
    pub fn set_image(&mut self, image: SourceImage) -> Result<(), PasteError> {
        let Some(surface) = render::image::paint(&image, &[]) else {
            log::error!(
                "Could not allocate surface for {}x{} image",
                image.width(),
                image.height()
            );
            return Err(PasteError::SurfaceTooLarge {
                width: image.width(),
                height: image.height(),
            });
        };
        if !self.points.is_empty() {
            log::debug!("New image, clearing {} points", self.points.len());
        }
        self.image = Some(image);
        self.points.clear();
        self.surface = Some(surface);
        Ok(())
    }

    /// Add a point from fractional coordinates of the displayed surface box
    ///
    /// Clicks landing in the margin band (or outside the surface) are ignored.
    /// Returns the new point when accepted.
    pub fn add_point(&mut self, x_frac: f32, y_frac: f32) -> Option<Point> {
        let size = self.size()?;
        let real_x = x_frac * size.width;
        let real_y = y_frac * size.height;
        if !size.contains_inner(real_x, real_y, MARGIN) {
            log::debug!("Ignoring point ({real_x}, {real_y}) in the margin band");
            return None;
        }

        let point = self.points.push(real_x, real_y);
        self.paint();
        Some(point)
    }

    /// Pop the most recently added point, if any, and repaint
    pub fn remove_last_annotation(&mut self) -> Option<Point> {
        let removed = self.points.pop();
        if removed.is_some() {
            self.paint();
        }
        removed
    }

    /// Replace the image with the first PNG offered by `source`
    ///
    /// Failures are logged and returned; the current image and points are
    /// only replaced once a candidate has fully decoded.
    pub async fn paste<S: ImageSource>(&mut self, source: &S) -> Result<(), PasteError> {
        match source.request_permission().await {
            Permission::Granted => {}
            Permission::Denied => {
                log::error!("Not allowed to read clipboard");
                return Err(PasteError::PermissionDenied);
            }
            Permission::Unavailable => {
                log::warn!("Clipboard permission could not be queried, reading anyway");
            }
        }

        let items = source.read_available_images().await.inspect_err(|err| {
            log::error!("Failed to read clipboard: {}", err);
        })?;

        for item in items {
            if !item.is_png() {
                log::debug!("Skipping clipboard item of type {}", item.media_type);
                continue;
            }
            let image = source.decode(item.bytes).await.inspect_err(|err| {
                log::error!("Failed to decode pasted image: {}", err);
            })?;
            return self.set_image(image).inspect_err(|err| {
                log::error!("Failed to load pasted image: {}", err);
            });
        }

        log::warn!("No PNG image found in the clipboard");
        Err(PasteError::NoMatchingClipboardItem)
    }

    /// Snapshot the surface for export under `filename`
    ///
    /// The format is checked before anything is copied. The returned export
    /// owns its pixels, so later edits do not reach it.
    pub fn begin_export(&self, filename: &str) -> Result<PendingExport, ExportError> {
        let format = ExportFormat::from_filename(filename)?;
        let surface = self.snapshot().ok_or(ExportError::NoImage)?;
        Ok(PendingExport {
            filename: filename.to_string(),
            format,
            surface,
        })
    }

    /// Owned copy of the current surface
    pub fn snapshot(&self) -> Option<Surface> {
        self.surface.clone()
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    pub fn image(&self) -> Option<&SourceImage> {
        self.image.as_ref()
    }

    pub fn points(&self) -> &[Point] {
        self.points.as_slice()
    }

    /// Surface dimensions, if an image is loaded
    pub fn size(&self) -> Option<SurfaceSize> {
        self.image
            .as_ref()
            .map(|image| SurfaceSize::around_image(image.width(), image.height(), MARGIN))
    }

    pub fn edge_slots(&self) -> Option<EdgeSlots> {
        Some(EdgeSlots::assign(self.size()?, self.points()))
    }

    pub fn labels(&self) -> Vec<Label> {
        self.size()
            .map(|size| render::layout::labels(size, self.points()))
            .unwrap_or_default()
    }

    /// Presentation scale fitting the surface into a container
    pub fn display_scale(&self, container_width: f32, container_height: f32) -> Option<f32> {
        let size = self.size()?;
        Some(render::geometry::display_scale(
            size,
            container_width,
            container_height,
        ))
    }

    fn paint(&mut self) {
        let Some(image) = self.image.as_ref() else {
            return;
        };
        match render::image::paint(image, self.points.as_slice()) {
            Some(surface) => self.surface = Some(surface),
            None => log::error!(
                "Could not allocate surface for {}x{} image, keeping the last one",
                image.width(),
                image.height()
            ),
        }
    }
}
