//! Raster export of the rendered surface
//!
//! The canvas hands out an owned [`PendingExport`] snapshot; encoding and
//! delivery happen later through a [`RasterSink`] without touching the canvas.

use std::io::{self, Write};
use std::path::PathBuf;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, RgbImage, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::canvas::AnnotationCanvas;
use crate::error::ExportError;
use crate::filename;
use crate::render::Surface;

/// Default JPEG quality (1-100)
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Encodings the exporter can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Webp,
    Png,
    Jpeg,
}

impl ExportFormat {
    /// Match a file extension, case-insensitively
    pub fn from_extension(extension: &str) -> Result<Self, ExportError> {
        match extension.to_lowercase().as_str() {
            "webp" => Ok(ExportFormat::Webp),
            "png" => Ok(ExportFormat::Png),
            "jpg" | "jpeg" => Ok(ExportFormat::Jpeg),
            _ => Err(ExportError::UnsupportedFormat(extension.to_string())),
        }
    }

    /// Format implied by a file name's extension
    pub fn from_filename(name: &str) -> Result<Self, ExportError> {
        Self::from_extension(filename::file_extension(filename::basename(name)))
    }

    /// Get file extension for this format
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Webp => "webp",
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpeg",
        }
    }

    pub fn media_type(self) -> &'static str {
        match self {
            ExportFormat::Webp => "image/webp",
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
        }
    }
}

fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())
}

/// Drop alpha by compositing over white; JPEG has no alpha channel
fn flatten_on_white(image: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        let blend = |c: u8| ((c as u32 * a as u32 + 255 * (255 - a as u32)) / 255) as u8;
        image::Rgb([blend(r), blend(g), blend(b)])
    })
}

/// Encode a surface in the requested format
pub fn encode(
    surface: &Surface,
    format: ExportFormat,
    jpeg_quality: u8,
) -> Result<Vec<u8>, ExportError> {
    let rgba = surface.to_rgba_image();
    let (width, height) = rgba.dimensions();
    let mut buffer = Vec::new();
    match format {
        ExportFormat::Png => write_png(&mut buffer, &rgba)?,
        ExportFormat::Webp => {
            WebPEncoder::new_lossless(&mut buffer).encode(
                rgba.as_raw(),
                width,
                height,
                ExtendedColorType::Rgba8,
            )?;
        }
        ExportFormat::Jpeg => {
            let rgb = flatten_on_white(&rgba);
            JpegEncoder::new_with_quality(&mut buffer, jpeg_quality.clamp(1, 100)).encode(
                rgb.as_raw(),
                width,
                height,
                ExtendedColorType::Rgb8,
            )?;
        }
    }
    Ok(buffer)
}

/// Raster sink collaborator: encodes snapshots and delivers them to storage
#[allow(async_fn_in_trait)]
pub trait RasterSink {
    async fn export(&self, surface: Surface, format: ExportFormat) -> Result<Vec<u8>, ExportError>;

    /// Hand encoded bytes to persistent storage, returning where they went
    async fn deliver(
        &self,
        _filename: &str,
        _bytes: &[u8],
    ) -> Result<Option<PathBuf>, ExportError> {
        Ok(None)
    }
}

/// In-memory sink that only encodes
#[derive(Clone, Copy, Debug)]
pub struct EncodingSink {
    pub jpeg_quality: u8,
}

impl Default for EncodingSink {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl RasterSink for EncodingSink {
    async fn export(&self, surface: Surface, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
        let quality = self.jpeg_quality;
        tokio::task::spawn_blocking(move || encode(&surface, format, quality))
            .await
            .map_err(|err| ExportError::Encode(err.to_string()))?
    }
}

/// Sink that writes encoded files into a directory
#[derive(Clone, Debug)]
pub struct FileSink {
    dir: PathBuf,
    encoder: EncodingSink,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>, jpeg_quality: u8) -> Self {
        Self {
            dir: dir.into(),
            encoder: EncodingSink { jpeg_quality },
        }
    }
}

impl RasterSink for FileSink {
    async fn export(&self, surface: Surface, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
        self.encoder.export(surface, format).await
    }

    async fn deliver(&self, filename: &str, bytes: &[u8]) -> Result<Option<PathBuf>, ExportError> {
        let dir = self.dir.clone();
        let target = dir.join(filename::basename(filename));
        let bytes = bytes.to_vec();
        // Written next to the target, so a failed write never leaves a partial file
        let path = tokio::task::spawn_blocking(move || -> Result<PathBuf, ExportError> {
            std::fs::create_dir_all(&dir)?;
            let mut file = tempfile::Builder::new()
                .prefix(".snaplabel-")
                .tempfile_in(&dir)?;
            file.write_all(&bytes)?;
            file.persist(&target).map_err(|err| err.error)?;
            Ok(target)
        })
        .await
        .map_err(|err| ExportError::Io(io::Error::other(err)))??;

        log::info!("Saved {}", path.display());
        Ok(Some(path))
    }
}

/// An owned snapshot of the surface, waiting to be encoded
#[derive(Clone, Debug)]
pub struct PendingExport {
    pub filename: String,
    pub format: ExportFormat,
    pub surface: Surface,
}

/// What a completed export produced
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOutcome {
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
    /// Where the sink stored the bytes, if it stores them at all
    pub path: Option<PathBuf>,
}

impl PendingExport {
    /// Encode through `sink` and hand the bytes over for delivery
    pub async fn run<S: RasterSink>(self, sink: &S) -> Result<ExportOutcome, ExportError> {
        let bytes = sink.export(self.surface, self.format).await?;
        log::debug!(
            "Encoded {} as {} ({} bytes)",
            self.filename,
            self.format.media_type(),
            bytes.len()
        );
        let path = sink.deliver(&self.filename, &bytes).await?;
        Ok(ExportOutcome {
            format: self.format,
            bytes,
            path,
        })
    }
}

/// Snapshot `canvas` and export it through `sink` as `filename`
///
/// An unsupported extension fails before the sink sees anything.
pub async fn save_snapshot<S: RasterSink>(
    canvas: &AnnotationCanvas,
    sink: &S,
    filename: &str,
) -> Result<ExportOutcome, ExportError> {
    canvas.begin_export(filename)?.run(sink).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::SourceImage;
    use crate::render;
    use image::Rgba;

    fn surface() -> Surface {
        let img = SourceImage::from_rgba(RgbaImage::from_pixel(20, 10, Rgba([10, 200, 30, 255])));
        render::image::paint(&img, &[]).unwrap()
    }

    #[test]
    fn test_format_from_filename() {
        assert_eq!(ExportFormat::from_filename("snapshot.png").unwrap(), ExportFormat::Png);
        assert_eq!(ExportFormat::from_filename("snapshot.WEBP").unwrap(), ExportFormat::Webp);
        assert_eq!(ExportFormat::from_filename("a/b.c/shot.jpg").unwrap(), ExportFormat::Jpeg);
        assert_eq!(ExportFormat::from_filename("shot.jpeg").unwrap(), ExportFormat::Jpeg);
    }

    #[test]
    fn test_unsupported_format() {
        let err = ExportFormat::from_filename("snapshot.bmp").unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedFormat(ext) if ext == "bmp"));
        assert!(ExportFormat::from_filename("snapshot").is_err());
    }

    #[test]
    fn test_png_round_trip_pixels() {
        let surface = surface();
        let bytes = encode(&surface, ExportFormat::Png, DEFAULT_JPEG_QUALITY).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (100, 90));
        assert_eq!(decoded.get_pixel(45, 45).0, [10, 200, 30, 255]);
        assert_eq!(decoded.get_pixel(0, 0).0[3], 0);
    }

    #[test]
    fn test_formats_produce_distinct_bytes() {
        let surface = surface();
        let png = encode(&surface, ExportFormat::Png, DEFAULT_JPEG_QUALITY).unwrap();
        let webp = encode(&surface, ExportFormat::Webp, DEFAULT_JPEG_QUALITY).unwrap();
        let jpeg = encode(&surface, ExportFormat::Jpeg, DEFAULT_JPEG_QUALITY).unwrap();
        assert_ne!(png, webp);
        assert_eq!(image::guess_format(&png).unwrap(), image::ImageFormat::Png);
        assert_eq!(image::guess_format(&webp).unwrap(), image::ImageFormat::WebP);
        assert_eq!(image::guess_format(&jpeg).unwrap(), image::ImageFormat::Jpeg);
    }

    #[test]
    fn test_flatten_on_white() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 0]));
        assert_eq!(flatten_on_white(&img).get_pixel(0, 0).0, [255, 255, 255]);
        let img = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]));
        assert_eq!(flatten_on_white(&img).get_pixel(0, 0).0, [0, 0, 0]);
    }

    #[tokio::test]
    async fn test_file_sink_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path(), DEFAULT_JPEG_QUALITY);
        let pending = PendingExport {
            filename: "snapshot.png".to_string(),
            format: ExportFormat::Png,
            surface: surface(),
        };
        let outcome = pending.run(&sink).await.unwrap();
        let path = outcome.path.unwrap();
        assert_eq!(path, dir.path().join("snapshot.png"));
        assert_eq!(std::fs::read(&path).unwrap(), outcome.bytes);
    }

    #[tokio::test]
    async fn test_encoding_sink_does_not_deliver() {
        let pending = PendingExport {
            filename: "snapshot.webp".to_string(),
            format: ExportFormat::Webp,
            surface: surface(),
        };
        let outcome = pending.run(&EncodingSink::default()).await.unwrap();
        assert!(outcome.path.is_none());
        assert_eq!(outcome.format, ExportFormat::Webp);
    }
}
