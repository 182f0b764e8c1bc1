//! Image source collaborator
//!
//! The canvas pastes through an [`ImageSource`]: a clipboard service, a file
//! loader, or a test double.

use std::path::PathBuf;

use super::image::SourceImage;
use crate::error::PasteError;

/// Media type accepted by `paste`
pub const PNG_MEDIA_TYPE: &str = "image/png";

/// Media type reported for bytes that are not a recognised image
pub const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

/// Result of asking for clipboard read access
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
    /// The permission could not be queried; reading is attempted anyway
    Unavailable,
}

/// One entry offered by the clipboard
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClipboardItem {
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl ClipboardItem {
    pub fn new(media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            media_type: media_type.into(),
            bytes,
        }
    }

    pub fn is_png(&self) -> bool {
        self.media_type == PNG_MEDIA_TYPE
    }
}

/// Supplies decoded images to the canvas
#[allow(async_fn_in_trait)]
pub trait ImageSource {
    async fn request_permission(&self) -> Permission;

    /// All items currently offered, possibly none
    async fn read_available_images(&self) -> Result<Vec<ClipboardItem>, PasteError>;

    async fn decode(&self, bytes: Vec<u8>) -> Result<SourceImage, PasteError> {
        SourceImage::decode(&bytes)
    }
}

/// Serves image files from disk as if they were clipboard items
#[derive(Clone, Debug, Default)]
pub struct FileImageSource {
    paths: Vec<PathBuf>,
}

impl FileImageSource {
    pub fn new(paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }
}

/// Media type of encoded image bytes, sniffed from their header
pub fn sniff_media_type(bytes: &[u8]) -> &'static str {
    image::guess_format(bytes)
        .map(|format| format.to_mime_type())
        .unwrap_or(UNKNOWN_MEDIA_TYPE)
}

impl ImageSource for FileImageSource {
    async fn request_permission(&self) -> Permission {
        Permission::Granted
    }

    async fn read_available_images(&self) -> Result<Vec<ClipboardItem>, PasteError> {
        let mut items = Vec::with_capacity(self.paths.len());
        for path in &self.paths {
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|err| PasteError::Source(format!("{}: {}", path.display(), err)))?;
            let media_type = sniff_media_type(&bytes);
            log::debug!("Read {} ({}, {} bytes)", path.display(), media_type, bytes.len());
            items.push(ClipboardItem::new(media_type, bytes));
        }
        Ok(items)
    }

    async fn decode(&self, bytes: Vec<u8>) -> Result<SourceImage, PasteError> {
        tokio::task::spawn_blocking(move || SourceImage::decode(&bytes))
            .await
            .map_err(|err| PasteError::Decode(err.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::io::Cursor;

    fn encoded(format: image::ImageFormat) -> Vec<u8> {
        let img = RgbaImage::from_pixel(4, 3, Rgba([0, 0, 255, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .to_rgb8()
            .write_to(&mut Cursor::new(&mut bytes), format)
            .unwrap();
        bytes
    }

    #[test]
    fn test_sniff_media_type() {
        assert_eq!(sniff_media_type(&encoded(image::ImageFormat::Png)), "image/png");
        assert_eq!(sniff_media_type(&encoded(image::ImageFormat::Jpeg)), "image/jpeg");
        assert_eq!(sniff_media_type(b"hello"), UNKNOWN_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_file_source_reads_and_decodes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.png");
        std::fs::write(&path, encoded(image::ImageFormat::Png)).unwrap();

        let source = FileImageSource::new([&path]);
        assert_eq!(source.request_permission().await, Permission::Granted);
        let items = source.read_available_images().await.unwrap();
        assert_eq!(items.len(), 1);
        assert!(items[0].is_png());

        let img = source.decode(items[0].bytes.clone()).await.unwrap();
        assert_eq!((img.width(), img.height()), (4, 3));
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileImageSource::new([dir.path().join("missing.png")]);
        let err = source.read_available_images().await.unwrap_err();
        assert!(matches!(err, PasteError::Source(_)));
    }
}
