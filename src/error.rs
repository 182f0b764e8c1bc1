//! Error types for pasting and exporting

use thiserror::Error;

/// Why a paste did not replace the current image
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasteError {
    #[error("not allowed to read the clipboard")]
    PermissionDenied,
    #[error("no PNG image available in the clipboard")]
    NoMatchingClipboardItem,
    #[error("could not decode clipboard image: {0}")]
    Decode(String),
    #[error("could not read clipboard: {0}")]
    Source(String),
    #[error("image of {width}x{height} is too large to annotate")]
    SurfaceTooLarge { width: u32, height: u32 },
}

/// Why an export did not produce encoded bytes
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unsupported extension \"{0}\"")]
    UnsupportedFormat(String),
    #[error("nothing to export, no image loaded")]
    NoImage,
    #[error("encoding failed: {0}")]
    Encode(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for ExportError {
    fn from(err: image::ImageError) -> Self {
        ExportError::Encode(err.to_string())
    }
}

impl From<png::EncodingError> for ExportError {
    fn from(err: png::EncodingError) -> Self {
        ExportError::Encode(err.to_string())
    }
}
