//! Image acquisition module
//!
//! This module consolidates:
//! - The decoded source image type (image.rs)
//! - The image source collaborator and its file-backed implementation (clipboard.rs)

pub mod clipboard;
pub mod image;

pub use clipboard::{ClipboardItem, FileImageSource, ImageSource, PNG_MEDIA_TYPE, Permission};
pub use self::image::SourceImage;
