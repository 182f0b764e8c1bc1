//! Numbered callout labels around a screenshot
//!
//! Paste an image, pick points of interest, and [`AnnotationCanvas`] places a
//! numbered tag for each point on the nearest border edge, joined to the
//! point by a leader line.

pub mod canvas;
pub mod capture;
pub mod config;
pub mod domain;
pub mod error;
pub mod export;
pub mod filename;
pub mod render;

pub use canvas::AnnotationCanvas;
pub use error::{ExportError, PasteError};
pub use export::ExportFormat;
