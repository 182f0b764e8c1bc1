//! Callout rendering module
//!
//! This module contains:
//! - Label-placement geometry and constants
//! - The pure layout pass producing draw commands
//! - Surface rendering using tiny-skia

pub mod geometry;
pub mod image;
pub mod layout;
pub mod surface;
pub mod text;

pub use geometry::{Label, MARGIN, POINT_RADIUS};
pub use layout::DrawCommand;
pub use surface::Surface;
