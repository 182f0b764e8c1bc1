//! Source image type for pasted screenshots

use image::RgbaImage;
use tiny_skia::{ColorU8, IntSize, Pixmap};

use crate::error::PasteError;

/// An immutable decoded raster image
#[derive(Clone, Debug, PartialEq)]
pub struct SourceImage {
    rgba: RgbaImage,
}

impl SourceImage {
    pub fn from_rgba(rgba: RgbaImage) -> Self {
        Self { rgba }
    }

    /// Decode encoded image bytes (any format the `image` crate recognises)
    pub fn decode(bytes: &[u8]) -> Result<Self, PasteError> {
        let decoded =
            image::load_from_memory(bytes).map_err(|err| PasteError::Decode(err.to_string()))?;
        let rgba = decoded.to_rgba8();
        log::debug!(
            "SourceImage decoded: {}x{} pixels",
            rgba.width(),
            rgba.height()
        );
        Ok(Self { rgba })
    }

    /// Get the width of the image
    pub fn width(&self) -> u32 {
        self.rgba.width()
    }

    /// Get the height of the image
    pub fn height(&self) -> u32 {
        self.rgba.height()
    }

    pub fn rgba(&self) -> &RgbaImage {
        &self.rgba
    }

    /// Premultiplied copy of the image for compositing with tiny-skia
    pub fn to_pixmap(&self) -> Option<Pixmap> {
        let size = IntSize::from_wh(self.width(), self.height())?;
        let mut data = Vec::with_capacity(self.rgba.as_raw().len());
        for pixel in self.rgba.pixels() {
            let [r, g, b, a] = pixel.0;
            let premultiplied = ColorU8::from_rgba(r, g, b, a).premultiply();
            data.extend_from_slice(&[
                premultiplied.red(),
                premultiplied.green(),
                premultiplied.blue(),
                premultiplied.alpha(),
            ]);
        }
        Pixmap::from_vec(data, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use std::io::Cursor;

    fn encoded_png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_decode_png() {
        let img = SourceImage::decode(&encoded_png(7, 5)).unwrap();
        assert_eq!((img.width(), img.height()), (7, 5));
        assert_eq!(img.rgba().get_pixel(3, 2).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = SourceImage::decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, PasteError::Decode(_)));
    }

    #[test]
    fn test_to_pixmap_premultiplies() {
        let img = SourceImage::from_rgba(RgbaImage::from_pixel(2, 2, Rgba([200, 100, 0, 128])));
        let pixmap = img.to_pixmap().unwrap();
        let px = pixmap.pixel(1, 1).unwrap();
        assert_eq!(px.alpha(), 128);
        assert!(px.red() <= 101 && px.red() >= 99);
    }

    #[test]
    fn test_to_pixmap_empty_image() {
        let img = SourceImage::from_rgba(RgbaImage::new(0, 0));
        assert!(img.to_pixmap().is_none());
    }
}
