//! RGBA texture buffer and PNG conversion.

use crate::error::{PipelineError, Result};
use image::{ColorType, ImageEncoder, RgbaImage};

/// Raw texture data decoded from a PNG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureData {
    /// Texture width in pixels.
    pub width: u32,
    /// Texture height in pixels.
    pub height: u32,
    /// RGBA8 pixel data (4 bytes per pixel, row-major).
    pub pixels: Vec<u8>,
}

impl TextureData {
    /// Create a new texture from RGBA data.
    ///
    /// Fails if the buffer length does not match the dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(PipelineError::InvalidTexture(format!(
                "{}x{} texture needs {} bytes, got {}",
                width,
                height,
                expected,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a texture filled with a single color.
    pub fn filled(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixels = (0..width as usize * height as usize)
            .flat_map(|_| color)
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Get a pixel at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = self.index(x, y);
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Overwrite the pixel at (x, y).
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let idx = self.index(x, y);
        self.pixels[idx..idx + 4].copy_from_slice(&rgba);
    }

    /// Alpha value at (x, y).
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        self.pixels[self.index(x, y) + 3]
    }

    /// Whether the pixel at (x, y) is fully transparent.
    pub fn is_transparent(&self, x: u32, y: u32) -> bool {
        self.alpha(x, y) == 0
    }

    /// Number of fully transparent pixels.
    pub fn transparent_count(&self) -> usize {
        self.pixels.chunks_exact(4).filter(|p| p[3] == 0).count()
    }

    /// Check if this texture has any transparency (including partial).
    pub fn has_transparency(&self) -> bool {
        self.pixels.chunks_exact(4).any(|pixel| pixel[3] < 255)
    }

    /// Wrap an `image` RGBA buffer without copying.
    pub fn from_rgba_image(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Decode PNG bytes.
    ///
    /// Returns `Ok(None)` unless the image is 8-bit RGBA. Grayscale+alpha and
    /// 16-bit RGBA are left alone too, since rewriting them as RGBA8 would
    /// change the file's pixel format.
    pub fn from_png_bytes(data: &[u8]) -> Result<Option<Self>> {
        let img = image::load_from_memory_with_format(data, image::ImageFormat::Png)?;
        match img.color() {
            ColorType::Rgba8 => Ok(Some(Self::from_rgba_image(img.into_rgba8()))),
            _ => Ok(None),
        }
    }

    /// Encode as RGBA8 PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        let cursor = std::io::Cursor::new(&mut bytes);
        let encoder = image::codecs::png::PngEncoder::new(cursor);

        encoder.write_image(
            &self.pixels,
            self.width,
            self.height,
            image::ExtendedColorType::Rgba8,
        )?;

        Ok(bytes)
    }
}
