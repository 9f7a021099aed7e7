//! RGBA float pixel buffer with PNG import/export.
//!
//! A [`Pixmap`] is used both for the decoded skin atlas on the way in and
//! for the rendered image on the way out. Pixels are stored row-major as
//! [`Rgba`] floats in [0, 1]; PNG bytes are mapped straight through `/255`
//! with no color-space conversion, so skin colors reach the renderer
//! exactly as authored.

use std::path::Path;

use skinray_math::Rgba;
use thiserror::Error;

use crate::texture::TextureRegion;

/// Errors that can occur while loading or saving a pixmap.
#[derive(Error, Debug)]
pub enum PixmapError {
    #[error("image decode/encode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PixmapResult<T> = Result<T, PixmapError>;

/// A width x height grid of RGBA float pixels, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Pixmap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Rgba>,
}

impl Pixmap {
    /// Create a pixmap filled with opaque black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba::BLACK; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Rgba {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Rgba) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Copy a rectangular region out as a texture. The region must lie
    /// within the pixmap bounds.
    pub fn extract_region(&self, x: u32, y: u32, width: u32, height: u32) -> TextureRegion {
        debug_assert!(x + width <= self.width && y + height <= self.height);

        let mut pixels = Vec::with_capacity((width * height) as usize);
        for row in y..y + height {
            for col in x..x + width {
                pixels.push(self.get(col, row));
            }
        }
        TextureRegion::new(width, height, pixels)
    }

    /// Load a PNG (or any format the image crate recognizes) into a pixmap.
    pub fn load(path: impl AsRef<Path>) -> PixmapResult<Pixmap> {
        let img = image::open(path.as_ref())?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();

        let pixels = rgba
            .pixels()
            .map(|p| {
                Rgba::new(
                    p[0] as f32 / 255.0,
                    p[1] as f32 / 255.0,
                    p[2] as f32 / 255.0,
                    p[3] as f32 / 255.0,
                )
            })
            .collect();

        log::debug!(
            "loaded image {} ({}x{})",
            path.as_ref().display(),
            width,
            height
        );

        Ok(Pixmap {
            width,
            height,
            pixels,
        })
    }

    /// Save the pixmap as a PNG. Components are clamped to [0, 1] and
    /// rounded to 8 bits.
    pub fn save_png(&self, path: impl AsRef<Path>) -> PixmapResult<()> {
        let mut data = Vec::with_capacity((self.width * self.height * 4) as usize);
        for pixel in &self.pixels {
            let c = pixel.clamp();
            data.push((c.r * 255.0 + 0.5) as u8);
            data.push((c.g * 255.0 + 0.5) as u8);
            data.push((c.b * 255.0 + 0.5) as u8);
            data.push((c.a * 255.0 + 0.5) as u8);
        }

        let buffer = image::RgbaImage::from_raw(self.width, self.height, data)
            .expect("pixel buffer matches declared dimensions");
        buffer.save_with_format(path.as_ref(), image::ImageFormat::Png)?;

        log::debug!(
            "wrote image {} ({}x{})",
            path.as_ref().display(),
            self.width,
            self.height
        );
        Ok(())
    }
}
