//! Texture regions cut from the skin atlas.

use skinray_math::Rgba;

/// A rectangular block of RGBA pixels belonging to one box face.
///
/// Sampling is nearest-neighbor: skins are tiny (faces are 4-8 pixels on a
/// side) and the blocky look is the point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextureRegion {
    pub width: u32,
    pub height: u32,
    /// Row-major pixel data, `width * height` entries.
    pub pixels: Vec<Rgba>,
}

impl TextureRegion {
    /// Create a region from existing pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<Rgba>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a region filled with a single color.
    pub fn solid(width: u32, height: u32, color: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; (width * height) as usize],
        }
    }

    /// True when the region holds no pixels (e.g. an absent outer layer in
    /// the legacy skin format).
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// True when every pixel has alpha exactly 0. Vacuously true for an
    /// empty region.
    pub fn is_fully_transparent(&self) -> bool {
        self.pixels.iter().all(|p| p.a == 0.0)
    }

    /// Nearest-neighbor sample at normalized coordinates (u, v) in [0, 1].
    ///
    /// u maps along width, v along height. An empty region samples as
    /// opaque black.
    pub fn sample(&self, u: f32, v: f32) -> Rgba {
        if self.width == 0 || self.height == 0 || self.pixels.is_empty() {
            return Rgba::BLACK;
        }
        let x = ((u * self.width as f32) as i64).clamp(0, self.width as i64 - 1) as u32;
        let y = ((v * self.height as f32) as i64).clamp(0, self.height as i64 - 1) as u32;
        self.pixels[(y * self.width + x) as usize]
    }
}
