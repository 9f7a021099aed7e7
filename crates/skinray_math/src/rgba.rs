use std::ops::{Add, AddAssign, Div, Mul, Sub};

use serde::{Deserialize, Serialize};

/// An RGBA color with f32 components.
///
/// Components are unbounded in principle (lighting math can overshoot);
/// `clamp()` restricts them to [0, 1] for output. Alpha rides along through
/// the component-wise arithmetic and is given meaning by the intersection
/// engine (alpha 0 = transparent pixel) and the shader (alpha passthrough).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Opaque black, the default pixel value.
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    /// Fully transparent black.
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    /// Create a new color from all four components.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from RGB components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Clamp all components to [0, 1].
    pub fn clamp(&self) -> Self {
        Self {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
            a: self.a.clamp(0.0, 1.0),
        }
    }

    /// Linear interpolation between two colors (t=0 gives self).
    pub fn lerp(&self, other: Rgba, t: f32) -> Self {
        *self * (1.0 - t) + other * t
    }

    /// Scale only the RGB components, leaving alpha untouched.
    pub fn scale_rgb(&self, s: f32) -> Self {
        Self {
            r: self.r * s,
            g: self.g * s,
            b: self.b * s,
            a: self.a,
        }
    }

    /// Replace the alpha component.
    pub fn with_alpha(&self, a: f32) -> Self {
        Self { a, ..*self }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::BLACK
    }
}

impl Add for Rgba {
    type Output = Rgba;

    fn add(self, c: Rgba) -> Rgba {
        Rgba::new(self.r + c.r, self.g + c.g, self.b + c.b, self.a + c.a)
    }
}

impl AddAssign for Rgba {
    fn add_assign(&mut self, c: Rgba) {
        self.r += c.r;
        self.g += c.g;
        self.b += c.b;
        self.a += c.a;
    }
}

impl Sub for Rgba {
    type Output = Rgba;

    fn sub(self, c: Rgba) -> Rgba {
        Rgba::new(self.r - c.r, self.g - c.g, self.b - c.b, self.a - c.a)
    }
}

/// Component-wise multiplication (texture * light color).
impl Mul for Rgba {
    type Output = Rgba;

    fn mul(self, c: Rgba) -> Rgba {
        Rgba::new(self.r * c.r, self.g * c.g, self.b * c.b, self.a * c.a)
    }
}

impl Mul<f32> for Rgba {
    type Output = Rgba;

    fn mul(self, s: f32) -> Rgba {
        Rgba::new(self.r * s, self.g * s, self.b * s, self.a * s)
    }
}

impl Div<f32> for Rgba {
    type Output = Rgba;

    fn div(self, s: f32) -> Rgba {
        let inv = 1.0 / s;
        self * inv
    }
}
