//! Render configuration.

use serde::{Deserialize, Serialize};
use skinray_math::Rgba;

/// Blinn-Phong material coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadingParams {
    /// Diffuse coefficient.
    pub kd: f32,
    /// Specular coefficient.
    pub ks: f32,
    /// Ambient light coefficient.
    pub ambient: f32,
    /// Specular exponent (lower = softer highlight).
    pub shininess: f32,
}

impl Default for ShadingParams {
    fn default() -> Self {
        Self {
            kd: 0.75,
            ks: 0.15,
            ambient: 0.20,
            shininess: 16.0,
        }
    }
}

/// Full configuration for one render.
///
/// The scene and this config are read-only for the duration of a
/// [`render`](crate::render) call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output image width in pixels.
    pub width: u32,
    /// Output image height in pixels.
    pub height: u32,
    /// Maximum reflection bounces per primary ray.
    pub max_bounces: u32,
    /// Anti-aliasing samples per pixel (1 = center sample, no jitter).
    pub samples_per_pixel: u32,
    /// Edge length of scheduler tiles.
    pub tile_size: u32,
    /// Worker threads; 0 picks the hardware concurrency.
    pub thread_count: u32,

    /// Sample the light as a disk instead of a point.
    pub soft_shadows: bool,
    /// Shadow rays per shading point when soft shadows are on.
    pub shadow_samples: u32,

    /// Ambient occlusion toggle and parameters.
    pub ao_enabled: bool,
    pub ao_samples: u32,
    /// Maximum distance at which geometry counts as occluding.
    pub ao_radius: f32,
    /// Strength of the AO darkening, 0..1.
    pub ao_intensity: f32,

    /// Depth of field toggle and thin-lens parameters.
    pub dof_enabled: bool,
    /// Lens radius (0 = pinhole).
    pub aperture: f32,
    /// Distance to the focal plane; 0 = auto-focus on the camera target.
    pub focus_distance: f32,

    /// Radial gradient background instead of the scene's flat color.
    pub gradient_bg: bool,
    pub bg_center: Rgba,
    pub bg_edge: Rgba,
    /// Multiplier on the center distance before the falloff curve.
    pub gradient_scale: f32,

    /// Material coefficients used for every surface.
    pub shading: ShadingParams,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            max_bounces: 3,
            samples_per_pixel: 1,
            tile_size: 32,
            thread_count: 0,

            soft_shadows: false,
            shadow_samples: 16,

            ao_enabled: false,
            ao_samples: 8,
            ao_radius: 3.0,
            ao_intensity: 0.5,

            dof_enabled: false,
            aperture: 0.5,
            focus_distance: 0.0,

            gradient_bg: true,
            bg_center: Rgba::new(0.35, 0.45, 0.65, 1.0),
            bg_edge: Rgba::new(0.08, 0.08, 0.12, 1.0),
            gradient_scale: 1.0,

            shading: ShadingParams::default(),
        }
    }
}
