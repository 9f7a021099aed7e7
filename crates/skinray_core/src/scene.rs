//! Scene container and the light source.

use skinray_math::{Rgba, Vec3};

use crate::camera::Camera;
use crate::mesh::Mesh;

/// A point light with an area-light radius for soft shadows.
///
/// Radius 0 degrades to a pure point light (hard shadows).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub color: Rgba,
    pub intensity: f32,
    /// Disk radius used by the soft-shadow sampler.
    pub radius: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 40.0, 30.0),
            color: Rgba::WHITE,
            intensity: 1.0,
            radius: 3.0,
        }
    }
}

/// Everything the tracer needs: meshes, one light, a camera and the
/// background color.
///
/// Mesh order carries no meaning; visibility is resolved by nearest hit.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub meshes: Vec<Mesh>,
    pub light: Light,
    pub camera: Camera,
    pub background: Rgba,
}
