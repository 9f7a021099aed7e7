//! Look-at camera and primary ray generation.

use skinray_math::{Ray, Vec3};

/// Pinhole camera described by position, look-at target, up vector and a
/// vertical field of view in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f32,
}

impl Camera {
    /// Orthonormal basis: forward toward the target, right, and true up.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = (self.target - self.position).normalize_or_zero();
        let right = forward.cross(self.up).normalize_or_zero();
        let true_up = right.cross(forward);
        (forward, right, true_up)
    }

    /// Generate the ray through normalized image coordinates (u, v).
    ///
    /// (u, v) are in [0, 1] with (0, 0) at the top-left of the image;
    /// `aspect` is width / height.
    pub fn generate_ray(&self, u: f32, v: f32, aspect: f32) -> Ray {
        let (forward, right, true_up) = self.basis();

        // Half-extents of the image plane one unit in front of the camera
        let half_h = (self.fov.to_radians() * 0.5).tan();
        let half_w = half_h * aspect;

        // Map (u, v) from [0,1] to [-1,1]; v is inverted so v=0 is the top
        let su = (2.0 * u - 1.0) * half_w;
        let sv = (2.0 * (1.0 - v) - 1.0) * half_h;

        let dir = (forward + right * su + true_up * sv).normalize_or_zero();
        Ray::new(self.position, dir)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 18.0, 50.0),
            target: Vec3::new(0.0, 18.0, 0.0),
            up: Vec3::Y,
            fov: 60.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = Camera::default();
        let ray = camera.generate_ray(0.5, 0.5, 1.0);

        assert_eq!(ray.origin, camera.position);
        let expected = (camera.target - camera.position).normalize();
        assert!((ray.direction - expected).length() < 1e-5);
    }

    #[test]
    fn test_v_is_inverted() {
        // v=0 is the top of the image, so its ray must tilt upward
        let camera = Camera {
            position: Vec3::ZERO,
            target: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::Y,
            fov: 90.0,
        };

        let top = camera.generate_ray(0.5, 0.0, 1.0);
        let bottom = camera.generate_ray(0.5, 1.0, 1.0);
        assert!(top.direction.y > 0.0);
        assert!(bottom.direction.y < 0.0);
    }

    #[test]
    fn test_aspect_widens_horizontal_fov() {
        let camera = Camera {
            position: Vec3::ZERO,
            target: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::Y,
            fov: 60.0,
        };

        let narrow = camera.generate_ray(0.0, 0.5, 1.0);
        let wide = camera.generate_ray(0.0, 0.5, 2.0);
        // A wider aspect pushes the leftmost ray further sideways
        assert!(wide.direction.x.abs() > narrow.direction.x.abs());
    }

    #[test]
    fn test_rays_are_normalized() {
        let camera = Camera::default();
        for (u, v) in [(0.0, 0.0), (1.0, 0.0), (0.3, 0.9), (1.0, 1.0)] {
            let ray = camera.generate_ray(u, v, 1.5);
            assert!((ray.direction.length() - 1.0).abs() < 1e-5);
        }
    }
}
