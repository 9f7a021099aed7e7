//! Recursive ray tracing: direct shading plus reflections, ambient
//! occlusion and the background.

use rand::RngCore;
use skinray_core::Scene;
use skinray_math::{Ray, Rgba, Vec3};

use crate::config::{RenderConfig, ShadingParams};
use crate::gen_f32;
use crate::intersect::intersect_scene;
use crate::shading::{compute_soft_shadow, shade};

/// Fixed reflectivity of the character surface.
const SKIN_REFLECTIVITY: f32 = 0.1;
/// Offset to avoid self-intersection when spawning secondary rays.
const REFLECT_EPSILON: f32 = 1e-3;

/// Trace a ray through the scene.
///
/// `depth > max_bounces` is the recursion base case and returns the scene
/// background immediately, bounding the call chain to `max_bounces + 1`
/// levels. While `depth < max_bounces` a single mirror-reflection ray is
/// spawned and blended in at [`SKIN_REFLECTIVITY`] weight; the result's
/// alpha is forced back to the hit texture's alpha.
pub fn trace_ray(
    ray: &Ray,
    scene: &Scene,
    depth: u32,
    max_bounces: u32,
    params: &ShadingParams,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Rgba {
    if depth > max_bounces {
        return scene.background;
    }

    let hit = intersect_scene(ray, scene);
    if !hit.hit {
        return scene.background;
    }

    let view_dir = (ray.origin - hit.point).normalize_or_zero();

    let visibility = if config.soft_shadows {
        Some(compute_soft_shadow(
            hit.point,
            hit.normal,
            &scene.light,
            scene,
            config.shadow_samples,
            rng,
        ))
    } else {
        None
    };

    let mut color = shade(&hit, view_dir, &scene.light, scene, params, visibility);
    let alpha = color.a;

    if config.ao_enabled {
        let ao = compute_ao(
            hit.point,
            hit.normal,
            scene,
            config.ao_samples,
            config.ao_radius,
            rng,
        );
        color = color.scale_rgb(1.0 - config.ao_intensity * (1.0 - ao));
    }

    if depth < max_bounces {
        let n = hit.normal.normalize_or_zero();
        let d = ray.direction.normalize_or_zero();
        let reflect_dir = (d - n * (2.0 * d.dot(n))).normalize_or_zero();
        let reflect_ray = Ray::new(hit.point + n * REFLECT_EPSILON, reflect_dir);

        let reflected = trace_ray(
            &reflect_ray,
            scene,
            depth + 1,
            max_bounces,
            params,
            config,
            rng,
        );
        color = color * (1.0 - SKIN_REFLECTIVITY) + reflected * SKIN_REFLECTIVITY;
    }

    color.with_alpha(alpha).clamp()
}

/// Background color for normalized image coordinates (u, v).
///
/// With the gradient disabled this is the scene's flat background;
/// otherwise a radial gradient from image center to edge with a squared
/// falloff.
pub fn background_color(scene: &Scene, config: &RenderConfig, u: f32, v: f32) -> Rgba {
    if !config.gradient_bg {
        return scene.background;
    }

    let dx = u - 0.5;
    let dy = v - 0.5;
    let dist = (dx * dx + dy * dy).sqrt() * 2.0 * config.gradient_scale;
    let t = dist.clamp(0.0, 1.0).powi(2);

    config.bg_center.lerp(config.bg_edge, t)
}

/// Ambient occlusion factor at a point: 1 = unoccluded, 0 = fully occluded.
///
/// Samples `samples` cosine-weighted directions on the hemisphere around
/// the normal and counts rays that hit geometry within `radius`.
pub fn compute_ao(
    point: Vec3,
    normal: Vec3,
    scene: &Scene,
    samples: u32,
    radius: f32,
    rng: &mut dyn RngCore,
) -> f32 {
    if samples == 0 || radius <= 0.0 {
        return 1.0;
    }

    let w = normal.normalize_or_zero();
    if w == Vec3::ZERO {
        return 1.0;
    }

    // Normal-aligned orthonormal frame
    let helper = if w.x.abs() > 0.9 { Vec3::Y } else { Vec3::X };
    let v = w.cross(helper).normalize();
    let u = w.cross(v);

    let origin = point + w * REFLECT_EPSILON;
    let mut occluded = 0u32;

    for _ in 0..samples {
        let r1 = gen_f32(rng);
        let r2 = gen_f32(rng);

        // Cosine-weighted hemisphere direction in the local frame
        let phi = std::f32::consts::TAU * r1;
        let (sin_phi, cos_phi) = phi.sin_cos();
        let sq = r2.sqrt();
        let dir = u * (cos_phi * sq) + v * (sin_phi * sq) + w * (1.0 - r2).sqrt();

        let hit = intersect_scene(&Ray::new(origin, dir), scene);
        if hit.hit && hit.t < radius {
            occluded += 1;
        }
    }

    1.0 - occluded as f32 / samples as f32
}
