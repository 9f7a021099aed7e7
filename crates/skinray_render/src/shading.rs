//! Blinn-Phong direct lighting and shadowing.

use rand::RngCore;
use skinray_core::{Light, Scene};
use skinray_math::{Ray, Rgba, Vec3};

use crate::config::ShadingParams;
use crate::gen_f32;
use crate::intersect::{intersect_scene, HitResult};

/// Offset along the surface normal to avoid shadow acne.
const SHADOW_EPSILON: f32 = 1e-3;

/// Check whether a point is shadowed with respect to a light position.
///
/// Casts a ray from the point (offset along the normal) toward the light
/// and reports shadow if any mesh is hit strictly closer than the light.
/// A light coincident with the point never shadows it.
pub fn is_in_shadow(point: Vec3, normal: Vec3, light_pos: Vec3, scene: &Scene) -> bool {
    let origin = point + normal * SHADOW_EPSILON;

    let to_light = light_pos - origin;
    let dist_to_light = to_light.length();

    // Degenerate case: light is essentially at the surface point
    if dist_to_light < 1e-6 {
        return false;
    }

    let shadow_ray = Ray::new(origin, to_light / dist_to_light);
    let hit = intersect_scene(&shadow_ray, scene);

    hit.hit && hit.t < dist_to_light
}

/// Fraction of an area light visible from a point, in [0, 1].
///
/// Samples `samples` points on a disk of the light's radius oriented
/// perpendicular to the point-to-light direction. With zero radius or a
/// single sample this degenerates to the binary hard-shadow test.
pub fn compute_soft_shadow(
    point: Vec3,
    normal: Vec3,
    light: &Light,
    scene: &Scene,
    samples: u32,
    rng: &mut dyn RngCore,
) -> f32 {
    let to_light = light.position - point;
    let dist = to_light.length();
    if dist < 1e-6 {
        return 1.0;
    }

    if light.radius <= 0.0 || samples <= 1 {
        return if is_in_shadow(point, normal, light.position, scene) {
            0.0
        } else {
            1.0
        };
    }

    // Disk basis perpendicular to the light direction
    let dir = to_light / dist;
    let helper = if dir.x.abs() > 0.9 { Vec3::Y } else { Vec3::X };
    let tangent = dir.cross(helper).normalize();
    let bitangent = dir.cross(tangent);

    let mut lit = 0u32;
    for _ in 0..samples {
        let angle = std::f32::consts::TAU * gen_f32(rng);
        let radius = light.radius * gen_f32(rng).sqrt();
        let (sin_a, cos_a) = angle.sin_cos();
        let sample_pos = light.position + tangent * (radius * cos_a) + bitangent * (radius * sin_a);

        if !is_in_shadow(point, normal, sample_pos, scene) {
            lit += 1;
        }
    }

    lit as f32 / samples as f32
}

/// Blinn-Phong shading at a hit point:
///
/// ```text
/// ambient * tex
///   + kd * max(0, N.L) * tex * lightColor * visibility
///   + ks * pow(max(0, N.H), shininess) * lightColor * visibility
/// ```
///
/// `visibility` is the soft-shadow fraction when supplied; otherwise a
/// binary hard-shadow test runs here. The output alpha always equals the
/// texture alpha - lighting never modulates opacity.
pub fn shade(
    hit: &HitResult,
    view_dir: Vec3,
    light: &Light,
    scene: &Scene,
    params: &ShadingParams,
    visibility: Option<f32>,
) -> Rgba {
    let tex = hit.texture_color;
    let alpha = tex.a;

    let n = hit.normal.normalize_or_zero();
    let l = (light.position - hit.point).normalize_or_zero();
    let v = view_dir.normalize_or_zero();

    let ambient = tex * params.ambient;

    let visibility = visibility.unwrap_or_else(|| {
        if is_in_shadow(hit.point, n, light.position, scene) {
            0.0
        } else {
            1.0
        }
    });

    let n_dot_l = n.dot(l).max(0.0);
    let diffuse = tex * light.color * (params.kd * n_dot_l);

    let h = (l + v).normalize_or_zero();
    let n_dot_h = n.dot(h).max(0.0);
    let specular = light.color * (params.ks * n_dot_h.powf(params.shininess));

    let result = ambient + (diffuse + specular) * visibility;
    result.with_alpha(alpha).clamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use skinray_core::builder::build_box;
    use skinray_core::{PartTextures, TextureRegion};

    fn solid_part(color: Rgba) -> PartTextures {
        PartTextures {
            top: TextureRegion::solid(4, 4, color),
            bottom: TextureRegion::solid(4, 4, color),
            front: TextureRegion::solid(4, 4, color),
            back: TextureRegion::solid(4, 4, color),
            left: TextureRegion::solid(4, 4, color),
            right: TextureRegion::solid(4, 4, color),
        }
    }

    fn lit_hit(tex: Rgba) -> HitResult {
        HitResult {
            hit: true,
            t: 1.0,
            point: Vec3::ZERO,
            normal: Vec3::Z,
            texture_color: tex,
            is_outer_layer: false,
        }
    }

    #[test]
    fn test_shade_matches_closed_form() {
        let scene = Scene::default(); // no blockers
        let light = Light {
            position: Vec3::new(2.0, 3.0, 5.0),
            color: Rgba::WHITE,
            intensity: 1.0,
            radius: 0.0,
        };
        let params = ShadingParams {
            kd: 0.6,
            ks: 0.3,
            ambient: 0.1,
            shininess: 8.0,
        };
        let tex = Rgba::new(0.8, 0.5, 0.2, 1.0);
        let hit = lit_hit(tex);
        let view_dir = Vec3::new(0.0, 0.0, 1.0);

        let result = shade(&hit, view_dir, &light, &scene, &params, None);

        // Closed-form Blinn-Phong
        let n = Vec3::Z;
        let l = light.position.normalize();
        let h = (l + view_dir).normalize();
        let n_dot_l = n.dot(l).max(0.0);
        let n_dot_h = n.dot(h).max(0.0);
        let expected_r =
            (0.1 * tex.r + 0.6 * n_dot_l * tex.r + 0.3 * n_dot_h.powf(8.0)).clamp(0.0, 1.0);
        let expected_g =
            (0.1 * tex.g + 0.6 * n_dot_l * tex.g + 0.3 * n_dot_h.powf(8.0)).clamp(0.0, 1.0);

        assert!((result.r - expected_r).abs() < 1e-3);
        assert!((result.g - expected_g).abs() < 1e-3);
        assert_eq!(result.a, 1.0);
    }

    #[test]
    fn test_ambient_only_white_surface() {
        let scene = Scene::default();
        let light = Light {
            position: Vec3::new(0.0, 0.0, 10.0),
            ..Default::default()
        };
        let params = ShadingParams {
            kd: 0.0,
            ks: 0.0,
            ambient: 0.1,
            shininess: 16.0,
        };
        let hit = lit_hit(Rgba::WHITE);

        let result = shade(&hit, Vec3::Z, &light, &scene, &params, None);
        assert_eq!(result.r, 0.1);
        assert_eq!(result.g, 0.1);
        assert_eq!(result.b, 0.1);
    }

    #[test]
    fn test_shadowed_point_gets_ambient_only() {
        // Opaque blocker between the point and the light
        let mut scene = Scene::default();
        scene.meshes.push(build_box(
            &solid_part(Rgba::WHITE),
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::splat(2.0),
            0.0,
        ));
        let light = Light {
            position: Vec3::new(0.0, 0.0, 10.0),
            ..Default::default()
        };
        let params = ShadingParams::default();
        let hit = lit_hit(Rgba::WHITE);

        let result = shade(&hit, Vec3::Z, &light, &scene, &params, None);
        let ambient = params.ambient;
        assert!((result.r - ambient).abs() < 1e-6);
        assert!((result.g - ambient).abs() < 1e-6);
    }

    #[test]
    fn test_is_in_shadow_blocker_cases() {
        let light_pos = Vec3::new(0.0, 0.0, 10.0);
        let point = Vec3::ZERO;
        let normal = Vec3::Z;

        // Blocker on the segment between point and light
        let mut scene = Scene::default();
        scene.meshes.push(build_box(
            &solid_part(Rgba::WHITE),
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::splat(2.0),
            0.0,
        ));
        assert!(is_in_shadow(point, normal, light_pos, &scene));

        // No blocker
        let empty = Scene::default();
        assert!(!is_in_shadow(point, normal, light_pos, &empty));

        // Blocker beyond the light must not shadow
        let mut beyond = Scene::default();
        beyond.meshes.push(build_box(
            &solid_part(Rgba::WHITE),
            Vec3::new(0.0, 0.0, 20.0),
            Vec3::splat(2.0),
            0.0,
        ));
        assert!(!is_in_shadow(point, normal, light_pos, &beyond));
    }

    #[test]
    fn test_light_at_point_is_never_shadowed() {
        let mut scene = Scene::default();
        scene.meshes.push(build_box(
            &solid_part(Rgba::WHITE),
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::splat(2.0),
            0.0,
        ));

        let point = Vec3::new(1.0, 2.0, 3.0);
        // Light sits (nearly) on the point itself
        assert!(!is_in_shadow(point, Vec3::Z, point, &scene));
    }

    #[test]
    fn test_soft_shadow_degenerates_to_hard() {
        let mut rng = StdRng::seed_from_u64(1);
        let point = Vec3::ZERO;
        let normal = Vec3::Z;

        let mut scene = Scene::default();
        scene.meshes.push(build_box(
            &solid_part(Rgba::WHITE),
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::splat(2.0),
            0.0,
        ));

        // Zero radius: binary result regardless of sample count
        let light = Light {
            position: Vec3::new(0.0, 0.0, 10.0),
            radius: 0.0,
            ..Default::default()
        };
        assert_eq!(
            compute_soft_shadow(point, normal, &light, &scene, 16, &mut rng),
            0.0
        );

        // Single sample behaves like the hard test too
        let area = Light {
            position: Vec3::new(0.0, 0.0, 10.0),
            radius: 3.0,
            ..Default::default()
        };
        assert_eq!(
            compute_soft_shadow(point, normal, &area, &Scene::default(), 1, &mut rng),
            1.0
        );
    }

    #[test]
    fn test_soft_shadow_penumbra_is_partial() {
        // Mid-sized blocker, wide area light: a good share of the disk
        // samples is blocked and the rest reaches around it
        let mut scene = Scene::default();
        scene.meshes.push(build_box(
            &solid_part(Rgba::WHITE),
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::splat(2.0),
            0.0,
        ));
        let light = Light {
            position: Vec3::new(0.0, 0.0, 10.0),
            radius: 5.0,
            ..Default::default()
        };

        let mut rng = StdRng::seed_from_u64(3);
        let factor = compute_soft_shadow(Vec3::ZERO, Vec3::Z, &light, &scene, 64, &mut rng);
        assert!(factor > 0.0 && factor < 1.0, "penumbra factor {factor}");
    }

    #[test]
    fn test_unlit_scene_fully_visible() {
        let mut rng = StdRng::seed_from_u64(9);
        let light = Light {
            position: Vec3::new(0.0, 10.0, 0.0),
            radius: 2.0,
            ..Default::default()
        };
        let factor =
            compute_soft_shadow(Vec3::ZERO, Vec3::Y, &light, &Scene::default(), 8, &mut rng);
        assert_eq!(factor, 1.0);
    }
}
