//! Ray/mesh intersection with face and UV resolution.
//!
//! Every mesh is an axis-aligned box, so intersection runs against the
//! mesh's bounding box via the slab method; the triangles only define that
//! box. The slab that produced the entry parameter identifies the hit face,
//! which in turn selects the texture and the UV projection.
//!
//! Face mapping follows the finished character's orientation: the front
//! texture shows on the +Z side (toward the default camera), left on +X,
//! top on +Y.

use skinray_core::{Face, Mesh, Scene};
use skinray_math::{Aabb, Ray, Rgba, Vec3};

/// Result of an intersection query. Created fresh per query and never
/// mutated after return.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitResult {
    pub hit: bool,
    /// Ray parameter of the hit.
    pub t: f32,
    /// World-space hit point.
    pub point: Vec3,
    /// Outward face normal (flipped toward the ray for far-face hits).
    pub normal: Vec3,
    /// Sampled texture color, alpha included.
    pub texture_color: Rgba,
    /// Propagated from the mesh that was hit.
    pub is_outer_layer: bool,
}

impl HitResult {
    /// The non-hit result.
    pub fn miss() -> Self {
        Self {
            hit: false,
            t: 0.0,
            point: Vec3::ZERO,
            normal: Vec3::ZERO,
            texture_color: Rgba::TRANSPARENT,
            is_outer_layer: false,
        }
    }
}

impl Default for HitResult {
    fn default() -> Self {
        Self::miss()
    }
}

/// Map a slab axis and side to the box face and its outward normal.
fn resolve_face(axis: usize, is_min: bool) -> (Face, Vec3) {
    match (axis, is_min) {
        (0, false) => (Face::Left, Vec3::X),
        (0, true) => (Face::Right, -Vec3::X),
        (1, false) => (Face::Top, Vec3::Y),
        (1, true) => (Face::Bottom, -Vec3::Y),
        (2, false) => (Face::Front, Vec3::Z),
        _ => (Face::Back, -Vec3::Z),
    }
}

/// Project a point on a box face to [0,1] UV coordinates.
fn face_uv(point: Vec3, bounds: &Aabb, axis: usize, is_min: bool) -> (f32, f32) {
    let min = bounds.min();
    let size = bounds.size();

    // Guard degenerate box extents
    let sx = if size.x > 1e-8 { size.x } else { 1.0 };
    let sy = if size.y > 1e-8 { size.y } else { 1.0 };
    let sz = if size.z > 1e-8 { size.z } else { 1.0 };

    let lx = (point.x - min.x) / sx;
    let ly = (point.y - min.y) / sy;
    let lz = (point.z - min.z) / sz;

    let (u, v) = match axis {
        // Left (+X) / right (-X): U along depth, V down
        0 => {
            if !is_min {
                (1.0 - lz, 1.0 - ly)
            } else {
                (lz, 1.0 - ly)
            }
        }
        // Top (+Y) / bottom (-Y): U along width, V along depth
        1 => {
            if !is_min {
                (lx, lz)
            } else {
                (lx, 1.0 - lz)
            }
        }
        // Front (+Z) / back (-Z): U along width, V down
        _ => {
            if !is_min {
                (lx, 1.0 - ly)
            } else {
                (1.0 - lx, 1.0 - ly)
            }
        }
    };

    (u.clamp(0.0, 1.0), v.clamp(0.0, 1.0))
}

/// Intersect a ray with a single box mesh.
///
/// A sampled alpha of exactly 0 is a miss, except on outer-layer meshes
/// where the exit face of the same box is tried once - a transparent near
/// face reveals the far side of the shell instead of culling it.
pub fn intersect_mesh(ray: &Ray, mesh: &Mesh) -> HitResult {
    if mesh.triangles.is_empty() {
        return HitResult::miss();
    }

    let bounds = mesh.bounds();
    let Some(slab) = bounds.slab(ray) else {
        return HitResult::miss();
    };

    // Negative entry parameter means the ray starts inside the box; the
    // visible face is then the exit face.
    let (t_hit, axis, is_min) = if slab.t_enter >= 0.0 {
        (slab.t_enter, slab.enter_axis, slab.enter_is_min)
    } else {
        (slab.t_exit, slab.exit_axis, slab.exit_is_min)
    };

    let point = ray.at(t_hit);
    let (face, normal) = resolve_face(axis, is_min);
    let (u, v) = face_uv(point, &bounds, axis, is_min);
    let texture_color = mesh.texture(face).sample(u, v);

    if texture_color.a == 0.0 {
        if !mesh.is_outer_layer {
            return HitResult::miss();
        }

        // Outer layer: fall through to the exit face of the same box
        if slab.t_exit > t_hit {
            let far_point = ray.at(slab.t_exit);
            let (far_face, far_normal) = resolve_face(slab.exit_axis, slab.exit_is_min);
            let (fu, fv) = face_uv(far_point, &bounds, slab.exit_axis, slab.exit_is_min);
            let far_color = mesh.texture(far_face).sample(fu, fv);

            if far_color.a > 0.0 {
                return HitResult {
                    hit: true,
                    t: slab.t_exit,
                    point: far_point,
                    // Seen from inside, so the normal flips toward the ray
                    normal: -far_normal,
                    texture_color: far_color,
                    is_outer_layer: true,
                };
            }
        }
        return HitResult::miss();
    }

    HitResult {
        hit: true,
        t: t_hit,
        point,
        normal,
        texture_color,
        is_outer_layer: mesh.is_outer_layer,
    }
}

/// Intersect a ray with every mesh in the scene, keeping the nearest hit.
///
/// Mesh order is irrelevant; an empty scene returns a miss.
pub fn intersect_scene(ray: &Ray, scene: &Scene) -> HitResult {
    let mut closest = HitResult::miss();
    let mut closest_t = f32::MAX;

    for mesh in &scene.meshes {
        let hit = intersect_mesh(ray, mesh);
        if hit.hit && hit.t < closest_t {
            closest_t = hit.t;
            closest = hit;
        }
    }

    closest
}

#[cfg(test)]
mod tests {
    use super::*;
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

    fn red_unit_box() -> Mesh {
        build_box(
            &solid_part(Rgba::rgb(1.0, 0.0, 0.0)),
            Vec3::ZERO,
            Vec3::splat(2.0),
            0.0,
        )
    }

    #[test]
    fn test_red_box_end_to_end() {
        let mesh = red_unit_box();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = intersect_mesh(&ray, &mesh);

        assert!(hit.hit);
        assert_eq!(hit.t, 4.0);
        assert!((hit.point.z - 1.0).abs() < 1e-6);
        assert_eq!(hit.normal, Vec3::Z);
        assert_eq!(hit.texture_color.r, 1.0);
        assert_eq!(hit.texture_color.a, 1.0);
        assert!(!hit.is_outer_layer);
    }

    #[test]
    fn test_miss_returns_non_hit() {
        let mesh = red_unit_box();

        // Pointing away
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(!intersect_mesh(&ray, &mesh).hit);

        // Offset past the box
        let ray = Ray::new(Vec3::new(5.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(!intersect_mesh(&ray, &mesh).hit);
    }

    #[test]
    fn test_empty_mesh_and_empty_scene() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));

        assert!(!intersect_mesh(&ray, &Mesh::default()).hit);
        assert!(!intersect_scene(&ray, &Scene::default()).hit);
    }

    #[test]
    fn test_ray_inside_box_hits_exit_face() {
        let mesh = red_unit_box();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let hit = intersect_mesh(&ray, &mesh);

        assert!(hit.hit);
        assert_eq!(hit.t, 1.0);
        assert!((hit.point.z + 1.0).abs() < 1e-6);
        // Exit face outward normal, not flipped
        assert_eq!(hit.normal, -Vec3::Z);
    }

    #[test]
    fn test_face_resolution_all_six_sides() {
        // Distinct color per face slot so the sampled color identifies the face
        let part = PartTextures {
            front: TextureRegion::solid(2, 2, Rgba::rgb(1.0, 0.0, 0.0)),
            back: TextureRegion::solid(2, 2, Rgba::rgb(0.0, 1.0, 0.0)),
            left: TextureRegion::solid(2, 2, Rgba::rgb(0.0, 0.0, 1.0)),
            right: TextureRegion::solid(2, 2, Rgba::rgb(1.0, 1.0, 0.0)),
            top: TextureRegion::solid(2, 2, Rgba::rgb(1.0, 0.0, 1.0)),
            bottom: TextureRegion::solid(2, 2, Rgba::rgb(0.0, 1.0, 1.0)),
        };
        let mesh = build_box(&part, Vec3::ZERO, Vec3::splat(2.0), 0.0);

        let cases = [
            (Vec3::new(0.0, 0.0, 5.0), Rgba::rgb(1.0, 0.0, 0.0), Vec3::Z),
            (Vec3::new(0.0, 0.0, -5.0), Rgba::rgb(0.0, 1.0, 0.0), -Vec3::Z),
            (Vec3::new(5.0, 0.0, 0.0), Rgba::rgb(0.0, 0.0, 1.0), Vec3::X),
            (Vec3::new(-5.0, 0.0, 0.0), Rgba::rgb(1.0, 1.0, 0.0), -Vec3::X),
            (Vec3::new(0.0, 5.0, 0.0), Rgba::rgb(1.0, 0.0, 1.0), Vec3::Y),
            (Vec3::new(0.0, -5.0, 0.0), Rgba::rgb(0.0, 1.0, 1.0), -Vec3::Y),
        ];

        for (origin, color, normal) in cases {
            let ray = Ray::new(origin, (-origin).normalize());
            let hit = intersect_mesh(&ray, &mesh);
            assert!(hit.hit, "ray from {origin} should hit");
            assert_eq!(hit.texture_color, color, "wrong face from {origin}");
            assert_eq!(hit.normal, normal, "wrong normal from {origin}");
        }
    }

    #[test]
    fn test_uv_projection_on_front_face() {
        // 2x2 front texture; box spans [-1,1]^3. U runs +X, V runs -Y.
        let mut part = solid_part(Rgba::WHITE);
        part.front = TextureRegion::new(
            2,
            2,
            vec![
                Rgba::rgb(1.0, 0.0, 0.0), // u<0.5, v<0.5 (upper left)
                Rgba::rgb(0.0, 1.0, 0.0), // u>0.5, v<0.5 (upper right)
                Rgba::rgb(0.0, 0.0, 1.0), // u<0.5, v>0.5 (lower left)
                Rgba::rgb(1.0, 1.0, 1.0), // u>0.5, v>0.5 (lower right)
            ],
        );
        let mesh = build_box(&part, Vec3::ZERO, Vec3::splat(2.0), 0.0);

        let shoot = |x: f32, y: f32| {
            let ray = Ray::new(Vec3::new(x, y, 5.0), Vec3::new(0.0, 0.0, -1.0));
            intersect_mesh(&ray, &mesh).texture_color
        };

        // Upper-left of the face (toward -X, +Y) samples texel (0,0)
        assert_eq!(shoot(-0.5, 0.5), Rgba::rgb(1.0, 0.0, 0.0));
        assert_eq!(shoot(0.5, 0.5), Rgba::rgb(0.0, 1.0, 0.0));
        assert_eq!(shoot(-0.5, -0.5), Rgba::rgb(0.0, 0.0, 1.0));
        assert_eq!(shoot(0.5, -0.5), Rgba::rgb(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_transparent_box_is_a_miss() {
        let mesh = build_box(
            &solid_part(Rgba::TRANSPARENT),
            Vec3::ZERO,
            Vec3::splat(2.0),
            0.0,
        );
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(!intersect_mesh(&ray, &mesh).hit);
    }

    #[test]
    fn test_outer_layer_far_face_fallback() {
        // Outer shell with a transparent near (front) face and an opaque
        // far (back) face: the ray sees through to the far side.
        let mut part = solid_part(Rgba::TRANSPARENT);
        part.back = TextureRegion::solid(4, 4, Rgba::rgb(0.2, 0.6, 0.9));
        let mesh = build_box(&part, Vec3::ZERO, Vec3::splat(2.0), 0.5);
        assert!(mesh.is_outer_layer);

        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = intersect_mesh(&ray, &mesh);

        assert!(hit.hit);
        // Far side of the inflated box is at z = -1.5, so t = 6.5
        assert!((hit.t - 6.5).abs() < 1e-5);
        assert_eq!(hit.texture_color, Rgba::rgb(0.2, 0.6, 0.9));
        // Normal flipped toward the viewer
        assert_eq!(hit.normal, Vec3::Z);
        assert!(hit.is_outer_layer);
    }

    #[test]
    fn test_inner_layer_gets_no_fallback() {
        // Same textures but an inner-layer box: transparent front = miss
        let mut part = solid_part(Rgba::TRANSPARENT);
        part.back = TextureRegion::solid(4, 4, Rgba::rgb(0.2, 0.6, 0.9));
        let mesh = build_box(&part, Vec3::ZERO, Vec3::splat(2.0), 0.0);

        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(!intersect_mesh(&ray, &mesh).hit);
    }

    #[test]
    fn test_transparent_shell_passes_through_to_inner() {
        let mut scene = Scene::default();
        scene.meshes.push(build_box(
            &solid_part(Rgba::rgb(0.9, 0.4, 0.1)),
            Vec3::ZERO,
            Vec3::splat(2.0),
            0.0,
        ));
        scene.meshes.push(build_box(
            &solid_part(Rgba::TRANSPARENT),
            Vec3::ZERO,
            Vec3::splat(2.0),
            0.5,
        ));

        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = intersect_scene(&ray, &scene);

        assert!(hit.hit);
        assert!(!hit.is_outer_layer);
        assert_eq!(hit.t, 4.0);
        assert_eq!(hit.texture_color, Rgba::rgb(0.9, 0.4, 0.1));
    }

    #[test]
    fn test_scene_keeps_nearest_hit() {
        let mut scene = Scene::default();
        // Far box first in the list; order must not matter
        scene.meshes.push(build_box(
            &solid_part(Rgba::rgb(0.0, 0.0, 1.0)),
            Vec3::new(0.0, 0.0, -10.0),
            Vec3::splat(2.0),
            0.0,
        ));
        scene.meshes.push(build_box(
            &solid_part(Rgba::rgb(1.0, 0.0, 0.0)),
            Vec3::ZERO,
            Vec3::splat(2.0),
            0.0,
        ));

        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = intersect_scene(&ray, &scene);
        assert_eq!(hit.texture_color, Rgba::rgb(1.0, 0.0, 0.0));
    }
}
