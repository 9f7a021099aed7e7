//! Builds the box character from parsed skin data.
//!
//! One box mesh per body part and layer. Boxes are assembled in a model
//! space where the character faces -Z; after every part is built, the whole
//! scene is turned 180 degrees around Y (negating X and Z of each vertex
//! and normal) so the front faces the default camera at +Z. This is a
//! one-time coordinate correction, not a per-frame transform.

use skinray_math::{Mat3, Rgba, Vec3};

use crate::camera::Camera;
use crate::mesh::{Face, Mesh, Triangle};
use crate::pose::{PartPose, Pose};
use crate::scene::{Light, Scene};
use crate::skin::{PartTextures, SkinData};
use crate::texture::TextureRegion;

/// Half-extent inflation of the overlay shell, in model units.
pub const OUTER_LAYER_OFFSET: f32 = 0.5;

struct PartDef<'a> {
    name: &'static str,
    inner: &'a PartTextures,
    outer: &'a PartTextures,
    pose: PartPose,
    position: Vec3,
    size: Vec3,
    pivot: Vec3,
}

/// Build the character scene from skin data with an optional pose.
///
/// Inner layers are always present; an outer layer is omitted entirely when
/// all six of its faces are fully transparent.
pub fn build_scene(skin: &SkinData, pose: &Pose) -> Scene {
    let parts = [
        PartDef {
            name: "head",
            inner: &skin.head,
            outer: &skin.head_outer,
            pose: pose.head,
            position: Vec3::new(0.0, 28.0, 0.0),
            size: Vec3::new(8.0, 8.0, 8.0),
            pivot: Vec3::new(0.0, 24.0, 0.0),
        },
        PartDef {
            name: "body",
            inner: &skin.body,
            outer: &skin.body_outer,
            pose: pose.body,
            position: Vec3::new(0.0, 18.0, 0.0),
            size: Vec3::new(8.0, 12.0, 4.0),
            pivot: Vec3::new(0.0, 18.0, 0.0),
        },
        PartDef {
            name: "right_arm",
            inner: &skin.right_arm,
            outer: &skin.right_arm_outer,
            pose: pose.right_arm,
            position: Vec3::new(-6.0, 18.0, 0.0),
            size: Vec3::new(4.0, 12.0, 4.0),
            pivot: Vec3::new(-6.0, 22.0, 0.0),
        },
        PartDef {
            name: "left_arm",
            inner: &skin.left_arm,
            outer: &skin.left_arm_outer,
            pose: pose.left_arm,
            position: Vec3::new(6.0, 18.0, 0.0),
            size: Vec3::new(4.0, 12.0, 4.0),
            pivot: Vec3::new(6.0, 22.0, 0.0),
        },
        PartDef {
            name: "right_leg",
            inner: &skin.right_leg,
            outer: &skin.right_leg_outer,
            pose: pose.right_leg,
            position: Vec3::new(-2.0, 6.0, 0.0),
            size: Vec3::new(4.0, 12.0, 4.0),
            pivot: Vec3::new(-2.0, 12.0, 0.0),
        },
        PartDef {
            name: "left_leg",
            inner: &skin.left_leg,
            outer: &skin.left_leg_outer,
            pose: pose.left_leg,
            position: Vec3::new(2.0, 6.0, 0.0),
            size: Vec3::new(4.0, 12.0, 4.0),
            pivot: Vec3::new(2.0, 12.0, 0.0),
        },
    ];

    let mut scene = Scene {
        light: Light::default(),
        camera: Camera::default(),
        background: Rgba::new(0.2, 0.3, 0.5, 1.0),
        ..Default::default()
    };

    for part in &parts {
        scene.meshes.push(build_box_with_pose(
            part.inner,
            part.position,
            part.size,
            0.0,
            part.pivot,
            &part.pose,
        ));

        if part.outer.is_fully_transparent() {
            log::debug!("skipping fully transparent outer layer: {}", part.name);
        } else {
            scene.meshes.push(build_box_with_pose(
                part.outer,
                part.position,
                part.size,
                OUTER_LAYER_OFFSET,
                part.pivot,
                &part.pose,
            ));
        }
    }

    flip_character_facing(&mut scene.meshes);
    scene
}

/// Build a plain white character, for when no skin has been loaded.
pub fn build_default_scene() -> Scene {
    let white = PartTextures {
        top: TextureRegion::solid(1, 1, Rgba::WHITE),
        bottom: TextureRegion::solid(1, 1, Rgba::WHITE),
        front: TextureRegion::solid(1, 1, Rgba::WHITE),
        back: TextureRegion::solid(1, 1, Rgba::WHITE),
        left: TextureRegion::solid(1, 1, Rgba::WHITE),
        right: TextureRegion::solid(1, 1, Rgba::WHITE),
    };

    let skin = SkinData {
        format: crate::skin::SkinFormat::Modern64x64,
        head: white.clone(),
        body: white.clone(),
        right_arm: white.clone(),
        left_arm: white.clone(),
        right_leg: white.clone(),
        left_leg: white,
        // Outer layers stay empty (fully transparent) and are skipped
        head_outer: PartTextures::default(),
        body_outer: PartTextures::default(),
        right_arm_outer: PartTextures::default(),
        left_arm_outer: PartTextures::default(),
        right_leg_outer: PartTextures::default(),
        left_leg_outer: PartTextures::default(),
    };

    build_scene(&skin, &Pose::default())
}

/// Build a single box mesh for a body part.
///
/// `position` is the box center, `size` its (width, height, depth), and
/// `offset` inflates every half-extent; offset 0 is the inner layer, any
/// positive offset marks the mesh as an outer layer.
pub fn build_box(tex: &PartTextures, position: Vec3, size: Vec3, offset: f32) -> Mesh {
    let mut mesh = Mesh {
        is_outer_layer: offset > 0.0,
        textures: [
            tex.front.clone(),
            tex.back.clone(),
            tex.left.clone(),
            tex.right.clone(),
            tex.top.clone(),
            tex.bottom.clone(),
        ],
        ..Default::default()
    };

    let hw = size.x / 2.0 + offset;
    let hh = size.y / 2.0 + offset;
    let hd = size.z / 2.0 + offset;

    // The 8 corners; digits are the x/y/z sign bits
    let v000 = position + Vec3::new(-hw, -hh, -hd);
    let v100 = position + Vec3::new(hw, -hh, -hd);
    let v010 = position + Vec3::new(-hw, hh, -hd);
    let v110 = position + Vec3::new(hw, hh, -hd);
    let v001 = position + Vec3::new(-hw, -hh, hd);
    let v101 = position + Vec3::new(hw, -hh, hd);
    let v011 = position + Vec3::new(-hw, hh, hd);
    let v111 = position + Vec3::new(hw, hh, hd);

    // Quads in counter-clockwise order viewed from outside. The character
    // faces -Z here; the scene-wide flip swings the front around to +Z.
    add_face(&mut mesh, v010, v110, v100, v000, Vec3::new(0.0, 0.0, -1.0), Face::Front);
    add_face(&mut mesh, v111, v011, v001, v101, Vec3::new(0.0, 0.0, 1.0), Face::Back);
    add_face(&mut mesh, v011, v010, v000, v001, Vec3::new(-1.0, 0.0, 0.0), Face::Left);
    add_face(&mut mesh, v110, v111, v101, v100, Vec3::new(1.0, 0.0, 0.0), Face::Right);
    add_face(&mut mesh, v011, v111, v110, v010, Vec3::new(0.0, 1.0, 0.0), Face::Top);
    add_face(&mut mesh, v000, v100, v101, v001, Vec3::new(0.0, -1.0, 0.0), Face::Bottom);

    mesh
}

/// Build a box mesh rotated around a joint pivot.
///
/// Rotation order is pitch (around X) then roll (around Z), both about axes
/// anchored at the pivot.
pub fn build_box_with_pose(
    tex: &PartTextures,
    position: Vec3,
    size: Vec3,
    offset: f32,
    pivot: Vec3,
    pose: &PartPose,
) -> Mesh {
    let mut mesh = build_box(tex, position, size, offset);
    if pose.is_identity() {
        return mesh;
    }

    let rot = Mat3::from_rotation_z(pose.roll.to_radians())
        * Mat3::from_rotation_x(pose.pitch.to_radians());

    for tri in &mut mesh.triangles {
        tri.v0 = rot * (tri.v0 - pivot) + pivot;
        tri.v1 = rot * (tri.v1 - pivot) + pivot;
        tri.v2 = rot * (tri.v2 - pivot) + pivot;
        tri.normal = rot * tri.normal;
    }

    mesh.has_rotation = true;
    mesh.pivot = pivot;
    mesh.pitch = pose.pitch;
    mesh.roll = pose.roll;
    mesh
}

/// Turn the finished character 180 degrees around Y by negating the X and Z
/// components of every vertex and normal (and recorded pivots, so that the
/// metadata stays in final world coordinates).
fn flip_character_facing(meshes: &mut [Mesh]) {
    let flip = |v: Vec3| Vec3::new(-v.x, v.y, -v.z);

    for mesh in meshes {
        for tri in &mut mesh.triangles {
            tri.v0 = flip(tri.v0);
            tri.v1 = flip(tri.v1);
            tri.v2 = flip(tri.v2);
            tri.normal = flip(tri.normal);
        }
        if mesh.has_rotation {
            mesh.pivot = flip(mesh.pivot);
        }
    }
}

fn add_face(mesh: &mut Mesh, a: Vec3, b: Vec3, c: Vec3, d: Vec3, normal: Vec3, face: Face) {
    mesh.triangles.push(Triangle {
        v0: a,
        v1: b,
        v2: c,
        normal,
        uv0: (0.0, 0.0),
        uv1: (1.0, 0.0),
        uv2: (1.0, 1.0),
        face,
    });
    mesh.triangles.push(Triangle {
        v0: a,
        v1: c,
        v2: d,
        normal,
        uv0: (0.0, 0.0),
        uv1: (1.0, 1.0),
        uv2: (0.0, 1.0),
        face,
    });
}
