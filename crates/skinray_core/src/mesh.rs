//! Box meshes and their triangles.

use skinray_math::{Aabb, Vec3};

use crate::texture::TextureRegion;

/// Identity of one of the six box faces.
///
/// Triangles reference their face's texture through this index rather than
/// through a pointer into the owning mesh, so meshes stay trivially
/// cloneable and there is no dangling-reference hazard when a mesh moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Front = 0,
    Back = 1,
    Left = 2,
    Right = 3,
    Top = 4,
    Bottom = 5,
}

impl Face {
    pub const COUNT: usize = 6;

    /// Index into a mesh's texture array.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// One flat-shaded triangle of a box face (each face is two triangles).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
    /// Face normal shared by all three vertices.
    pub normal: Vec3,
    /// Per-vertex UV coordinates into the face texture.
    pub uv0: (f32, f32),
    pub uv1: (f32, f32),
    pub uv2: (f32, f32),
    /// Which of the owning mesh's six textures this triangle shows.
    pub face: Face,
}

/// An axis-aligned box represented as 12 triangles plus the six face
/// textures it owns.
///
/// Meshes are constructed once by the builder and immutable afterwards;
/// posing and the facing correction are whole-mesh vertex transforms
/// applied during construction.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
    /// True for the inflated, possibly semi-transparent overlay shell.
    pub is_outer_layer: bool,
    /// Face textures indexed by [`Face::index`].
    pub textures: [TextureRegion; Face::COUNT],

    /// Pose rotation metadata recorded at build time.
    pub has_rotation: bool,
    /// Rotation pivot point (joint position).
    pub pivot: Vec3,
    /// Pitch around X, degrees.
    pub pitch: f32,
    /// Roll around Z, degrees.
    pub roll: f32,
}

impl Mesh {
    /// The texture for a given face.
    #[inline]
    pub fn texture(&self, face: Face) -> &TextureRegion {
        &self.textures[face.index()]
    }

    /// World-space bounding box over all triangle vertices.
    ///
    /// Since every mesh is box-shaped this is the exact render geometry,
    /// not just a bound.
    pub fn bounds(&self) -> Aabb {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for tri in &self.triangles {
            for v in [tri.v0, tri.v1, tri.v2] {
                min = min.min(v);
                max = max.max(v);
            }
        }
        Aabb::from_points(min, max)
    }
}
