//! skinray renderer - CPU ray tracing for box characters.
//!
//! Takes a [`Scene`](skinray_core::Scene) of axis-aligned box meshes and
//! produces a still image: slab-method intersection with exact face and UV
//! resolution, Blinn-Phong direct lighting with hard or soft shadows,
//! bounded recursive reflections, ambient occlusion, depth of field, and a
//! tile scheduler that spreads the work across threads while keeping the
//! output bit-identical regardless of thread count.

mod config;
mod intersect;
mod shading;
mod tile;
mod tracer;

pub use config::{RenderConfig, ShadingParams};
pub use intersect::{intersect_mesh, intersect_scene, HitResult};
pub use shading::{compute_soft_shadow, is_in_shadow, shade};
pub use tile::{generate_tiles, render, render_tile, RenderResult, Tile, TileError};
pub use tracer::{background_color, compute_ao, trace_ray};

use rand::RngCore;

/// Re-export math types used throughout the public API.
pub use skinray_math::{Ray, Rgba, Vec3};

/// Generate a uniform f32 in [0, 1) from any RNG.
///
/// Uses the top 24 bits so the value fits an f32 mantissa exactly.
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() >> 8) as f32 * (1.0 / (1u32 << 24) as f32)
}
