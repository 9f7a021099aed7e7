// Re-export glam for convenience
pub use glam::*;

// skinray math types
mod aabb;
mod interval;
mod ray;
mod rgba;

pub use aabb::{Aabb, SlabHit};
pub use interval::Interval;
pub use ray::Ray;
pub use rgba::Rgba;
