//! skinray core - scene model and skin atlas handling.
//!
//! This crate provides:
//!
//! - **Pixel containers**: [`Pixmap`] (PNG-backed RGBA float image) and
//!   [`TextureRegion`] (nearest-neighbor sampled sub-image)
//! - **Skin atlas parsing**: [`parse_skin`] for the 64x64 and legacy 64x32
//!   Minecraft skin layouts
//! - **Scene model**: [`Mesh`], [`Scene`], [`Light`], [`Camera`]
//! - **Mesh building**: [`builder`] turns parsed skin data into a posed,
//!   camera-facing box character

pub mod builder;
pub mod camera;
pub mod mesh;
pub mod pixmap;
pub mod pose;
pub mod scene;
pub mod skin;
pub mod texture;

// Re-export commonly used types
pub use camera::Camera;
pub use mesh::{Face, Mesh, Triangle};
pub use pixmap::{Pixmap, PixmapError};
pub use pose::{PartPose, Pose};
pub use scene::{Light, Scene};
pub use skin::{parse_skin, PartTextures, SkinData, SkinError, SkinFormat};
pub use texture::TextureRegion;
