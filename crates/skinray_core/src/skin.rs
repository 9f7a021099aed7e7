//! Skin atlas parsing.
//!
//! A Minecraft skin is a 64x64 (or legacy 64x32) texture atlas packing the
//! six faces of every body-part box into a fixed layout. For a box with
//! pixel dimensions (w, h, d) whose block starts at (ox, oy):
//!
//! ```text
//!   column:  ox      ox+d     ox+d+w    ox+2d+w
//!   row oy:          [top w*d] [bottom w*d]
//!   row oy+d: [left d*h] [front w*h] [right d*h] [back w*h]
//! ```
//!
//! The legacy 32-row format has no outer layers (except the head) and no
//! dedicated left limbs; those are mirrored from the right ones.

use thiserror::Error;

use crate::pixmap::Pixmap;
use crate::texture::TextureRegion;

/// Errors produced while interpreting a skin atlas.
#[derive(Error, Debug)]
pub enum SkinError {
    #[error("invalid skin dimensions: {width}x{height} (expected 64x64 or 64x32)")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Which atlas layout the skin uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkinFormat {
    /// Modern 64x64 layout with outer layers for every part.
    Modern64x64,
    /// Legacy 64x32 layout; left limbs mirrored, head-only outer layer.
    Legacy64x32,
}

/// Texture set for one body part (the 6 faces of a box).
#[derive(Debug, Clone, Default)]
pub struct PartTextures {
    pub top: TextureRegion,
    pub bottom: TextureRegion,
    pub front: TextureRegion,
    pub back: TextureRegion,
    pub left: TextureRegion,
    pub right: TextureRegion,
}

impl PartTextures {
    /// True when all six faces are fully transparent, meaning the part's
    /// layer carries no visible pixels at all.
    pub fn is_fully_transparent(&self) -> bool {
        self.top.is_fully_transparent()
            && self.bottom.is_fully_transparent()
            && self.front.is_fully_transparent()
            && self.back.is_fully_transparent()
            && self.left.is_fully_transparent()
            && self.right.is_fully_transparent()
    }
}

/// Complete parsed skin: six body parts, inner and outer layer each.
#[derive(Debug, Clone)]
pub struct SkinData {
    pub format: SkinFormat,

    pub head: PartTextures,
    pub body: PartTextures,
    pub right_arm: PartTextures,
    pub left_arm: PartTextures,
    pub right_leg: PartTextures,
    pub left_leg: PartTextures,

    pub head_outer: PartTextures,
    pub body_outer: PartTextures,
    pub right_arm_outer: PartTextures,
    pub left_arm_outer: PartTextures,
    pub right_leg_outer: PartTextures,
    pub left_leg_outer: PartTextures,
}

/// Parse a decoded skin atlas, auto-detecting the layout from its size.
pub fn parse_skin(img: &Pixmap) -> Result<SkinData, SkinError> {
    match (img.width, img.height) {
        (64, 64) => Ok(parse_modern(img)),
        (64, 32) => Ok(parse_legacy(img)),
        (width, height) => Err(SkinError::InvalidDimensions { width, height }),
    }
}

/// Extract the six faces of one body-part block.
///
/// (ox, oy) is the top-left of the block; w, h, d are the box dimensions
/// (width, height, depth) in pixels.
fn extract_body_part(img: &Pixmap, ox: u32, oy: u32, w: u32, h: u32, d: u32) -> PartTextures {
    PartTextures {
        top: img.extract_region(ox + d, oy, w, d),
        bottom: img.extract_region(ox + d + w, oy, w, d),
        left: img.extract_region(ox, oy + d, d, h),
        front: img.extract_region(ox + d, oy + d, w, h),
        right: img.extract_region(ox + d + w, oy + d, d, h),
        back: img.extract_region(ox + 2 * d + w, oy + d, w, h),
    }
}

/// Mirror a texture region horizontally.
pub fn mirror_horizontal(region: &TextureRegion) -> TextureRegion {
    let mut pixels = Vec::with_capacity(region.pixels.len());
    for y in 0..region.height {
        for x in 0..region.width {
            let src = (y * region.width + (region.width - 1 - x)) as usize;
            pixels.push(region.pixels[src]);
        }
    }
    TextureRegion::new(region.width, region.height, pixels)
}

/// Mirror a whole body part: every face flips horizontally and the left and
/// right faces trade places.
fn mirror_body_part(part: &PartTextures) -> PartTextures {
    PartTextures {
        top: mirror_horizontal(&part.top),
        bottom: mirror_horizontal(&part.bottom),
        front: mirror_horizontal(&part.front),
        back: mirror_horizontal(&part.back),
        left: mirror_horizontal(&part.right),
        right: mirror_horizontal(&part.left),
    }
}

fn parse_modern(img: &Pixmap) -> SkinData {
    SkinData {
        format: SkinFormat::Modern64x64,

        // Head: 8x8x8 box
        head: extract_body_part(img, 0, 0, 8, 8, 8),
        head_outer: extract_body_part(img, 32, 0, 8, 8, 8),

        // Body: 8x12x4 box
        body: extract_body_part(img, 16, 16, 8, 12, 4),
        body_outer: extract_body_part(img, 16, 32, 8, 12, 4),

        // Arms and legs: 4x12x4 boxes
        right_arm: extract_body_part(img, 40, 16, 4, 12, 4),
        right_arm_outer: extract_body_part(img, 40, 32, 4, 12, 4),

        left_arm: extract_body_part(img, 32, 48, 4, 12, 4),
        left_arm_outer: extract_body_part(img, 48, 48, 4, 12, 4),

        right_leg: extract_body_part(img, 0, 16, 4, 12, 4),
        right_leg_outer: extract_body_part(img, 0, 32, 4, 12, 4),

        left_leg: extract_body_part(img, 16, 48, 4, 12, 4),
        left_leg_outer: extract_body_part(img, 0, 48, 4, 12, 4),
    }
}

fn parse_legacy(img: &Pixmap) -> SkinData {
    let right_arm = extract_body_part(img, 40, 16, 4, 12, 4);
    let right_leg = extract_body_part(img, 0, 16, 4, 12, 4);

    SkinData {
        format: SkinFormat::Legacy64x32,

        head: extract_body_part(img, 0, 0, 8, 8, 8),
        // The legacy format still carries a head overlay
        head_outer: extract_body_part(img, 32, 0, 8, 8, 8),

        body: extract_body_part(img, 16, 16, 8, 12, 4),

        // Left limbs are mirrors of the right ones
        left_arm: mirror_body_part(&right_arm),
        left_leg: mirror_body_part(&right_leg),
        right_arm,
        right_leg,

        // No outer layers below the head in the legacy layout; empty
        // regions are fully transparent so the builder skips them.
        body_outer: PartTextures::default(),
        right_arm_outer: PartTextures::default(),
        left_arm_outer: PartTextures::default(),
        right_leg_outer: PartTextures::default(),
        left_leg_outer: PartTextures::default(),
    }
}
