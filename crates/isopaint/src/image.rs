//! Image identifiers, palette colours and the sprite catalog.
//!
//! An [`ImageId`] packs a sprite index together with recolour and
//! transparency bits. The paint pipeline never looks at pixels; it only needs
//! each sprite's draw offset and size, which it reads from a
//! [`SpriteCatalog`] to cull requests against the viewport.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Palette indices used by the pipeline.
pub mod colour {
    pub const BLACK: u8 = 0;
    pub const GREY: u8 = 1;
    pub const BRIGHT_YELLOW: u8 = 17;
}

// ---------------------------------------------------------------------------
// ImageId
// ---------------------------------------------------------------------------

/// A sprite reference plus recolour flags.
///
/// Layout:
///
/// | bits    | meaning                |
/// |---------|------------------------|
/// | 0..19   | sprite index           |
/// | 19..24  | primary remap colour   |
/// | 24..29  | secondary remap colour |
/// | 29      | `REMAP`                |
/// | 30      | `TRANSPARENT`          |
/// | 31      | `REMAP_2_PLUS`         |
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ImageId(pub u32);

impl ImageId {
    pub const INDEX_MASK: u32 = 0x7FFFF;
    pub const PRIMARY_SHIFT: u32 = 19;
    pub const SECONDARY_SHIFT: u32 = 24;
    pub const REMAP: u32 = 1 << 29;
    pub const TRANSPARENT: u32 = 1 << 30;
    pub const REMAP_2_PLUS: u32 = 1 << 31;

    /// Recolour applied to see-through classifications.
    pub const SEE_THROUGH_BITS: u32 = Self::TRANSPARENT
        | (colour::BRIGHT_YELLOW as u32) << Self::PRIMARY_SHIFT
        | (colour::GREY as u32) << Self::SECONDARY_SHIFT;

    /// An image with no recolouring.
    #[inline]
    pub const fn from_sprite(index: u32) -> Self {
        Self(index & Self::INDEX_MASK)
    }

    /// Remap the sprite with a primary colour.
    #[inline]
    pub const fn with_primary(self, colour: u8) -> Self {
        Self(
            self.0 & !(0x1F << Self::PRIMARY_SHIFT)
                | Self::REMAP
                | ((colour as u32) & 0x1F) << Self::PRIMARY_SHIFT,
        )
    }

    /// Remap the sprite with primary and secondary colours.
    #[inline]
    pub const fn with_colours(self, primary: u8, secondary: u8) -> Self {
        let base = self.with_primary(primary).0 & !(0x1F << Self::SECONDARY_SHIFT);
        Self(base | Self::REMAP_2_PLUS | ((secondary as u32) & 0x1F) << Self::SECONDARY_SHIFT)
    }

    #[inline]
    pub const fn sprite_index(self) -> u32 {
        self.0 & Self::INDEX_MASK
    }

    #[inline]
    pub const fn is_transparent(self) -> bool {
        self.0 & Self::TRANSPARENT != 0
    }

    #[inline]
    pub const fn primary_colour(self) -> u8 {
        ((self.0 >> Self::PRIMARY_SHIFT) & 0x1F) as u8
    }

    #[inline]
    pub const fn secondary_colour(self) -> u8 {
        ((self.0 >> Self::SECONDARY_SHIFT) & 0x1F) as u8
    }

    /// Strip every recolour bit and apply the translucent highlight.
    #[inline]
    pub const fn see_through(self) -> Self {
        Self(self.sprite_index() | Self::SEE_THROUGH_BITS)
    }
}

impl fmt::Debug for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageId({}, flags={:#x})", self.sprite_index(), self.0 & !Self::INDEX_MASK)
    }
}

/// Identifier of a localised string template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StringId(pub u16);

// ---------------------------------------------------------------------------
// SpriteCatalog
// ---------------------------------------------------------------------------

/// Draw offset and size of a sprite, relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SpriteMetrics {
    pub x_offset: i32,
    pub y_offset: i32,
    pub width: i32,
    pub height: i32,
}

impl SpriteMetrics {
    #[inline]
    pub const fn new(x_offset: i32, y_offset: i32, width: i32, height: i32) -> Self {
        Self {
            x_offset,
            y_offset,
            width,
            height,
        }
    }
}

/// Lookup of sprite metrics by sprite index.
///
/// Implemented by whatever owns the loaded sprite sheets. A missing sprite is
/// treated like a culled request: nothing is recorded.
pub trait SpriteCatalog {
    fn metrics(&self, sprite_index: u32) -> Option<SpriteMetrics>;
}

impl SpriteCatalog for HashMap<u32, SpriteMetrics> {
    fn metrics(&self, sprite_index: u32) -> Option<SpriteMetrics> {
        self.get(&sprite_index).copied()
    }
}

impl SpriteCatalog for BTreeMap<u32, SpriteMetrics> {
    fn metrics(&self, sprite_index: u32) -> Option<SpriteMetrics> {
        self.get(&sprite_index).copied()
    }
}
