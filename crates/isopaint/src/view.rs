//! Render-target clip region and viewport feature toggles.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use isopaint_geom::ScreenCoords;

use crate::image::SpriteMetrics;

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

/// The screen-space region a session paints into.
///
/// Coordinates are unzoomed screen pixels; `zoom_level` 0 is native
/// resolution and each step halves the output resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub zoom_level: u8,
}

impl Viewport {
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32, zoom_level: u8) -> Self {
        Self {
            x,
            y,
            width,
            height,
            zoom_level,
        }
    }

    /// Whether a sprite anchored at `anchor` overlaps this region.
    ///
    /// The sprite covers `[anchor + offset, anchor + offset + size)` on each
    /// axis; touching an edge does not count as overlap.
    pub const fn overlaps_sprite(&self, anchor: ScreenCoords, metrics: &SpriteMetrics) -> bool {
        let left = anchor.x + metrics.x_offset;
        let top = anchor.y + metrics.y_offset;
        let right = left + metrics.width;
        let bottom = top + metrics.height;

        !(right <= self.x
            || bottom <= self.y
            || left >= self.x + self.width
            || top >= self.y + self.height)
    }
}

// ---------------------------------------------------------------------------
// ViewFlags
// ---------------------------------------------------------------------------

bitflags! {
    /// Per-viewport feature toggles.
    ///
    /// The see-through and underground flags are applied by the renderer.
    /// The remaining flags are carried for the scene visitor, which decides
    /// what gets recorded in the first place.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ViewFlags: u32 {
        const GRIDLINES = 1 << 7;
        const UNDERGROUND_INSIDE = 1 << 0;
        const HIDE_BASE = 1 << 12;
        const HIDE_VERTICAL = 1 << 13;
        const SEETHROUGH_RIDES = 1 << 4;
        const SEETHROUGH_SCENERY = 1 << 5;
        const SEETHROUGH_PATHS = 1 << 16;
        const CLIP_VIEW = 1 << 17;
    }
}

/// Serialized as the raw bit pattern.
impl Serialize for ViewFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for ViewFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u32::deserialize(deserializer).map(Self::from_bits_retain)
    }
}
