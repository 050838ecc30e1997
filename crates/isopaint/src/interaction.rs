//! Classification of paint entries.
//!
//! Every entry records what kind of map object produced it. The kind drives
//! see-through recolouring, zoom snapping and the debug bounding-box colour.

use serde::{Deserialize, Serialize};

/// What produced a paint entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    #[default]
    None,
    Terrain,
    /// Moving entities (guests, staff, vehicles, litter).
    Sprite,
    Ride,
    Water,
    Scenery,
    Footpath,
    FootpathItem,
    /// Park boundary and entrance.
    Park,
    Wall,
    LargeScenery,
    Label,
    Banner,
}

impl InteractionKind {
    /// Palette index used when the bounding-box overlay is enabled.
    pub const fn debug_colour(self) -> u8 {
        match self {
            InteractionKind::None => 0,
            InteractionKind::Terrain => 102,
            InteractionKind::Sprite => 114,
            InteractionKind::Ride => 229,
            InteractionKind::Water => 126,
            InteractionKind::Scenery => 138,
            InteractionKind::Footpath => 150,
            InteractionKind::FootpathItem => 162,
            InteractionKind::Park => 174,
            InteractionKind::Wall => 186,
            InteractionKind::LargeScenery => 198,
            InteractionKind::Label => 210,
            InteractionKind::Banner => 222,
        }
    }
}

/// Opaque back-reference to the tile element or entity that was being
/// painted when an entry was recorded.
///
/// The paint pipeline never dereferences it; it is carried so that viewport
/// picking can map an entry back to the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemRef(pub u64);
