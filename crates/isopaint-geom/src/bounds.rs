//! World-space axis-aligned bounding boxes.

use serde::{Deserialize, Serialize};

use crate::CoordsXYZ;

/// An axis-aligned box in absolute world coordinates.
///
/// `x`/`y`/`z` is the near corner and `x_end`/`y_end`/`z_end` the far corner.
/// Whether a far coordinate is inclusive depends on how the extent was
/// produced; [`rotate_bounds_extent`](crate::rotate_bounds_extent) already
/// folds the rotation-specific adjustment in, so the occlusion predicates
/// compare the stored values directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BoundBox {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub x_end: i32,
    pub y_end: i32,
    pub z_end: i32,
}

impl BoundBox {
    /// Build a box from its near and far corners.
    #[inline]
    pub const fn from_corners(near: CoordsXYZ, far: CoordsXYZ) -> Self {
        Self {
            x: near.x,
            y: near.y,
            z: near.z,
            x_end: far.x,
            y_end: far.y,
            z_end: far.z,
        }
    }

    #[inline]
    pub const fn near(&self) -> CoordsXYZ {
        CoordsXYZ::new(self.x, self.y, self.z)
    }

    #[inline]
    pub const fn far(&self) -> CoordsXYZ {
        CoordsXYZ::new(self.x_end, self.y_end, self.z_end)
    }

    /// The eight corners, named for rotation 0.
    pub const fn corners(&self) -> BoxCorners {
        BoxCorners {
            front_top: CoordsXYZ::new(self.x_end, self.y_end, self.z_end),
            front_bottom: CoordsXYZ::new(self.x_end, self.y_end, self.z),
            left_top: CoordsXYZ::new(self.x, self.y_end, self.z_end),
            left_bottom: CoordsXYZ::new(self.x, self.y_end, self.z),
            right_top: CoordsXYZ::new(self.x_end, self.y, self.z_end),
            right_bottom: CoordsXYZ::new(self.x_end, self.y, self.z),
            back_top: CoordsXYZ::new(self.x, self.y, self.z_end),
            back_bottom: CoordsXYZ::new(self.x, self.y, self.z),
        }
    }
}

/// The corners of a [`BoundBox`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxCorners {
    pub front_top: CoordsXYZ,
    pub front_bottom: CoordsXYZ,
    pub left_top: CoordsXYZ,
    pub left_bottom: CoordsXYZ,
    pub right_top: CoordsXYZ,
    pub right_bottom: CoordsXYZ,
    pub back_top: CoordsXYZ,
    pub back_bottom: CoordsXYZ,
}
