//! Integer coordinate types.
//!
//! World space is measured in map units (32 per tile edge, `z` in height
//! units). Screen space is measured in unzoomed pixels, origin top-left,
//! `+y` down.

use std::ops::{Add, AddAssign, Sub};

use serde::{Deserialize, Serialize};

use crate::Rotation;

/// Number of world units along one tile edge.
pub const COORDS_XY_STEP: i32 = 32;

/// Coordinate units per height step.
pub const COORDS_Z_STEP: i32 = 8;

// ---------------------------------------------------------------------------
// CoordsXY
// ---------------------------------------------------------------------------

/// A point on the horizontal world plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CoordsXY {
    pub x: i32,
    pub y: i32,
}

impl CoordsXY {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Rotate the point about the origin by `rotation` quarter turns.
    ///
    /// | rotation | result     |
    /// |----------|------------|
    /// | 0        | `( x,  y)` |
    /// | 1        | `( y, -x)` |
    /// | 2        | `(-x, -y)` |
    /// | 3        | `(-y,  x)` |
    #[inline]
    pub const fn rotate(self, rotation: Rotation) -> Self {
        match rotation {
            Rotation::R0 => self,
            Rotation::R1 => Self::new(self.y, -self.x),
            Rotation::R2 => Self::new(-self.x, -self.y),
            Rotation::R3 => Self::new(-self.y, self.x),
        }
    }

    /// Snap both axes down to the containing tile corner.
    #[inline]
    pub const fn to_tile_start(self) -> Self {
        Self::new(self.x & !(COORDS_XY_STEP - 1), self.y & !(COORDS_XY_STEP - 1))
    }
}

impl Add for CoordsXY {
    type Output = CoordsXY;
    #[inline]
    fn add(self, rhs: CoordsXY) -> CoordsXY {
        CoordsXY::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for CoordsXY {
    type Output = CoordsXY;
    #[inline]
    fn sub(self, rhs: CoordsXY) -> CoordsXY {
        CoordsXY::new(self.x - rhs.x, self.y - rhs.y)
    }
}

// ---------------------------------------------------------------------------
// CoordsXYZ
// ---------------------------------------------------------------------------

/// A point (or extent) in world space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CoordsXYZ {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl CoordsXYZ {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The horizontal component.
    #[inline]
    pub const fn xy(self) -> CoordsXY {
        CoordsXY::new(self.x, self.y)
    }

    /// Combine a horizontal point with a height.
    #[inline]
    pub const fn from_xy(xy: CoordsXY, z: i32) -> Self {
        Self::new(xy.x, xy.y, z)
    }

    /// Rotate the horizontal component, leaving `z` unchanged.
    #[inline]
    pub const fn rotate(self, rotation: Rotation) -> Self {
        Self::from_xy(self.xy().rotate(rotation), self.z)
    }
}

impl Add for CoordsXYZ {
    type Output = CoordsXYZ;
    #[inline]
    fn add(self, rhs: CoordsXYZ) -> CoordsXYZ {
        CoordsXYZ::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

/// Translate horizontally only.
impl Add<CoordsXY> for CoordsXYZ {
    type Output = CoordsXYZ;
    #[inline]
    fn add(self, rhs: CoordsXY) -> CoordsXYZ {
        CoordsXYZ::new(self.x + rhs.x, self.y + rhs.y, self.z)
    }
}

impl AddAssign<CoordsXY> for CoordsXYZ {
    #[inline]
    fn add_assign(&mut self, rhs: CoordsXY) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

// ---------------------------------------------------------------------------
// ScreenCoords
// ---------------------------------------------------------------------------

/// A point in unzoomed screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ScreenCoords {
    pub x: i32,
    pub y: i32,
}

impl ScreenCoords {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for ScreenCoords {
    type Output = ScreenCoords;
    #[inline]
    fn add(self, rhs: ScreenCoords) -> ScreenCoords {
        ScreenCoords::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for ScreenCoords {
    type Output = ScreenCoords;
    #[inline]
    fn sub(self, rhs: ScreenCoords) -> ScreenCoords {
        ScreenCoords::new(self.x - rhs.x, self.y - rhs.y)
    }
}
