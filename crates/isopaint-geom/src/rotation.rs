//! Discrete camera rotations.
//!
//! The isometric camera can only face one of four directions. Every
//! rotation-dependent formula in the workspace dispatches on [`Rotation`]
//! rather than on a raw integer, so an out-of-range rotation cannot reach the
//! projector or the sorter.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::GeomError;

/// One of the four camera orientations, in 90° steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Rotation {
    /// Default orientation.
    #[default]
    R0,
    /// Rotated 90° clockwise.
    R1,
    /// Rotated 180°.
    R2,
    /// Rotated 270° clockwise.
    R3,
}

impl Rotation {
    /// All rotations in index order.
    pub const ALL: [Rotation; 4] = [Rotation::R0, Rotation::R1, Rotation::R2, Rotation::R3];

    /// The rotation index in `0..4`.
    #[inline]
    pub const fn index(self) -> u8 {
        match self {
            Rotation::R0 => 0,
            Rotation::R1 => 1,
            Rotation::R2 => 2,
            Rotation::R3 => 3,
        }
    }

    /// Build a rotation from any integer, wrapping modulo 4.
    #[inline]
    pub const fn wrapping(value: u8) -> Self {
        match value & 3 {
            0 => Rotation::R0,
            1 => Rotation::R1,
            2 => Rotation::R2,
            _ => Rotation::R3,
        }
    }

    /// The rotation with 1 and 3 swapped (`(r * 3) % 4`).
    ///
    /// Sprite offsets are authored relative to the viewer, so they are turned
    /// the opposite way to world coordinates before projection.
    #[inline]
    pub const fn swapped(self) -> Self {
        Self::wrapping(self.index().wrapping_mul(3))
    }

    /// The next rotation clockwise.
    #[inline]
    pub const fn next(self) -> Self {
        Self::wrapping(self.index() + 1)
    }
}

impl TryFrom<u8> for Rotation {
    type Error = GeomError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value < 4 {
            Ok(Self::wrapping(value))
        } else {
            Err(GeomError::InvalidRotation(value))
        }
    }
}

impl From<Rotation> for u8 {
    fn from(rotation: Rotation) -> Self {
        rotation.index()
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rotation {}", self.index())
    }
}
