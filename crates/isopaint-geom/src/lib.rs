//! Isopaint geometry -- integer world/screen coordinates and the isometric
//! projector.
//!
//! This crate holds the pure math shared by the paint pipeline: quarter-turn
//! rotations, world and screen coordinate types, world-space bounding boxes,
//! and the two projection functions used when a draw request is recorded.
//!
//! # Quick Start
//!
//! ```
//! use isopaint_geom::prelude::*;
//!
//! let screen = project_to_screen(CoordsXYZ::new(32, 32, 8), Rotation::R0);
//! assert_eq!(screen, ScreenCoords::new(0, 24));
//!
//! let extent = rotate_bounds_extent(CoordsXYZ::new(32, 32, 4), Rotation::R0);
//! assert_eq!(extent, CoordsXYZ::new(31, 31, 4));
//! ```

#![deny(unsafe_code)]

pub mod bounds;
pub mod coords;
pub mod projector;
pub mod rotation;

pub use bounds::{BoundBox, BoxCorners};
pub use coords::{CoordsXY, CoordsXYZ, ScreenCoords, COORDS_XY_STEP, COORDS_Z_STEP};
pub use projector::{project_to_screen, rotate_bounds_extent};
pub use rotation::Rotation;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced when converting raw values into geometry types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeomError {
    /// A rotation index outside `0..4`.
    #[error("rotation {0} is out of range (expected 0..=3)")]
    InvalidRotation(u8),
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::bounds::{BoundBox, BoxCorners};
    pub use crate::coords::{CoordsXY, CoordsXYZ, ScreenCoords, COORDS_XY_STEP, COORDS_Z_STEP};
    pub use crate::projector::{project_to_screen, rotate_bounds_extent};
    pub use crate::rotation::Rotation;
    pub use crate::GeomError;
}
