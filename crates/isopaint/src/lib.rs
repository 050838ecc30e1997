//! Isopaint -- isometric occlusion ordering and painter's-algorithm rendering.
//!
//! A [`PaintSession`](session::PaintSession) collects draw requests for one
//! frame while an external scene traversal walks the visible map. Each
//! top-level request is projected, culled against the viewport and dropped
//! into a coarse depth bucket (a *quadrant*). Once traversal finishes the
//! session arranges the buckets into one back-to-front chain, locally
//! reordering neighbouring buckets with a rotation-specific bounding-box
//! test, and the [`SceneRenderer`](render::SceneRenderer) replays that chain
//! against a [`DrawTarget`](render::DrawTarget).
//!
//! # Quick Start
//!
//! ```
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! use isopaint::prelude::*;
//!
//! let mut catalog = HashMap::new();
//! catalog.insert(1, SpriteMetrics::new(-16, -16, 32, 32));
//!
//! let viewport = Viewport::new(-256, -256, 512, 512, 0);
//! let mut session = PaintSession::new(
//!     SessionConfig::default(),
//!     Arc::new(catalog),
//!     viewport,
//!     ViewFlags::empty(),
//!     Rotation::R0,
//! );
//!
//! let id = session
//!     .add_as_parent(
//!         ImageId::from_sprite(1),
//!         CoordsXYZ::new(0, 0, 0),
//!         CoordsXYZ::new(32, 32, 4),
//!         CoordsXYZ::new(0, 0, 0),
//!     )
//!     .unwrap();
//! assert!(id.is_some());
//!
//! session.arrange();
//! let log = SceneRenderer::new(RenderConfig::default()).draw_commands(&session);
//! assert_eq!(log.len(), 1);
//! ```

#![deny(unsafe_code)]

pub mod arena;
pub mod config;
pub mod handle;
pub mod image;
pub mod interaction;
pub mod painter;
pub mod quadrant;
pub mod render;
pub mod session;
pub mod sort;
pub mod traversal;
pub mod view;

/// Re-export the geometry crate for convenience.
pub use isopaint_geom;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced while recording draw requests.
///
/// Culling is not an error: a request that falls outside the viewport is
/// reported as `Ok(None)` by the add family.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaintError {
    /// The session's record pool is full. Nothing was recorded.
    #[error("paint arena exhausted ({capacity} records in use)")]
    ArenaExhausted {
        /// Capacity of the exhausted arena.
        capacity: usize,
    },

    /// An attachment was requested but no top-level entry exists in the
    /// current call sequence.
    #[error("no previous paint entry to attach to")]
    NoParent,

    /// A child link would point at the parent itself or at an entry that is
    /// already sorted on its own.
    #[error("entry {child} cannot be linked as a child of {parent}")]
    InvalidChild {
        /// Display form of the parent handle.
        parent: String,
        /// Display form of the rejected child handle.
        child: String,
    },

    /// A handle from an earlier frame was used after the arena was reset.
    #[error("stale paint handle {handle} (arena generation {current})")]
    StaleHandle {
        /// Display form of the offending handle.
        handle: String,
        /// The arena's current generation.
        current: u32,
    },
}

/// Result alias for paint operations.
pub type PaintResult<T> = Result<T, PaintError>;

/// Errors produced while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid JSON for the expected schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use isopaint_geom::prelude::*;

    pub use crate::arena::{AttachedEntry, EntryFlags, FloatingTextEntry, PaintArena, PaintEntry};
    pub use crate::config::{PaintConfig, RenderConfig, SessionConfig};
    pub use crate::handle::{AttachedId, EntryId, TextId};
    pub use crate::image::{colour, ImageId, SpriteCatalog, SpriteMetrics, StringId};
    pub use crate::interaction::{InteractionKind, ItemRef};
    pub use crate::painter::{FrameStats, Painter};
    pub use crate::quadrant::{QuadrantTable, MAX_PAINT_QUADRANTS};
    pub use crate::render::{DrawCall, DrawLog, DrawTarget, SceneRenderer, StringFormatter};
    pub use crate::session::{FloatingTextRequest, PaintSession};
    pub use crate::sort::occludes;
    pub use crate::traversal::SceneVisitor;
    pub use crate::view::{ViewFlags, Viewport};
    pub use crate::{ConfigError, PaintError, PaintResult};
}
