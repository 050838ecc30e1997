//! Session and renderer configuration.
//!
//! Everything here is plain data with serde support so that a host can keep
//! it in a JSON settings file. Missing fields fall back to their defaults.
//!
//! ```
//! use isopaint::config::PaintConfig;
//!
//! let config = PaintConfig::from_json_str(r#"{ "render": { "paint_bounding_boxes": true } }"#)
//!     .unwrap();
//! assert!(config.render.paint_bounding_boxes);
//! assert_eq!(config.session.capacity, 4000);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use isopaint_geom::{CoordsXY, COORDS_Z_STEP};

use crate::ConfigError;

/// Records available to one session when nothing else is configured.
pub const DEFAULT_SESSION_CAPACITY: usize = 4000;

/// Sizing of a [`PaintSession`](crate::session::PaintSession).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Total records (entries, attachments and texts) per frame.
    pub capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_SESSION_CAPACITY,
        }
    }
}

/// Debug overlays and clipping state consulted while drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Draw a wireframe of every entry's bounding box at zoom level 0.
    pub paint_bounding_boxes: bool,
    /// Highlight tiles that block construction.
    pub paint_blocked_tiles: bool,
    /// Flash regions as they are invalidated.
    pub show_dirty_visuals: bool,
    /// Cut-away height used by the clip view, in height units.
    pub clip_height: u8,
    /// First corner of the clip-view selection.
    pub clip_selection_a: CoordsXY,
    /// Opposite corner of the clip-view selection.
    pub clip_selection_b: CoordsXY,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            paint_bounding_boxes: false,
            paint_blocked_tiles: false,
            show_dirty_visuals: false,
            clip_height: 128,
            clip_selection_a: CoordsXY::new(0, 0),
            clip_selection_b: CoordsXY::new(8128, 8128),
        }
    }
}

impl RenderConfig {
    /// Whether a map position lies inside the clip-view selection, corners
    /// included. The corners may be given in either order.
    pub fn in_clip_selection(&self, position: CoordsXY) -> bool {
        let (a, b) = (self.clip_selection_a, self.clip_selection_b);
        (a.x.min(b.x)..=a.x.max(b.x)).contains(&position.x)
            && (a.y.min(b.y)..=a.y.max(b.y)).contains(&position.y)
    }

    /// Whether a base height in coordinate units is cut away by the clip view.
    pub fn is_above_clip_height(&self, z: i32) -> bool {
        z > i32::from(self.clip_height) * COORDS_Z_STEP
    }
}

/// Top-level configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaintConfig {
    pub session: SessionConfig,
    pub render: RenderConfig,
}

impl PaintConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}
