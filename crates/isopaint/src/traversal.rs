//! Scene traversal driver.
//!
//! The session does not know what is on the map. [`PaintSession::generate`]
//! walks the diamond of tiles that can contribute pixels to the viewport, in
//! the order the current rotation requires, and hands every tile position to
//! a [`SceneVisitor`] which records draw requests back into the session.
//!
//! Each row of the walk visits six positions: the anchor tile and its
//! sprites, the sprites of the diagonal neighbour behind, the side neighbour
//! and its sprites, and finally the sprites one step along the row. The row
//! count covers the viewport height plus enough margin for the tallest
//! objects.

use tracing::debug;

use isopaint_geom::{CoordsXY, Rotation, COORDS_XY_STEP};

use crate::session::PaintSession;

/// Extra screen height, in pixels, walked below the viewport.
const VERTICAL_MARGIN: i32 = 2128;

/// Callbacks that record the contents of one map position.
///
/// Before each call the session's sprite origin and map position are set to
/// `position`.
pub trait SceneVisitor {
    /// Record the tile elements (terrain, paths, scenery...) at `position`.
    fn paint_tile(&mut self, session: &mut PaintSession, position: CoordsXY);

    /// Record the moving entities standing at `position`.
    fn paint_sprites(&mut self, session: &mut PaintSession, position: CoordsXY);
}

#[derive(Debug, Clone, Copy)]
enum Visit {
    Tile(i32, i32),
    Sprites(i32, i32),
}

/// Per-row visit offsets relative to the row anchor, and the anchor step.
struct RowPattern {
    visits: [Visit; 6],
    step: (i32, i32),
}

const fn row_pattern(rotation: Rotation) -> RowPattern {
    use Visit::{Sprites, Tile};
    const S: i32 = COORDS_XY_STEP;
    match rotation {
        Rotation::R0 => RowPattern {
            visits: [Tile(0, 0), Sprites(0, 0), Sprites(-S, S), Tile(0, S), Sprites(0, S), Sprites(S, 0)],
            step: (S, S),
        },
        Rotation::R1 => RowPattern {
            visits: [Tile(0, 0), Sprites(0, 0), Sprites(-S, -S), Tile(-S, 0), Sprites(-S, 0), Sprites(0, S)],
            step: (-S, S),
        },
        Rotation::R2 => RowPattern {
            visits: [Tile(0, 0), Sprites(0, 0), Sprites(S, -S), Tile(0, -S), Sprites(0, -S), Sprites(-S, 0)],
            step: (-S, -S),
        },
        Rotation::R3 => RowPattern {
            visits: [Tile(0, 0), Sprites(0, 0), Sprites(S, S), Tile(S, 0), Sprites(S, 0), Sprites(0, -S)],
            step: (S, -S),
        },
    }
}

/// First row anchor and number of rows for a viewport at `rotation`.
fn walk_origin(session: &PaintSession) -> (CoordsXY, i32) {
    let viewport = session.viewport();
    let mask = !(COORDS_XY_STEP - 1);
    let x = viewport.x & mask;
    let y = (viewport.y - 16) & mask;
    let half_x = x >> 1;
    let rows = (viewport.height + VERTICAL_MARGIN) >> 5;

    let (ax, ay) = match session.rotation() {
        Rotation::R0 => (y - half_x, y + half_x),
        Rotation::R1 => (-y - half_x, y - half_x - 16),
        Rotation::R2 => (-y + half_x, -y - half_x),
        Rotation::R3 => (y + half_x, -y + half_x - 16),
    };
    (CoordsXY::new(ax & mask, ay & mask), rows.max(0))
}

impl PaintSession {
    /// Walk every map position that can be visible in this session's
    /// viewport and let `visitor` record it.
    pub fn generate<V: SceneVisitor + ?Sized>(&mut self, visitor: &mut V) {
        let (mut anchor, rows) = walk_origin(self);
        let pattern = row_pattern(self.rotation());
        debug!(rows, start = ?anchor, rotation = %self.rotation(), "generating paint session");

        for _ in 0..rows {
            for visit in pattern.visits {
                match visit {
                    Visit::Tile(dx, dy) => {
                        let position = anchor + CoordsXY::new(dx, dy);
                        self.enter(position);
                        visitor.paint_tile(self, position);
                    }
                    Visit::Sprites(dx, dy) => {
                        let position = anchor + CoordsXY::new(dx, dy);
                        self.enter(position);
                        visitor.paint_sprites(self, position);
                    }
                }
            }
            anchor = anchor + CoordsXY::new(pattern.step.0, pattern.step.1);
        }
    }

    fn enter(&mut self, position: CoordsXY) {
        self.set_sprite_origin(position);
        self.set_map_position(position);
    }
}
