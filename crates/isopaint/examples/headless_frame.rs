//! Paint one frame of a small procedural map without a window.
//!
//! Loads a `PaintConfig` from JSON, records a checkerboard of terrain with a
//! few stacked blocks on top, arranges it, replays it into a `DrawLog` and
//! prints a summary plus the log digest.
//!
//! Run with:
//!   cargo run --example headless_frame -p isopaint
//!   RUST_LOG=isopaint=trace cargo run --example headless_frame -p isopaint

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use isopaint::prelude::*;

const TERRAIN: u32 = 10;
const BLOCK: u32 = 20;
const FLAG: u32 = 30;

const MAP_SIZE: i32 = 32 * COORDS_XY_STEP;

const CONFIG: &str = r#"{
    "session": { "capacity": 4000 },
    "render": { "paint_bounding_boxes": false }
}"#;

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// A 32x32 tile map: flat terrain everywhere, a block with a flag on every
/// seventh tile, and a price label in the middle.
#[derive(Default)]
struct DemoMap {
    tiles_visited: usize,
}

impl DemoMap {
    fn on_map(position: CoordsXY) -> bool {
        (0..MAP_SIZE).contains(&position.x) && (0..MAP_SIZE).contains(&position.y)
    }
}

impl SceneVisitor for DemoMap {
    fn paint_tile(&mut self, session: &mut PaintSession, position: CoordsXY) {
        if !Self::on_map(position) {
            return;
        }
        self.tiles_visited += 1;

        let tile = (position.x / COORDS_XY_STEP, position.y / COORDS_XY_STEP);
        let shade = ((tile.0 + tile.1) & 1) as u8;

        session.set_interaction(InteractionKind::Terrain);
        let _ = session.add_as_parent(
            ImageId::from_sprite(TERRAIN).with_primary(shade),
            CoordsXYZ::default(),
            CoordsXYZ::new(32, 32, 0),
            CoordsXYZ::default(),
        );

        if (tile.0 * 32 + tile.1) % 7 != 0 {
            return;
        }
        session.set_interaction(InteractionKind::Scenery);
        let placed = session.add_as_parent(
            ImageId::from_sprite(BLOCK).with_colours(4, 9),
            CoordsXYZ::default(),
            CoordsXYZ::new(24, 24, 16),
            CoordsXYZ::new(4, 4, 0),
        );
        if let Ok(Some(_)) = placed {
            let _ = session.attach_to_previous(ImageId::from_sprite(FLAG), ScreenCoords::new(0, -24));
        }
    }

    fn paint_sprites(&mut self, session: &mut PaintSession, position: CoordsXY) {
        if position != CoordsXY::new(MAP_SIZE / 2, MAP_SIZE / 2) {
            return;
        }
        session.add_floating_text(FloatingTextRequest {
            amount: 250,
            string_id: StringId(1),
            secondary_arg: 0,
            z: 32,
            offset_x: 0,
            y_offsets: &[0, -1, -2, -1, 0],
            rotation: session.rotation(),
        });
    }
}

fn catalog() -> Arc<HashMap<u32, SpriteMetrics>> {
    let mut sprites = HashMap::new();
    sprites.insert(TERRAIN, SpriteMetrics::new(-32, -16, 64, 32));
    sprites.insert(BLOCK, SpriteMetrics::new(-24, -40, 48, 56));
    sprites.insert(FLAG, SpriteMetrics::new(-4, -16, 8, 16));
    Arc::new(sprites)
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = PaintConfig::from_json_str(CONFIG).context("parsing demo config")?;
    let mut painter = Painter::new(catalog(), config);
    let formatter = |id: StringId, args: &[i32; 4]| match id {
        StringId(1) => format!("${}", args[0]),
        _ => String::new(),
    };

    let viewport = Viewport::new(-640, -64, 1280, 720, 0);
    for rotation in Rotation::ALL {
        let mut map = DemoMap::default();
        let mut log = DrawLog::new();
        let stats = painter.paint_frame(
            viewport,
            ViewFlags::empty(),
            rotation,
            &mut map,
            &mut log,
            &formatter,
        );
        let digest = log.digest().context("serializing draw log")?;

        info!(
            %rotation,
            tiles = map.tiles_visited,
            entries = stats.entries,
            attached = stats.attached,
            draw_calls = log.len(),
            %digest,
            "painted frame"
        );
    }

    Ok(())
}
