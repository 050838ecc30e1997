//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use isopaint::prelude::*;

/// Sprite used by most fixtures: a 32x32 square centred on its anchor.
pub const BLOCK: u32 = 1;

/// Sprite whose pixels sit far to the right of its anchor.
pub const OFFSET_BLOCK: u32 = 2;

/// Install a test-friendly subscriber once per process.
///
/// Honours `RUST_LOG`; silently does nothing if another test already
/// installed one.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn catalog() -> Arc<HashMap<u32, SpriteMetrics>> {
    let mut sprites = HashMap::new();
    sprites.insert(BLOCK, SpriteMetrics::new(-16, -16, 32, 32));
    sprites.insert(OFFSET_BLOCK, SpriteMetrics::new(4000, 0, 8, 8));
    Arc::new(sprites)
}

/// A viewport large enough that nothing recorded near the origin is culled.
pub fn wide_viewport() -> Viewport {
    Viewport::new(-4096, -4096, 8192, 8192, 0)
}

pub fn session(capacity: usize, rotation: Rotation) -> PaintSession {
    init_tracing();
    PaintSession::new(
        SessionConfig { capacity },
        catalog(),
        wide_viewport(),
        ViewFlags::empty(),
        rotation,
    )
}

/// Record a top-level box whose sprite origin is the box's map position.
///
/// Under `Rotation::R0` the box spans `near..near + size - 1` on x and y and
/// `near.2..=near.2 + size.2` on z.
pub fn add_box(
    session: &mut PaintSession,
    near: (i32, i32, i32),
    size: (i32, i32, i32),
) -> PaintResult<Option<EntryId>> {
    session.set_sprite_origin(CoordsXY::new(near.0, near.1));
    session.add_as_parent(
        ImageId::from_sprite(BLOCK),
        CoordsXYZ::default(),
        CoordsXYZ::new(size.0, size.1, size.2),
        CoordsXYZ::new(0, 0, near.2),
    )
}

/// Handles of the arranged top-level entries, in paint order.
pub fn order(session: &PaintSession) -> Vec<EntryId> {
    session.paint_order().map(|(id, _)| id).collect()
}
