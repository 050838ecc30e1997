//! Paint-order arrangement benchmarks.
//!
//! Records randomly placed boxes into a pooled session and measures bucketing
//! plus arrangement, and the full record/arrange/render path into a
//! `DrawLog`. Scenes are generated from a fixed seed so runs are comparable.
//!
//! Run with: `cargo bench --bench sort_benchmarks`

use std::collections::HashMap;
use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use isopaint::prelude::*;

const SPRITE: u32 = 1;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct BoxSpec {
    origin: CoordsXY,
    z: i32,
    size: CoordsXYZ,
}

/// `count` boxes spread over a 4096x4096 patch of map.
fn random_scene(count: usize, seed: u64) -> Vec<BoxSpec> {
    let mut rng = Pcg64::seed_from_u64(seed);
    (0..count)
        .map(|_| BoxSpec {
            origin: CoordsXY::new(rng.gen_range(0..4096), rng.gen_range(0..4096)),
            z: rng.gen_range(0..256),
            size: CoordsXYZ::new(
                rng.gen_range(1..64),
                rng.gen_range(1..64),
                rng.gen_range(1..48),
            ),
        })
        .collect()
}

fn painter(capacity: usize) -> Painter {
    let mut sprites = HashMap::new();
    sprites.insert(SPRITE, SpriteMetrics::new(-32, -32, 64, 64));
    let config = PaintConfig {
        session: SessionConfig { capacity },
        ..PaintConfig::default()
    };
    Painter::new(Arc::new(sprites), config)
}

fn viewport() -> Viewport {
    Viewport::new(-8192, -8192, 16384, 16384, 0)
}

fn record(session: &mut PaintSession, scene: &[BoxSpec]) {
    for spec in scene {
        session.set_sprite_origin(spec.origin);
        let _ = session.add_as_parent(
            ImageId::from_sprite(SPRITE),
            CoordsXYZ::default(),
            spec.size,
            CoordsXYZ::new(0, 0, spec.z),
        );
    }
}

// ---------------------------------------------------------------------------
// Benchmark 1: record + arrange at 1K and 4K entries, every rotation
// ---------------------------------------------------------------------------

fn bench_arrange(c: &mut Criterion) {
    let mut group = c.benchmark_group("arrange");

    for &count in &[1000usize, 4000] {
        let scene = random_scene(count, 42);
        let mut painter = painter(count);

        for rotation in Rotation::ALL {
            let id = BenchmarkId::new(format!("{rotation}"), count);
            group.bench_with_input(id, &scene, |b, scene| {
                b.iter(|| {
                    let mut session =
                        painter.create_session(viewport(), ViewFlags::empty(), rotation);
                    record(&mut session, scene);
                    black_box(session.arrange());
                    painter.release_session(session);
                });
            });
        }
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark 2: record + arrange + render into a DrawLog
// ---------------------------------------------------------------------------

fn bench_full_frame(c: &mut Criterion) {
    let count = 4000;
    let scene = random_scene(count, 7);
    let mut painter = painter(count);
    let renderer = SceneRenderer::default();

    c.bench_function("frame_4k_entries_draw_log", |b| {
        b.iter(|| {
            let mut session = painter.create_session(viewport(), ViewFlags::empty(), Rotation::R0);
            record(&mut session, &scene);
            session.arrange();
            let log = renderer.draw_commands(&session);
            black_box(log.len());
            painter.release_session(session);
        });
    });
}

// ---------------------------------------------------------------------------
// Criterion groups and main
// ---------------------------------------------------------------------------

criterion_group!(benches, bench_arrange, bench_full_frame);
criterion_main!(benches);
