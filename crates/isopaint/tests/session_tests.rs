//! Recording behaviour of `PaintSession`: culling, exhaustion, cursors and
//! the arranged order for hand-built scenes.

mod common;

use common::{add_box, order, session, BLOCK, OFFSET_BLOCK};
use isopaint::prelude::*;

// ---------------------------------------------------------------------------
// Exhaustion
// ---------------------------------------------------------------------------

#[test]
fn third_parent_fails_when_capacity_is_two() {
    let mut s = session(2, Rotation::R0);
    let a = add_box(&mut s, (0, 0, 0), (32, 32, 8)).unwrap();
    let b = add_box(&mut s, (64, 64, 0), (32, 32, 8)).unwrap();
    assert!(a.is_some());
    assert!(b.is_some());

    let touched_before = s.quadrants().touched();
    let heads_before: Vec<_> = (0..MAX_PAINT_QUADRANTS).map(|i| s.quadrants().head(i)).collect();

    let err = add_box(&mut s, (320, 320, 0), (32, 32, 8)).unwrap_err();
    assert_eq!(err, PaintError::ArenaExhausted { capacity: 2 });

    assert_eq!(s.quadrants().touched(), touched_before);
    let heads_after: Vec<_> = (0..MAX_PAINT_QUADRANTS).map(|i| s.quadrants().head(i)).collect();
    assert_eq!(heads_before, heads_after);
    assert_eq!(s.arena().len(), 2);
}

#[test]
fn exhaustion_leaves_arranged_order_intact() {
    let mut s = session(2, Rotation::R0);
    add_box(&mut s, (0, 0, 0), (32, 32, 8)).unwrap();
    add_box(&mut s, (96, 0, 0), (32, 32, 8)).unwrap();
    s.arrange();
    let arranged = order(&s);

    assert!(add_box(&mut s, (0, 0, 0), (8, 8, 8)).is_err());
    assert!(s
        .attach_to_previous(ImageId::from_sprite(BLOCK), ScreenCoords::default())
        .is_err());
    assert_eq!(order(&s), arranged);
}

#[test]
fn attachments_and_texts_share_the_capacity() {
    let mut s = session(3, Rotation::R0);
    add_box(&mut s, (0, 0, 0), (32, 32, 8)).unwrap().unwrap();
    s.attach_to_previous(ImageId::from_sprite(BLOCK), ScreenCoords::new(1, 1))
        .unwrap();
    let text = s.add_floating_text(FloatingTextRequest {
        amount: 5,
        string_id: StringId(1),
        secondary_arg: 0,
        z: 0,
        offset_x: 0,
        y_offsets: &[],
        rotation: Rotation::R0,
    });
    assert!(text.is_some());
    assert!(s.arena().is_exhausted());
    assert_eq!(
        add_box(&mut s, (0, 0, 0), (1, 1, 1)),
        Err(PaintError::ArenaExhausted { capacity: 3 })
    );
}

// ---------------------------------------------------------------------------
// Culling
// ---------------------------------------------------------------------------

#[test]
fn culled_request_does_not_allocate() {
    let mut s = PaintSession::new(
        SessionConfig::default(),
        common::catalog(),
        Viewport::new(0, 0, 64, 64, 0),
        ViewFlags::empty(),
        Rotation::R0,
    );
    // OFFSET_BLOCK draws 4000 pixels right of its anchor.
    let result = s.add_as_parent(
        ImageId::from_sprite(OFFSET_BLOCK),
        CoordsXYZ::default(),
        CoordsXYZ::new(32, 32, 8),
        CoordsXYZ::default(),
    );
    assert_eq!(result, Ok(None));
    assert!(s.arena().is_empty());
    assert!(s.quadrants().is_empty());

    // The same sprite id as a child is culled too, and falls back to parent
    // semantics (no parent yet) without touching anything.
    let child = s.add_as_child(
        ImageId::from_sprite(OFFSET_BLOCK),
        CoordsXYZ::default(),
        CoordsXYZ::new(32, 32, 8),
        CoordsXYZ::default(),
    );
    assert_eq!(child, Ok(None));
    assert!(s.arena().is_empty());
}

#[test]
fn culling_uses_the_zoomed_clip_region_as_given() {
    // Anchor (0, 0); BLOCK covers [-16, 16) on both axes.
    let cases = [
        (Viewport::new(16, 0, 64, 64, 0), false),
        (Viewport::new(15, 0, 64, 64, 0), true),
        (Viewport::new(-80, -80, 64, 64, 0), false),
        (Viewport::new(-79, -79, 64, 64, 0), true),
    ];
    for (viewport, visible) in cases {
        let mut s = PaintSession::new(
            SessionConfig::default(),
            common::catalog(),
            viewport,
            ViewFlags::empty(),
            Rotation::R0,
        );
        let result = s
            .add_as_parent(
                ImageId::from_sprite(BLOCK),
                CoordsXYZ::default(),
                CoordsXYZ::new(32, 32, 8),
                CoordsXYZ::default(),
            )
            .unwrap();
        assert_eq!(result.is_some(), visible, "{viewport:?}");
    }
}

// ---------------------------------------------------------------------------
// Cursors
// ---------------------------------------------------------------------------

#[test]
fn child_without_parent_is_bucketed_like_a_parent() {
    let mut parent_session = session(8, Rotation::R1);
    let mut child_session = session(8, Rotation::R1);

    let size = CoordsXYZ::new(16, 24, 8);
    let offset = CoordsXYZ::new(40, 72, 4);
    let parent = parent_session
        .add_as_parent(ImageId::from_sprite(BLOCK), CoordsXYZ::default(), size, offset)
        .unwrap()
        .unwrap();
    let child = child_session
        .add_as_child(ImageId::from_sprite(BLOCK), CoordsXYZ::default(), size, offset)
        .unwrap()
        .unwrap();

    let p = parent_session.arena().entry(parent).unwrap();
    let c = child_session.arena().entry(child).unwrap();
    assert_eq!(p.bounds, c.bounds);
    assert_eq!(p.quadrant_index(), c.quadrant_index());
    assert_eq!(parent_session.quadrants().touched(), child_session.quadrants().touched());
    assert_eq!(child_session.quadrants().head(c.quadrant_index()), Some(child));
}

#[test]
fn parent_after_children_starts_a_new_object() {
    let mut s = session(8, Rotation::R0);
    let first = add_box(&mut s, (0, 0, 0), (32, 32, 8)).unwrap().unwrap();
    let nested = s
        .add_as_child(
            ImageId::from_sprite(BLOCK),
            CoordsXYZ::default(),
            CoordsXYZ::new(32, 32, 2),
            CoordsXYZ::new(0, 0, 8),
        )
        .unwrap()
        .unwrap();
    let second = add_box(&mut s, (128, 0, 0), (32, 32, 8)).unwrap().unwrap();

    let arena = s.arena();
    assert_eq!(arena.entry(first).unwrap().children(), Some(nested));
    assert_eq!(arena.entry(second).unwrap().children(), None);
    assert_eq!(s.last_entry(), Some(second));
}

// ---------------------------------------------------------------------------
// Arranged order
// ---------------------------------------------------------------------------

/// B and A share bucket 5 with A in front of B; C sits in bucket 6.
fn three_box_scene(c_near: (i32, i32, i32), c_size: (i32, i32, i32)) -> (PaintSession, [EntryId; 3]) {
    let mut s = session(16, Rotation::R0);
    let b = add_box(&mut s, (64, 96, 0), (8, 8, 8)).unwrap().unwrap();
    let a = add_box(&mut s, (72, 96, 0), (40, 40, 8)).unwrap().unwrap();
    let c = add_box(&mut s, c_near, c_size).unwrap().unwrap();

    let arena = s.arena();
    assert_eq!(arena.entry(a).unwrap().quadrant_index(), 5);
    assert_eq!(arena.entry(b).unwrap().quadrant_index(), 5);
    assert_eq!(arena.entry(c).unwrap().quadrant_index(), 6);
    let (ab, bb) = (arena.entry(a).unwrap().bounds, arena.entry(b).unwrap().bounds);
    assert!(occludes(Rotation::R0, &ab, &bb));
    assert!(!occludes(Rotation::R0, &bb, &ab));

    (s, [a, b, c])
}

#[test]
fn raised_box_in_next_bucket_is_painted_last() {
    let (mut s, [a, b, c]) = three_box_scene((100, 92, 20), (5, 5, 4));
    s.arrange();
    assert_eq!(order(&s), vec![b, a, c]);
}

#[test]
fn sunken_box_in_next_bucket_is_pulled_to_the_front() {
    let (mut s, [a, b, c]) = three_box_scene((100, 92, -20), (5, 5, 10));
    {
        let arena = s.arena();
        let (ab, cb) = (arena.entry(a).unwrap().bounds, arena.entry(c).unwrap().bounds);
        assert!(occludes(Rotation::R0, &ab, &cb));
    }
    s.arrange();
    assert_eq!(order(&s), vec![c, b, a]);
}

#[test]
fn arranging_twice_gives_the_same_order() {
    let (mut s, [a, b, c]) = three_box_scene((100, 92, -20), (5, 5, 10));
    let head = s.arrange();
    assert_eq!(s.arrange(), head);
    assert_eq!(order(&s), vec![c, b, a]);
}

#[test]
fn entries_added_after_arranging_join_the_next_arrangement() {
    let mut s = session(16, Rotation::R0);
    let b = add_box(&mut s, (64, 96, 0), (8, 8, 8)).unwrap().unwrap();
    let a = add_box(&mut s, (72, 96, 0), (40, 40, 8)).unwrap().unwrap();
    s.arrange();
    assert_eq!(order(&s), vec![b, a]);

    let c = add_box(&mut s, (100, 92, 20), (5, 5, 4)).unwrap().unwrap();
    s.arrange();
    assert_eq!(order(&s), vec![b, a, c]);

    let (mut fresh, _) = three_box_scene((100, 92, 20), (5, 5, 4));
    fresh.arrange();
    assert_eq!(order(&fresh), order(&s));
}

#[test]
fn empty_session_arranges_to_nothing() {
    let mut s = session(4, Rotation::R2);
    assert_eq!(s.arrange(), None);
    assert_eq!(s.paint_order().count(), 0);
}
