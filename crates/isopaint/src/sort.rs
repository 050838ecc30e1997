//! Quadrant occlusion sorter.
//!
//! Turns the per-bucket chains of a [`QuadrantTable`] into one paint-order
//! chain. The chains are first concatenated in ascending bucket order, then
//! each adjacent bucket pair `(q, q + 1)` gets a bounded local reordering
//! pass:
//!
//! 1. Entries from `q` onwards are classified: bucket `q + 1` entries are
//!    seeds *and* candidates, bucket `q` entries are seeds (and also
//!    candidates on the very first pass), anything beyond `q + 1` ends the
//!    pass.
//! 2. Every seed in turn scans forward over the candidates. A candidate that
//!    the seed [`occludes`] is unlinked and relinked directly in front of the
//!    seed, so it is painted first.
//!
//! Because only neighbouring buckets are compared the work per frame is
//! bounded by the square of the bucket population rather than the scene
//! size. Overlaps between non-adjacent buckets are never corrected.

use bitflags::bitflags;
use tracing::trace;

use isopaint_geom::{BoundBox, Rotation};

use crate::arena::PaintEntry;
use crate::handle::EntryId;
use crate::quadrant::QuadrantTable;

bitflags! {
    /// Classification of an entry during one reordering pass.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub(crate) struct QuadrantFlags: u8 {
        /// Beyond the pass window; ends the pass.
        const BIGGER = 1 << 0;
        /// May be moved in front of a seed.
        const NEXT = 1 << 1;
        /// Still to be processed as a seed.
        const IDENTICAL = 1 << 2;
    }
}

// ---------------------------------------------------------------------------
// Dominance predicates
// ---------------------------------------------------------------------------

/// Whether `front` must be painted after `back` at `rotation`.
///
/// `front` reaches `back`'s near corner on every axis and does not start
/// strictly inside `back` on the axes the rotation treats as facing the
/// camera.
#[inline]
pub fn occludes(rotation: Rotation, front: &BoundBox, back: &BoundBox) -> bool {
    match rotation {
        Rotation::R0 => occludes_r0(front, back),
        Rotation::R1 => occludes_r1(front, back),
        Rotation::R2 => occludes_r2(front, back),
        Rotation::R3 => occludes_r3(front, back),
    }
}

fn occludes_r0(a: &BoundBox, b: &BoundBox) -> bool {
    a.z_end >= b.z
        && a.y_end >= b.y
        && a.x_end >= b.x
        && !(a.z < b.z_end && a.y < b.y_end && a.x < b.x_end)
}

fn occludes_r1(a: &BoundBox, b: &BoundBox) -> bool {
    a.z_end >= b.z
        && a.y_end >= b.y
        && a.x_end < b.x
        && !(a.z < b.z_end && a.y < b.y_end && a.x >= b.x_end)
}

fn occludes_r2(a: &BoundBox, b: &BoundBox) -> bool {
    a.z_end >= b.z
        && a.y_end < b.y
        && a.x_end < b.x
        && !(a.z < b.z_end && a.y >= b.y_end && a.x >= b.x_end)
}

fn occludes_r3(a: &BoundBox, b: &BoundBox) -> bool {
    a.z_end >= b.z
        && a.y_end < b.y
        && a.x_end >= b.x
        && !(a.z < b.z_end && a.y >= b.y_end && a.x < b.x_end)
}

// ---------------------------------------------------------------------------
// Chain plumbing
// ---------------------------------------------------------------------------

/// A position in the chain: before the first entry, or after a given entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Link {
    Head,
    After(EntryId),
}

/// The paint-order chain threaded through the arena's entries.
struct Chain<'a> {
    head: Option<EntryId>,
    entries: &'a mut [PaintEntry],
}

impl Chain<'_> {
    #[inline]
    fn get(&self, id: EntryId) -> &PaintEntry {
        &self.entries[id.slot()]
    }

    #[inline]
    fn get_mut(&mut self, id: EntryId) -> &mut PaintEntry {
        &mut self.entries[id.slot()]
    }

    #[inline]
    fn next(&self, link: Link) -> Option<EntryId> {
        match link {
            Link::Head => self.head,
            Link::After(id) => self.get(id).next_in_chain,
        }
    }

    #[inline]
    fn set_next(&mut self, link: Link, next: Option<EntryId>) {
        match link {
            Link::Head => self.head = next,
            Link::After(id) => self.get_mut(id).next_in_chain = next,
        }
    }
}

// ---------------------------------------------------------------------------
// Arrange
// ---------------------------------------------------------------------------

/// Build the paint-order chain and return its head.
///
/// `entries` must be the arena storage the table's handles point into. The
/// bucket chains are only read, so arranging again after more entries were
/// bucketed rebuilds the whole order. Returns `None` when nothing was
/// bucketed.
pub(crate) fn arrange(
    entries: &mut [PaintEntry],
    table: &QuadrantTable,
    rotation: Rotation,
) -> Option<EntryId> {
    let touched = table.touched()?;
    let (back, front) = (*touched.start(), *touched.end());

    let mut chain = Chain {
        head: None,
        entries,
    };

    // Concatenate the bucket chains back to front.
    let mut tail = Link::Head;
    let mut linked = 0usize;
    for index in touched {
        let mut cursor = table.head(index);
        while let Some(id) = cursor {
            chain.set_next(tail, Some(id));
            let entry = chain.get_mut(id);
            entry.quadrant_flags = QuadrantFlags::empty();
            cursor = entry.next_in_bucket;
            tail = Link::After(id);
            linked += 1;
        }
    }
    chain.set_next(tail, None);

    let mut cache = reorder_pass(&mut chain, Link::Head, back, true, rotation);
    for quadrant in back + 1..front {
        cache = reorder_pass(&mut chain, cache, quadrant, false, rotation);
    }

    trace!(entries = linked, back, front, %rotation, "arranged paint chain");
    chain.head
}

/// One local reordering pass for the bucket pair `(quadrant, quadrant + 1)`.
///
/// Returns the position just before the first entry of bucket `quadrant` or
/// later, which is where the next pass can start scanning.
fn reorder_pass(
    chain: &mut Chain<'_>,
    start: Link,
    quadrant: usize,
    first_pass: bool,
    rotation: Rotation,
) -> Link {
    let mut pos = start;
    loop {
        match chain.next(pos) {
            None => return pos,
            Some(id) if chain.get(id).quadrant_index < quadrant => pos = Link::After(id),
            Some(_) => break,
        }
    }
    let cache = pos;

    let same_bucket = if first_pass {
        QuadrantFlags::NEXT | QuadrantFlags::IDENTICAL
    } else {
        QuadrantFlags::IDENTICAL
    };
    let mut cursor = chain.next(cache);
    while let Some(id) = cursor {
        let entry = chain.get_mut(id);
        let index = entry.quadrant_index;
        if index > quadrant + 1 {
            entry.quadrant_flags = QuadrantFlags::BIGGER;
            break;
        }
        entry.quadrant_flags = if index == quadrant + 1 {
            QuadrantFlags::NEXT | QuadrantFlags::IDENTICAL
        } else if index == quadrant {
            same_bucket
        } else {
            // Moved ahead of its bucket by the previous pass.
            QuadrantFlags::empty()
        };
        cursor = entry.next_in_chain;
    }

    let mut pos = cache;
    loop {
        let seed = loop {
            let Some(id) = chain.next(pos) else {
                return cache;
            };
            let flags = chain.get(id).quadrant_flags;
            if flags.contains(QuadrantFlags::BIGGER) {
                return cache;
            }
            if flags.contains(QuadrantFlags::IDENTICAL) {
                break id;
            }
            pos = Link::After(id);
        };
        let before_seed = pos;

        let seed_entry = chain.get_mut(seed);
        seed_entry.quadrant_flags.remove(QuadrantFlags::IDENTICAL);
        let seed_bounds = seed_entry.bounds;

        let mut prev = seed;
        while let Some(candidate) = chain.get(prev).next_in_chain {
            let entry = chain.get(candidate);
            if entry.quadrant_flags.contains(QuadrantFlags::BIGGER) {
                break;
            }
            if !entry.quadrant_flags.contains(QuadrantFlags::NEXT)
                || !occludes(rotation, &seed_bounds, &entry.bounds)
            {
                prev = candidate;
                continue;
            }

            // Unlink the candidate and relink it right after `before_seed`,
            // ahead of the seed and of anything moved there earlier.
            let after = entry.next_in_chain;
            chain.get_mut(prev).next_in_chain = after;
            let first = chain.next(before_seed);
            chain.set_next(before_seed, Some(candidate));
            chain.get_mut(candidate).next_in_chain = first;
        }

        pos = before_seed;
    }
}
