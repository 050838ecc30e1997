//! Coarse depth bucketing of top-level paint entries.
//!
//! Each entry's bounding-box origin is rotated into the camera's frame and
//! the two horizontal axes are summed. The sum grows monotonically towards
//! the viewer, so dividing it into steps of [`QUADRANT_STEP`] world units
//! yields a bucket index that orders entries roughly back-to-front. Entries
//! that share a bucket (or sit in neighbouring buckets) are depth-ambiguous
//! and are disambiguated later by [`sort`](crate::sort).

use std::ops::RangeInclusive;

use isopaint_geom::{BoundBox, Rotation};

use crate::arena::PaintEntry;
use crate::handle::EntryId;

/// Number of depth buckets.
pub const MAX_PAINT_QUADRANTS: usize = 512;

/// World units covered by one bucket.
pub const QUADRANT_STEP: i64 = 32;

/// Rotated depth of a box's origin, shifted so that every rotation produces
/// non-negative values for on-map positions.
///
/// Computed in `i64` so that extreme coordinates neither overflow nor
/// panic when negated.
pub fn position_hash(bounds: &BoundBox, rotation: Rotation) -> i64 {
    let (x, y) = (i64::from(bounds.x), i64::from(bounds.y));
    let (x, y) = match rotation {
        Rotation::R0 => (x, y),
        Rotation::R1 => (y, -x),
        Rotation::R2 => (-x, -y),
        Rotation::R3 => (-y, x),
    };
    let shift = match rotation {
        Rotation::R0 => 0,
        Rotation::R1 | Rotation::R3 => 0x2000,
        Rotation::R2 => 0x4000,
    };
    x + shift + y
}

/// Bucket index for a box, always within `0..MAX_PAINT_QUADRANTS`.
pub fn bucket_index_of(bounds: &BoundBox, rotation: Rotation) -> usize {
    let bucket = position_hash(bounds, rotation) / QUADRANT_STEP;
    bucket.clamp(0, MAX_PAINT_QUADRANTS as i64 - 1) as usize
}

// ---------------------------------------------------------------------------
// QuadrantTable
// ---------------------------------------------------------------------------

/// Heads of the per-bucket entry chains plus the touched index range.
#[derive(Debug, Clone)]
pub struct QuadrantTable {
    heads: Vec<Option<EntryId>>,
    touched: Option<(usize, usize)>,
}

impl QuadrantTable {
    pub fn new() -> Self {
        Self {
            heads: vec![None; MAX_PAINT_QUADRANTS],
            touched: None,
        }
    }

    /// Forget every chain.
    pub fn clear(&mut self) {
        if let Some((back, front)) = self.touched.take() {
            self.heads[back..=front].fill(None);
        }
    }

    /// Push `entry` onto the head of its bucket's chain.
    ///
    /// Records the bucket index on the entry and widens the touched range.
    /// Returns the bucket index.
    pub fn insert(&mut self, id: EntryId, entry: &mut PaintEntry, rotation: Rotation) -> usize {
        let index = bucket_index_of(&entry.bounds, rotation);
        entry.quadrant_index = index;
        entry.bucketed = true;
        entry.next_in_bucket = self.heads[index];
        self.heads[index] = Some(id);

        self.touched = Some(match self.touched {
            None => (index, index),
            Some((back, front)) => (back.min(index), front.max(index)),
        });
        index
    }

    /// Most recently inserted entry of bucket `index`.
    #[inline]
    pub fn head(&self, index: usize) -> Option<EntryId> {
        self.heads.get(index).copied().flatten()
    }

    /// Lowest and highest bucket that received an entry, if any.
    #[inline]
    pub fn touched(&self) -> Option<RangeInclusive<usize>> {
        self.touched.map(|(back, front)| back..=front)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.touched.is_none()
    }
}

impl Default for QuadrantTable {
    fn default() -> Self {
        Self::new()
    }
}
