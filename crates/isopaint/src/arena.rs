//! Per-frame, fixed-capacity storage for paint records.
//!
//! The arena owns three kinds of record: [`PaintEntry`] (a sprite with a
//! world-space bounding box), [`AttachedEntry`] (a sprite riding on an entry's
//! screen position) and [`FloatingTextEntry`] (a transient label). All three
//! draw from one shared capacity budget. Records are append-only; relations
//! between them (bucket chains, children, attachment chains) are stored as
//! handles inside the records themselves.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use isopaint_geom::{BoundBox, CoordsXY, ScreenCoords};

use crate::handle::{AttachedId, EntryId, TextId};
use crate::image::{ImageId, StringId};
use crate::interaction::{InteractionKind, ItemRef};
use crate::sort::QuadrantFlags;
use crate::{PaintError, PaintResult};

/// Upper bound on the entry storage reserved up front.
const PREALLOCATED_ENTRIES: usize = 1 << 14;

bitflags! {
    /// Per-record drawing flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EntryFlags: u8 {
        /// Blit through the record's colour image as a mask.
        const IS_MASKED = 1 << 0;
    }
}

// ---------------------------------------------------------------------------
// PaintEntry
// ---------------------------------------------------------------------------

/// One pending sprite draw with a bounding box used for occlusion ordering.
#[derive(Debug, Clone)]
pub struct PaintEntry {
    pub image: ImageId,
    /// Mask image, only meaningful with [`EntryFlags::IS_MASKED`].
    pub colour_image: ImageId,
    /// Projected anchor position of the sprite.
    pub screen: ScreenCoords,
    /// Absolute world-space bounds, rotation-0 relative.
    pub bounds: BoundBox,
    pub kind: InteractionKind,
    pub tertiary_colour: u8,
    /// Tile the entry was recorded for.
    pub map_position: CoordsXY,
    pub item: Option<ItemRef>,
    pub flags: EntryFlags,
    pub(crate) children: Option<EntryId>,
    pub(crate) attached: Option<AttachedId>,
    pub(crate) next_in_bucket: Option<EntryId>,
    pub(crate) next_in_chain: Option<EntryId>,
    pub(crate) bucketed: bool,
    pub(crate) quadrant_index: usize,
    pub(crate) quadrant_flags: QuadrantFlags,
}

impl PaintEntry {
    pub fn new(image: ImageId, screen: ScreenCoords, bounds: BoundBox, kind: InteractionKind) -> Self {
        Self {
            image,
            colour_image: ImageId::default(),
            screen,
            bounds,
            kind,
            tertiary_colour: 0,
            map_position: CoordsXY::default(),
            item: None,
            flags: EntryFlags::empty(),
            children: None,
            attached: None,
            next_in_bucket: None,
            next_in_chain: None,
            bucketed: false,
            quadrant_index: 0,
            quadrant_flags: QuadrantFlags::empty(),
        }
    }

    /// Draw this entry through `colour_image` as a mask.
    pub fn set_mask(&mut self, colour_image: ImageId) {
        self.colour_image = colour_image;
        self.flags.insert(EntryFlags::IS_MASKED);
    }

    #[inline]
    pub fn is_masked(&self) -> bool {
        self.flags.contains(EntryFlags::IS_MASKED)
    }

    /// The nested entry drawn right after this one, if any.
    #[inline]
    pub fn children(&self) -> Option<EntryId> {
        self.children
    }

    /// Head of the attachment chain.
    #[inline]
    pub fn first_attached(&self) -> Option<AttachedId> {
        self.attached
    }

    /// Successor in paint order. Only meaningful after arranging.
    #[inline]
    pub fn next(&self) -> Option<EntryId> {
        self.next_in_chain
    }

    /// Entry filed into the same bucket just before this one.
    #[inline]
    pub fn next_in_bucket(&self) -> Option<EntryId> {
        self.next_in_bucket
    }

    /// Whether this entry was filed into a depth bucket.
    #[inline]
    pub fn is_bucketed(&self) -> bool {
        self.bucketed
    }

    /// Depth bucket this entry was filed under. Zero for entries that were
    /// never bucketed (children and orphans).
    #[inline]
    pub fn quadrant_index(&self) -> usize {
        self.quadrant_index
    }
}

// ---------------------------------------------------------------------------
// AttachedEntry
// ---------------------------------------------------------------------------

/// A secondary sprite drawn at a fixed screen offset from its parent entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachedEntry {
    pub image: ImageId,
    pub colour_image: ImageId,
    pub offset: ScreenCoords,
    pub flags: EntryFlags,
    pub(crate) next: Option<AttachedId>,
}

impl AttachedEntry {
    pub(crate) fn new(image: ImageId, offset: ScreenCoords, next: Option<AttachedId>) -> Self {
        Self {
            image,
            colour_image: ImageId::default(),
            offset,
            flags: EntryFlags::empty(),
            next,
        }
    }

    pub fn set_mask(&mut self, colour_image: ImageId) {
        self.colour_image = colour_image;
        self.flags.insert(EntryFlags::IS_MASKED);
    }

    #[inline]
    pub fn is_masked(&self) -> bool {
        self.flags.contains(EntryFlags::IS_MASKED)
    }

    #[inline]
    pub fn next(&self) -> Option<AttachedId> {
        self.next
    }
}

// ---------------------------------------------------------------------------
// FloatingTextEntry
// ---------------------------------------------------------------------------

/// A transient label, such as a money amount floating above a shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloatingTextEntry {
    pub string_id: StringId,
    /// Template arguments: `[amount, secondary, 0, 0]`.
    pub args: [i32; 4],
    pub screen: ScreenCoords,
    /// Vertical offset per glyph column.
    pub y_offsets: Vec<i8>,
    pub(crate) next: Option<TextId>,
}

impl FloatingTextEntry {
    #[inline]
    pub fn next(&self) -> Option<TextId> {
        self.next
    }
}

// ---------------------------------------------------------------------------
// PaintArena
// ---------------------------------------------------------------------------

/// Fixed-capacity, append-only record pool for one session.
///
/// `capacity` bounds the total number of records of all three kinds. When it
/// is reached every push fails with [`PaintError::ArenaExhausted`] and leaves
/// the arena untouched.
#[derive(Debug)]
pub struct PaintArena {
    capacity: usize,
    generation: u32,
    entries: Vec<PaintEntry>,
    attached: Vec<AttachedEntry>,
    texts: Vec<FloatingTextEntry>,
}

impl PaintArena {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            generation: 0,
            entries: Vec::with_capacity(capacity.min(PREALLOCATED_ENTRIES)),
            attached: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Records of all kinds currently allocated.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len() + self.attached.len() + self.texts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.len())
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.len() >= self.capacity
    }

    /// Generation stamped into every handle issued since the last reset.
    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Drop every record and invalidate all outstanding handles.
    ///
    /// Allocated storage is kept for the next frame.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.attached.clear();
        self.texts.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    fn ensure_space(&self) -> PaintResult<()> {
        if self.is_exhausted() {
            Err(PaintError::ArenaExhausted {
                capacity: self.capacity,
            })
        } else {
            Ok(())
        }
    }

    pub(crate) fn push_entry(&mut self, entry: PaintEntry) -> PaintResult<EntryId> {
        self.ensure_space()?;
        let id = EntryId::new(self.entries.len() as u32, self.generation);
        self.entries.push(entry);
        Ok(id)
    }

    pub(crate) fn push_attached(&mut self, attached: AttachedEntry) -> PaintResult<AttachedId> {
        self.ensure_space()?;
        let id = AttachedId::new(self.attached.len() as u32, self.generation);
        self.attached.push(attached);
        Ok(id)
    }

    pub(crate) fn push_text(&mut self, text: FloatingTextEntry) -> PaintResult<TextId> {
        self.ensure_space()?;
        let id = TextId::new(self.texts.len() as u32, self.generation);
        self.texts.push(text);
        Ok(id)
    }

    // -- checked lookups ----------------------------------------------------

    pub fn entry(&self, id: EntryId) -> Option<&PaintEntry> {
        if id.generation() != self.generation {
            return None;
        }
        self.entries.get(id.slot())
    }

    pub fn entry_mut(&mut self, id: EntryId) -> Option<&mut PaintEntry> {
        if id.generation() != self.generation {
            return None;
        }
        self.entries.get_mut(id.slot())
    }

    pub fn attached(&self, id: AttachedId) -> Option<&AttachedEntry> {
        if id.generation() != self.generation {
            return None;
        }
        self.attached.get(id.slot())
    }

    pub fn attached_mut(&mut self, id: AttachedId) -> Option<&mut AttachedEntry> {
        if id.generation() != self.generation {
            return None;
        }
        self.attached.get_mut(id.slot())
    }

    pub fn text(&self, id: TextId) -> Option<&FloatingTextEntry> {
        if id.generation() != self.generation {
            return None;
        }
        self.texts.get(id.slot())
    }

    /// All paint entries in allocation order.
    #[inline]
    pub fn entries(&self) -> &[PaintEntry] {
        &self.entries
    }

    #[inline]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }

    #[inline]
    pub fn text_count(&self) -> usize {
        self.texts.len()
    }

    // -- unchecked access for links created within this generation ----------

    #[inline]
    pub(crate) fn entries_mut(&mut self) -> &mut [PaintEntry] {
        &mut self.entries
    }

    #[inline]
    pub(crate) fn entry_at(&self, id: EntryId) -> &PaintEntry {
        debug_assert_eq!(id.generation(), self.generation);
        &self.entries[id.slot()]
    }

    #[inline]
    pub(crate) fn entry_at_mut(&mut self, id: EntryId) -> &mut PaintEntry {
        debug_assert_eq!(id.generation(), self.generation);
        &mut self.entries[id.slot()]
    }

    #[inline]
    pub(crate) fn attached_at(&self, id: AttachedId) -> &AttachedEntry {
        debug_assert_eq!(id.generation(), self.generation);
        &self.attached[id.slot()]
    }

    #[inline]
    pub(crate) fn attached_at_mut(&mut self, id: AttachedId) -> &mut AttachedEntry {
        debug_assert_eq!(id.generation(), self.generation);
        &mut self.attached[id.slot()]
    }

    #[inline]
    pub(crate) fn text_at(&self, id: TextId) -> &FloatingTextEntry {
        debug_assert_eq!(id.generation(), self.generation);
        &self.texts[id.slot()]
    }

    #[inline]
    pub(crate) fn text_at_mut(&mut self, id: TextId) -> &mut FloatingTextEntry {
        debug_assert_eq!(id.generation(), self.generation);
        &mut self.texts[id.slot()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> PaintEntry {
        PaintEntry::new(
            ImageId::from_sprite(1),
            ScreenCoords::default(),
            BoundBox::default(),
            InteractionKind::Terrain,
        )
    }

    fn text() -> FloatingTextEntry {
        FloatingTextEntry {
            string_id: StringId(1),
            args: [0; 4],
            screen: ScreenCoords::default(),
            y_offsets: Vec::new(),
            next: None,
        }
    }

    #[test]
    fn capacity_is_shared_by_all_record_kinds() {
        let mut arena = PaintArena::with_capacity(3);
        arena.push_entry(entry()).unwrap();
        arena
            .push_attached(AttachedEntry::new(ImageId::from_sprite(2), ScreenCoords::default(), None))
            .unwrap();
        arena.push_text(text()).unwrap();
        assert!(arena.is_exhausted());
        assert_eq!(arena.remaining(), 0);

        assert_eq!(
            arena.push_entry(entry()).unwrap_err(),
            PaintError::ArenaExhausted { capacity: 3 }
        );
        assert!(arena.push_text(text()).is_err());
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn reset_invalidates_handles() {
        let mut arena = PaintArena::with_capacity(4);
        let id = arena.push_entry(entry()).unwrap();
        assert!(arena.entry(id).is_some());

        arena.reset();
        assert!(arena.is_empty());
        assert!(arena.entry(id).is_none(), "old handle must be stale");

        let fresh = arena.push_entry(entry()).unwrap();
        assert_eq!(fresh.index(), id.index());
        assert_ne!(fresh.generation(), id.generation());
        assert!(arena.entry(id).is_none(), "stale handle still rejected after reuse");
    }

    #[test]
    fn set_mask_flags_entry() {
        let mut e = entry();
        assert!(!e.is_masked());
        e.set_mask(ImageId::from_sprite(99));
        assert!(e.is_masked());
        assert_eq!(e.colour_image.sprite_index(), 99);
    }

    #[test]
    fn zero_capacity_rejects_everything() {
        let mut arena = PaintArena::with_capacity(0);
        assert!(arena.is_exhausted());
        assert!(arena.push_entry(entry()).is_err());
    }
}
