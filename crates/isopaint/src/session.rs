//! Per-frame paint session: the add-entry family and the arranged chain.
//!
//! A [`PaintSession`] owns one [`PaintArena`] and one [`QuadrantTable`]. The
//! external scene traversal feeds it draw requests through the `add_*` and
//! `attach_*` methods while it walks the visible map; [`PaintSession::arrange`]
//! then turns the buckets into the final paint order.
//!
//! # Outcomes of a draw request
//!
//! | result                         | meaning                               |
//! |--------------------------------|---------------------------------------|
//! | `Ok(Some(id))`                 | recorded                              |
//! | `Ok(None)`                     | culled, or sprite unknown to catalog  |
//! | `Err(PaintError::ArenaExhausted)` | capacity reached, nothing recorded |
//!
//! None of the failure paths touch state that was already committed.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use isopaint_geom::{
    project_to_screen, rotate_bounds_extent, BoundBox, CoordsXY, CoordsXYZ, Rotation,
    ScreenCoords,
};

use crate::arena::{AttachedEntry, FloatingTextEntry, PaintArena, PaintEntry};
use crate::config::{RenderConfig, SessionConfig};
use crate::handle::{AttachedId, EntryId, TextId};
use crate::image::{ImageId, SpriteCatalog, StringId};
use crate::interaction::{InteractionKind, ItemRef};
use crate::quadrant::QuadrantTable;
use crate::sort;
use crate::view::{ViewFlags, Viewport};
use crate::{PaintError, PaintResult};

/// Arguments of [`PaintSession::add_floating_text`].
#[derive(Debug, Clone, Copy)]
pub struct FloatingTextRequest<'a> {
    /// First template argument, usually a money amount.
    pub amount: i32,
    pub string_id: StringId,
    /// Second template argument.
    pub secondary_arg: i32,
    /// Height of the anchor above the sprite origin.
    pub z: i32,
    /// Horizontal screen offset added after projection.
    pub offset_x: i32,
    /// Vertical offset per glyph column.
    pub y_offsets: &'a [i8],
    /// Rotation used to project the anchor.
    pub rotation: Rotation,
}

/// All recording state for one frame of one viewport.
pub struct PaintSession {
    config: SessionConfig,
    render_config: RenderConfig,
    catalog: Arc<dyn SpriteCatalog + Send + Sync>,
    arena: PaintArena,
    quadrants: QuadrantTable,
    paint_head: Option<EntryId>,
    text_head: Option<TextId>,
    text_tail: Option<TextId>,
    rotation: Rotation,
    viewport: Viewport,
    view_flags: ViewFlags,
    sprite_origin: CoordsXY,
    map_position: CoordsXY,
    interaction: InteractionKind,
    current_item: Option<ItemRef>,
    last_entry: Option<EntryId>,
    last_attached: Option<AttachedId>,
    exhaustion_reported: bool,
}

impl fmt::Debug for PaintSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaintSession")
            .field("config", &self.config)
            .field("render_config", &self.render_config)
            .field("records", &self.arena.len())
            .field("rotation", &self.rotation)
            .field("viewport", &self.viewport)
            .field("view_flags", &self.view_flags)
            .field("arranged", &self.paint_head.is_some())
            .finish_non_exhaustive()
    }
}

impl PaintSession {
    /// Create an empty session for one viewport.
    pub fn new(
        config: SessionConfig,
        catalog: Arc<dyn SpriteCatalog + Send + Sync>,
        viewport: Viewport,
        view_flags: ViewFlags,
        rotation: Rotation,
    ) -> Self {
        debug!(capacity = config.capacity, %rotation, "created paint session");
        Self {
            arena: PaintArena::with_capacity(config.capacity),
            config,
            render_config: RenderConfig::default(),
            catalog,
            quadrants: QuadrantTable::new(),
            paint_head: None,
            text_head: None,
            text_tail: None,
            rotation,
            viewport,
            view_flags,
            sprite_origin: CoordsXY::default(),
            map_position: CoordsXY::default(),
            interaction: InteractionKind::None,
            current_item: None,
            last_entry: None,
            last_attached: None,
            exhaustion_reported: false,
        }
    }

    /// Clear every record and retarget the session for a new frame.
    ///
    /// Handles issued before the reset become stale.
    pub(crate) fn reset(&mut self, viewport: Viewport, view_flags: ViewFlags, rotation: Rotation) {
        self.arena.reset();
        self.quadrants.clear();
        self.paint_head = None;
        self.text_head = None;
        self.text_tail = None;
        self.rotation = rotation;
        self.viewport = viewport;
        self.view_flags = view_flags;
        self.sprite_origin = CoordsXY::default();
        self.map_position = CoordsXY::default();
        self.interaction = InteractionKind::None;
        self.current_item = None;
        self.last_entry = None;
        self.last_attached = None;
        self.exhaustion_reported = false;
        debug!(generation = self.arena.generation(), %rotation, "reset paint session");
    }

    // -- accessors ----------------------------------------------------------

    #[inline]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Overlay and clip-view settings for the visitor to consult while
    /// recording. Painter sessions carry the renderer's current settings.
    #[inline]
    pub fn render_config(&self) -> &RenderConfig {
        &self.render_config
    }

    #[inline]
    pub fn set_render_config(&mut self, render_config: RenderConfig) {
        self.render_config = render_config;
    }

    #[inline]
    pub fn arena(&self) -> &PaintArena {
        &self.arena
    }

    /// Mutable record access, e.g. to set a mask or tertiary colour on an
    /// entry that was just added.
    #[inline]
    pub fn arena_mut(&mut self) -> &mut PaintArena {
        &mut self.arena
    }

    #[inline]
    pub fn quadrants(&self) -> &QuadrantTable {
        &self.quadrants
    }

    #[inline]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn view_flags(&self) -> ViewFlags {
        self.view_flags
    }

    #[inline]
    pub fn sprite_origin(&self) -> CoordsXY {
        self.sprite_origin
    }

    #[inline]
    pub fn map_position(&self) -> CoordsXY {
        self.map_position
    }

    #[inline]
    pub fn interaction(&self) -> InteractionKind {
        self.interaction
    }

    /// Most recently added top-level entry (or chained child).
    #[inline]
    pub fn last_entry(&self) -> Option<EntryId> {
        self.last_entry
    }

    #[inline]
    pub fn last_attached(&self) -> Option<AttachedId> {
        self.last_attached
    }

    /// Head of the paint order, `None` until [`arrange`](Self::arrange) ran
    /// (or when nothing was bucketed).
    #[inline]
    pub fn paint_head(&self) -> Option<EntryId> {
        self.paint_head
    }

    #[inline]
    pub fn text_head(&self) -> Option<TextId> {
        self.text_head
    }

    // -- traversal state ----------------------------------------------------

    /// World position that request offsets are relative to.
    #[inline]
    pub fn set_sprite_origin(&mut self, origin: CoordsXY) {
        self.sprite_origin = origin;
    }

    /// Tile recorded on subsequent entries.
    #[inline]
    pub fn set_map_position(&mut self, position: CoordsXY) {
        self.map_position = position;
    }

    /// Classification recorded on subsequent entries.
    #[inline]
    pub fn set_interaction(&mut self, kind: InteractionKind) {
        self.interaction = kind;
    }

    /// Back-reference recorded on subsequent entries.
    #[inline]
    pub fn set_current_item(&mut self, item: Option<ItemRef>) {
        self.current_item = item;
    }

    // -- add family ---------------------------------------------------------

    /// Record a top-level entry and file it into its depth bucket.
    ///
    /// `offset` positions the sprite relative to the sprite origin, `size`
    /// is the bounding-box extent in the viewer's frame, and `bound_offset`
    /// positions the box relative to the sprite origin. Both cursors are
    /// cleared before anything else happens.
    pub fn add_as_parent(
        &mut self,
        image: ImageId,
        offset: CoordsXYZ,
        size: CoordsXYZ,
        bound_offset: CoordsXYZ,
    ) -> PaintResult<Option<EntryId>> {
        self.last_entry = None;
        self.last_attached = None;

        let Some(id) = self.create_entry(image, offset, size, bound_offset)? else {
            return Ok(None);
        };
        let rotation = self.rotation;
        self.quadrants.insert(id, self.arena.entry_at_mut(id), rotation);
        Ok(Some(id))
    }

    /// Record an entry drawn as part of the most recent entry.
    ///
    /// The new entry replaces the previous entry's child link and becomes the
    /// most recent entry itself, so consecutive calls build a chain. With no
    /// previous entry this is [`add_as_parent`](Self::add_as_parent).
    pub fn add_as_child(
        &mut self,
        image: ImageId,
        offset: CoordsXYZ,
        size: CoordsXYZ,
        bound_offset: CoordsXYZ,
    ) -> PaintResult<Option<EntryId>> {
        let Some(parent) = self.last_entry else {
            return self.add_as_parent(image, offset, size, bound_offset);
        };

        let Some(id) = self.create_entry(image, offset, size, bound_offset)? else {
            return Ok(None);
        };
        self.arena.entry_at_mut(parent).children = Some(id);
        Ok(Some(id))
    }

    /// Record an entry that is not bucketed.
    ///
    /// The entry is only drawn if it is linked into something that is, for
    /// example with [`link_child`](Self::link_child).
    pub fn add_orphan(
        &mut self,
        image: ImageId,
        offset: CoordsXYZ,
        size: CoordsXYZ,
        bound_offset: CoordsXYZ,
    ) -> PaintResult<Option<EntryId>> {
        self.last_entry = None;
        self.last_attached = None;
        self.create_entry(image, offset, size, bound_offset)
    }

    /// Make `child` the child of `parent`.
    ///
    /// `child` must be an entry that is not bucketed itself (an orphan or an
    /// existing child) and must differ from `parent`.
    pub fn link_child(&mut self, parent: EntryId, child: EntryId) -> PaintResult<()> {
        let Some(child_entry) = self.arena.entry(child) else {
            return Err(self.stale(child));
        };
        if child == parent || child_entry.is_bucketed() {
            return Err(PaintError::InvalidChild {
                parent: parent.to_string(),
                child: child.to_string(),
            });
        }
        let Some(entry) = self.arena.entry_mut(parent) else {
            return Err(self.stale(parent));
        };
        entry.children = Some(child);
        Ok(())
    }

    /// Attach an image to the most recent entry, in front of its existing
    /// attachments.
    pub fn attach_to_previous_entry(
        &mut self,
        image: ImageId,
        offset: ScreenCoords,
    ) -> PaintResult<AttachedId> {
        self.ensure_capacity()?;
        let parent = self.last_entry.ok_or(PaintError::NoParent)?;

        let first = self.arena.entry_at(parent).attached;
        let id = self.arena.push_attached(AttachedEntry::new(image, offset, first))?;
        self.arena.entry_at_mut(parent).attached = Some(id);
        self.last_attached = Some(id);
        Ok(id)
    }

    /// Attach an image right after the most recent attachment, or to the
    /// most recent entry when nothing has been attached since it was added.
    pub fn attach_to_previous(
        &mut self,
        image: ImageId,
        offset: ScreenCoords,
    ) -> PaintResult<AttachedId> {
        let Some(previous) = self.last_attached else {
            return self.attach_to_previous_entry(image, offset);
        };
        self.ensure_capacity()?;

        let after = self.arena.attached_at(previous).next;
        let id = self.arena.push_attached(AttachedEntry::new(image, offset, after))?;
        self.arena.attached_at_mut(previous).next = Some(id);
        self.last_attached = Some(id);
        Ok(id)
    }

    /// Record a floating label anchored at the sprite origin.
    ///
    /// Dropped silently (returning `None`) when the arena is full.
    pub fn add_floating_text(&mut self, request: FloatingTextRequest<'_>) -> Option<TextId> {
        self.ensure_capacity().ok()?;

        let anchor = CoordsXYZ::from_xy(self.sprite_origin, request.z);
        let screen =
            project_to_screen(anchor, request.rotation) + ScreenCoords::new(request.offset_x, 0);
        let text = FloatingTextEntry {
            string_id: request.string_id,
            args: [request.amount, request.secondary_arg, 0, 0],
            screen,
            y_offsets: request.y_offsets.to_vec(),
            next: None,
        };
        let id = self.arena.push_text(text).ok()?;

        match self.text_tail {
            Some(tail) => self.arena.text_at_mut(tail).next = Some(id),
            None => self.text_head = Some(id),
        }
        self.text_tail = Some(id);
        Some(id)
    }

    // -- ordering -----------------------------------------------------------

    /// Build the paint order from the depth buckets.
    ///
    /// Normally called once, after the traversal has finished recording.
    /// Calling it again rebuilds the order from every bucketed entry,
    /// including ones added since the previous call.
    pub fn arrange(&mut self) -> Option<EntryId> {
        self.paint_head = sort::arrange(self.arena.entries_mut(), &self.quadrants, self.rotation);
        self.paint_head
    }

    /// Top-level entries in paint order.
    pub fn paint_order(&self) -> PaintOrder<'_> {
        PaintOrder {
            arena: &self.arena,
            cursor: self.paint_head,
        }
    }

    /// Floating texts in insertion order.
    pub fn floating_texts(&self) -> FloatingTexts<'_> {
        FloatingTexts {
            arena: &self.arena,
            cursor: self.text_head,
        }
    }

    // -- internals ----------------------------------------------------------

    fn stale(&self, id: impl fmt::Display) -> PaintError {
        PaintError::StaleHandle {
            handle: id.to_string(),
            current: self.arena.generation(),
        }
    }

    fn ensure_capacity(&mut self) -> PaintResult<()> {
        if !self.arena.is_exhausted() {
            return Ok(());
        }
        let capacity = self.arena.capacity();
        if !self.exhaustion_reported {
            self.exhaustion_reported = true;
            warn!(capacity, "paint arena exhausted, dropping draw requests for this frame");
        }
        Err(PaintError::ArenaExhausted { capacity })
    }

    /// Allocate an entry if it survives culling. Sets the entry cursor.
    fn create_entry(
        &mut self,
        image: ImageId,
        offset: CoordsXYZ,
        size: CoordsXYZ,
        bound_offset: CoordsXYZ,
    ) -> PaintResult<Option<EntryId>> {
        self.ensure_capacity()?;
        let Some(entry) = self.build_entry(image, offset, size, bound_offset) else {
            return Ok(None);
        };
        let id = self.arena.push_entry(entry)?;
        self.last_entry = Some(id);
        Ok(Some(id))
    }

    fn build_entry(
        &self,
        image: ImageId,
        offset: CoordsXYZ,
        size: CoordsXYZ,
        bound_offset: CoordsXYZ,
    ) -> Option<PaintEntry> {
        let metrics = self.catalog.metrics(image.sprite_index())?;
        let swapped = self.rotation.swapped();
        let origin = self.sprite_origin;

        let mut anchor = offset.rotate(swapped);
        anchor += origin;
        let screen = project_to_screen(anchor, self.rotation);
        if !self.viewport.overlaps_sprite(screen, &metrics) {
            return None;
        }

        let bound_offset = bound_offset.rotate(swapped);
        let size = rotate_bounds_extent(size, self.rotation);
        let bounds = BoundBox {
            x: bound_offset.x + origin.x,
            y: bound_offset.y + origin.y,
            z: bound_offset.z,
            x_end: size.x + bound_offset.x + origin.x,
            y_end: size.y + bound_offset.y + origin.y,
            z_end: size.z + bound_offset.z,
        };

        let mut entry = PaintEntry::new(image, screen, bounds, self.interaction);
        entry.map_position = self.map_position;
        entry.item = self.current_item;
        Some(entry)
    }
}

// ---------------------------------------------------------------------------
// Iterators
// ---------------------------------------------------------------------------

/// Iterator over the arranged top-level entries.
pub struct PaintOrder<'a> {
    arena: &'a PaintArena,
    cursor: Option<EntryId>,
}

impl<'a> Iterator for PaintOrder<'a> {
    type Item = (EntryId, &'a PaintEntry);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let entry = self.arena.entry_at(id);
        self.cursor = entry.next_in_chain;
        Some((id, entry))
    }
}

/// Iterator over the floating texts.
pub struct FloatingTexts<'a> {
    arena: &'a PaintArena,
    cursor: Option<TextId>,
}

impl<'a> Iterator for FloatingTexts<'a> {
    type Item = &'a FloatingTextEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let text = self.arena.text_at(id);
        self.cursor = text.next;
        Some(text)
    }
}
