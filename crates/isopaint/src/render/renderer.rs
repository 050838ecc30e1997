//! The scene renderer.
//!
//! Walks the arranged paint order of a [`PaintSession`] and replays it against
//! a [`DrawTarget`]. Each top-level entry is drawn, then its child chain;
//! attachments are drawn for the last entry of that chain only. Floating
//! texts are a separate pass on top.

use isopaint_geom::{project_to_screen, BoxCorners, Rotation, ScreenCoords};

use crate::arena::{PaintArena, PaintEntry};
use crate::config::RenderConfig;
use crate::image::{colour, ImageId};
use crate::interaction::InteractionKind;
use crate::session::PaintSession;
use crate::view::ViewFlags;

use super::colourify::colourify;
use super::target::{DrawLog, DrawTarget, StringFormatter};

/// Replays arranged sessions. Holds only configuration, so one renderer can
/// serve any number of sessions.
#[derive(Debug, Clone, Default)]
pub struct SceneRenderer {
    config: RenderConfig,
}

impl SceneRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    #[inline]
    pub fn config_mut(&mut self) -> &mut RenderConfig {
        &mut self.config
    }

    /// Draw every arranged entry of `session`, back to front.
    ///
    /// Does nothing if the session has not been arranged.
    pub fn render<T: DrawTarget + ?Sized>(&self, session: &PaintSession, target: &mut T) {
        let frame = Frame {
            arena: session.arena(),
            rotation: session.rotation(),
            zoom_level: session.viewport().zoom_level,
            view_flags: session.view_flags(),
            bounding_boxes: self.config.paint_bounding_boxes,
        };
        for (_, entry) in session.paint_order() {
            frame.draw_entry(entry, target);
        }
    }

    /// Draw the session's floating texts in insertion order.
    pub fn render_floating_text<T, F>(&self, session: &PaintSession, target: &mut T, formatter: &F)
    where
        T: DrawTarget + ?Sized,
        F: StringFormatter + ?Sized,
    {
        for text in session.floating_texts() {
            let rendered = formatter.format(text.string_id, &text.args);
            target.draw_text(&rendered, colour::BLACK, text.screen, &text.y_offsets);
        }
    }

    /// Render into a fresh [`DrawLog`].
    pub fn draw_commands(&self, session: &PaintSession) -> DrawLog {
        let mut log = DrawLog::new();
        self.render(session, &mut log);
        log
    }
}

/// Per-render state shared by every entry.
struct Frame<'a> {
    arena: &'a PaintArena,
    rotation: Rotation,
    zoom_level: u8,
    view_flags: ViewFlags,
    bounding_boxes: bool,
}

impl Frame<'_> {
    fn draw_entry<T: DrawTarget + ?Sized>(&self, top: &PaintEntry, target: &mut T) {
        let mut entry = top;
        // A child chain can never be longer than the arena.
        let mut budget = self.arena.entry_count();
        loop {
            let position = snap_to_zoom(entry.screen, entry.kind, self.zoom_level);
            let image = colourify(entry.image, entry.kind, self.view_flags);
            if self.bounding_boxes && self.zoom_level == 0 {
                self.draw_with_bounding_box(entry, image, position, target);
            } else {
                draw_image(entry, image, position, target);
            }

            match entry.children() {
                Some(child) if budget > 0 => {
                    budget -= 1;
                    entry = self.arena.entry_at(child);
                }
                _ => break,
            }
        }
        self.draw_attached(entry, target);
    }

    fn draw_attached<T: DrawTarget + ?Sized>(&self, parent: &PaintEntry, target: &mut T) {
        if parent.children().is_some() {
            return;
        }
        let mut cursor = parent.first_attached();
        while let Some(id) = cursor {
            let attached = self.arena.attached_at(id);
            let position = parent.screen + attached.offset;
            let image = colourify(attached.image, parent.kind, self.view_flags);
            if attached.is_masked() {
                target.draw_sprite_masked(image, attached.colour_image, position);
            } else {
                target.draw_sprite(image, position, parent.tertiary_colour);
            }
            cursor = attached.next();
        }
    }

    fn draw_with_bounding_box<T: DrawTarget + ?Sized>(
        &self,
        entry: &PaintEntry,
        image: ImageId,
        position: ScreenCoords,
        target: &mut T,
    ) {
        let colour = entry.kind.debug_colour();
        let rotation = self.rotation;
        let BoxCorners {
            front_top,
            front_bottom,
            left_top,
            left_bottom,
            right_top,
            right_bottom,
            back_top,
            back_bottom,
        } = entry.bounds.corners();
        let [ft, fb, lt, lb, rt, rb, bt, bb] = [
            front_top,
            front_bottom,
            left_top,
            left_bottom,
            right_top,
            right_bottom,
            back_top,
            back_bottom,
        ]
        .map(|corner| project_to_screen(corner, rotation));

        // Bottom square.
        target.draw_line(fb, lb, colour);
        target.draw_line(bb, lb, colour);
        target.draw_line(bb, rb, colour);
        target.draw_line(fb, rb, colour);

        // Back and side verticals.
        target.draw_line(bt, bb, colour);
        target.draw_line(lt, lb, colour);
        target.draw_line(rt, rb, colour);

        // Top square, back half.
        target.draw_line(bt, lt, colour);
        target.draw_line(bt, rt, colour);

        draw_image(entry, image, position, target);

        target.draw_line(ft, fb, colour);
        target.draw_line(ft, lt, colour);
        target.draw_line(ft, rt, colour);
    }
}

fn draw_image<T: DrawTarget + ?Sized>(
    entry: &PaintEntry,
    image: ImageId,
    position: ScreenCoords,
    target: &mut T,
) {
    if entry.is_masked() {
        target.draw_sprite_masked(image, entry.colour_image, position);
    } else {
        target.draw_sprite(image, position, entry.tertiary_colour);
    }
}

/// Floor moving-entity positions to the zoomed pixel grid.
fn snap_to_zoom(position: ScreenCoords, kind: InteractionKind, zoom_level: u8) -> ScreenCoords {
    if kind != InteractionKind::Sprite || zoom_level == 0 {
        return position;
    }
    let mask = if zoom_level >= 2 { !3 } else { !1 };
    ScreenCoords::new(position.x & mask, position.y & mask)
}
