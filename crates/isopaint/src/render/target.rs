//! Drawing-backend interface and the recording backend.

use serde::{Deserialize, Serialize};

use isopaint_geom::ScreenCoords;

use crate::image::{ImageId, StringId};

/// The blitting primitives the renderer needs.
pub trait DrawTarget {
    /// Draw a sprite with its anchor at `position`.
    fn draw_sprite(&mut self, image: ImageId, position: ScreenCoords, tertiary_colour: u8);

    /// Draw a sprite through `mask`.
    fn draw_sprite_masked(&mut self, image: ImageId, mask: ImageId, position: ScreenCoords);

    /// Draw a one-pixel line in a palette colour.
    fn draw_line(&mut self, from: ScreenCoords, to: ScreenCoords, colour: u8);

    /// Draw a string, shifting each glyph column vertically by `y_offsets`.
    fn draw_text(&mut self, text: &str, colour: u8, position: ScreenCoords, y_offsets: &[i8]);
}

/// Turns a string template and its arguments into display text.
pub trait StringFormatter {
    fn format(&self, string_id: StringId, args: &[i32; 4]) -> String;
}

impl<F> StringFormatter for F
where
    F: Fn(StringId, &[i32; 4]) -> String,
{
    fn format(&self, string_id: StringId, args: &[i32; 4]) -> String {
        self(string_id, args)
    }
}

// ---------------------------------------------------------------------------
// DrawCall
// ---------------------------------------------------------------------------

/// One recorded [`DrawTarget`] call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCall {
    Sprite {
        image: ImageId,
        position: ScreenCoords,
        tertiary_colour: u8,
    },
    MaskedSprite {
        image: ImageId,
        mask: ImageId,
        position: ScreenCoords,
    },
    Line {
        from: ScreenCoords,
        to: ScreenCoords,
        colour: u8,
    },
    Text {
        text: String,
        colour: u8,
        position: ScreenCoords,
        y_offsets: Vec<i8>,
    },
}

// ---------------------------------------------------------------------------
// DrawLog
// ---------------------------------------------------------------------------

/// A [`DrawTarget`] that records every call in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawLog {
    calls: Vec<DrawCall>,
}

impl DrawLog {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn into_calls(self) -> Vec<DrawCall> {
        self.calls
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Number of sprite draws (plain and masked).
    pub fn sprite_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Sprite { .. } | DrawCall::MaskedSprite { .. }))
            .count()
    }

    /// BLAKE3 hex digest of the JSON-serialized call list.
    ///
    /// Two renders of the same arranged session have equal digests.
    pub fn digest(&self) -> serde_json::Result<String> {
        let bytes = serde_json::to_vec(&self.calls)?;
        Ok(blake3::hash(&bytes).to_hex().to_string())
    }
}

impl DrawTarget for DrawLog {
    fn draw_sprite(&mut self, image: ImageId, position: ScreenCoords, tertiary_colour: u8) {
        self.calls.push(DrawCall::Sprite {
            image,
            position,
            tertiary_colour,
        });
    }

    fn draw_sprite_masked(&mut self, image: ImageId, mask: ImageId, position: ScreenCoords) {
        self.calls.push(DrawCall::MaskedSprite {
            image,
            mask,
            position,
        });
    }

    fn draw_line(&mut self, from: ScreenCoords, to: ScreenCoords, colour: u8) {
        self.calls.push(DrawCall::Line { from, to, colour });
    }

    fn draw_text(&mut self, text: &str, colour: u8, position: ScreenCoords, y_offsets: &[i8]) {
        self.calls.push(DrawCall::Text {
            text: text.to_owned(),
            colour,
            position,
            y_offsets: y_offsets.to_vec(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_records_in_call_order() {
        let mut log = DrawLog::new();
        log.draw_line(ScreenCoords::new(0, 0), ScreenCoords::new(1, 1), 5);
        log.draw_sprite(ImageId::from_sprite(3), ScreenCoords::new(2, 2), 0);
        log.draw_text("$10", 0, ScreenCoords::new(4, 4), &[1, -1]);

        assert_eq!(log.len(), 3);
        assert_eq!(log.sprite_count(), 1);
        assert!(matches!(log.calls()[0], DrawCall::Line { colour: 5, .. }));
        assert!(matches!(&log.calls()[2], DrawCall::Text { text, .. } if text == "$10"));
    }

    #[test]
    fn digest_tracks_content() {
        let mut a = DrawLog::new();
        let mut b = DrawLog::new();
        a.draw_sprite(ImageId::from_sprite(1), ScreenCoords::new(0, 0), 0);
        b.draw_sprite(ImageId::from_sprite(1), ScreenCoords::new(0, 0), 0);
        assert_eq!(a.digest().unwrap(), b.digest().unwrap());

        b.draw_sprite(ImageId::from_sprite(2), ScreenCoords::new(0, 0), 0);
        assert_ne!(a.digest().unwrap(), b.digest().unwrap());
        assert_eq!(a.digest().unwrap().len(), 64);
    }

    #[test]
    fn closures_format_strings() {
        let formatter = |id: StringId, args: &[i32; 4]| format!("{}:{}", id.0, args[0]);
        assert_eq!(formatter.format(StringId(7), &[42, 0, 0, 0]), "7:42");
    }
}
