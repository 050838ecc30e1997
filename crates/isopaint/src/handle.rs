//! Generational handles into a [`PaintArena`](crate::arena::PaintArena).
//!
//! A handle is a 64-bit value that packs the arena *generation* in the high
//! 32 bits and a slot *index* in the low 32 bits. The arena bumps its
//! generation every time it is reset for a new frame, so a handle kept
//! across frames is detected as stale instead of silently aliasing a newer
//! record.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! generational_handle {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        ///
        /// Layout: `[generation: u32 | index: u32]`
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(u64);

        impl $name {
            /// Construct a handle from a slot index and arena generation.
            #[inline]
            pub fn new(index: u32, generation: u32) -> Self {
                Self((generation as u64) << 32 | index as u64)
            }

            /// The slot index (low 32 bits).
            #[inline]
            pub fn index(self) -> u32 {
                self.0 as u32
            }

            /// The arena generation (high 32 bits).
            #[inline]
            pub fn generation(self) -> u32 {
                (self.0 >> 32) as u32
            }

            /// Raw `u64` representation.
            #[inline]
            pub fn to_raw(self) -> u64 {
                self.0
            }

            /// Reconstruct from a raw `u64`.
            #[inline]
            pub fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            #[inline]
            pub(crate) fn slot(self) -> usize {
                self.index() as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({}v{})", stringify!($name), self.index(), self.generation())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}v{}", $prefix, self.index(), self.generation())
            }
        }
    };
}

generational_handle!(
    /// Handle to a [`PaintEntry`](crate::arena::PaintEntry).
    EntryId,
    "e"
);

generational_handle!(
    /// Handle to an [`AttachedEntry`](crate::arena::AttachedEntry).
    AttachedId,
    "a"
);

generational_handle!(
    /// Handle to a [`FloatingTextEntry`](crate::arena::FloatingTextEntry).
    TextId,
    "t"
);
