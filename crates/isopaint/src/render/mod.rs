//! Replaying an arranged session against a drawing backend.
//!
//! The pipeline never touches pixels. [`SceneRenderer`] walks the paint order
//! and issues calls on a [`DrawTarget`]; the host implements that trait on
//! top of its blitter. [`DrawLog`] is a target that only records the calls,
//! which is what headless tools and tests use.

pub mod colourify;
pub mod renderer;
pub mod target;

pub use colourify::colourify;
pub use renderer::SceneRenderer;
pub use target::{DrawCall, DrawLog, DrawTarget, StringFormatter};
