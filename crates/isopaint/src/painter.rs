//! Session pooling and the one-call frame pipeline.
//!
//! Sessions are cheap to reset but not to allocate (the arena reserves its
//! entry storage up front), so the [`Painter`] keeps released sessions around
//! and hands them out again on the next frame.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use isopaint_geom::Rotation;

use crate::config::PaintConfig;
use crate::image::SpriteCatalog;
use crate::render::{DrawTarget, SceneRenderer, StringFormatter};
use crate::session::PaintSession;
use crate::traversal::SceneVisitor;
use crate::view::{ViewFlags, Viewport};

/// Record counts of one painted frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameStats {
    pub entries: usize,
    pub attached: usize,
    pub texts: usize,
    /// Whether the arena ran out of capacity during the frame.
    pub exhausted: bool,
}

/// Owns the sprite catalog, the renderer and a pool of idle sessions.
pub struct Painter {
    catalog: Arc<dyn SpriteCatalog + Send + Sync>,
    config: PaintConfig,
    renderer: SceneRenderer,
    free_sessions: Vec<PaintSession>,
}

impl Painter {
    pub fn new(catalog: Arc<dyn SpriteCatalog + Send + Sync>, config: PaintConfig) -> Self {
        Self {
            catalog,
            renderer: SceneRenderer::new(config.render),
            config,
            free_sessions: Vec::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &PaintConfig {
        &self.config
    }

    #[inline]
    pub fn renderer(&self) -> &SceneRenderer {
        &self.renderer
    }

    /// Change debug overlays between frames.
    #[inline]
    pub fn renderer_mut(&mut self) -> &mut SceneRenderer {
        &mut self.renderer
    }

    /// Idle sessions waiting to be reused.
    #[inline]
    pub fn pooled_sessions(&self) -> usize {
        self.free_sessions.len()
    }

    /// Hand out an empty session for one viewport, reusing an idle one when
    /// available.
    pub fn create_session(
        &mut self,
        viewport: Viewport,
        view_flags: ViewFlags,
        rotation: Rotation,
    ) -> PaintSession {
        let mut session = match self.free_sessions.pop() {
            Some(mut session) => {
                session.reset(viewport, view_flags, rotation);
                session
            }
            None => PaintSession::new(
                self.config.session,
                Arc::clone(&self.catalog),
                viewport,
                view_flags,
                rotation,
            ),
        };
        session.set_render_config(*self.renderer.config());
        session
    }

    /// Return a session to the pool.
    pub fn release_session(&mut self, session: PaintSession) {
        self.free_sessions.push(session);
    }

    /// Record, arrange and draw one viewport.
    ///
    /// Runs the traversal with `visitor`, arranges the result, renders the
    /// entries and then the floating texts into `target`, and returns the
    /// session to the pool.
    pub fn paint_frame<V, T, F>(
        &mut self,
        viewport: Viewport,
        view_flags: ViewFlags,
        rotation: Rotation,
        visitor: &mut V,
        target: &mut T,
        formatter: &F,
    ) -> FrameStats
    where
        V: SceneVisitor + ?Sized,
        T: DrawTarget + ?Sized,
        F: StringFormatter + ?Sized,
    {
        let mut session = self.create_session(viewport, view_flags, rotation);
        session.generate(visitor);
        session.arrange();
        self.renderer.render(&session, target);
        self.renderer.render_floating_text(&session, target, formatter);

        let arena = session.arena();
        let stats = FrameStats {
            entries: arena.entry_count(),
            attached: arena.attached_count(),
            texts: arena.text_count(),
            exhausted: arena.is_exhausted(),
        };
        debug!(?stats, "painted frame");

        self.release_session(session);
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::SpriteMetrics;
    use std::collections::HashMap;

    fn painter() -> Painter {
        let catalog: HashMap<u32, SpriteMetrics> = HashMap::new();
        Painter::new(Arc::new(catalog), PaintConfig::default())
    }

    #[test]
    fn released_sessions_are_reused_with_fresh_generation() {
        let mut painter = painter();
        let viewport = Viewport::new(0, 0, 64, 64, 0);

        let session = painter.create_session(viewport, ViewFlags::empty(), Rotation::R0);
        let first_generation = session.arena().generation();
        painter.release_session(session);
        assert_eq!(painter.pooled_sessions(), 1);

        let session = painter.create_session(viewport, ViewFlags::SEETHROUGH_RIDES, Rotation::R3);
        assert_eq!(painter.pooled_sessions(), 0);
        assert_eq!(session.arena().generation(), first_generation + 1);
        assert_eq!(session.rotation(), Rotation::R3);
        assert_eq!(session.view_flags(), ViewFlags::SEETHROUGH_RIDES);
    }

    #[test]
    fn pool_grows_with_concurrent_sessions() {
        let mut painter = painter();
        let viewport = Viewport::new(0, 0, 64, 64, 0);
        let a = painter.create_session(viewport, ViewFlags::empty(), Rotation::R0);
        let b = painter.create_session(viewport, ViewFlags::empty(), Rotation::R1);
        painter.release_session(a);
        painter.release_session(b);
        assert_eq!(painter.pooled_sessions(), 2);
    }
}
