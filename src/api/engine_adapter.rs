use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::EngineReadback;
use crate::error::EngineFault;
use crate::platform::{ElementHandle, EngineFactory, EngineOptions, SlidingEngine};

use super::{EffectiveSettings, EngineEventKind, EventPoster};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EngineLifecycle {
    #[default]
    Uninitialized,
    Initializing,
    Live,
    Destroyed,
}

/// Builds the options for one engine construction.
#[must_use]
pub fn engine_options(settings: &EffectiveSettings, slides_per_view: u32) -> EngineOptions {
    EngineOptions {
        align: settings.alignment,
        loop_slides: settings.loop_slides,
        drag_free: settings.drag_free,
        duration: settings.scroll_speed.frames(),
        slides_to_scroll: if settings.scroll_one_at_a_time {
            1
        } else {
            slides_per_view.max(1)
        },
        contain_scroll: !settings.loop_slides,
    }
}

/// Owns at most one live sliding engine and contains its faults.
#[derive(Default)]
pub struct EngineAdapter {
    lifecycle: EngineLifecycle,
    engine: Option<Box<dyn SlidingEngine>>,
    builds: u64,
}

impl EngineAdapter {
    #[must_use]
    pub fn lifecycle(&self) -> EngineLifecycle {
        self.lifecycle
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.engine.is_some()
    }

    /// Number of engines successfully constructed so far.
    #[must_use]
    pub fn builds(&self) -> u64 {
        self.builds
    }

    /// Destroys any live engine, then constructs a fresh one.
    ///
    /// A missing capability or viewport is "not ready yet" and skips
    /// construction silently. Returns the initial readback when live.
    pub fn rebuild(
        &mut self,
        factory: Option<Rc<dyn EngineFactory>>,
        viewport: Option<ElementHandle>,
        options: &EngineOptions,
        poster: &EventPoster,
    ) -> Option<EngineReadback> {
        self.destroy();
        let (Some(factory), Some(viewport)) = (factory, viewport) else {
            debug!("engine capability or viewport missing; deferring construction");
            return None;
        };

        self.lifecycle = EngineLifecycle::Initializing;
        let mut engine = match factory.create(viewport, options) {
            Ok(engine) => engine,
            Err(fault) => {
                warn!(error = %fault, "sliding engine construction failed");
                self.lifecycle = EngineLifecycle::Destroyed;
                return None;
            }
        };
        for kind in [EngineEventKind::Select, EngineEventKind::ReInit] {
            if let Err(fault) = engine.on(kind, poster.clone()) {
                warn!(error = %fault, ?kind, "could not subscribe to engine event");
            }
        }
        self.engine = Some(engine);
        self.lifecycle = EngineLifecycle::Live;
        self.builds += 1;
        debug!(
            slides_to_scroll = options.slides_to_scroll,
            duration = options.duration,
            "sliding engine live"
        );
        self.readback()
    }

    /// Idempotent. Returns `true` when an engine was actually torn down.
    pub fn destroy(&mut self) -> bool {
        let Some(mut engine) = self.engine.take() else {
            return false;
        };
        if let Err(fault) = engine.destroy() {
            warn!(error = %fault, "sliding engine destroy failed");
        }
        self.lifecycle = EngineLifecycle::Destroyed;
        trace!("sliding engine destroyed");
        true
    }

    /// Reads selection, scroll limits and snap count from the live engine.
    /// `None` when no engine is live or any read faults.
    #[must_use]
    pub fn readback(&self) -> Option<EngineReadback> {
        let engine = self.engine.as_deref()?;
        let read = || -> Result<EngineReadback, EngineFault> {
            Ok(EngineReadback {
                selected_index: engine.selected_scroll_snap()?,
                can_scroll_prev: engine.can_scroll_prev()?,
                can_scroll_next: engine.can_scroll_next()?,
                snap_count: engine.scroll_snap_list()?.len(),
            })
        };
        match read() {
            Ok(readback) => Some(readback),
            Err(fault) => {
                warn!(error = %fault, "sliding engine readback failed; keeping prior state");
                None
            }
        }
    }

    pub fn scroll_prev(&mut self) -> bool {
        self.drive("scroll_prev", |engine| engine.scroll_prev())
    }

    pub fn scroll_next(&mut self) -> bool {
        self.drive("scroll_next", |engine| engine.scroll_next())
    }

    pub fn scroll_to(&mut self, index: usize) -> bool {
        self.drive("scroll_to", |engine| engine.scroll_to(index))
    }

    fn drive<F>(&mut self, action: &'static str, call: F) -> bool
    where
        F: FnOnce(&mut dyn SlidingEngine) -> Result<(), EngineFault>,
    {
        let Some(engine) = self.engine.as_deref_mut() else {
            trace!(action, "no live engine; navigation ignored");
            return false;
        };
        match call(engine) {
            Ok(()) => true,
            Err(fault) => {
                warn!(error = %fault, action, "sliding engine navigation failed");
                false
            }
        }
    }
}
