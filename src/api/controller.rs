use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, trace};

use crate::core::{CarouselPhase, ContentItem, LayoutState, VisibilityState};
use crate::platform::{
    CarouselHost, GlobalScope, ObserverHandle, ScriptFetcher, TopicSource, VisibilityOptions,
};

use super::{
    CarouselSettings, CarouselState, EngineAdapter, EngineLifecycle, EngineLoader, EventQueue,
    ScriptStatus, Transition,
};

/// External services the controller drives besides its host element.
pub struct CarouselServices {
    pub topics: Box<dyn TopicSource>,
    pub scripts: Box<dyn ScriptFetcher>,
    pub scope: Rc<RefCell<dyn GlobalScope>>,
}

#[derive(Default)]
pub(super) struct Observers {
    pub(super) visibility: Option<Box<dyn ObserverHandle>>,
    pub(super) size: Option<Box<dyn ObserverHandle>>,
    pub(super) media: Option<Box<dyn ObserverHandle>>,
}

impl Observers {
    pub(super) fn disconnect(slot: &mut Option<Box<dyn ObserverHandle>>) -> bool {
        match slot.take() {
            Some(mut handle) => {
                handle.disconnect();
                true
            }
            None => false,
        }
    }

    fn live_count(&self) -> usize {
        [&self.visibility, &self.size, &self.media]
            .into_iter()
            .filter(|slot| slot.is_some())
            .count()
    }
}

/// Post-render work queued by transitions.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct AfterRender {
    pub(super) rebuild_engine: bool,
}

/// Responsive carousel controller.
///
/// Composes the visibility gate, data loader, engine loader, density
/// computer and engine adapter into one mount → teardown lifecycle. Hosts
/// forward observer/engine callbacks through the event queue, call
/// [`pump`](Self::pump) to process them and [`after_render`](Self::after_render)
/// once the current frame is on screen.
pub struct CarouselController<H: CarouselHost> {
    pub(super) host: H,
    pub(super) state: CarouselState,
    pub(super) queue: EventQueue,
    pub(super) topics: Box<dyn TopicSource>,
    pub(super) engine_loader: EngineLoader,
    pub(super) adapter: EngineAdapter,
    pub(super) observers: Observers,
    pub(super) after_render: AfterRender,
    pub(super) awaiting_script: bool,
    pub(super) mounted: bool,
    pub(super) cards_enabled: bool,
    pub(super) rng: StdRng,
    pub(super) root_properties: IndexMap<String, String>,
}

impl<H: CarouselHost> CarouselController<H> {
    #[must_use]
    pub fn new(host: H, settings: &CarouselSettings, services: CarouselServices) -> Self {
        let (settings, warnings) = settings.validate();
        if !warnings.is_empty() {
            debug!(count = warnings.len(), "carousel settings corrected");
        }
        let engine_loader = EngineLoader::new(
            services.scope,
            services.scripts,
            settings.engine_script_url.clone(),
        );
        Self {
            host,
            state: CarouselState::new(settings),
            queue: EventQueue::new(),
            topics: services.topics,
            engine_loader,
            adapter: EngineAdapter::default(),
            observers: Observers::default(),
            after_render: AfterRender::default(),
            awaiting_script: false,
            mounted: false,
            cards_enabled: true,
            rng: StdRng::from_entropy(),
            root_properties: IndexMap::new(),
        }
    }

    /// Result of the external layout-assignment pass for this page.
    #[must_use]
    pub fn with_cards_enabled(mut self, enabled: bool) -> Self {
        self.cards_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Connects observers and performs the initial density measurement.
    ///
    /// No-op when already mounted, or when display is disabled.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        if !self.state.settings().enabled || !self.cards_enabled {
            debug!(
                enabled = self.state.settings().enabled,
                cards_enabled = self.cards_enabled,
                "carousel display disabled; not mounting"
            );
            return;
        }
        self.mounted = true;
        let poster = self.queue.poster();

        if !self.state.visibility().is_visible() {
            self.observers.visibility = Some(
                self.host
                    .observe_visibility(VisibilityOptions::default(), poster.clone()),
            );
        }
        self.observers.size = Some(self.host.observe_viewport_size(poster.clone()));
        let query = self.state.settings().mobile_media_query.clone();
        let (is_mobile, media) = self.host.watch_media_query(&query, poster);
        self.observers.media = Some(media);
        debug!(is_mobile, "carousel mounted");

        self.dispatch(Transition::BreakpointChanged { is_mobile });
        self.measure_density();
        // A remount after a failed load retries without waiting on the gate.
        self.dispatch(Transition::LoadRequested);
        // Teardown destroyed the engine of a carousel that stayed ready.
        if self.state.wants_engine() {
            self.after_render.rebuild_engine = true;
        }
    }

    /// Releases every observer, the engine and the script guard.
    ///
    /// Safe to call any number of times, mounted or not.
    pub fn teardown(&mut self) {
        Observers::disconnect(&mut self.observers.media);
        if self.adapter.destroy() {
            self.dispatch(Transition::EngineDetached);
        }
        Observers::disconnect(&mut self.observers.visibility);
        Observers::disconnect(&mut self.observers.size);
        self.engine_loader.release();
        self.state.reset_for_teardown();
        self.after_render = AfterRender::default();
        self.awaiting_script = false;
        self.queue.clear();
        if self.mounted {
            debug!("carousel torn down");
        }
        self.mounted = false;
    }

    /// Load trigger. Ignored until visible, while a fetch is in flight, or
    /// once items exist.
    pub fn load(&mut self) {
        self.dispatch(Transition::LoadRequested);
    }

    /// Runs work deferred to "after the next render pass".
    pub fn after_render(&mut self) {
        if !self.mounted || !std::mem::take(&mut self.after_render.rebuild_engine) {
            return;
        }
        if !self.state.wants_engine() {
            trace!("engine rebuild no longer wanted");
            return;
        }
        let poster = self.queue.poster();
        match self.engine_loader.ensure(&poster) {
            ScriptStatus::Ready => self.build_engine(),
            ScriptStatus::Pending => self.awaiting_script = true,
            ScriptStatus::Unavailable | ScriptStatus::Idle => {
                trace!("engine capability unavailable; carousel stays static");
            }
        }
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    #[must_use]
    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> &CarouselPhase {
        self.state.phase()
    }

    #[must_use]
    pub fn layout(&self) -> &LayoutState {
        self.state.layout()
    }

    #[must_use]
    pub fn visibility(&self) -> VisibilityState {
        self.state.visibility()
    }

    #[must_use]
    pub fn items(&self) -> &[ContentItem] {
        self.state.items()
    }

    #[must_use]
    pub fn engine_lifecycle(&self) -> EngineLifecycle {
        self.adapter.lifecycle()
    }

    #[must_use]
    pub fn has_live_engine(&self) -> bool {
        self.adapter.is_live()
    }

    #[must_use]
    pub fn engine_builds(&self) -> u64 {
        self.adapter.builds()
    }

    #[must_use]
    pub fn script_status(&self) -> ScriptStatus {
        self.engine_loader.status()
    }

    #[must_use]
    pub fn script_fetches(&self) -> u64 {
        self.engine_loader.fetches_started()
    }

    #[must_use]
    pub fn live_observer_count(&self) -> usize {
        self.observers.live_count()
    }

    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Custom properties this controller has written on the root element.
    #[must_use]
    pub fn root_properties(&self) -> &IndexMap<String, String> {
        &self.root_properties
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<H: CarouselHost> Drop for CarouselController<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}
