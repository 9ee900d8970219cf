use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::core::{DensityTunables, SLIDES_PER_VIEW_PROPERTY};
use crate::platform::CarouselHost;

use super::{
    CarouselController, CarouselEvent, Command, ScriptStatus, TopicReply, Transition,
    controller::Observers, engine_options,
};

/// Container class toggled while the engine can scroll backwards.
pub const HAS_PREV_CLASS: &str = "has-prev";
/// Container class toggled while the engine can scroll forwards.
pub const HAS_NEXT_CLASS: &str = "has-next";

impl<H: CarouselHost> CarouselController<H> {
    /// Drains the event queue. Returns how many events were processed.
    pub fn pump(&mut self) -> usize {
        let mut processed = 0;
        while let Some(event) = self.queue.pop() {
            self.handle_event(event);
            processed += 1;
        }
        processed
    }

    /// Processes one event. Events arriving while unmounted are dropped.
    pub fn handle_event(&mut self, event: CarouselEvent) {
        if !self.mounted {
            trace!(?event, "dropping event while unmounted");
            return;
        }
        match event {
            CarouselEvent::Intersection { is_intersecting } => {
                if is_intersecting {
                    self.dispatch(Transition::VisibilityGranted);
                }
            }
            CarouselEvent::ViewportResized { width } => {
                let tunables = self.read_tunables();
                self.dispatch(Transition::DensityMeasured {
                    viewport_width: width,
                    tunables,
                });
            }
            CarouselEvent::BreakpointChanged { is_mobile } => {
                self.dispatch(Transition::BreakpointChanged { is_mobile });
                self.measure_density();
            }
            CarouselEvent::TopicsFetched { epoch, result } => {
                self.dispatch(Transition::TopicsFetched { epoch, result });
            }
            CarouselEvent::EngineScriptSettled { epoch, result } => {
                let status = self.engine_loader.settle(epoch, result);
                // A stale reply leaves the current load pending.
                if status != ScriptStatus::Pending
                    && std::mem::take(&mut self.awaiting_script)
                    && status == ScriptStatus::Ready
                    && self.state.wants_engine()
                {
                    self.build_engine();
                }
            }
            CarouselEvent::Engine(kind) => {
                trace!(?kind, "engine event");
                if let Some(readback) = self.adapter.readback() {
                    self.dispatch(Transition::EngineSynced(readback));
                }
            }
        }
    }

    /// Applies `transition` and runs the resulting commands, including any
    /// follow-up transitions they produce.
    pub(super) fn dispatch(&mut self, transition: Transition) {
        let mut pending = VecDeque::from([transition]);
        while let Some(transition) = pending.pop_front() {
            let commands = self.state.apply(transition, &mut self.rng);
            for command in commands {
                if let Some(next) = self.execute(command) {
                    pending.push_back(next);
                }
            }
        }
    }

    fn execute(&mut self, command: Command) -> Option<Transition> {
        trace!(?command, "execute");
        match command {
            Command::FetchTopics { request, epoch } => {
                let reply = TopicReply::new(self.queue.poster(), epoch);
                self.topics.fetch(&request, reply);
                None
            }
            Command::DisconnectVisibility => {
                Observers::disconnect(&mut self.observers.visibility);
                None
            }
            Command::PublishDensity(slides_per_view) => {
                let value = slides_per_view.to_string();
                self.host.set_root_property(SLIDES_PER_VIEW_PROPERTY, &value);
                self.root_properties
                    .insert(SLIDES_PER_VIEW_PROPERTY.to_owned(), value);
                None
            }
            Command::RebuildEngineAfterRender => {
                self.after_render.rebuild_engine = true;
                None
            }
            Command::DestroyEngine => {
                self.awaiting_script = false;
                self.adapter.destroy().then_some(Transition::EngineDetached)
            }
            Command::SyncBoundaryClasses { has_prev, has_next } => {
                self.host.set_container_class(HAS_PREV_CLASS, has_prev);
                self.host.set_container_class(HAS_NEXT_CLASS, has_next);
                None
            }
        }
    }

    pub(super) fn read_tunables(&self) -> DensityTunables {
        DensityTunables::from_style(|property| self.host.computed_style(property))
    }

    /// Recomputes density from the viewport's current width.
    pub(super) fn measure_density(&mut self) {
        let viewport_width = self.host.viewport_width();
        let tunables = self.read_tunables();
        self.dispatch(Transition::DensityMeasured {
            viewport_width,
            tunables,
        });
    }

    /// Replaces the live engine with one built for the current density.
    ///
    /// Without a rendered viewport the rebuild stays queued for the next
    /// render pass.
    pub(super) fn build_engine(&mut self) {
        let Some(viewport) = self.host.viewport_element() else {
            debug!("viewport not rendered; engine build retried after next render");
            self.after_render.rebuild_engine = true;
            return;
        };
        let was_live = self.adapter.is_live();
        let options = engine_options(self.state.settings(), self.state.layout().slides_per_view);
        let factory = self.engine_loader.capability();
        let viewport = Some(viewport);
        let poster = self.queue.poster();
        match self.adapter.rebuild(factory, viewport, &options, &poster) {
            Some(readback) => self.dispatch(Transition::EngineSynced(readback)),
            None if was_live => self.dispatch(Transition::EngineDetached),
            None => debug!("engine not constructed"),
        }
    }
}
