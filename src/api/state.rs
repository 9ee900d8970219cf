use rand::RngCore;
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::core::{
    CarouselPhase, ContentItem, DensityTunables, EngineReadback, LayoutState, VisibilityState,
};
use crate::error::FetchError;

use super::{DataLoader, DensityTracker, EffectiveSettings, LayoutMode, TopicRequest};

/// Input to the state transition function.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Explicit load trigger; a no-op unless visible, idle and empty.
    LoadRequested,
    VisibilityGranted,
    DensityMeasured {
        viewport_width: f64,
        tunables: DensityTunables,
    },
    BreakpointChanged {
        is_mobile: bool,
    },
    /// Reply to the fetch stamped with `epoch`.
    TopicsFetched {
        epoch: u64,
        result: Result<Vec<ContentItem>, FetchError>,
    },
    EngineSynced(EngineReadback),
    EngineDetached,
}

/// Side effect requested by a transition, executed by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    FetchTopics { request: TopicRequest, epoch: u64 },
    DisconnectVisibility,
    PublishDensity(u32),
    RebuildEngineAfterRender,
    DestroyEngine,
    SyncBoundaryClasses { has_prev: bool, has_next: bool },
}

pub type Commands = SmallVec<[Command; 4]>;

/// Everything the rendered view depends on.
///
/// `apply` is the only mutator; it never touches the host, it returns the
/// commands the controller must run.
#[derive(Debug, Clone)]
pub struct CarouselState {
    settings: EffectiveSettings,
    phase: CarouselPhase,
    visibility: VisibilityState,
    layout: LayoutState,
    items: Vec<ContentItem>,
    data: DataLoader,
    density: DensityTracker,
}

impl CarouselState {
    #[must_use]
    pub fn new(settings: EffectiveSettings) -> Self {
        Self {
            settings,
            phase: CarouselPhase::Loading,
            visibility: VisibilityState::default(),
            layout: LayoutState::default(),
            items: Vec::new(),
            data: DataLoader::default(),
            density: DensityTracker::default(),
        }
    }

    #[must_use]
    pub fn settings(&self) -> &EffectiveSettings {
        &self.settings
    }

    #[must_use]
    pub fn phase(&self) -> &CarouselPhase {
        &self.phase
    }

    #[must_use]
    pub fn visibility(&self) -> VisibilityState {
        self.visibility
    }

    #[must_use]
    pub fn layout(&self) -> &LayoutState {
        &self.layout
    }

    #[must_use]
    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    #[must_use]
    pub fn data_loader(&self) -> &DataLoader {
        &self.data
    }

    #[must_use]
    pub fn layout_mode(&self) -> LayoutMode {
        self.settings.layout_for(self.visibility.is_mobile)
    }

    /// A sliding engine belongs on the page only for ready carousel layouts.
    #[must_use]
    pub fn wants_engine(&self) -> bool {
        self.phase.is_ready() && self.layout_mode() == LayoutMode::Carousel
    }

    /// Drops the in-flight fetch and the published density so a remount
    /// starts from a clean slate.
    pub(super) fn reset_for_teardown(&mut self) {
        self.data.abandon();
        self.density.reset();
    }

    pub fn apply(&mut self, transition: Transition, rng: &mut dyn RngCore) -> Commands {
        let mut commands = Commands::new();
        match transition {
            Transition::LoadRequested => self.request_load(&mut commands),
            Transition::VisibilityGranted => {
                if self.visibility.grant() {
                    debug!("carousel became visible");
                    commands.push(Command::DisconnectVisibility);
                    self.request_load(&mut commands);
                }
            }
            Transition::DensityMeasured {
                viewport_width,
                tunables,
            } => {
                if let Some(slides_per_view) = self.density.observe(viewport_width, tunables) {
                    debug!(slides_per_view, "slides per view changed");
                    self.layout.slides_per_view = slides_per_view;
                    commands.push(Command::PublishDensity(slides_per_view));
                    if self.wants_engine() {
                        commands.push(Command::RebuildEngineAfterRender);
                    }
                }
            }
            Transition::BreakpointChanged { is_mobile } => {
                let wanted_before = self.wants_engine();
                self.visibility.is_mobile = is_mobile;
                let wanted_after = self.wants_engine();
                debug!(is_mobile, layout = ?self.layout_mode(), "breakpoint changed");
                if wanted_before && !wanted_after {
                    commands.push(Command::DestroyEngine);
                } else if !wanted_before && wanted_after {
                    commands.push(Command::RebuildEngineAfterRender);
                }
            }
            Transition::TopicsFetched { epoch, result } => {
                self.settle_fetch(epoch, result, rng, &mut commands);
            }
            Transition::EngineSynced(readback) => {
                self.layout.apply_readback(readback);
                commands.push(Command::SyncBoundaryClasses {
                    has_prev: self.layout.can_scroll_prev,
                    has_next: self.layout.can_scroll_next,
                });
            }
            Transition::EngineDetached => {
                self.layout.clear_navigation();
                commands.push(Command::SyncBoundaryClasses {
                    has_prev: false,
                    has_next: false,
                });
            }
        }
        commands
    }

    fn request_load(&mut self, commands: &mut Commands) {
        let Some(request) = self.data.begin(
            self.visibility.is_visible(),
            !self.items.is_empty(),
            &self.settings,
        ) else {
            return;
        };
        self.phase = CarouselPhase::Loading;
        commands.push(Command::FetchTopics {
            request,
            epoch: self.data.epoch(),
        });
    }

    fn settle_fetch(
        &mut self,
        epoch: u64,
        result: Result<Vec<ContentItem>, FetchError>,
        rng: &mut dyn RngCore,
        commands: &mut Commands,
    ) {
        if !self.data.accepts(epoch) {
            debug!(
                epoch,
                current = self.data.epoch(),
                status = ?self.data.status(),
                "ignoring stale topic result"
            );
            return;
        }
        match self.data.finish(result, &self.settings, rng) {
            Err(err) => {
                warn!(error = %err, "topic fetch failed");
                self.phase = CarouselPhase::Error(err.user_message());
            }
            Ok(items) if items.is_empty() => {
                self.phase = CarouselPhase::Empty;
            }
            Ok(items) => {
                self.items = items;
                self.phase = CarouselPhase::Ready;
                if self.wants_engine() {
                    commands.push(Command::RebuildEngineAfterRender);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::api::{CarouselSettings, FetchStatus};

    fn state() -> CarouselState {
        CarouselState::new(CarouselSettings::default().validate().0)
    }

    #[test]
    fn load_waits_for_visibility() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = state();
        assert!(state.apply(Transition::LoadRequested, &mut rng).is_empty());

        let commands = state.apply(Transition::VisibilityGranted, &mut rng);
        assert_eq!(commands[0], Command::DisconnectVisibility);
        assert!(matches!(commands[1], Command::FetchTopics { epoch: 1, .. }));

        assert!(state.apply(Transition::VisibilityGranted, &mut rng).is_empty());
        assert!(state.apply(Transition::LoadRequested, &mut rng).is_empty());
    }

    #[test]
    fn ready_fetch_schedules_engine_build() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = state();
        state.apply(Transition::VisibilityGranted, &mut rng);
        let commands = state.apply(
            Transition::TopicsFetched {
                epoch: state.data_loader().epoch(),
                result: Ok(vec![ContentItem::new(1, "a", "/t/a/1")]),
            },
            &mut rng,
        );
        assert_eq!(state.phase(), &CarouselPhase::Ready);
        assert_eq!(commands.as_slice(), &[Command::RebuildEngineAfterRender]);
    }

    #[test]
    fn grid_breakpoint_destroys_engine() {
        let mut rng = StdRng::seed_from_u64(1);
        let settings = CarouselSettings::default()
            .with_layouts("carousel", "grid")
            .validate()
            .0;
        let mut state = CarouselState::new(settings);
        state.apply(Transition::VisibilityGranted, &mut rng);
        state.apply(
            Transition::TopicsFetched {
                epoch: state.data_loader().epoch(),
                result: Ok(vec![ContentItem::new(1, "a", "/t/a/1")]),
            },
            &mut rng,
        );

        let commands = state.apply(Transition::BreakpointChanged { is_mobile: true }, &mut rng);
        assert_eq!(commands.as_slice(), &[Command::DestroyEngine]);
        let commands = state.apply(Transition::BreakpointChanged { is_mobile: false }, &mut rng);
        assert_eq!(commands.as_slice(), &[Command::RebuildEngineAfterRender]);
    }

    #[test]
    fn stale_fetch_result_is_ignored() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = state();
        let commands = state.apply(
            Transition::TopicsFetched {
                epoch: 0,
                result: Ok(Vec::new()),
            },
            &mut rng,
        );
        assert!(commands.is_empty());
        assert_eq!(state.phase(), &CarouselPhase::Loading);
    }

    #[test]
    fn reply_from_abandoned_fetch_does_not_settle_the_next_one() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = state();
        state.apply(Transition::VisibilityGranted, &mut rng);
        let abandoned = state.data_loader().epoch();
        state.reset_for_teardown();

        let commands = state.apply(Transition::LoadRequested, &mut rng);
        let current = match commands.first() {
            Some(Command::FetchTopics { epoch, .. }) => *epoch,
            other => panic!("expected a fresh fetch, got {other:?}"),
        };
        assert_ne!(current, abandoned);

        state.apply(
            Transition::TopicsFetched {
                epoch: abandoned,
                result: Err(FetchError::Transport("stale".to_owned())),
            },
            &mut rng,
        );
        assert_eq!(state.phase(), &CarouselPhase::Loading);
        assert_eq!(state.data_loader().status(), FetchStatus::InFlight);

        state.apply(
            Transition::TopicsFetched {
                epoch: current,
                result: Ok(vec![ContentItem::new(1, "a", "/t/a/1")]),
            },
            &mut rng,
        );
        assert_eq!(state.phase(), &CarouselPhase::Ready);
    }
}
