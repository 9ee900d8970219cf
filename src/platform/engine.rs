use serde::{Deserialize, Serialize};

use crate::api::{EngineEventKind, EventPoster};
use crate::error::EngineFault;

use super::ElementHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideAlignment {
    #[default]
    Start,
    Center,
    End,
}

/// Options handed to the sliding engine at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOptions {
    pub align: SlideAlignment,
    pub loop_slides: bool,
    pub drag_free: bool,
    /// Transition duration in animation frames.
    pub duration: u32,
    pub slides_to_scroll: u32,
    pub contain_scroll: bool,
}

/// The global constructor exposed by the sliding-engine library.
pub trait EngineFactory {
    fn create(
        &self,
        viewport: ElementHandle,
        options: &EngineOptions,
    ) -> Result<Box<dyn SlidingEngine>, EngineFault>;
}

/// One live sliding-engine instance. Every call may fault.
pub trait SlidingEngine {
    fn scroll_prev(&mut self) -> Result<(), EngineFault>;

    fn scroll_next(&mut self) -> Result<(), EngineFault>;

    fn scroll_to(&mut self, index: usize) -> Result<(), EngineFault>;

    fn selected_scroll_snap(&self) -> Result<usize, EngineFault>;

    fn can_scroll_prev(&self) -> Result<bool, EngineFault>;

    fn can_scroll_next(&self) -> Result<bool, EngineFault>;

    fn scroll_snap_list(&self) -> Result<Vec<f64>, EngineFault>;

    /// Subscribes to `kind`; the engine posts `CarouselEvent::Engine(kind)`.
    fn on(&mut self, kind: EngineEventKind, poster: EventPoster) -> Result<(), EngineFault>;

    fn destroy(&mut self) -> Result<(), EngineFault>;
}
