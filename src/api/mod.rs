mod config;
mod controller;
mod controller_events;
mod data_loader;
mod density_tracker;
mod engine_adapter;
mod engine_loader;
mod event;
mod navigation;
mod render_coordinator;
mod snapshot;
mod state;
mod topic_query;
mod validation;

pub use config::{
    CarouselSettings, DEFAULT_ENGINE_SCRIPT_URL, DEFAULT_MAX_ITEMS, DEFAULT_MOBILE_MEDIA_QUERY,
    DEFAULT_REGION_LABEL, EffectiveSettings, LayoutMode, MAX_ITEMS_LIMIT, OrderMode, ScrollSpeed,
    SettingValue,
};
pub use controller::{CarouselController, CarouselServices};
pub use controller_events::{HAS_NEXT_CLASS, HAS_PREV_CLASS};
pub use data_loader::{DataLoader, FetchStatus};
pub use density_tracker::DensityTracker;
pub use engine_adapter::{EngineAdapter, EngineLifecycle, engine_options};
pub use engine_loader::{EngineLoader, ScriptStatus};
pub use event::{
    CarouselEvent, EngineEventKind, EventPoster, EventQueue, ScriptReply, TopicReply,
};
pub use snapshot::{
    CONTROLLER_SNAPSHOT_JSON_SCHEMA_V1, ControllerSnapshot, ControllerSnapshotJsonContractV1,
};
pub use state::{CarouselState, Command, Commands, Transition};
pub use topic_query::{TopicEndpoint, TopicRequest};
pub use validation::{ConfigurationWarning, effective_max_items, parse_tags};
