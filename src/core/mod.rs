pub mod density;
pub mod pagination;
pub mod phase;
pub mod shuffle;
pub mod topic_list;
pub mod types;

pub use density::{DensityTunables, SLIDES_PER_VIEW_PROPERTY, parse_css_number};
pub use pagination::{Dot, EngineReadback, LayoutState, dot_label, dots_for};
pub use phase::{CarouselPhase, VisibilityState};
pub use shuffle::shuffled;
pub use topic_list::decode_topic_list;
pub use types::{ContentItem, Engagement, Thumbnail};
