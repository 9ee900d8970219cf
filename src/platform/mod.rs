//! Seams between the controller and the page it lives in.
//!
//! A browser binding implements these traits over real DOM observers, the
//! page's global object and `fetch`. Tests implement them with recorders.

mod engine;
#[cfg(feature = "http-source")]
mod http;
mod scope;

pub use engine::{EngineFactory, EngineOptions, SlideAlignment, SlidingEngine};
#[cfg(feature = "http-source")]
pub use http::HttpTopicSource;
pub use scope::{GlobalScope, ModuleBinding, ModuleSuppression, ScriptFetcher};

use serde::{Deserialize, Serialize};

use crate::api::{EventPoster, TopicReply, TopicRequest};

/// Opaque reference to a host element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementHandle(pub u64);

/// Intersection observer parameters for the visibility gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityOptions {
    pub threshold: f64,
    pub root_margin: &'static str,
}

impl Default for VisibilityOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px 200px 0px",
        }
    }
}

/// A connected observer or listener. `disconnect` must tolerate repeats.
pub trait ObserverHandle {
    fn disconnect(&mut self);
}

/// Element access and observer wiring for the controller's root element.
///
/// The controller is the only writer of the root element's class list and
/// custom properties.
pub trait CarouselHost {
    /// The rendered viewport element, absent until the ready markup exists.
    fn viewport_element(&self) -> Option<ElementHandle>;

    /// Current viewport element width in CSS pixels.
    fn viewport_width(&self) -> f64;

    /// Computed style value of `property` on the root element.
    fn computed_style(&self, property: &str) -> Option<String>;

    fn set_root_property(&mut self, property: &str, value: &str);

    fn set_container_class(&mut self, class: &str, enabled: bool);

    fn observe_visibility(
        &mut self,
        options: VisibilityOptions,
        poster: EventPoster,
    ) -> Box<dyn ObserverHandle>;

    fn observe_viewport_size(&mut self, poster: EventPoster) -> Box<dyn ObserverHandle>;

    /// Subscribes to `query` changes and returns whether it matches now.
    fn watch_media_query(
        &mut self,
        query: &str,
        poster: EventPoster,
    ) -> (bool, Box<dyn ObserverHandle>);
}

/// Read-only content source.
///
/// Implementations resolve `reply` exactly once, synchronously or later.
pub trait TopicSource {
    fn fetch(&mut self, request: &TopicRequest, reply: TopicReply);
}
