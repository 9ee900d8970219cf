//! carousel-rs: headless controller for a responsive content carousel.
//!
//! The crate fetches a bounded list of content items, decides how many
//! slides fit the viewport, lazily acquires a sliding engine once the region
//! is visible and rendered, and keeps pagination state synchronized with that
//! engine. Hosts supply the environment through the traits in [`platform`]
//! and draw frames through the [`render::Renderer`] contract.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod platform;
pub mod render;
pub mod telemetry;

pub use api::{CarouselController, CarouselServices, CarouselSettings};
pub use error::{CarouselError, CarouselResult};
