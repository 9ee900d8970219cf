mod frame;
pub mod markup;
mod null_renderer;

pub use frame::{
    ArrowFrame, CarouselFrame, DotFrame, FrameBody, ReadyFrame, RegionAttributes, SlideFrame,
};
pub use null_renderer::NullRenderer;

use crate::core::ContentItem;
use crate::error::CarouselResult;

/// Contract implemented by any view backend.
///
/// Backends receive a fully materialized, deterministic `CarouselFrame` so
/// markup code stays isolated from loading and engine logic.
pub trait Renderer {
    fn render(&mut self, frame: &CarouselFrame<'_>) -> CarouselResult<()>;
}

/// Renders one content item as a card. The controller never inspects the
/// output.
pub trait CardRenderer {
    type Output;

    fn render_card(&mut self, item: &ContentItem) -> Self::Output;
}
