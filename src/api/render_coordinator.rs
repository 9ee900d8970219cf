use crate::error::CarouselResult;
use crate::platform::CarouselHost;
use crate::render::{CarouselFrame, Renderer};

use super::CarouselController;

impl<H: CarouselHost> CarouselController<H> {
    /// Frame for the current phase and layout.
    #[must_use]
    pub fn frame(&self) -> CarouselFrame<'_> {
        CarouselFrame::build(&self.state)
    }

    /// Renders the current frame, then runs post-render work.
    pub fn render<R: Renderer>(&mut self, renderer: &mut R) -> CarouselResult<()> {
        renderer.render(&self.frame())?;
        self.after_render();
        Ok(())
    }
}
