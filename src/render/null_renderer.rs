use crate::error::CarouselResult;
use crate::render::{CarouselFrame, Renderer};

/// No-op renderer used by tests and headless hosts.
///
/// It still validates the frame so tests catch accessibility-contract
/// violations before a real backend is involved.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_slide_count: usize,
    pub last_dot_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &CarouselFrame<'_>) -> CarouselResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        let ready = frame.ready();
        self.last_slide_count = ready.map_or(0, |ready| ready.slides.len());
        self.last_dot_count = ready.map_or(0, |ready| ready.dots.len());
        Ok(())
    }
}
