use tracing::trace;

use crate::interaction::{KeyDisposition, NavigationKey};
use crate::platform::CarouselHost;

use super::CarouselController;

impl<H: CarouselHost> CarouselController<H> {
    /// Scrolls one group back. No-op without a live engine.
    pub fn previous(&mut self) -> bool {
        self.adapter.scroll_prev()
    }

    /// Scrolls one group forward. No-op without a live engine.
    pub fn next(&mut self) -> bool {
        self.adapter.scroll_next()
    }

    /// Scrolls to snap point `index`. No-op without a live engine.
    pub fn go_to(&mut self, index: usize) -> bool {
        self.adapter.scroll_to(index)
    }

    /// Keydown on the focused carousel region.
    pub fn handle_key(&mut self, key: NavigationKey) -> KeyDisposition {
        if !self.state.phase().is_ready() {
            return KeyDisposition::Ignored;
        }
        match key {
            NavigationKey::ArrowLeft => {
                self.previous();
                KeyDisposition::PreventDefault
            }
            NavigationKey::ArrowRight => {
                self.next();
                KeyDisposition::PreventDefault
            }
            NavigationKey::Other => {
                trace!("key not handled by carousel");
                KeyDisposition::Ignored
            }
        }
    }
}
