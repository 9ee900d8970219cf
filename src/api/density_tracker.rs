use tracing::trace;

use crate::core::DensityTunables;

/// Remembers the last published slides-per-view so only changes propagate.
#[derive(Debug, Clone, Copy, Default)]
pub struct DensityTracker {
    published: Option<u32>,
}

impl DensityTracker {
    #[must_use]
    pub fn published(self) -> Option<u32> {
        self.published
    }

    /// Recomputes density for `viewport_width`. Returns the new value only
    /// when it differs from what was last published.
    pub fn observe(&mut self, viewport_width: f64, tunables: DensityTunables) -> Option<u32> {
        let slides_per_view = tunables.slides_per_view(viewport_width);
        trace!(viewport_width, slides_per_view, "density measured");
        if self.published == Some(slides_per_view) {
            return None;
        }
        self.published = Some(slides_per_view);
        Some(slides_per_view)
    }

    /// Forgets the published value so the next measurement republishes.
    pub fn reset(&mut self) {
        self.published = None;
    }
}
