use serde::{Deserialize, Serialize};

/// Custom property capping how many slides may be visible at once.
pub const MAX_SLIDES_PROPERTY: &str = "--carousel-max-slides";
/// Custom property holding the narrowest width a slide may shrink to.
pub const MIN_SLIDE_WIDTH_PROPERTY: &str = "--carousel-min-slide-width";
/// Custom property holding the inter-slide gap.
pub const GAP_PROPERTY: &str = "--carousel-gap";
/// Custom property the controller publishes on the root element.
pub const SLIDES_PER_VIEW_PROPERTY: &str = "--slides-per-view";

pub const DEFAULT_MAX_SLIDES: f64 = 3.0;
pub const DEFAULT_MIN_SLIDE_WIDTH: f64 = 320.0;
pub const DEFAULT_GAP: f64 = 16.0;

/// Stylable inputs to the density formula, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityTunables {
    pub max_slides: f64,
    pub min_slide_width: f64,
    pub gap: f64,
}

impl Default for DensityTunables {
    fn default() -> Self {
        Self {
            max_slides: DEFAULT_MAX_SLIDES,
            min_slide_width: DEFAULT_MIN_SLIDE_WIDTH,
            gap: DEFAULT_GAP,
        }
    }
}

impl DensityTunables {
    #[must_use]
    pub fn new(max_slides: f64, min_slide_width: f64, gap: f64) -> Self {
        Self {
            max_slides,
            min_slide_width,
            gap,
        }
    }

    /// Reads the tunables through a computed-style lookup. Each value falls
    /// back to its default when unset or not a finite number.
    pub fn from_style<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str, fallback: f64| {
            lookup(name)
                .as_deref()
                .and_then(parse_css_number)
                .filter(|value| value.is_finite())
                .unwrap_or(fallback)
        };
        Self {
            max_slides: read(MAX_SLIDES_PROPERTY, DEFAULT_MAX_SLIDES),
            min_slide_width: read(MIN_SLIDE_WIDTH_PROPERTY, DEFAULT_MIN_SLIDE_WIDTH),
            gap: read(GAP_PROPERTY, DEFAULT_GAP),
        }
    }

    /// `clamp(1, cap, floor((width + gap) / (min_slide_width + gap)))`.
    #[must_use]
    pub fn slides_per_view(self, viewport_width: f64) -> u32 {
        let cap = if self.max_slides.is_finite() {
            self.max_slides.floor().max(1.0)
        } else {
            DEFAULT_MAX_SLIDES
        };
        let width = if viewport_width.is_finite() {
            viewport_width.max(0.0)
        } else {
            0.0
        };
        let slot = self.min_slide_width + self.gap;
        if slot <= 0.0 {
            return cap as u32;
        }
        let fitting = ((width + self.gap) / slot).floor();
        fitting.clamp(1.0, cap) as u32
    }
}

/// Parses the leading number of a CSS value (`"320px"`, `" 1.5rem"`), the
/// way `parseFloat` does. Returns `None` when no number prefix exists.
#[must_use]
pub fn parse_css_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let candidate_len = trimmed
        .char_indices()
        .take_while(|(_, ch)| ch.is_ascii_digit() || matches!(ch, '+' | '-' | '.' | 'e' | 'E'))
        .map(|(idx, ch)| idx + ch.len_utf8())
        .last()?;
    (1..=candidate_len)
        .rev()
        .find_map(|len| trimmed[..len].parse::<f64>().ok())
}
