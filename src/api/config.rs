use serde::{Deserialize, Serialize};

use crate::error::{CarouselError, CarouselResult};
use crate::platform::SlideAlignment;

use super::validation::{ConfigurationWarning, validate_settings};

pub const DEFAULT_MAX_ITEMS: usize = 5;
pub const MAX_ITEMS_LIMIT: usize = 20;
pub const DEFAULT_ENGINE_SCRIPT_URL: &str =
    "https://unpkg.com/embla-carousel@8/embla-carousel.umd.js";
pub const DEFAULT_MOBILE_MEDIA_QUERY: &str = "(max-width: 767px)";
pub const DEFAULT_REGION_LABEL: &str = "Featured topics";

/// Loosely typed numeric setting: theme settings may hand us strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderMode {
    #[default]
    Latest,
    Random,
    Popular,
}

/// Named transition speed; maps to an engine duration in frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl ScrollSpeed {
    #[must_use]
    pub fn frames(self) -> u32 {
        match self {
            Self::Slow => 35,
            Self::Normal => 25,
            Self::Fast => 15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Carousel,
    Grid,
}

/// Raw carousel settings as supplied by the host.
///
/// Every field has a serde default so partial JSON deserializes; values are
/// corrected by [`CarouselSettings::validate`], never rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselSettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_layout")]
    pub desktop_layout: String,
    #[serde(default = "default_layout")]
    pub mobile_layout: String,
    #[serde(default = "default_order")]
    pub order: String,
    /// Pipe-separated tag filter.
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub max_items: Option<SettingValue>,
    #[serde(default = "default_scroll_speed")]
    pub scroll_speed: String,
    #[serde(default = "default_alignment")]
    pub alignment: String,
    #[serde(default)]
    pub loop_slides: bool,
    #[serde(default)]
    pub drag_free: bool,
    #[serde(default)]
    pub scroll_one_at_a_time: bool,
    #[serde(default = "default_engine_script_url")]
    pub engine_script_url: String,
    #[serde(default = "default_mobile_media_query")]
    pub mobile_media_query: String,
    #[serde(default = "default_region_label")]
    pub region_label: String,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            desktop_layout: default_layout(),
            mobile_layout: default_layout(),
            order: default_order(),
            tags: String::new(),
            max_items: None,
            scroll_speed: default_scroll_speed(),
            alignment: default_alignment(),
            loop_slides: false,
            drag_free: false,
            scroll_one_at_a_time: false,
            engine_script_url: default_engine_script_url(),
            mobile_media_query: default_mobile_media_query(),
            region_label: default_region_label(),
        }
    }
}

impl CarouselSettings {
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: impl Into<String>) -> Self {
        self.order = order.into();
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }

    #[must_use]
    pub fn with_max_items(mut self, value: SettingValue) -> Self {
        self.max_items = Some(value);
        self
    }

    #[must_use]
    pub fn with_scroll_speed(mut self, speed: impl Into<String>) -> Self {
        self.scroll_speed = speed.into();
        self
    }

    #[must_use]
    pub fn with_alignment(mut self, alignment: impl Into<String>) -> Self {
        self.alignment = alignment.into();
        self
    }

    #[must_use]
    pub fn with_layouts(mut self, desktop: impl Into<String>, mobile: impl Into<String>) -> Self {
        self.desktop_layout = desktop.into();
        self.mobile_layout = mobile.into();
        self
    }

    #[must_use]
    pub fn with_scroll_one_at_a_time(mut self, enabled: bool) -> Self {
        self.scroll_one_at_a_time = enabled;
        self
    }

    #[must_use]
    pub fn with_loop_slides(mut self, enabled: bool) -> Self {
        self.loop_slides = enabled;
        self
    }

    #[must_use]
    pub fn with_engine_script_url(mut self, url: impl Into<String>) -> Self {
        self.engine_script_url = url.into();
        self
    }

    /// Corrects every out-of-range value and reports what was corrected.
    #[must_use]
    pub fn validate(&self) -> (EffectiveSettings, Vec<ConfigurationWarning>) {
        validate_settings(self)
    }

    pub fn to_json_pretty(&self) -> CarouselResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CarouselError::Serialization(format!("settings: {e}")))
    }

    /// Deserializes settings from JSON. Missing keys take their defaults.
    pub fn from_json_str(input: &str) -> CarouselResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| CarouselError::Serialization(format!("settings: {e}")))
    }
}

/// Validated, strongly typed settings the controller runs on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectiveSettings {
    pub enabled: bool,
    pub desktop_layout: LayoutMode,
    pub mobile_layout: LayoutMode,
    pub order: OrderMode,
    pub tags: Vec<String>,
    pub max_items: usize,
    pub scroll_speed: ScrollSpeed,
    pub alignment: SlideAlignment,
    pub loop_slides: bool,
    pub drag_free: bool,
    pub scroll_one_at_a_time: bool,
    pub engine_script_url: String,
    pub mobile_media_query: String,
    pub region_label: String,
}

impl EffectiveSettings {
    #[must_use]
    pub fn layout_for(&self, is_mobile: bool) -> LayoutMode {
        if is_mobile {
            self.mobile_layout
        } else {
            self.desktop_layout
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_layout() -> String {
    "carousel".to_owned()
}

fn default_order() -> String {
    "latest".to_owned()
}

fn default_scroll_speed() -> String {
    "normal".to_owned()
}

fn default_alignment() -> String {
    "start".to_owned()
}

fn default_engine_script_url() -> String {
    DEFAULT_ENGINE_SCRIPT_URL.to_owned()
}

fn default_mobile_media_query() -> String {
    DEFAULT_MOBILE_MEDIA_QUERY.to_owned()
}

fn default_region_label() -> String {
    DEFAULT_REGION_LABEL.to_owned()
}
