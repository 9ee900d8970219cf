use thiserror::Error;
use tracing::warn;

use crate::core::parse_css_number;
use crate::platform::SlideAlignment;

use super::{
    CarouselSettings, DEFAULT_MAX_ITEMS, EffectiveSettings, LayoutMode, MAX_ITEMS_LIMIT,
    OrderMode, ScrollSpeed, SettingValue,
};

/// A setting that was out of range and has been corrected. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationWarning {
    #[error("max item count `{raw}` is not a positive number; using {fallback}")]
    InvalidMaxItems { raw: String, fallback: usize },

    #[error("max item count {requested} exceeds {limit}; clamping")]
    MaxItemsClamped { requested: String, limit: usize },

    #[error("unknown ordering `{0}`; falling back to `latest`")]
    UnknownOrder(String),

    #[error("unknown scroll speed `{0}`; falling back to `normal`")]
    UnknownScrollSpeed(String),

    #[error("unknown alignment `{0}`; falling back to `start`")]
    UnknownAlignment(String),

    #[error("unknown layout `{0}`; falling back to `carousel`")]
    UnknownLayout(String),
}

pub(super) fn validate_settings(
    raw: &CarouselSettings,
) -> (EffectiveSettings, Vec<ConfigurationWarning>) {
    let mut warnings = Vec::new();

    let (max_items, max_items_warning) = effective_max_items(raw.max_items.as_ref());
    warnings.extend(max_items_warning);

    let order = parse_order(&raw.order).unwrap_or_else(|| {
        warnings.push(ConfigurationWarning::UnknownOrder(raw.order.clone()));
        OrderMode::Latest
    });
    let scroll_speed = parse_scroll_speed(&raw.scroll_speed).unwrap_or_else(|| {
        warnings.push(ConfigurationWarning::UnknownScrollSpeed(
            raw.scroll_speed.clone(),
        ));
        ScrollSpeed::Normal
    });
    let alignment = parse_alignment(&raw.alignment).unwrap_or_else(|| {
        warnings.push(ConfigurationWarning::UnknownAlignment(raw.alignment.clone()));
        SlideAlignment::Start
    });
    let mut layout = |value: &str| {
        parse_layout(value).unwrap_or_else(|| {
            warnings.push(ConfigurationWarning::UnknownLayout(value.to_owned()));
            LayoutMode::Carousel
        })
    };
    let desktop_layout = layout(&raw.desktop_layout);
    let mobile_layout = layout(&raw.mobile_layout);

    for warning in &warnings {
        warn!(%warning, "corrected carousel setting");
    }

    let settings = EffectiveSettings {
        enabled: raw.enabled,
        desktop_layout,
        mobile_layout,
        order,
        tags: parse_tags(&raw.tags),
        max_items,
        scroll_speed,
        alignment,
        loop_slides: raw.loop_slides,
        drag_free: raw.drag_free,
        scroll_one_at_a_time: raw.scroll_one_at_a_time,
        engine_script_url: raw.engine_script_url.clone(),
        mobile_media_query: raw.mobile_media_query.clone(),
        region_label: raw.region_label.clone(),
    };
    (settings, warnings)
}

/// Default 5 when missing, non-numeric or below 1; at most 20.
#[must_use]
pub fn effective_max_items(
    value: Option<&SettingValue>,
) -> (usize, Option<ConfigurationWarning>) {
    let Some(value) = value else {
        return (DEFAULT_MAX_ITEMS, None);
    };
    let (raw, parsed) = match value {
        SettingValue::Number(number) => (number.to_string(), Some(*number)),
        SettingValue::Text(text) => (text.clone(), parse_css_number(text)),
    };
    let whole = parsed.filter(|n| n.is_finite()).map(f64::floor);
    match whole {
        Some(n) if n >= 1.0 && n <= MAX_ITEMS_LIMIT as f64 => (n as usize, None),
        Some(n) if n > MAX_ITEMS_LIMIT as f64 => (
            MAX_ITEMS_LIMIT,
            Some(ConfigurationWarning::MaxItemsClamped {
                requested: raw,
                limit: MAX_ITEMS_LIMIT,
            }),
        ),
        _ => (
            DEFAULT_MAX_ITEMS,
            Some(ConfigurationWarning::InvalidMaxItems {
                raw,
                fallback: DEFAULT_MAX_ITEMS,
            }),
        ),
    }
}

/// Splits a pipe-separated tag filter, dropping blanks.
#[must_use]
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split('|')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_owned)
        .collect()
}

fn parse_order(raw: &str) -> Option<OrderMode> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "latest" => Some(OrderMode::Latest),
        "random" => Some(OrderMode::Random),
        "popular" => Some(OrderMode::Popular),
        _ => None,
    }
}

fn parse_scroll_speed(raw: &str) -> Option<ScrollSpeed> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "slow" => Some(ScrollSpeed::Slow),
        "normal" => Some(ScrollSpeed::Normal),
        "fast" => Some(ScrollSpeed::Fast),
        _ => None,
    }
}

fn parse_alignment(raw: &str) -> Option<SlideAlignment> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "start" => Some(SlideAlignment::Start),
        "center" => Some(SlideAlignment::Center),
        "end" => Some(SlideAlignment::End),
        _ => None,
    }
}

fn parse_layout(raw: &str) -> Option<LayoutMode> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "carousel" => Some(LayoutMode::Carousel),
        "grid" => Some(LayoutMode::Grid),
        _ => None,
    }
}
