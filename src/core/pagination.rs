use serde::{Deserialize, Serialize};

/// One pagination control, bound to an engine snap point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dot {
    pub index: usize,
    pub label: String,
    pub is_active: bool,
}

/// Engine state read back after a `select` or `reInit` callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineReadback {
    pub selected_index: usize,
    pub can_scroll_prev: bool,
    pub can_scroll_next: bool,
    pub snap_count: usize,
}

/// Layout and navigation state mirrored from the sliding engine.
///
/// Invariants while an engine is live:
/// - `dots.len()` equals the engine's snap-point count
/// - exactly one dot is active and its index is `selected_index`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutState {
    pub slides_per_view: u32,
    pub selected_index: usize,
    pub can_scroll_prev: bool,
    pub can_scroll_next: bool,
    pub dots: Vec<Dot>,
}

impl Default for LayoutState {
    fn default() -> Self {
        Self {
            slides_per_view: 1,
            selected_index: 0,
            can_scroll_prev: false,
            can_scroll_next: false,
            dots: Vec::new(),
        }
    }
}

impl LayoutState {
    pub fn apply_readback(&mut self, readback: EngineReadback) {
        let selected = if readback.snap_count == 0 {
            0
        } else {
            readback.selected_index.min(readback.snap_count - 1)
        };
        self.selected_index = selected;
        self.can_scroll_prev = readback.can_scroll_prev;
        self.can_scroll_next = readback.can_scroll_next;
        self.dots = dots_for(readback.snap_count, selected);
    }

    /// Drops engine-derived navigation state once no engine is live.
    pub fn clear_navigation(&mut self) {
        self.selected_index = 0;
        self.can_scroll_prev = false;
        self.can_scroll_next = false;
        self.dots.clear();
    }

    #[must_use]
    pub fn active_dot(&self) -> Option<&Dot> {
        self.dots.iter().find(|dot| dot.is_active)
    }
}

#[must_use]
pub fn dot_label(index: usize) -> String {
    format!("Go to slide {}", index + 1)
}

#[must_use]
pub fn dots_for(snap_count: usize, selected_index: usize) -> Vec<Dot> {
    (0..snap_count)
        .map(|index| Dot {
            index,
            label: dot_label(index),
            is_active: index == selected_index,
        })
        .collect()
}
