use serde::{Deserialize, Serialize};

/// Discrete loading/display state of the carousel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CarouselPhase {
    #[default]
    Loading,
    Error(String),
    Empty,
    Ready,
}

impl CarouselPhase {
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Visibility derived from the intersection and media-query observers.
///
/// `is_visible` latches: once granted it is never revoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VisibilityState {
    is_visible: bool,
    pub is_mobile: bool,
}

impl VisibilityState {
    #[must_use]
    pub fn is_visible(self) -> bool {
        self.is_visible
    }

    /// Latches visibility. Returns `true` only on the first grant.
    pub fn grant(&mut self) -> bool {
        let first = !self.is_visible;
        self.is_visible = true;
        first
    }
}
