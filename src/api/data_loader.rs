use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{ContentItem, shuffled};
use crate::error::FetchError;

use super::{EffectiveSettings, OrderMode, TopicRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FetchStatus {
    #[default]
    Idle,
    InFlight,
}

/// Fetch bookkeeping for the topic list. Owns no UI state.
#[derive(Debug, Clone, Default)]
pub struct DataLoader {
    status: FetchStatus,
    requests_started: u64,
    epoch: u64,
}

impl DataLoader {
    #[must_use]
    pub fn status(&self) -> FetchStatus {
        self.status
    }

    #[must_use]
    pub fn requests_started(&self) -> u64 {
        self.requests_started
    }

    /// Stamp carried by the reply of the current fetch. Bumped whenever a
    /// fetch starts or is abandoned.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// True when a reply stamped with `epoch` settles the in-flight fetch.
    #[must_use]
    pub fn accepts(&self, epoch: u64) -> bool {
        self.status == FetchStatus::InFlight && self.epoch == epoch
    }

    /// Returns the request to issue, or `None` when the load trigger must be
    /// a no-op: not yet visible, items already loaded, or a fetch in flight.
    pub fn begin(
        &mut self,
        is_visible: bool,
        has_items: bool,
        settings: &EffectiveSettings,
    ) -> Option<TopicRequest> {
        if !is_visible || has_items || self.status == FetchStatus::InFlight {
            trace!(
                is_visible,
                has_items,
                status = ?self.status,
                "load trigger ignored"
            );
            return None;
        }
        let request = TopicRequest::new(settings.order, &settings.tags, settings.max_items);
        debug!(path = %request.endpoint.path(), limit = request.limit, "starting topic fetch");
        self.status = FetchStatus::InFlight;
        self.requests_started += 1;
        self.epoch += 1;
        Some(request)
    }

    /// Settles the in-flight fetch, applying local ordering and truncation.
    pub fn finish(
        &mut self,
        result: Result<Vec<ContentItem>, FetchError>,
        settings: &EffectiveSettings,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<ContentItem>, FetchError> {
        self.status = FetchStatus::Idle;
        let fetched = result?;
        let fetched_count = fetched.len();
        let mut items = match settings.order {
            OrderMode::Random => shuffled(&fetched, rng),
            OrderMode::Latest | OrderMode::Popular => fetched,
        };
        items.truncate(settings.max_items);
        debug!(fetched_count, kept = items.len(), "topic fetch settled");
        Ok(items)
    }

    /// Forgets an outstanding fetch whose reply will be ignored.
    pub fn abandon(&mut self) {
        self.status = FetchStatus::Idle;
        self.epoch += 1;
    }
}
