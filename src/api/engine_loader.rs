use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ScriptLoadFailure;
use crate::platform::{EngineFactory, GlobalScope, ModuleSuppression, ScriptFetcher};

use super::{EventPoster, ScriptReply};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScriptStatus {
    #[default]
    Idle,
    Pending,
    Ready,
    /// Settled without exposing the capability. Navigation stays inert.
    Unavailable,
}

/// Lazily fetches the sliding-engine library, once per loader.
///
/// The cache lives in this value, not in a process-wide static, so two
/// carousels on one page never share or clobber each other's load state.
pub struct EngineLoader {
    scope: Rc<RefCell<dyn GlobalScope>>,
    fetcher: Box<dyn ScriptFetcher>,
    script_url: String,
    status: ScriptStatus,
    suppression: Option<ModuleSuppression>,
    fetches_started: u64,
    epoch: u64,
}

impl EngineLoader {
    #[must_use]
    pub fn new(
        scope: Rc<RefCell<dyn GlobalScope>>,
        fetcher: Box<dyn ScriptFetcher>,
        script_url: impl Into<String>,
    ) -> Self {
        Self {
            scope,
            fetcher,
            script_url: script_url.into(),
            status: ScriptStatus::Idle,
            suppression: None,
            fetches_started: 0,
            epoch: 0,
        }
    }

    #[must_use]
    pub fn status(&self) -> ScriptStatus {
        self.status
    }

    #[must_use]
    pub fn fetches_started(&self) -> u64 {
        self.fetches_started
    }

    /// Stamp of the current script load. Bumped when a load starts and when
    /// a pending load is released.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    #[must_use]
    pub fn is_suppressing(&self) -> bool {
        self.suppression.is_some()
    }

    /// Starts the fetch on first call; later calls observe the cached
    /// pending or settled status.
    pub fn ensure(&mut self, poster: &EventPoster) -> ScriptStatus {
        if self.status == ScriptStatus::Idle {
            if self.scope.borrow().engine_capability().is_some() {
                debug!("sliding engine already exposed; skipping script fetch");
                self.status = ScriptStatus::Ready;
                return self.status;
            }
            debug!(url = %self.script_url, "fetching sliding engine script");
            self.suppression = Some(ModuleSuppression::acquire(Rc::clone(&self.scope)));
            self.status = ScriptStatus::Pending;
            self.fetches_started += 1;
            self.epoch += 1;
            self.fetcher
                .load_script(&self.script_url, ScriptReply::new(poster.clone(), self.epoch));
        }
        self.status
    }

    /// Applies the outcome of the load stamped `epoch`. Module bindings are
    /// restored before the outcome is inspected. Replies for any other load
    /// are ignored and leave the current load's suppression in place.
    pub fn settle(&mut self, epoch: u64, result: Result<(), ScriptLoadFailure>) -> ScriptStatus {
        if epoch != self.epoch || self.status != ScriptStatus::Pending {
            debug!(
                epoch,
                current = self.epoch,
                status = ?self.status,
                "ignoring stale engine script result"
            );
            return self.status;
        }
        self.suppression = None;
        self.status = match result {
            Ok(()) if self.scope.borrow().engine_capability().is_some() => ScriptStatus::Ready,
            Ok(()) => {
                warn!("engine script loaded but exposed no capability; navigation disabled");
                ScriptStatus::Unavailable
            }
            Err(err) => {
                warn!(error = %err, "engine script failed; navigation disabled");
                ScriptStatus::Unavailable
            }
        };
        self.status
    }

    /// The engine constructor, only once the script has settled usable.
    #[must_use]
    pub fn capability(&self) -> Option<Rc<dyn EngineFactory>> {
        if self.status != ScriptStatus::Ready {
            return None;
        }
        self.scope.borrow().engine_capability()
    }

    /// Teardown: restores suppressed bindings and forgets a pending fetch.
    pub fn release(&mut self) {
        self.suppression = None;
        if self.status == ScriptStatus::Pending {
            self.status = ScriptStatus::Idle;
            self.epoch += 1;
        }
    }
}
