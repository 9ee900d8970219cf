use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

use crate::core::ContentItem;
use crate::error::{FetchError, ScriptLoadFailure};

/// Callback kinds the controller subscribes to on a live sliding engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEventKind {
    Select,
    ReInit,
}

/// Typed message posted by an observer, fetch, or engine callback.
#[derive(Debug, Clone, PartialEq)]
pub enum CarouselEvent {
    /// Intersection observer report for the root element.
    Intersection { is_intersecting: bool },
    /// Size observer report for the viewport element.
    ViewportResized { width: f64 },
    /// Media-query listener report.
    BreakpointChanged { is_mobile: bool },
    /// Topic fetch reply, stamped with the fetch it answers.
    TopicsFetched {
        epoch: u64,
        result: Result<Vec<ContentItem>, FetchError>,
    },
    /// Engine script reply, stamped with the load it answers.
    EngineScriptSettled {
        epoch: u64,
        result: Result<(), ScriptLoadFailure>,
    },
    Engine(EngineEventKind),
}

type SharedQueue = RefCell<VecDeque<CarouselEvent>>;

/// FIFO of pending events owned by one controller.
#[derive(Debug, Default)]
pub struct EventQueue {
    inner: Rc<SharedQueue>,
}

impl EventQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle given to observers and engine callbacks.
    #[must_use]
    pub fn poster(&self) -> EventPoster {
        EventPoster {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn pop(&self) -> Option<CarouselEvent> {
        self.inner.borrow_mut().pop_front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().clear();
    }
}

/// Cloneable, non-owning sender into an [`EventQueue`].
///
/// Posting after the owning queue is gone is a silent no-op.
#[derive(Debug, Clone)]
pub struct EventPoster {
    inner: Weak<SharedQueue>,
}

impl EventPoster {
    /// Returns `false` when the queue no longer exists.
    pub fn post(&self, event: CarouselEvent) -> bool {
        match self.inner.upgrade() {
            Some(queue) => {
                queue.borrow_mut().push_back(event);
                true
            }
            None => false,
        }
    }
}

/// One-shot completion handle for a topic fetch.
///
/// Carries the epoch of the fetch it answers; a reply outliving a teardown
/// arrives with an epoch the loader no longer accepts.
#[derive(Debug)]
pub struct TopicReply {
    poster: EventPoster,
    epoch: u64,
}

impl TopicReply {
    #[must_use]
    pub fn new(poster: EventPoster, epoch: u64) -> Self {
        Self { poster, epoch }
    }

    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn resolve(self, result: Result<Vec<ContentItem>, FetchError>) {
        self.poster.post(CarouselEvent::TopicsFetched {
            epoch: self.epoch,
            result,
        });
    }
}

/// One-shot completion handle for the engine script fetch.
#[derive(Debug)]
pub struct ScriptReply {
    poster: EventPoster,
    epoch: u64,
}

impl ScriptReply {
    #[must_use]
    pub fn new(poster: EventPoster, epoch: u64) -> Self {
        Self { poster, epoch }
    }

    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn resolve(self, result: Result<(), ScriptLoadFailure>) {
        self.poster.post(CarouselEvent::EngineScriptSettled {
            epoch: self.epoch,
            result,
        });
    }
}
