use serde::Deserialize;
use thiserror::Error;

pub type CarouselResult<T> = Result<T, CarouselError>;

/// Message shown when a failed fetch carries no usable payload.
pub const GENERIC_FETCH_FAILURE: &str = "Unable to load topics right now.";

#[derive(Debug, Error)]
pub enum CarouselError {
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error(transparent)]
    Network(#[from] FetchError),

    #[error(transparent)]
    ScriptLoad(#[from] ScriptLoadFailure),

    #[error(transparent)]
    EngineRuntime(#[from] EngineFault),
}

/// Failure of the topic data fetch. The only failure promoted to a
/// user-visible phase.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("topic source responded with status {status}")]
    Status { status: u16, message: Option<String> },

    #[error("topic source unreachable: {0}")]
    Transport(String),

    #[error("topic payload could not be decoded: {0}")]
    Decode(String),
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    errors: Vec<String>,
    #[serde(default)]
    error: Option<String>,
}

impl FetchError {
    /// Builds a status failure, pulling the first message out of an
    /// `{"errors": [...]}` (or `{"error": "..."}`) body when one is present.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorPayload>(body)
            .ok()
            .and_then(|payload| payload.errors.into_iter().next().or(payload.error))
            .map(|message| message.trim().to_owned())
            .filter(|message| !message.is_empty());
        Self::Status { status, message }
    }

    /// Human-readable message for the `Error` phase. Never empty.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } => message.clone(),
            Self::Status { message: None, .. } | Self::Transport(_) | Self::Decode(_) => {
                GENERIC_FETCH_FAILURE.to_owned()
            }
        }
    }
}

/// The sliding-engine script never produced a usable capability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("sliding engine script failed to load: {0}")]
pub struct ScriptLoadFailure(pub String);

/// Any exception raised by the embedded sliding engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("sliding engine fault: {0}")]
pub struct EngineFault(pub String);

impl EngineFault {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
