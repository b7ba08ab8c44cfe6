use std::fmt::Display;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A request field was empty or blank after trimming
    InvalidInput,
    /// The provider answered with an error status, a malformed payload or no text
    ProviderError,
    /// The provider did not answer within the configured bound
    Timeout,
    /// The provider could not be reached
    Unavailable,
}

impl Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::InvalidInput => write!(f, "invalid input"),
            FailureKind::ProviderError => write!(f, "provider error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Unavailable => write!(f, "provider unavailable"),
        }
    }
}

/// Classified failure of a single generation attempt.
///
/// The message is for logs only, callers over HTTP never see it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind}: {}", .message.as_deref().unwrap_or("no details"))]
pub struct GenerationFailure {
    pub kind: FailureKind,
    pub message: Option<String>,
}

impl GenerationFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        GenerationFailure {
            kind,
            message: Some(message.into()),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(FailureKind::InvalidInput, message)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(FailureKind::ProviderError, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Unavailable, message)
    }

    pub fn timeout(bound: Duration) -> Self {
        Self::new(
            FailureKind::Timeout,
            format!("no answer within {} ms", bound.as_millis()),
        )
    }
}
