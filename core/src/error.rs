//! Error types for the todo core.
//!
//! # Design
//! Each lookup that can miss gets its own variant so callers can log what
//! was missing. `ErrorKind` collapses them into the two classes the HTTP
//! layer cares about; malformed input never reaches the core. Classifier failures keep their own enum because a real
//! network client has failure modes the repository never produces.

use thiserror::Error;

use crate::types::{TodoId, UserId};

/// Coarse classification used to pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Internal,
}

/// Errors returned by the repository and the service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    /// No category has exactly this name.
    #[error("category `{name}` not found")]
    CategoryNotFound { name: String },

    #[error("user {id} not found")]
    UserNotFound { id: UserId },

    #[error("todo {id} not found")]
    TodoNotFound { id: TodoId },

    #[error("category prediction failed: {0}")]
    Classifier(#[from] ClassifierError),

    /// The store itself failed, e.g. a poisoned lock or a backend outage.
    #[error("repository failure: {message}")]
    Repository { message: String },
}

impl TodoError {
    pub fn repository(message: impl Into<String>) -> Self {
        Self::Repository {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CategoryNotFound { .. } | Self::UserNotFound { .. } | Self::TodoNotFound { .. } => {
                ErrorKind::NotFound
            }
            Self::Classifier(_) | Self::Repository { .. } => ErrorKind::Internal,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

/// Errors returned by a `Classifier`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifierError {
    /// The call did not complete within the configured timeout.
    #[error("classifier timed out after {after_ms} ms")]
    Timeout { after_ms: u64 },

    /// The service answered 5xx or 429, or could not be reached.
    #[error("classifier unavailable: {message}")]
    ServiceUnavailable { message: String },

    /// The response could not be decoded or reported a failure.
    #[error("invalid classifier response: {message}")]
    InvalidResponse { message: String },

    /// The request payload could not be serialized to JSON.
    #[error("classifier request encoding failed: {message}")]
    Encode { message: String },
}

impl ClassifierError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
        }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }
}
