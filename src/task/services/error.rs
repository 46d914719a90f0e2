//! Service-level errors and their transport-facing classification.

use serde::Serialize;
use thiserror::Error;

use super::validation::TaskValidationError;
use crate::task::{domain::TaskId, ports::TaskRepositoryError};

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Request validation failed; nothing was persisted.
    #[error(transparent)]
    Validation(#[from] TaskValidationError),

    /// No task has the requested identifier.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Coarse error classification for transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The caller sent invalid input and may correct it.
    #[serde(rename = "validation_error")]
    Validation,
    /// The targeted task does not exist.
    NotFound,
    /// The server failed; retrying is at the caller's discretion.
    #[serde(rename = "internal_error")]
    Internal,
}

impl ErrorKind {
    /// Returns the stable machine-readable code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Validation => "validation_error",
            Self::NotFound => "not_found",
            Self::Internal => "internal_error",
        }
    }
}

impl TaskLifecycleError {
    /// Classifies the error for transports.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) | Self::Repository(TaskRepositoryError::NotFound(_)) => {
                ErrorKind::NotFound
            }
            Self::Repository(_) => ErrorKind::Internal,
        }
    }
}

/// Serializable error body for transports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable classification.
    pub kind: ErrorKind,
    /// Human-readable message.
    pub message: String,
    /// Offending field, for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

impl From<&TaskLifecycleError> for ErrorResponse {
    fn from(err: &TaskLifecycleError) -> Self {
        let field = match err {
            TaskLifecycleError::Validation(validation) => Some(validation.field().as_str()),
            TaskLifecycleError::NotFound(_) | TaskLifecycleError::Repository(_) => None,
        };
        Self {
            kind: err.kind(),
            message: err.to_string(),
            field,
        }
    }
}
