//! # Error Handling
//!
//! This module provides the error taxonomy shared by the repositories and the
//! page controllers, with stable error codes for programmatic handling.

use serde::Serialize;
use thiserror::Error;

use crate::models::RecordId;

/// Standard error kinds with predefined codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorType {
    #[error("Not Found")]
    NotFound,
    #[error("Conflict")]
    Conflict,
    #[error("Validation Failed")]
    ValidationFailed,
    #[error("Service Unavailable")]
    Unavailable,
}

impl ErrorType {
    /// Get the error code string for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            ErrorType::NotFound => "NOT_FOUND",
            ErrorType::Conflict => "CONFLICT",
            ErrorType::ValidationFailed => "VALIDATION_FAILED",
            ErrorType::Unavailable => "SERVICE_UNAVAILABLE",
        }
    }
}

/// Errors raised by repository operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// A by-id operation referenced a record that does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: RecordId },
    /// A pre-condition on related records or record state failed
    #[error("conflict: {0}")]
    Conflict(String),
    /// Input failed validation
    #[error("validation failed: {0}")]
    Validation(String),
    /// The backing collection is switched off
    #[error("{entity} service unavailable")]
    Unavailable { entity: &'static str },
}

impl RepositoryError {
    pub fn not_found(entity: &'static str, id: RecordId) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict(message.into())
    }

    pub fn validation_error<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn unavailable(entity: &'static str) -> Self {
        Self::Unavailable { entity }
    }

    pub fn error_type(&self) -> ErrorType {
        match self {
            RepositoryError::NotFound { .. } => ErrorType::NotFound,
            RepositoryError::Conflict(_) => ErrorType::Conflict,
            RepositoryError::Validation(_) => ErrorType::ValidationFailed,
            RepositoryError::Unavailable { .. } => ErrorType::Unavailable,
        }
    }

    /// Get the error code string (SCREAMING_SNAKE_CASE)
    pub fn error_code(&self) -> &'static str {
        self.error_type().error_code()
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound { .. })
    }
}
