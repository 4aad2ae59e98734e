//! Error types for the contact submission pipeline
//!
//! Two failure kinds reach the caller: a [`ValidationError`] when the
//! submission is incomplete, and a [`StoreError`] when persistence fails.
//! [`SubmitError`] wraps both for the service layer.

use thiserror::Error;

/// A submission is missing one or more required fields
///
/// The display text carries no per-field detail; `missing` is kept for logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("missing required fields")]
pub struct ValidationError {
    missing: Vec<&'static str>,
}

impl ValidationError {
    pub(crate) fn missing_fields(missing: Vec<&'static str>) -> Self {
        Self { missing }
    }

    /// Names of the fields that were absent or empty
    pub fn missing(&self) -> &[&'static str] {
        &self.missing
    }
}

/// Connection or write failure against the document store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached or refused the connection
    #[error("Connection error: {0}")]
    Connection(String),

    /// The insert itself failed
    #[error("Write error: {0}")]
    Write(String),
}

impl StoreError {
    /// Create a connection error
    pub fn connection(msg: impl Into<String>) -> Self {
        StoreError::Connection(msg.into())
    }

    /// Create a write error
    pub fn write(msg: impl Into<String>) -> Self {
        StoreError::Write(msg.into())
    }

    /// Check if the failure happened before any write was attempted
    pub fn is_connection(&self) -> bool {
        matches!(self, StoreError::Connection(_))
    }
}

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Failure of a single submission
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SubmitError {
    /// Check if the client can fix this by resubmitting corrected input
    pub fn is_user_error(&self) -> bool {
        matches!(self, SubmitError::Validation(_))
    }
}
