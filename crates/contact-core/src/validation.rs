//! Submission validation
//!
//! A field counts as present when it is a non-empty string. No trimming or
//! format checks are applied: `"   "` is present, and any non-empty `email`
//! is accepted as-is.

use crate::error::ValidationError;
use crate::model::{ContactSubmission, ValidatedSubmission, REQUIRED_FIELDS};

/// Rejects incomplete submissions before persistence
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmissionValidator;

impl SubmissionValidator {
    pub fn new() -> Self {
        Self
    }

    /// Check all four required fields and hand back the validated record
    ///
    /// Every missing field is collected rather than stopping at the first,
    /// so logs show the complete picture.
    pub fn validate(
        &self,
        submission: ContactSubmission,
    ) -> Result<ValidatedSubmission, ValidationError> {
        let missing = Self::missing_fields(&submission);
        if !missing.is_empty() {
            return Err(ValidationError::missing_fields(missing));
        }

        let ContactSubmission {
            name,
            email,
            subject,
            message,
        } = submission;

        Ok(ValidatedSubmission::new(
            name.unwrap_or_default(),
            email.unwrap_or_default(),
            subject.unwrap_or_default(),
            message.unwrap_or_default(),
        ))
    }

    /// Names of the required fields that are absent or empty
    pub fn missing_fields(submission: &ContactSubmission) -> Vec<&'static str> {
        REQUIRED_FIELDS
            .into_iter()
            .filter(|field| submission.field(field).map_or(true, str::is_empty))
            .collect()
    }
}
