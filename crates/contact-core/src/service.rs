//! Submission service
//!
//! Validates a submission, stamps it with the current time and performs a
//! single insert. Submitting the same payload twice stores two messages.

use chrono::Utc;
use std::sync::Arc;

use crate::error::SubmitError;
use crate::model::{ContactMessage, ContactSubmission, MessageId};
use crate::store::MessageStore;
use crate::validation::SubmissionValidator;

/// Validator and store composed into one call
#[derive(Clone)]
pub struct ContactService {
    validator: SubmissionValidator,
    store: Arc<dyn MessageStore>,
}

impl ContactService {
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self {
            validator: SubmissionValidator::new(),
            store,
        }
    }

    /// The injected store
    pub fn store(&self) -> &Arc<dyn MessageStore> {
        &self.store
    }

    /// Run one submission through validation and persistence
    pub async fn submit(&self, submission: ContactSubmission) -> Result<MessageId, SubmitError> {
        let validated = match self.validator.validate(submission) {
            Ok(validated) => validated,
            Err(err) => {
                tracing::info!(missing = ?err.missing(), "Contact submission rejected");
                return Err(err.into());
            }
        };

        let message = ContactMessage::new(validated, Utc::now());

        match self.store.insert(&message).await {
            Ok(id) => {
                tracing::info!(
                    message_id = %id,
                    backend = self.store.backend(),
                    "Contact message stored"
                );
                Ok(id)
            }
            Err(err) => {
                tracing::error!(
                    error = %err,
                    backend = self.store.backend(),
                    "Failed to store contact message"
                );
                Err(err.into())
            }
        }
    }
}
