//! Contact Core
//!
//! Domain types and the submission pipeline for the portfolio contact form.
//!
//! ## Architecture
//!
//! 1. **Model** (`model`): the candidate [`ContactSubmission`] as it arrives
//!    from a client, the [`ValidatedSubmission`] the validator hands onward,
//!    and the immutable [`ContactMessage`] that gets persisted.
//!
//! 2. **Validation** (`validation`): rejects submissions with any of the four
//!    required fields missing before anything touches the store.
//!
//! 3. **Store port** (`store`): the [`MessageStore`] trait implemented by the
//!    adapters in `contact-storage`.
//!
//! 4. **Service** (`service`): the linear chain validator → timestamp →
//!    single insert.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use contact_core::{ContactService, ContactSubmission, MessageStore};
//!
//! async fn submit(store: Arc<dyn MessageStore>) {
//!     let service = ContactService::new(store);
//!     let submission = ContactSubmission::new("Jane", "jane@x.com", "Hi", "Hello there");
//!     match service.submit(submission).await {
//!         Ok(id) => println!("stored as {}", id),
//!         Err(e) => eprintln!("rejected: {}", e),
//!     }
//! }
//! ```

pub mod error;
pub mod model;
pub mod service;
pub mod store;
pub mod validation;

pub use error::{StoreError, StoreResult, SubmitError, ValidationError};
pub use model::{
    ContactMessage, ContactSubmission, MessageId, ValidatedSubmission, REQUIRED_FIELDS,
};
pub use service::ContactService;
pub use store::MessageStore;
pub use validation::SubmissionValidator;
