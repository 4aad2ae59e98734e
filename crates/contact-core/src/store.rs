//! Message store port
//!
//! Adapters live in `contact-storage`. Each adapter owns its connection
//! handle and opens it lazily on first use:
//!
//! ```text
//! {disconnected} --connect--> {connected} --insert--> {connected}
//! ```
//!
//! A connected adapter never drops back to disconnected. A failed connect
//! leaves it disconnected and the next call makes a fresh single attempt.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::model::{ContactMessage, MessageId};

/// Append-only store for contact messages
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Short backend name for logs and health output
    fn backend(&self) -> &'static str;

    /// Whether the cached connection has been established
    fn is_connected(&self) -> bool;

    /// Establish the connection if it is not already open
    ///
    /// `insert` calls this itself; callers only need it to check
    /// reachability up front.
    async fn connect(&self) -> StoreResult<()>;

    /// Persist one message and return the identifier the store assigned
    ///
    /// Exactly one insert is attempted. No retry.
    async fn insert(&self, message: &ContactMessage) -> StoreResult<MessageId>;
}
