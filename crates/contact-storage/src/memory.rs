//! In-memory message store
//!
//! Keeps messages in a process-local vector. Identifiers are random UUIDs.
//! [`MemoryStore::unreachable`] builds a store whose connect always fails,
//! for exercising the broken-store path without a database.

use async_trait::async_trait;
use contact_core::{ContactMessage, MessageId, MessageStore, StoreError, StoreResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;
use uuid::Uuid;

/// A message together with the identifier it was stored under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMessage {
    pub id: MessageId,
    pub message: ContactMessage,
}

/// Process-local store
#[derive(Debug, Default)]
pub struct MemoryStore {
    unreachable: bool,
    connected: AtomicBool,
    messages: RwLock<Vec<StoredMessage>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that refuses every connection attempt
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    /// Snapshot of everything stored so far, in insertion order
    pub fn messages(&self) -> Vec<StoredMessage> {
        self.messages
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.messages.read().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MessageStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    async fn connect(&self) -> StoreResult<()> {
        if self.unreachable {
            return Err(StoreError::connection("memory store is unreachable"));
        }
        self.connected.store(true, Ordering::Release);
        Ok(())
    }

    async fn insert(&self, message: &ContactMessage) -> StoreResult<MessageId> {
        self.connect().await?;

        let id = MessageId::new(Uuid::new_v4().to_string());
        let mut guard = self
            .messages
            .write()
            .map_err(|_| StoreError::write("memory store lock poisoned"))?;
        guard.push(StoredMessage {
            id: id.clone(),
            message: message.clone(),
        });

        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use contact_core::{ContactSubmission, SubmissionValidator};

    fn message() -> ContactMessage {
        let validated = SubmissionValidator::new()
            .validate(ContactSubmission::new("Jane", "jane@x.com", "Hi", "Hello there"))
            .unwrap();
        ContactMessage::new(validated, Utc::now())
    }

    #[tokio::test]
    async fn test_insert_connects_and_stores() {
        let store = MemoryStore::new();
        assert!(!store.is_connected());

        let id = store.insert(&message()).await.unwrap();

        assert!(store.is_connected());
        assert_eq!(store.len(), 1);
        assert_eq!(store.messages()[0].id, id);
        assert_eq!(store.messages()[0].message.name(), "Jane");
    }

    #[tokio::test]
    async fn test_unreachable_store_stores_nothing() {
        let store = MemoryStore::unreachable();

        let err = store.insert(&message()).await.unwrap_err();

        assert!(err.is_connection());
        assert!(!store.is_connected());
        assert!(store.is_empty());
    }
}
