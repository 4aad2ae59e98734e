//! Integration tests for the message store adapters
//!
//! Tests marked `#[ignore]` need a live MongoDB reachable at `MONGODB_URI`:
//!
//! ```bash
//! MONGODB_URI=mongodb://localhost:27017 cargo test -p contact-storage -- --ignored
//! ```

use chrono::Utc;
use contact_core::{ContactMessage, ContactSubmission, MessageStore, SubmissionValidator};
use contact_storage::{MemoryStore, MongoStore, MongoStoreConfig};
use std::collections::HashSet;
use std::sync::Arc;

fn message(subject: &str) -> ContactMessage {
    let validated = SubmissionValidator::new()
        .validate(ContactSubmission::new(
            "Jane",
            "jane@x.com",
            subject,
            "Hello there",
        ))
        .unwrap();
    ContactMessage::new(validated, Utc::now())
}

#[tokio::test]
async fn test_memory_store_is_not_idempotent() {
    let store = MemoryStore::new();
    let msg = message("Hi");

    let first = store.insert(&msg).await.unwrap();
    let second = store.insert(&msg).await.unwrap();

    assert_ne!(first, second);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_memory_store_concurrent_inserts() {
    let store = Arc::new(MemoryStore::new());

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.insert(&message(&format!("subject {}", i))).await })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap().unwrap());
    }

    assert_eq!(ids.len(), 16);
    assert_eq!(store.len(), 16);
}

#[tokio::test]
async fn test_mongo_unreachable_server_fails_connect() {
    // Nothing listens on port 1; server selection gives up quickly.
    let store = MongoStore::new(MongoStoreConfig {
        uri: "mongodb://127.0.0.1:1/?directConnection=true".to_string(),
        server_selection_timeout_ms: Some(200),
        ..Default::default()
    });

    let err = store.insert(&message("Hi")).await.unwrap_err();

    assert!(err.is_connection());
    assert!(!store.is_connected());

    // No cached failure: a second call makes its own attempt and fails the same way.
    let err = store.connect().await.unwrap_err();
    assert!(err.is_connection());
}

fn live_config() -> Option<MongoStoreConfig> {
    let uri = std::env::var("MONGODB_URI").ok()?;
    Some(MongoStoreConfig {
        uri,
        database: Some("contact_storage_tests".to_string()),
        collection: format!("contacts_{}", unique_suffix()),
        server_selection_timeout_ms: Some(2_000),
        ..Default::default()
    })
}

fn unique_suffix() -> String {
    Utc::now().timestamp_nanos_opt().unwrap_or_default().to_string()
}

#[tokio::test]
#[ignore = "requires MongoDB at MONGODB_URI"]
async fn test_mongo_insert_assigns_distinct_object_ids() {
    let Some(config) = live_config() else {
        return;
    };
    let store = MongoStore::new(config);

    let started = Utc::now();
    let msg = message("Hi");
    let first = store.insert(&msg).await.unwrap();
    let second = store.insert(&msg).await.unwrap();

    assert!(store.is_connected());
    assert_ne!(first, second);
    assert_eq!(first.as_str().len(), 24);
    assert!(msg.created_at() >= started);
}

#[tokio::test]
#[ignore = "requires MongoDB at MONGODB_URI"]
async fn test_mongo_connection_is_cached() {
    let Some(config) = live_config() else {
        return;
    };
    let store = MongoStore::new(config);

    store.connect().await.unwrap();
    assert!(store.is_connected());
    store.connect().await.unwrap();
    store.insert(&message("cached")).await.unwrap();
    assert!(store.is_connected());
}
