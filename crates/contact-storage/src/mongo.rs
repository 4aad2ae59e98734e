//! MongoDB message store
//!
//! Documents follow the layout the portfolio site has always written:
//!
//! ```json
//! { "_id": ObjectId, "name": "...", "email": "...", "subject": "...",
//!   "message": "...", "createdAt": ISODate, "__v": 0 }
//! ```
//!
//! The client is built, pinged and cached on first use. Concurrent first
//! callers wait on the same initialization; a failed attempt caches nothing.

use async_trait::async_trait;
use contact_core::{ContactMessage, MessageId, MessageStore, StoreError, StoreResult};
use mongodb::bson::{doc, Bson, DateTime as BsonDateTime};
use mongodb::error::ErrorKind;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::OnceCell;

/// Database used when neither the config nor the URI names one
pub const DEFAULT_DATABASE: &str = "test";

/// Connection settings for [`MongoStore`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoStoreConfig {
    /// Connection string
    #[serde(default = "default_uri")]
    pub uri: String,
    /// Database name; falls back to the URI's default database
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(default = "default_collection")]
    pub collection: String,
    /// How long to wait for a reachable server before failing a request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_selection_timeout_ms: Option<u64>,
    #[serde(default = "default_app_name")]
    pub app_name: String,
}

fn default_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_collection() -> String {
    "contacts".to_string()
}

fn default_app_name() -> String {
    "portfolio-contact".to_string()
}

impl Default for MongoStoreConfig {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            database: None,
            collection: default_collection(),
            server_selection_timeout_ms: None,
            app_name: default_app_name(),
        }
    }
}

/// Stored shape of a contact message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ContactDocument {
    name: String,
    email: String,
    subject: String,
    message: String,
    #[serde(rename = "createdAt")]
    created_at: BsonDateTime,
    #[serde(rename = "__v")]
    version: i32,
}

impl From<&ContactMessage> for ContactDocument {
    fn from(message: &ContactMessage) -> Self {
        Self {
            name: message.name().to_string(),
            email: message.email().to_string(),
            subject: message.subject().to_string(),
            message: message.message().to_string(),
            created_at: BsonDateTime::from_millis(message.created_at().timestamp_millis()),
            version: 0,
        }
    }
}

/// Lazily connected MongoDB store
pub struct MongoStore {
    config: MongoStoreConfig,
    collection: OnceCell<Collection<ContactDocument>>,
}

impl MongoStore {
    pub fn new(config: MongoStoreConfig) -> Self {
        Self {
            config,
            collection: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &MongoStoreConfig {
        &self.config
    }

    async fn collection(&self) -> StoreResult<&Collection<ContactDocument>> {
        self.collection.get_or_try_init(|| self.open()).await
    }

    async fn open(&self) -> StoreResult<Collection<ContactDocument>> {
        let mut options = ClientOptions::parse(self.config.uri.as_str())
            .await
            .map_err(|e| StoreError::connection(format!("invalid connection string: {}", e)))?;

        if let Some(ms) = self.config.server_selection_timeout_ms {
            options.server_selection_timeout = Some(Duration::from_millis(ms));
        }
        if options.app_name.is_none() {
            options.app_name = Some(self.config.app_name.clone());
        }

        let database_name = self
            .config
            .database
            .clone()
            .or_else(|| options.default_database.clone())
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        let client = Client::with_options(options).map_err(connection_error)?;
        let database = client.database(&database_name);

        // The driver connects lazily; ping so an unreachable server fails here.
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(connection_error)?;

        tracing::info!(
            database = %database_name,
            collection = %self.config.collection,
            "Connected to MongoDB"
        );

        Ok(database.collection(&self.config.collection))
    }
}

#[async_trait]
impl MessageStore for MongoStore {
    fn backend(&self) -> &'static str {
        "mongodb"
    }

    fn is_connected(&self) -> bool {
        self.collection.initialized()
    }

    async fn connect(&self) -> StoreResult<()> {
        self.collection().await.map(|_| ())
    }

    async fn insert(&self, message: &ContactMessage) -> StoreResult<MessageId> {
        let collection = self.collection().await?;
        let result = collection
            .insert_one(ContactDocument::from(message))
            .await
            .map_err(insert_error)?;

        Ok(object_id_string(&result.inserted_id))
    }
}

fn connection_error(err: mongodb::error::Error) -> StoreError {
    StoreError::connection(err.to_string())
}

fn insert_error(err: mongodb::error::Error) -> StoreError {
    match *err.kind {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. } => StoreError::connection(err.to_string()),
        _ => StoreError::write(err.to_string()),
    }
}

fn object_id_string(id: &Bson) -> MessageId {
    match id.as_object_id() {
        Some(oid) => MessageId::new(oid.to_hex()),
        None => MessageId::new(id.to_string()),
    }
}
