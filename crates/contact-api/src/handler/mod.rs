//! HTTP handlers for the contact service
//!
//! - `routes`: router construction and endpoint handlers
//! - `middleware`: request id propagation and request logging
//!
//! Response bodies keep the shapes the portfolio front end already renders:
//! `{"message": ...}` on success and `{"error": ...}` on failure.

pub mod middleware;
pub mod routes;

pub use middleware::{request_logging_middleware, REQUEST_ID_HEADER};
pub use routes::{create_router, health_check, metrics, submit_contact, AppState};

use serde::{Deserialize, Serialize};

/// Acknowledgment for a stored message
pub const MESSAGE_SENT: &str = "Message sent successfully";

/// Success body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn sent() -> Self {
        Self {
            message: MESSAGE_SENT.to_string(),
        }
    }
}

/// Failure body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub store: StoreHealth,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Health status enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Store connection established
    Healthy,
    /// No connection yet; the next submission will try to open one
    Degraded,
}

/// Store component of the health check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreHealth {
    pub backend: String,
    pub connected: bool,
}
