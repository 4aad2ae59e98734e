//! Route definitions for the contact service
//!
//! - POST /api/contact - validate and store one contact message
//! - GET /health - store connection status
//! - GET /metrics - Prometheus metrics

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use contact_core::{ContactService, ContactSubmission, MessageId};
use std::sync::Arc;
use http_body_util::LengthLimitError;
use std::time::Instant;
use tower_http::cors::CorsLayer;

use super::{
    request_logging_middleware, HealthResponse, HealthStatus, MessageResponse, StoreHealth,
};
use crate::error::ApiError;
use crate::telemetry::{ContactMetrics, SubmissionOutcome};

/// State shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub service: ContactService,
    pub metrics: Arc<ContactMetrics>,
    /// Largest accepted request body in bytes
    pub max_body_size: usize,
    /// Start time for uptime calculation
    pub start_time: Instant,
}

impl AppState {
    pub fn new(service: ContactService, metrics: Arc<ContactMetrics>, max_body_size: usize) -> Self {
        Self {
            service,
            metrics,
            max_body_size,
            start_time: Instant::now(),
        }
    }
}

/// Create the router with all routes
///
/// With `cors_origin` set, cross-origin POSTs from that origin are allowed.
pub fn create_router(state: AppState, cors_origin: Option<HeaderValue>) -> Router {
    let router = Router::new()
        .route("/api/contact", post(submit_contact))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .layer(middleware::from_fn(request_logging_middleware))
        .with_state(state);

    match cors_origin {
        Some(origin) => router.layer(
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        ),
        None => router,
    }
}

/// POST /api/contact - Store one contact message
///
/// 201 when stored, 400 when a field is missing, 500 when the body is not
/// valid JSON, is `null`, cannot be read, or the store fails.
pub async fn submit_contact(
    State(state): State<AppState>,
    body: Body,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let start = Instant::now();

    let result = submit(&state, body).await;

    let outcome = match &result {
        Ok(_) => SubmissionOutcome::Created,
        Err(ApiError::MissingFields(_)) => SubmissionOutcome::Invalid,
        Err(_) => SubmissionOutcome::Error,
    };
    state
        .metrics
        .record(outcome, start.elapsed().as_secs_f64());

    if let Err(err) = &result {
        if err.status_code().is_server_error() {
            tracing::error!(
                error = %err,
                code = err.error_code(),
                "Error in contact route"
            );
        }
    }

    result.map(|_| (StatusCode::CREATED, Json(MessageResponse::sent())))
}

async fn submit(state: &AppState, body: Body) -> Result<MessageId, ApiError> {
    let submission = parse_submission(body, state.max_body_size).await?;
    Ok(state.service.submit(submission).await?)
}

/// Read the body and parse it as a submission
///
/// Invalid JSON and `null` are malformed. Any other non-object value carries
/// none of the form fields and parses as an empty submission.
async fn parse_submission(body: Body, max_size: usize) -> Result<ContactSubmission, ApiError> {
    let bytes = axum::body::to_bytes(body, max_size)
        .await
        .map_err(|e| read_error(e, max_size))?;

    let value: serde_json::Value = serde_json::from_slice(&bytes)
        .map_err(|e| ApiError::MalformedBody(format!("invalid JSON: {}", e)))?;

    match value {
        serde_json::Value::Null => Err(ApiError::MalformedBody("body is null".to_string())),
        value @ serde_json::Value::Object(_) => {
            serde_json::from_value(value).map_err(|e| ApiError::MalformedBody(e.to_string()))
        }
        _ => Ok(ContactSubmission::default()),
    }
}

fn read_error(err: axum::Error, max_size: usize) -> ApiError {
    if exceeds_limit(&err) {
        ApiError::PayloadTooLarge { limit: max_size }
    } else {
        ApiError::BodyRead(err.to_string())
    }
}

fn exceeds_limit(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if e.is::<LengthLimitError>() {
            return true;
        }
        current = e.source();
    }
    false
}

/// GET /health - Store connection status
///
/// Always 200; `degraded` only means no connection has been opened yet.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = state.service.store();
    let connected = store.is_connected();

    Json(HealthResponse {
        status: if connected {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        },
        store: StoreHealth {
            backend: store.backend().to_string(),
            connected,
        },
        version: crate::SERVICE_VERSION.to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}

/// GET /metrics - Prometheus text exposition
pub async fn metrics(State(state): State<AppState>) -> Response {
    match state.metrics.encode_text() {
        Ok(text) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_parse_submission_object() {
        let body = Body::from(r#"{"name":"Jane","email":"jane@x.com"}"#);
        let submission = parse_submission(body, 1024).await.unwrap();
        assert_eq!(submission.name.as_deref(), Some("Jane"));
        assert!(submission.subject.is_none());
    }

    #[tokio::test]
    async fn test_parse_submission_non_object_is_empty() {
        for body in [r#"["Jane","jane@x.com","Hi","Hello"]"#, r#""text""#, "42", "true"] {
            let submission = parse_submission(Body::from(body), 1024).await.unwrap();
            assert_eq!(submission, ContactSubmission::default(), "body: {}", body);
        }
    }

    #[tokio::test]
    async fn test_parse_submission_rejects_null() {
        let err = parse_submission(Body::from("null"), 1024).await.unwrap_err();
        assert!(matches!(err, ApiError::MalformedBody(_)));
    }

    #[tokio::test]
    async fn test_parse_submission_rejects_invalid_json() {
        let err = parse_submission(Body::from("name=Jane"), 1024)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::MalformedBody(_)));
    }

    #[tokio::test]
    async fn test_parse_submission_enforces_limit() {
        let body = Body::from(format!(r#"{{"message":"{}"}}"#, "x".repeat(2048)));
        let err = parse_submission(body, 1024).await.unwrap_err();
        assert!(matches!(err, ApiError::PayloadTooLarge { limit: 1024 }));
    }

    #[tokio::test]
    async fn test_parse_submission_aborted_body_is_read_error() {
        let chunks: Vec<Result<&'static str, std::io::Error>> = vec![
            Ok(r#"{"name":"Ja"#),
            Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionAborted,
                "client went away",
            )),
        ];
        let body = Body::from_stream(futures::stream::iter(chunks));

        let err = parse_submission(body, 1024).await.unwrap_err();
        assert!(matches!(err, ApiError::BodyRead(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
