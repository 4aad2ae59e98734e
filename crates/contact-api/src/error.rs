//! HTTP error mapping
//!
//! Every failure leaves the API as a JSON body `{"error": "<message>"}`.
//! Messages are fixed per status so no store or parser detail reaches the
//! client; the detail goes to the logs instead.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use contact_core::{StoreError, SubmitError, ValidationError};
use thiserror::Error;

use crate::handler::ErrorResponse;

/// Failures of the submission endpoint
#[derive(Error, Debug)]
pub enum ApiError {
    /// One or more of the four form fields is absent or empty
    #[error("Missing required fields")]
    MissingFields(#[from] ValidationError),

    /// Body was not a JSON object
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// Body could not be read to the end
    #[error("Failed to read request body: {0}")]
    BodyRead(String),

    /// Body exceeded the configured size limit
    #[error("Request body exceeds limit of {limit} bytes")]
    PayloadTooLarge { limit: usize },

    /// Connection or write failure against the store
    #[error("Store failure: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingFields(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::MalformedBody(_) | ApiError::BodyRead(_) | ApiError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Error code for logs and metrics
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::MissingFields(_) => "MISSING_FIELDS",
            ApiError::MalformedBody(_) => "MALFORMED_BODY",
            ApiError::BodyRead(_) => "BODY_READ_ERROR",
            ApiError::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            ApiError::Store(_) => "STORE_ERROR",
        }
    }

    /// Message sent to the client
    pub fn public_message(&self) -> &'static str {
        match self {
            ApiError::MissingFields(_) => "Missing required fields",
            ApiError::PayloadTooLarge { .. } => "Payload Too Large",
            ApiError::MalformedBody(_) | ApiError::BodyRead(_) | ApiError::Store(_) => {
                "Internal Server Error"
            }
        }
    }
}

impl From<SubmitError> for ApiError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Validation(e) => ApiError::MissingFields(e),
            SubmitError::Store(e) => ApiError::Store(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.public_message().to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::MalformedBody("x".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Store(StoreError::connection("down")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::BodyRead("connection reset".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::PayloadTooLarge { limit: 10 }.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[test]
    fn test_store_detail_is_not_public() {
        let err = ApiError::Store(StoreError::write("E11000 duplicate key"));
        assert_eq!(err.public_message(), "Internal Server Error");
        assert!(err.to_string().contains("E11000"));
        assert_eq!(err.error_code(), "STORE_ERROR");
    }

    #[test]
    fn test_from_submit_error() {
        let err: ApiError = SubmitError::Store(StoreError::connection("down")).into();
        assert!(matches!(err, ApiError::Store(_)));
    }
}
