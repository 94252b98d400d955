use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use copycheck::{PipelineError, Service};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Request timeout")]
    Timeout,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Document '{0}' not found")]
    DocumentNotFound(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{service} is unavailable: {reason}")]
    UpstreamUnavailable { service: Service, reason: String },

    /// Non-success answer from a collaborator. The status is forwarded when it
    /// is an HTTP error status, and the reason is kept verbatim.
    #[error("{service} returned status {status}: {reason}")]
    Upstream {
        service: Service,
        status: u16,
        reason: String,
    },

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::DocumentNotFound(_) | ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::UpstreamUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ServerError::Upstream { status, .. } => upstream_status(*status),
            ServerError::Internal(_) | ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            ServerError::Timeout => "REQUEST_TIMEOUT",
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::DocumentNotFound(_) => "DOCUMENT_NOT_FOUND",
            ServerError::NotFound(_) => "NOT_FOUND",
            ServerError::UpstreamUnavailable { .. } => "UPSTREAM_UNAVAILABLE",
            ServerError::Upstream { .. } => "UPSTREAM_ERROR",
            ServerError::Internal(_) => "INTERNAL_ERROR",
            ServerError::Config(_) => "CONFIG_ERROR",
        }
    }
}

/// Forward 4xx/5xx statuses as-is; anything else becomes 502.
fn upstream_status(status: u16) -> StatusCode {
    match StatusCode::from_u16(status) {
        Ok(code) if code.is_client_error() || code.is_server_error() => code,
        _ => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code().to_string();
        let message = match &self {
            ServerError::Internal(detail) => {
                tracing::error!(error = %detail, "internal error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

impl From<PipelineError> for ServerError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Validation(msg) => ServerError::BadRequest(msg),
            PipelineError::DocumentNotFound(id) => ServerError::DocumentNotFound(id),
            PipelineError::UpstreamUnavailable { service, reason } => {
                ServerError::UpstreamUnavailable { service, reason }
            }
            PipelineError::Upstream {
                service,
                status,
                reason,
            } => ServerError::Upstream {
                service,
                status,
                reason,
            },
            PipelineError::Internal(msg) => ServerError::Internal(msg),
        }
    }
}
