//! API route handlers
//!
//! - `health`: Health checks, readiness, and metrics
//! - `analysis`: Submission, retrieval, listing and word clouds

pub mod analysis;
pub mod health;

use crate::error::{ServerError, ServerResult};
use axum::http::Uri;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info
///
/// # Response
///
/// ```json
/// {
///   "name": "copycheck",
///   "version": "0.1.0",
///   "endpoints": ["..."]
/// }
/// ```
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "copycheck",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "POST /analysis/{documentId}",
            "GET /analysis/{documentId}",
            "GET /analysis/{documentId}/wordcloud",
            "GET /analysis",
            "/health",
            "/ready",
            "/metrics"
        ]
    })))
}

/// 404 Not Found handler
pub async fn not_found(uri: Uri) -> ServerError {
    ServerError::NotFound(format!("no route for {}", uri.path()))
}
