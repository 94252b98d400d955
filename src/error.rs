use std::fmt;
use thiserror::Error;
use upstream::UpstreamError;

/// Collaborator a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    BlobStore,
    Renderer,
}

impl Service {
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::BlobStore => "blob_store",
            Service::Renderer => "renderer",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::BlobStore => f.write_str("blob store"),
            Service::Renderer => f.write_str("renderer"),
        }
    }
}

/// Errors that can occur while running a document through the pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Bad identifier, empty content where content is required, or bad
    /// render options. Never worth retrying.
    #[error("validation failed: {0}")]
    Validation(String),
    /// The blob store has no document under this id.
    #[error("document '{0}' not found")]
    DocumentNotFound(String),
    /// A collaborator could not be reached.
    #[error("{service} is unavailable: {reason}")]
    UpstreamUnavailable { service: Service, reason: String },
    /// A collaborator answered with a non-success status; both are kept as-is.
    #[error("{service} returned status {status}: {reason}")]
    Upstream {
        service: Service,
        status: u16,
        reason: String,
    },
    #[error("internal error: {0}")]
    Internal(String),
}

impl PipelineError {
    /// Classify a collaborator failure met while handling `document_id`.
    pub fn from_upstream(service: Service, document_id: &str, err: UpstreamError) -> Self {
        match err {
            UpstreamError::NotFound => match service {
                Service::BlobStore => PipelineError::DocumentNotFound(document_id.to_string()),
                Service::Renderer => PipelineError::Upstream {
                    service,
                    status: 404,
                    reason: "Not Found".to_string(),
                },
            },
            UpstreamError::Unreachable(reason) => {
                PipelineError::UpstreamUnavailable { service, reason }
            }
            UpstreamError::Status { status, reason } => PipelineError::Upstream {
                service,
                status,
                reason,
            },
            UpstreamError::InvalidRequest(msg) => PipelineError::Validation(msg),
            UpstreamError::InvalidConfig(msg) => PipelineError::Internal(msg),
        }
    }
}
