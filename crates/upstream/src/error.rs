use thiserror::Error;

/// Ways a call to a collaborator service can fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    /// The collaborator answered 404 for the requested resource.
    #[error("resource not found")]
    NotFound,
    /// The collaborator could not be reached, or the transfer broke off.
    #[error("upstream unreachable: {0}")]
    Unreachable(String),
    /// The collaborator answered with a non-success status other than 404.
    /// `reason` is the response body when there is one, else the canonical
    /// reason phrase.
    #[error("upstream returned status {status}: {reason}")]
    Status { status: u16, reason: String },
    /// The request was rejected before anything was sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// A client could not be built from its configuration.
    #[error("invalid upstream config: {0}")]
    InvalidConfig(String),
}

impl UpstreamError {
    pub fn unreachable(msg: impl Into<String>) -> Self {
        UpstreamError::Unreachable(msg.into())
    }

    pub fn status(status: u16, reason: impl Into<String>) -> Self {
        UpstreamError::Status {
            status,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_detail() {
        let err = UpstreamError::status(502, "bad gateway");
        assert!(err.to_string().contains("502"));
        assert!(err.to_string().contains("bad gateway"));

        let err = UpstreamError::unreachable("connection refused");
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn not_found_is_distinct_from_status() {
        assert_ne!(UpstreamError::NotFound, UpstreamError::status(404, "Not Found"));
    }
}
