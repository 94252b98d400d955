//! Blob-store collaborator: read a document's raw bytes by id.

use crate::client::{build_http_client, parse_base_url, status_error};
use crate::UpstreamError;
use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use reqwest::{StatusCode, Url};
use std::sync::atomic::{AtomicBool, Ordering};

/// Anything that can hand back a stored document's bytes.
#[async_trait]
pub trait BlobFetcher: Send + Sync {
    /// Fetch the blob stored under `document_id`.
    ///
    /// Errors: [`UpstreamError::NotFound`] when the store has no such blob,
    /// [`UpstreamError::Unreachable`] on transport failure, and
    /// [`UpstreamError::Status`] for any other non-success answer.
    async fn fetch(&self, document_id: &str) -> Result<Bytes, UpstreamError>;
}

/// Blob store reached over HTTP at `GET {base_url}/{document_id}`.
#[derive(Debug, Clone)]
pub struct HttpBlobFetcher {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpBlobFetcher {
    pub fn new(base_url: &str) -> Result<Self, UpstreamError> {
        Ok(Self {
            client: build_http_client()?,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// `{base_url}/{document_id}` with the id percent-encoded as one segment.
    pub fn document_url(&self, document_id: &str) -> Result<Url, UpstreamError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                UpstreamError::InvalidConfig(format!(
                    "blob store URL '{}' cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .push(document_id);
        Ok(url)
    }
}

#[async_trait]
impl BlobFetcher for HttpBlobFetcher {
    async fn fetch(&self, document_id: &str) -> Result<Bytes, UpstreamError> {
        let url = self.document_url(document_id)?;
        tracing::debug!(%url, document_id, "requesting blob");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| UpstreamError::unreachable(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(UpstreamError::NotFound);
        }
        if !status.is_success() {
            return Err(status_error(response).await);
        }

        response
            .bytes()
            .await
            .map_err(|e| UpstreamError::unreachable(format!("failed to read blob body: {e}")))
    }
}

/// In-process blob store for tests and local runs.
///
/// Individual ids can be rigged to fail, and the whole store can be taken
/// offline to simulate a transport failure.
#[derive(Debug, Default)]
pub struct InMemoryBlobStore {
    blobs: DashMap<String, Bytes>,
    failures: DashMap<String, UpstreamError>,
    offline: AtomicBool,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `content` under `document_id`, replacing what was there.
    pub fn insert(&self, document_id: impl Into<String>, content: impl Into<Bytes>) {
        self.blobs.insert(document_id.into(), content.into());
    }

    /// Make every fetch of `document_id` fail with `error`.
    pub fn fail_with(&self, document_id: impl Into<String>, error: UpstreamError) {
        self.failures.insert(document_id.into(), error);
    }

    /// While offline every fetch is [`UpstreamError::Unreachable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

#[async_trait]
impl BlobFetcher for InMemoryBlobStore {
    async fn fetch(&self, document_id: &str) -> Result<Bytes, UpstreamError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(UpstreamError::unreachable("in-memory blob store is offline"));
        }
        if let Some(error) = self.failures.get(document_id) {
            return Err(error.value().clone());
        }
        self.blobs
            .get(document_id)
            .map(|blob| blob.value().clone())
            .ok_or(UpstreamError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_url_appends_one_encoded_segment() {
        let fetcher = HttpBlobFetcher::new("http://localhost:5001/api/files").unwrap();
        assert_eq!(
            fetcher.document_url("new.txt").unwrap().as_str(),
            "http://localhost:5001/api/files/new.txt"
        );
        assert_eq!(
            fetcher.document_url("a b/c").unwrap().as_str(),
            "http://localhost:5001/api/files/a%20b%2Fc"
        );
    }

    #[test]
    fn document_url_tolerates_trailing_slash() {
        let fetcher = HttpBlobFetcher::new("http://localhost:5001/api/files/").unwrap();
        assert_eq!(
            fetcher.document_url("x.txt").unwrap().as_str(),
            "http://localhost:5001/api/files/x.txt"
        );
    }

    #[test]
    fn rejects_bad_base_url() {
        assert!(matches!(
            HttpBlobFetcher::new("localhost:5001"),
            Err(UpstreamError::InvalidConfig(_))
        ));
    }
}
