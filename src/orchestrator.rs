//! Fetch → analyze → classify → persist, plus the word-cloud path.

use crate::error::{PipelineError, Service};
use crate::metrics::{Classification, PipelineMetrics};
use analyzer::{TextAnalysis, analyze};
use bytes::Bytes;
use registry::{AnalysisResult, FingerprintRegistry};
use std::sync::Arc;
use std::time::Instant;
use upstream::{BlobFetcher, RenderOptions, RenderOverrides, RenderedImage, Renderer};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Coordinates the collaborators and the registry for every request.
///
/// Cheap to share behind an `Arc`; all state lives in the injected
/// [`FingerprintRegistry`].
pub struct AnalysisOrchestrator {
    fetcher: Arc<dyn BlobFetcher>,
    renderer: Arc<dyn Renderer>,
    registry: Arc<FingerprintRegistry>,
    render_defaults: RenderOptions,
    metrics: Option<Arc<dyn PipelineMetrics>>,
}

impl AnalysisOrchestrator {
    pub fn new(
        fetcher: Arc<dyn BlobFetcher>,
        renderer: Arc<dyn Renderer>,
        registry: Arc<FingerprintRegistry>,
    ) -> Self {
        Self {
            fetcher,
            renderer,
            registry,
            render_defaults: RenderOptions::default(),
            metrics: None,
        }
    }

    /// Options used for word clouds when a request does not override them.
    pub fn with_render_defaults(mut self, defaults: RenderOptions) -> Self {
        self.render_defaults = defaults;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn PipelineMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn registry(&self) -> &Arc<FingerprintRegistry> {
        &self.registry
    }

    pub fn render_defaults(&self) -> &RenderOptions {
        &self.render_defaults
    }

    /// Analyze `document_id` and classify it as original or duplicate.
    ///
    /// The blob is fetched before the registry is touched, so no registry lock
    /// is ever held across a network call. Submitting the same id again with
    /// unchanged content yields the same classification; the stored result is
    /// overwritten either way.
    pub async fn submit(&self, document_id: &str) -> Result<AnalysisResult, PipelineError> {
        let start = Instant::now();
        let outcome = self.submit_inner(document_id).await;
        if let Some(metrics) = &self.metrics {
            metrics.record_submission(
                start.elapsed(),
                outcome.as_ref().map(|(_, class)| *class),
            );
        }
        outcome.map(|(result, _)| result)
    }

    async fn submit_inner(
        &self,
        document_id: &str,
    ) -> Result<(AnalysisResult, Classification), PipelineError> {
        validate_document_id(document_id)?;

        let text = self.fetch_text(document_id).await?;
        let analysis = tokio::task::spawn_blocking(move || analyze(&text))
            .await
            .map_err(|e| {
                tracing::error!(document_id, error = %e, "analysis task failed");
                PipelineError::Internal(format!("analysis task failed: {e}"))
            })?;

        if analysis.fingerprint.is_empty() {
            tracing::warn!(
                document_id,
                "document is empty; all empty documents share one fingerprint"
            );
        }

        let owner = self
            .registry
            .claim_or_lookup(&analysis.fingerprint, document_id);
        let (result, class) = classify(document_id, analysis, owner);

        match class {
            Classification::Original => tracing::info!(
                document_id,
                fingerprint = %result.fingerprint.short(),
                "document is new; fingerprint claimed"
            ),
            Classification::Reanalysis => tracing::info!(
                document_id,
                fingerprint = %result.fingerprint.short(),
                "re-analysis of the fingerprint's owner"
            ),
            Classification::Duplicate => tracing::info!(
                document_id,
                fingerprint = %result.fingerprint.short(),
                owner = result.original_document_id.as_deref().unwrap_or_default(),
                "document duplicates an earlier submission"
            ),
        }

        self.registry.put(document_id, result.clone());
        Ok((result, class))
    }

    /// Stored result for `document_id`; nothing is recomputed.
    pub fn retrieve(&self, document_id: &str) -> Option<AnalysisResult> {
        self.registry.get(document_id)
    }

    /// Every stored result, in no particular order.
    pub fn list(&self) -> Vec<AnalysisResult> {
        self.registry.list_all()
    }

    /// Render a word cloud of `document_id`'s text.
    ///
    /// `overrides` are applied over the configured defaults and validated
    /// before anything is fetched. Renderer failures keep the renderer's own
    /// status and body.
    pub async fn render_word_cloud(
        &self,
        document_id: &str,
        overrides: &RenderOverrides,
    ) -> Result<RenderedImage, PipelineError> {
        let start = Instant::now();
        let outcome = self.render_inner(document_id, overrides).await;
        if let Some(metrics) = &self.metrics {
            metrics.record_word_cloud(start.elapsed(), outcome.as_ref().map(|_| ()));
        }
        outcome
    }

    async fn render_inner(
        &self,
        document_id: &str,
        overrides: &RenderOverrides,
    ) -> Result<RenderedImage, PipelineError> {
        validate_document_id(document_id)?;

        let options = self.render_defaults.with_overrides(overrides);
        options
            .validate()
            .map_err(|e| PipelineError::from_upstream(Service::Renderer, document_id, e))?;

        let text = self.fetch_text(document_id).await?;
        if text.trim().is_empty() {
            tracing::warn!(document_id, "document is empty; nothing to draw");
            return Err(PipelineError::Validation(format!(
                "document '{document_id}' has no content to visualize"
            )));
        }

        let image = self
            .renderer
            .render(&text, &options)
            .await
            .map_err(|e| self.upstream_failure(Service::Renderer, document_id, e))?;

        tracing::info!(
            document_id,
            content_type = %image.content_type,
            bytes = image.bytes.len(),
            "word cloud rendered"
        );
        Ok(image)
    }

    async fn fetch_text(&self, document_id: &str) -> Result<String, PipelineError> {
        let bytes = self
            .fetcher
            .fetch(document_id)
            .await
            .map_err(|e| self.upstream_failure(Service::BlobStore, document_id, e))?;
        tracing::debug!(document_id, bytes = bytes.len(), "document fetched");
        Ok(decode_text(document_id, bytes))
    }

    fn upstream_failure(
        &self,
        service: Service,
        document_id: &str,
        err: upstream::UpstreamError,
    ) -> PipelineError {
        let err = PipelineError::from_upstream(service, document_id, err);
        match &err {
            PipelineError::DocumentNotFound(_) => {
                tracing::warn!(document_id, %service, "document not found upstream")
            }
            other => tracing::error!(document_id, %service, error = %other, "upstream call failed"),
        }
        if let Some(metrics) = &self.metrics {
            metrics.record_upstream_failure(service, &err);
        }
        err
    }
}

fn validate_document_id(document_id: &str) -> Result<(), PipelineError> {
    if document_id.trim().is_empty() {
        return Err(PipelineError::Validation(
            "document id cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Turn a registry answer into the stored result.
///
/// `owner` is what `claim_or_lookup` returned: `None` when this document just
/// claimed the fingerprint, otherwise the current owner.
fn classify(
    document_id: &str,
    analysis: TextAnalysis,
    owner: Option<String>,
) -> (AnalysisResult, Classification) {
    let TextAnalysis {
        statistics,
        fingerprint,
    } = analysis;
    match owner {
        None => (
            AnalysisResult::original(document_id, statistics, fingerprint),
            Classification::Original,
        ),
        Some(owner) if owner == document_id => (
            AnalysisResult::original(document_id, statistics, fingerprint),
            Classification::Reanalysis,
        ),
        Some(owner) => (
            AnalysisResult::duplicate_of(document_id, statistics, fingerprint, owner),
            Classification::Duplicate,
        ),
    }
}

/// UTF-8 decode with a leading BOM dropped; invalid sequences become U+FFFD.
fn decode_text(document_id: &str, bytes: Bytes) -> String {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);
    match std::str::from_utf8(body) {
        Ok(text) => text.to_owned(),
        Err(e) => {
            tracing::warn!(document_id, error = %e, "document is not valid UTF-8; decoding lossily");
            String::from_utf8_lossy(body).into_owned()
        }
    }
}
