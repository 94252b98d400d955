use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::telemetry::{install_recorder, PrometheusPipelineMetrics};
use copycheck::{
    AnalysisOrchestrator, BlobFetcher, FingerprintRegistry, HttpBlobFetcher, HttpRenderer, Renderer,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Pipeline shared across requests; owns the registry.
    pub orchestrator: Arc<AnalysisOrchestrator>,

    /// Present when the Prometheus recorder was installed.
    pub prometheus: Option<PrometheusHandle>,

    started: Instant,
}

impl ServerState {
    /// Create new server state with HTTP collaborators from `config`
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let fetcher = HttpBlobFetcher::new(&config.blob_store.base_url)
            .map_err(|e| ServerError::Config(format!("blob_store.base_url: {e}")))?;
        let renderer = HttpRenderer::new(&config.renderer.api_url)
            .map_err(|e| ServerError::Config(format!("renderer.api_url: {e}")))?;

        let prometheus = if config.metrics_enabled {
            install_recorder()
        } else {
            None
        };

        Ok(Self::with_components(
            config,
            Arc::new(fetcher),
            Arc::new(renderer),
            Arc::new(FingerprintRegistry::new()),
            prometheus,
        ))
    }

    /// Assemble state from explicit collaborators.
    pub fn with_components(
        config: ServerConfig,
        fetcher: Arc<dyn BlobFetcher>,
        renderer: Arc<dyn Renderer>,
        registry: Arc<FingerprintRegistry>,
        prometheus: Option<PrometheusHandle>,
    ) -> Self {
        let mut orchestrator = AnalysisOrchestrator::new(fetcher, renderer, registry)
            .with_render_defaults(config.renderer.render_defaults());
        if prometheus.is_some() {
            orchestrator = orchestrator.with_metrics(Arc::new(PrometheusPipelineMetrics));
        }

        Self {
            config: Arc::new(config),
            orchestrator: Arc::new(orchestrator),
            prometheus,
            started: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(blob_url: &str, renderer_url: &str) -> ServerConfig {
        let mut config = ServerConfig::default();
        config.metrics_enabled = false;
        config.blob_store.base_url = blob_url.to_string();
        config.renderer.api_url = renderer_url.to_string();
        config
    }

    #[test]
    fn bad_collaborator_urls_are_config_errors() {
        let cases = [
            (
                config_with("not a url", "http://localhost:3400/wordcloud"),
                "blob_store.base_url",
            ),
            (
                config_with("http://localhost:5001/api/files", "ftp://localhost/wordcloud"),
                "renderer.api_url",
            ),
        ];
        for (config, field) in cases {
            match ServerState::new(config) {
                Err(err @ ServerError::Config(_)) => {
                    assert_eq!(err.error_code(), "CONFIG_ERROR");
                    assert!(err.to_string().contains(field), "{err}");
                }
                Err(other) => panic!("expected config error, got {other}"),
                Ok(_) => panic!("expected {field} to be rejected"),
            }
        }
    }

    #[test]
    fn valid_collaborator_urls_build_state() {
        let state = ServerState::new(config_with(
            "http://localhost:5001/api/files",
            "http://localhost:3400/wordcloud",
        ))
        .expect("state");
        assert!(state.prometheus.is_none());
        assert_eq!(state.orchestrator.list().len(), 0);
    }
}
