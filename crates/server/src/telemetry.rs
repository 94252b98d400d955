//! Prometheus wiring for pipeline outcomes.

use copycheck::{Classification, PipelineError, PipelineMetrics, Service};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Forwards pipeline observations to the global `metrics` recorder.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrometheusPipelineMetrics;

impl PipelineMetrics for PrometheusPipelineMetrics {
    fn record_submission(&self, latency: Duration, result: Result<Classification, &PipelineError>) {
        let outcome = match result {
            Ok(class) => class.as_str(),
            Err(_) => "error",
        };
        counter!("copycheck_submissions_total", "outcome" => outcome).increment(1);
        if matches!(result, Ok(Classification::Duplicate)) {
            counter!("copycheck_duplicates_total").increment(1);
        }
        histogram!("copycheck_submission_duration_seconds").record(latency.as_secs_f64());
    }

    fn record_word_cloud(&self, latency: Duration, result: Result<(), &PipelineError>) {
        let outcome = if result.is_ok() { "ok" } else { "error" };
        counter!("copycheck_wordclouds_total", "outcome" => outcome).increment(1);
        histogram!("copycheck_wordcloud_duration_seconds").record(latency.as_secs_f64());
    }

    fn record_upstream_failure(&self, service: Service, _error: &PipelineError) {
        counter!("copycheck_upstream_failures_total", "service" => service.as_str()).increment(1);
    }
}

/// Install the process-wide Prometheus recorder.
///
/// Only one recorder can exist per process; a second install fails and the
/// server carries on without `/metrics` output.
pub fn install_recorder() -> Option<PrometheusHandle> {
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(err) => {
            tracing::warn!(error = %err, "metrics recorder not installed");
            None
        }
    }
}
