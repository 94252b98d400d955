use crate::error::{PipelineError, Service};
use std::time::Duration;

/// How a successful submission was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// First claim on the fingerprint.
    Original,
    /// Same document id analyzed again; it still owns the fingerprint.
    Reanalysis,
    /// Another document owns the fingerprint.
    Duplicate,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Original => "original",
            Classification::Reanalysis => "reanalysis",
            Classification::Duplicate => "duplicate",
        }
    }
}

/// Observer for pipeline outcomes. Handed to the orchestrator at
/// construction; the server wires it to its metrics exporter.
pub trait PipelineMetrics: Send + Sync {
    fn record_submission(&self, latency: Duration, result: Result<Classification, &PipelineError>);
    fn record_word_cloud(&self, latency: Duration, result: Result<(), &PipelineError>);
    fn record_upstream_failure(&self, service: Service, error: &PipelineError);
}
