//! Workspace umbrella crate for copycheck, an exact-duplicate document detector.
//!
//! This crate stitches the analyzer, the fingerprint registry and the upstream
//! collaborators together behind [`AnalysisOrchestrator`], so callers (the HTTP
//! server, tests, other embedders) drive the whole pipeline from one type:
//!
//! ```text
//! submit(id)  ──► BlobFetcher ──► analyze ──► FingerprintRegistry::claim_or_lookup ──► put
//! word cloud  ──► BlobFetcher ──► Renderer
//! ```
//!
//! Collaborators are injected as trait objects, which keeps the pipeline
//! testable with [`InMemoryBlobStore`] and [`StaticRenderer`].

mod error;
mod metrics;
mod orchestrator;

pub use analyzer::{
    FINGERPRINT_HEX_LEN, Fingerprint, TextAnalysis, TextStatistics, WORD_DELIMITERS, analyze,
    compute_fingerprint, compute_statistics,
};
pub use registry::{AnalysisResult, FingerprintRegistry};
pub use upstream::{
    BlobFetcher, Bytes, HttpBlobFetcher, HttpRenderer, ImageFormat, InMemoryBlobStore,
    IntensityScale, MAX_DIMENSION, RenderOptions, RenderOverrides, RenderedImage, Renderer,
    StaticRenderer, UpstreamError,
};

pub use crate::error::{PipelineError, Service};
pub use crate::metrics::{Classification, PipelineMetrics};
pub use crate::orchestrator::AnalysisOrchestrator;
