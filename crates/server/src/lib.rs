//! copycheck Server - HTTP REST API for duplicate document detection
//!
//! This crate exposes the copycheck pipeline over HTTP. It supports:
//!
//! - **Analysis**: Fetch a document from the blob store, compute its
//!   statistics and fingerprint, and classify it as original or duplicate
//! - **Retrieval**: Read back stored results without re-analyzing
//! - **Word Clouds**: Render a document's text through the configured renderer
//! - **Health & Metrics**: Liveness/readiness probes and Prometheus metrics
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe with registry counts
//! - `GET /metrics` - Prometheus metrics
//! - `POST /analysis/{documentId}` - Analyze and classify a document
//! - `GET /analysis/{documentId}` - Stored result
//! - `GET /analysis/{documentId}/wordcloud` - Word-cloud image
//! - `GET /analysis` - All stored results
//!
//! Errors are returned as `{"error": {"code": "...", "message": "..."}}`.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;
pub mod telemetry;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
