use copycheck::{ImageFormat, IntensityScale, RenderOptions};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Metrics endpoint enabled
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    #[serde(default)]
    pub blob_store: BlobStoreConfig,

    #[serde(default)]
    pub renderer: RendererConfig,
}

/// Where document bytes are fetched from.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlobStoreConfig {
    /// Base URL; the document id is appended as one path segment.
    #[serde(default = "default_blob_base_url")]
    pub base_url: String,
}

/// Word-cloud renderer endpoint and the options used when a request gives none.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RendererConfig {
    #[serde(default = "default_renderer_api_url")]
    pub api_url: String,

    #[serde(default)]
    pub format: ImageFormat,

    #[serde(default = "default_render_width")]
    pub width: u32,

    #[serde(default = "default_render_height")]
    pub height: u32,

    #[serde(default = "default_font_scale")]
    pub font_scale: u32,

    #[serde(default)]
    pub scale: IntensityScale,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            enable_cors: default_true(),
            log_level: default_log_level(),
            metrics_enabled: default_true(),
            blob_store: BlobStoreConfig::default(),
            renderer: RendererConfig::default(),
        }
    }
}

impl Default for BlobStoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_blob_base_url(),
        }
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            api_url: default_renderer_api_url(),
            format: ImageFormat::default(),
            width: default_render_width(),
            height: default_render_height(),
            font_scale: default_font_scale(),
            scale: IntensityScale::default(),
        }
    }
}

impl RendererConfig {
    /// Render options applied before per-request overrides.
    pub fn render_defaults(&self) -> RenderOptions {
        RenderOptions {
            format: self.format,
            width: self.width,
            height: self.height,
            font_scale: self.font_scale,
            scale: self.scale,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and config files
    pub fn load() -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("copycheck").required(false))
            // Override with environment variables, e.g. COPYCHECK__RENDERER__WIDTH
            .add_source(config::Environment::with_prefix("COPYCHECK").separator("__"));

        let config: ServerConfig = builder.build()?.try_deserialize()?;
        config
            .renderer
            .render_defaults()
            .validate()
            .map_err(|e| anyhow::anyhow!("invalid renderer defaults: {e}"))?;

        Ok(config)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_blob_base_url() -> String {
    "http://localhost:5001/api/files".to_string()
}

fn default_renderer_api_url() -> String {
    "https://quickchart.io/wordcloud".to_string()
}

fn default_render_width() -> u32 {
    600
}

fn default_render_height() -> u32 {
    400
}

fn default_font_scale() -> u32 {
    15
}
