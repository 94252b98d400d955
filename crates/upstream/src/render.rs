//! Word-cloud renderer collaborator.
//!
//! The renderer takes raw text plus [`RenderOptions`] and answers with image
//! bytes. The HTTP adapter speaks the QuickChart word-cloud dialect:
//!
//! ```text
//! POST {api_url}
//! {"text": "...", "format": "png", "width": 600, "height": 400,
//!  "fontScale": 15, "scale": "linear"}
//! ```

use crate::client::{build_http_client, parse_base_url, status_error};
use crate::UpstreamError;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Largest accepted width or height, in pixels.
pub const MAX_DIMENSION: u32 = 4096;

/// Output image format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
}

impl ImageFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }

    /// MIME type used when the renderer does not declare one.
    pub fn content_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Svg => "image/svg+xml",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How word frequency maps to font size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntensityScale {
    #[default]
    Linear,
    Sqrt,
    Log,
}

/// Knobs forwarded to the renderer with every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    #[serde(default)]
    pub format: ImageFormat,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_font_scale")]
    pub font_scale: u32,
    #[serde(default)]
    pub scale: IntensityScale,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: ImageFormat::default(),
            width: default_width(),
            height: default_height(),
            font_scale: default_font_scale(),
            scale: IntensityScale::default(),
        }
    }
}

fn default_width() -> u32 {
    600
}

fn default_height() -> u32 {
    400
}

fn default_font_scale() -> u32 {
    15
}

impl RenderOptions {
    /// Apply per-request `overrides` on top of these options.
    pub fn with_overrides(&self, overrides: &RenderOverrides) -> RenderOptions {
        RenderOptions {
            format: overrides.format.unwrap_or(self.format),
            width: overrides.width.unwrap_or(self.width),
            height: overrides.height.unwrap_or(self.height),
            font_scale: overrides.font_scale.unwrap_or(self.font_scale),
            scale: overrides.scale.unwrap_or(self.scale),
        }
    }

    pub fn validate(&self) -> Result<(), UpstreamError> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 || value > MAX_DIMENSION {
                return Err(UpstreamError::InvalidRequest(format!(
                    "{name} must be between 1 and {MAX_DIMENSION}, got {value}"
                )));
            }
        }
        if self.font_scale == 0 {
            return Err(UpstreamError::InvalidRequest(
                "fontScale must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Optional per-request replacements for [`RenderOptions`] fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOverrides {
    pub format: Option<ImageFormat>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub font_scale: Option<u32>,
    pub scale: Option<IntensityScale>,
}

/// Image returned by a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub bytes: Bytes,
    pub content_type: String,
}

/// Anything that can turn text into a word-cloud image.
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn render(
        &self,
        text: &str,
        options: &RenderOptions,
    ) -> Result<RenderedImage, UpstreamError>;
}

#[derive(Serialize)]
struct RenderRequest<'a> {
    text: &'a str,
    #[serde(flatten)]
    options: &'a RenderOptions,
}

/// Renderer reached over HTTP with a JSON POST.
#[derive(Debug, Clone)]
pub struct HttpRenderer {
    client: reqwest::Client,
    api_url: Url,
}

impl HttpRenderer {
    pub fn new(api_url: &str) -> Result<Self, UpstreamError> {
        Ok(Self {
            client: build_http_client()?,
            api_url: parse_base_url(api_url)?,
        })
    }
}

#[async_trait]
impl Renderer for HttpRenderer {
    async fn render(
        &self,
        text: &str,
        options: &RenderOptions,
    ) -> Result<RenderedImage, UpstreamError> {
        tracing::debug!(
            url = %self.api_url,
            format = %options.format,
            width = options.width,
            height = options.height,
            "requesting word cloud"
        );

        let response = self
            .client
            .post(self.api_url.clone())
            .json(&RenderRequest { text, options })
            .send()
            .await
            .map_err(|e| UpstreamError::unreachable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .unwrap_or(options.format.content_type())
            .to_string();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::unreachable(format!("failed to read image body: {e}")))?;

        Ok(RenderedImage {
            bytes,
            content_type,
        })
    }
}

/// Renderer that returns canned bytes and records what it was asked to draw.
#[derive(Debug)]
pub struct StaticRenderer {
    outcome: Result<Bytes, UpstreamError>,
    calls: AtomicUsize,
    last_request: Mutex<Option<(String, RenderOptions)>>,
}

impl StaticRenderer {
    /// Always succeed with `image`.
    pub fn new(image: impl Into<Bytes>) -> Self {
        Self::with_outcome(Ok(image.into()))
    }

    /// Always fail with `error`.
    pub fn failing(error: UpstreamError) -> Self {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: Result<Bytes, UpstreamError>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Text and options of the most recent call.
    pub fn last_request(&self) -> Option<(String, RenderOptions)> {
        self.last_request.lock().ok().and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl Renderer for StaticRenderer {
    async fn render(
        &self,
        text: &str,
        options: &RenderOptions,
    ) -> Result<RenderedImage, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some((text.to_string(), options.clone()));
        }
        self.outcome.clone().map(|bytes| RenderedImage {
            bytes,
            content_type: options.format.content_type().to_string(),
        })
    }
}
