use crate::UpstreamError;
use reqwest::Url;
use std::time::Duration;

pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub(crate) const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Pooled HTTP client shared by one collaborator adapter.
pub(crate) fn build_http_client() -> Result<reqwest::Client, UpstreamError> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .connect_timeout(CONNECT_TIMEOUT)
        .pool_max_idle_per_host(32)
        .build()
        .map_err(|e| UpstreamError::InvalidConfig(format!("failed to build HTTP client: {e}")))
}

/// Parse an absolute http(s) base URL.
pub(crate) fn parse_base_url(raw: &str) -> Result<Url, UpstreamError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| UpstreamError::InvalidConfig(format!("invalid URL '{raw}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(UpstreamError::InvalidConfig(format!(
            "unsupported URL scheme '{other}' in '{raw}'"
        ))),
    }
}

/// Read a failed response into [`UpstreamError::Status`], keeping the body
/// when the collaborator sent one.
pub(crate) async fn status_error(response: reqwest::Response) -> UpstreamError {
    let status = response.status();
    let reason = match response.text().await {
        Ok(body) if !body.trim().is_empty() => body,
        _ => status.canonical_reason().unwrap_or("unknown status").to_string(),
    };
    UpstreamError::status(status.as_u16(), reason)
}
