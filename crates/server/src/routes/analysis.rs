use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::Json;
use copycheck::{AnalysisResult, RenderOverrides};
use serde::Serialize;
use std::sync::Arc;

/// Every stored analysis
#[derive(Debug, Serialize)]
pub struct AnalysisListResponse {
    pub count: usize,
    pub results: Vec<AnalysisResult>,
}

/// Fetch, analyze and classify a document
pub async fn submit_analysis(
    State(state): State<Arc<ServerState>>,
    Path(document_id): Path<String>,
) -> ServerResult<Json<AnalysisResult>> {
    let result = state.orchestrator.submit(&document_id).await?;
    Ok(Json(result))
}

/// Stored result for one document; never re-analyzes
pub async fn get_analysis(
    State(state): State<Arc<ServerState>>,
    Path(document_id): Path<String>,
) -> ServerResult<Json<AnalysisResult>> {
    state
        .orchestrator
        .retrieve(&document_id)
        .map(Json)
        .ok_or_else(|| ServerError::NotFound(format!("no analysis for document '{document_id}'")))
}

/// List every stored result
pub async fn list_analyses(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<Json<AnalysisListResponse>> {
    let mut results = state.orchestrator.list();
    results.sort_by(|a, b| a.document_id.cmp(&b.document_id));
    Ok(Json(AnalysisListResponse {
        count: results.len(),
        results,
    }))
}

/// Render a word cloud of the document's text
///
/// Query parameters `format`, `width`, `height`, `fontScale` and `scale`
/// override the configured defaults.
pub async fn word_cloud(
    State(state): State<Arc<ServerState>>,
    Path(document_id): Path<String>,
    overrides: Result<Query<RenderOverrides>, QueryRejection>,
) -> ServerResult<impl IntoResponse> {
    let Query(overrides) =
        overrides.map_err(|rejection| ServerError::BadRequest(rejection.body_text()))?;

    let image = state
        .orchestrator
        .render_word_cloud(&document_id, &overrides)
        .await?;

    Ok(([(CONTENT_TYPE, image.content_type)], image.bytes))
}
