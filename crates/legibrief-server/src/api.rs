//! API handlers for the legibrief server
//!
//! Three endpoints: document summarization (multipart PDF upload),
//! bill search (JSON query), and a health probe. Handlers stay thin;
//! the workflows own all provider orchestration and every response
//! record has already been normalized by the time it reaches a client.

use axum::extract::{Multipart, State};
use axum::Json;
use legibrief_domain::{BillRecord, LlmProvider};
use legibrief_analyst::SearchQuery;
use serde::Serialize;
use std::fmt;
use tracing::info;

use crate::error::ServerError;
use crate::upload::UploadGuard;
use crate::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the server can answer at all
    pub status: &'static str,
    /// Human-readable liveness note
    pub message: &'static str,
}

/// Handler: GET /api/health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "Server is running",
    })
}

/// Handler: POST /api/summarize
///
/// Accepts a multipart body with a single `file` field holding a PDF,
/// runs the document analysis workflow, and returns the normalized
/// record. The upload is stored for the duration of the request and
/// deleted on every exit path by the guard's drop.
pub async fn handle_summarize<L>(
    State(state): State<AppState<L>>,
    mut multipart: Multipart,
) -> Result<Json<BillRecord>, ServerError>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: fmt::Display,
{
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::Upload(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let is_pdf = field.content_type() == Some("application/pdf");
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ServerError::Upload(e.to_string()))?;

        if !is_pdf {
            return Err(ServerError::NotPdf);
        }

        upload = Some(bytes);
        break;
    }

    let bytes = upload.ok_or(ServerError::NoFile)?;
    info!(bytes = bytes.len(), "summarize request received");

    // Guard lives until this handler returns, so the file is gone even
    // when classification rejects the document or a stage fails.
    let _guard = UploadGuard::persist(&state.uploads_dir, &bytes)
        .map_err(|e| ServerError::Internal(e.to_string()))?;

    let text = tokio::task::spawn_blocking(move || legibrief_pdf::extract_text(&bytes))
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))?
        .map_err(|e| match e {
            legibrief_pdf::PdfError::NotPdf => ServerError::NotPdf,
            other => ServerError::Extraction(other.to_string()),
        })?;

    info!(chars = text.len(), "document text extracted");

    let record = state
        .analyst
        .analyze(&text)
        .await
        .map_err(ServerError::Analysis)?;

    Ok(Json(record))
}

/// Handler: POST /api/search
pub async fn handle_search<L>(
    State(state): State<AppState<L>>,
    Json(query): Json<SearchQuery>,
) -> Result<Json<BillRecord>, ServerError>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: fmt::Display,
{
    info!(
        state = query.state().unwrap_or_default(),
        "search request received"
    );

    let record = state
        .searcher
        .search(&query)
        .await
        .map_err(ServerError::Search)?;

    Ok(Json(record))
}
