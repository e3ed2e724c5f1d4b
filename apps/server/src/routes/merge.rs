// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Merge endpoint: apply the selected changes and return the merged
//! document as a download.

use crate::error::ApiError;
use crate::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use uuid::Uuid;

/// POST /api/v1/sessions/:id/merge - Derive sync instructions from the
/// current selection, merge, and return the document as a JSON attachment.
pub async fn download(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let handle = state.registry.get(session_id).await?;
    let session = handle.lock().await.clone();

    // merge is CPU-bound on large documents
    let merged = tokio::task::spawn_blocking(move || session.merge_selected()).await??;

    let filename = format!("{}_synced.json", merged.identifier);
    let body = merged.to_json_string()?;

    tracing::info!(
        session_id = %session_id,
        model = %merged.identifier,
        elements = merged.elements.len(),
        "Merged document prepared for download"
    );

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/json")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(response)
}
