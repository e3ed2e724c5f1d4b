// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Preview endpoints: the reconciled visualization set and the viewer push.

use crate::error::ApiError;
use crate::services::ViewerClient;
use crate::types::PushResponse;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

/// GET /api/v1/sessions/:id/preview - The visualization set for the current
/// selection, or the empty placeholder object when nothing is selected.
pub async fn current(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let handle = state.registry.get(session_id).await?;
    let session = handle.lock().await;
    let set = session.preview(state.config.empty_filter);
    Ok(Json(ViewerClient::serialize_results(set.as_ref())))
}

/// POST /api/v1/sessions/:id/preview/push - Push the current preview to the
/// connected viewer. A failed push leaves session state untouched.
pub async fn push(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<PushResponse>, ApiError> {
    let handle = state.registry.get(session_id).await?;
    let set = {
        let session = handle.lock().await;
        session.preview(state.config.empty_filter)
    };

    let empty = set.is_none();
    if let Err(e) = state.viewer.push(set.as_ref()).await {
        tracing::warn!(session_id = %session_id, error = %e, "Viewer push failed");
        return Err(e);
    }

    Ok(Json(PushResponse {
        pushed: true,
        empty,
    }))
}
