// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session lifecycle endpoints.

use crate::error::ApiError;
use crate::types::{SessionCreated, SessionStatus};
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

/// POST /api/v1/sessions - Create a sync session.
pub async fn create(State(state): State<AppState>) -> Json<SessionCreated> {
    let session_id = state.registry.create().await;
    Json(SessionCreated { session_id })
}

/// GET /api/v1/sessions/:id - Session status for UI polling.
pub async fn status(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionStatus>, ApiError> {
    let handle = state.registry.get(session_id).await?;
    let session = handle.lock().await;
    Ok(Json(SessionStatus::from_session(&session)))
}

/// DELETE /api/v1/sessions/:id - Drop a session and its scratch entries.
pub async fn remove(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.registry.remove(session_id).await?;
    state.store.remove_session(session_id).await?;
    Ok(Json(serde_json::json!({ "removed": session_id })))
}
