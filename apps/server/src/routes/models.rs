// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model loading endpoints: direct upload and artifact fetch.

use crate::error::ApiError;
use crate::services::ModelSlot;
use crate::types::{ArtifactRequest, ModelLoaded};
use crate::AppState;
use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use modelsync_core::{Event, ModelDocument};
use uuid::Uuid;

/// Extract file data from a multipart request.
async fn extract_file(multipart: &mut Multipart) -> Result<Vec<u8>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default();
        tracing::debug!(field_name = %field_name, "Processing multipart field");

        if field_name == "file" {
            let bytes = field.bytes().await?;
            tracing::debug!(size = bytes.len(), "Extracted file from multipart");
            return Ok(bytes.to_vec());
        }
    }

    tracing::warn!("No 'file' field found in multipart request");
    Err(ApiError::MissingFile)
}

fn load_event(slot: ModelSlot, document: ModelDocument) -> Event {
    match slot {
        ModelSlot::Base => Event::SetBaseModel(document),
        ModelSlot::Updated => Event::SetUpdatedModel(document),
    }
}

/// PUT /api/v1/sessions/:id/models/:slot - Upload a model document.
pub async fn upload(
    State(state): State<AppState>,
    Path((session_id, slot)): Path<(Uuid, String)>,
    mut multipart: Multipart,
) -> Result<Json<ModelLoaded>, ApiError> {
    let slot: ModelSlot = slot.parse()?;
    let handle = state.registry.get(session_id).await?;

    let data = extract_file(&mut multipart).await?;
    if data.len() > state.config.max_file_size_mb * 1024 * 1024 {
        return Err(ApiError::FileTooLarge {
            max_mb: state.config.max_file_size_mb,
        });
    }

    let content = String::from_utf8(data.clone())?;

    // Parse on the blocking pool; documents can be large
    let document =
        tokio::task::spawn_blocking(move || ModelDocument::from_json_str(&content)).await??;

    state.store.save(session_id, slot, &data).await?;

    let model = document.identifier.clone();
    let elements = document.elements.len();

    let mut session = handle.lock().await;
    session.dispatch(load_event(slot, document))?;

    tracing::info!(
        session_id = %session_id,
        slot = slot.as_str(),
        model = %model,
        elements,
        "Model loaded from upload"
    );

    Ok(Json(ModelLoaded {
        slot: slot.as_str().to_string(),
        model,
        elements,
    }))
}

/// POST /api/v1/sessions/:id/models/updated/artifact - Fetch the updated
/// model from the project artifact store.
pub async fn fetch_artifact(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<ArtifactRequest>,
) -> Result<Json<ModelLoaded>, ApiError> {
    let handle = state.registry.get(session_id).await?;

    let value = state.artifacts.fetch_document(&request.path).await?;
    let document = ModelDocument::from_value(value)?;

    let raw = serde_json::to_vec(&document)?;
    state
        .store
        .save(session_id, ModelSlot::Updated, &raw)
        .await?;

    let model = document.identifier.clone();
    let elements = document.elements.len();

    let mut session = handle.lock().await;
    session.dispatch(Event::SetUpdatedModel(document))?;

    tracing::info!(
        session_id = %session_id,
        path = %request.path,
        model = %model,
        elements,
        "Model loaded from artifact store"
    );

    Ok(Json(ModelLoaded {
        slot: ModelSlot::Updated.as_str().to_string(),
        model,
        elements,
    }))
}
