// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Comparison, report, and selection endpoints.

use crate::error::ApiError;
use crate::types::{CompareParams, FilterRequest, ReportResponse, ReportRow, SessionStatus};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use modelsync_core::{CompareOptions, ComparisonReport, Event, RowSelection, Transition};
use uuid::Uuid;

fn report_response(report: &ComparisonReport, guarded: bool) -> ReportResponse {
    ReportResponse {
        changed: report.changed_objects.iter().map(ReportRow::from).collect(),
        added: report.added_objects.iter().map(ReportRow::from).collect(),
        deleted: report.deleted_objects.iter().map(ReportRow::from).collect(),
        guarded,
    }
}

/// PUT /api/v1/sessions/:id/options - Set the ignore-added/ignore-deleted
/// flags. Changing them invalidates any existing report.
pub async fn set_options(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(options): Json<CompareOptions>,
) -> Result<Json<SessionStatus>, ApiError> {
    let handle = state.registry.get(session_id).await?;
    let mut session = handle.lock().await;
    session.dispatch(Event::SetCompareOptions(options))?;
    Ok(Json(SessionStatus::from_session(&session)))
}

/// POST /api/v1/sessions/:id/compare - Run the comparison.
///
/// Guarded: re-invoking with unchanged inputs returns the existing report
/// without re-running the diff. `?force=true` bypasses the guard.
pub async fn run(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(params): Query<CompareParams>,
) -> Result<Json<ReportResponse>, ApiError> {
    let handle = state.registry.get(session_id).await?;
    let mut session = handle.lock().await;

    // the diff is CPU-bound; run it off the async threads on a clone and
    // swap the result back in while still holding the session lock
    let mut working = session.clone();
    let force = params.force;
    let (working, transition) = tokio::task::spawn_blocking(move || {
        let transition = working.dispatch(Event::RunComparison { force })?;
        Ok::<_, modelsync_core::Error>((working, transition))
    })
    .await??;
    *session = working;

    let guarded = transition == Transition::Guarded;
    if guarded {
        tracing::debug!(session_id = %session_id, "Comparison guarded");
    }

    let report = session
        .report()
        .ok_or(ApiError::InputMissing("comparison report"))?;
    Ok(Json(report_response(report, guarded)))
}

/// GET /api/v1/sessions/:id/report - The report tables.
pub async fn report(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ReportResponse>, ApiError> {
    let handle = state.registry.get(session_id).await?;
    let session = handle.lock().await;
    let report = session
        .report()
        .ok_or(ApiError::InputMissing("comparison report"))?;
    Ok(Json(report_response(report, false)))
}

/// PUT /api/v1/sessions/:id/filter - Grid-selection id filter.
pub async fn set_filter(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<FilterRequest>,
) -> Result<Json<SessionStatus>, ApiError> {
    let handle = state.registry.get(session_id).await?;
    let mut session = handle.lock().await;
    session.dispatch(Event::SetIdFilter(request.ids))?;
    Ok(Json(SessionStatus::from_session(&session)))
}

/// PUT /api/v1/sessions/:id/selection/:element_id - One row's checkbox
/// state.
pub async fn set_selection(
    State(state): State<AppState>,
    Path((session_id, element_id)): Path<(Uuid, String)>,
    Json(row): Json<RowSelection>,
) -> Result<Json<SessionStatus>, ApiError> {
    let handle = state.registry.get(session_id).await?;
    let mut session = handle.lock().await;
    session.dispatch(Event::SetRowSelection(element_id, row))?;
    Ok(Json(SessionStatus::from_session(&session)))
}
