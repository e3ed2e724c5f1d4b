// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Health check endpoint.

use crate::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub service: &'static str,
    pub sessions: usize,
}

/// API information response.
#[derive(Debug, Serialize)]
pub struct ApiInfoResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub endpoints: Vec<EndpointInfo>,
}

/// Endpoint information.
#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

/// GET /api/v1/health - Health check endpoint.
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        service: "modelsync-server",
        sessions: state.registry.len().await,
    })
}

/// GET / - API information endpoint.
pub async fn info() -> Json<ApiInfoResponse> {
    Json(ApiInfoResponse {
        service: "modelsync-server",
        version: env!("CARGO_PKG_VERSION"),
        description: "Session-scoped model comparison and sync server",
        endpoints: vec![
            EndpointInfo {
                method: "GET",
                path: "/api/v1/health",
                description: "Health check endpoint",
            },
            EndpointInfo {
                method: "POST",
                path: "/api/v1/sessions",
                description: "Create a sync session",
            },
            EndpointInfo {
                method: "PUT",
                path: "/api/v1/sessions/:id/models/:slot",
                description: "Upload the base or updated model document",
            },
            EndpointInfo {
                method: "POST",
                path: "/api/v1/sessions/:id/models/updated/artifact",
                description: "Fetch the updated model from the project artifact store",
            },
            EndpointInfo {
                method: "POST",
                path: "/api/v1/sessions/:id/compare",
                description: "Run the comparison (guarded; ?force=true to re-run)",
            },
            EndpointInfo {
                method: "GET",
                path: "/api/v1/sessions/:id/report",
                description: "Changed/added/deleted report tables",
            },
            EndpointInfo {
                method: "GET",
                path: "/api/v1/sessions/:id/preview",
                description: "Reconciled visualization set for the current selection",
            },
            EndpointInfo {
                method: "POST",
                path: "/api/v1/sessions/:id/preview/push",
                description: "Push the current preview to the connected viewer",
            },
            EndpointInfo {
                method: "POST",
                path: "/api/v1/sessions/:id/merge",
                description: "Download the merged model document",
            },
        ],
    })
}
