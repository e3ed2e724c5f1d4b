// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model Sync Server - session-scoped model comparison and sync.
//!
//! This server wraps the sync workflow from `modelsync-core` in a REST API:
//! load a base and an updated building-model document, diff them, select
//! rows, preview the selected geometry, push it to a connected viewer, and
//! download the merged result.
//!
//! # Endpoints
//!
//! - `GET /api/v1/health` - Health check
//! - `POST /api/v1/sessions` - Create a session
//! - `PUT /api/v1/sessions/:id/models/:slot` - Upload a model (`base`/`updated`)
//! - `POST /api/v1/sessions/:id/models/updated/artifact` - Fetch from the artifact store
//! - `POST /api/v1/sessions/:id/compare` - Run the comparison (guarded)
//! - `GET /api/v1/sessions/:id/report` - Report tables
//! - `PUT /api/v1/sessions/:id/filter` - Grid-selection id filter
//! - `PUT /api/v1/sessions/:id/selection/:element_id` - Row checkbox state
//! - `GET /api/v1/sessions/:id/preview` - Reconciled visualization set
//! - `POST /api/v1/sessions/:id/preview/push` - Push the preview to the viewer
//! - `POST /api/v1/sessions/:id/merge` - Download the merged document

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};

mod config;
mod error;
mod routes;
mod services;
mod types;

use config::Config;
use services::{ArtifactClient, ScratchStore, SessionRegistry, ViewerClient};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<SessionRegistry>,
    pub store: Arc<ScratchStore>,
    pub artifacts: Arc<ArtifactClient>,
    pub viewer: Arc<ViewerClient>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,tower_http=debug,modelsync_server=debug".into()),
        )
        .pretty()
        .init();

    let config = Config::from_env();

    tracing::info!(
        port = config.port,
        scratch_dir = %config.scratch_dir,
        max_file_size_mb = config.max_file_size_mb,
        project = %format!("{}/{}", config.project_owner, config.project_name),
        empty_filter = ?config.empty_filter,
        "Starting Model Sync Server"
    );

    let store = Arc::new(ScratchStore::new(&config.scratch_dir).await);
    let artifacts = Arc::new(ArtifactClient::new(
        &config.api_base_url,
        config.api_token.clone(),
        &config.project_owner,
        &config.project_name,
    ));
    let viewer = Arc::new(ViewerClient::new(config.viewer_url.clone()));

    let state = AppState {
        registry: Arc::new(SessionRegistry::new()),
        store,
        artifacts,
        viewer,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = Router::new()
        // Root endpoint - API information
        .route("/", get(routes::health::info))
        // Health check
        .route("/api/v1/health", get(routes::health::check))
        // Session lifecycle
        .route("/api/v1/sessions", post(routes::sessions::create))
        .route(
            "/api/v1/sessions/:id",
            get(routes::sessions::status).delete(routes::sessions::remove),
        )
        // Model loading
        .route(
            "/api/v1/sessions/:id/models/:slot",
            put(routes::models::upload),
        )
        .route(
            "/api/v1/sessions/:id/models/updated/artifact",
            post(routes::models::fetch_artifact),
        )
        // Comparison and selection
        .route(
            "/api/v1/sessions/:id/options",
            put(routes::compare::set_options),
        )
        .route("/api/v1/sessions/:id/compare", post(routes::compare::run))
        .route("/api/v1/sessions/:id/report", get(routes::compare::report))
        .route(
            "/api/v1/sessions/:id/filter",
            put(routes::compare::set_filter),
        )
        .route(
            "/api/v1/sessions/:id/selection/:element_id",
            put(routes::compare::set_selection),
        )
        // Preview and merge
        .route(
            "/api/v1/sessions/:id/preview",
            get(routes::preview::current),
        )
        .route(
            "/api/v1/sessions/:id/preview/push",
            post(routes::preview::push),
        )
        .route("/api/v1/sessions/:id/merge", post(routes::merge::download))
        // Middleware
        .layer(DefaultBodyLimit::max(config.max_file_size_mb * 1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
