// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Server configuration loaded from environment variables.

use modelsync_core::EmptyFilter;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on.
    pub port: u16,
    /// Directory for the per-session scratch store.
    pub scratch_dir: String,
    /// Maximum uploaded model size in MB.
    pub max_file_size_mb: usize,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Base URL of the project artifact API.
    pub api_base_url: String,
    /// Bearer token for the artifact API. Artifact fetch is disabled when
    /// unset.
    pub api_token: Option<String>,
    /// Artifact project owner.
    pub project_owner: String,
    /// Artifact project name.
    pub project_name: String,
    /// Endpoint the serialized visualization set is pushed to. Viewer push
    /// is disabled when unset.
    pub viewer_url: Option<String>,
    /// What an empty id filter means for the preview.
    pub empty_filter: EmptyFilter,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .unwrap_or(8080),
            scratch_dir: std::env::var("SCRATCH_DIR").unwrap_or_else(|_| {
                std::env::current_dir()
                    .ok()
                    .and_then(|dir| dir.join(".scratch").to_str().map(|s| s.to_string()))
                    .unwrap_or_else(|| "./.scratch".into())
            }),
            max_file_size_mb: std::env::var("MAX_FILE_SIZE_MB")
                .unwrap_or_else(|_| "100".into())
                .parse()
                .unwrap_or(100),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "120".into())
                .parse()
                .unwrap_or(120),
            api_base_url: std::env::var("API_BASE_URL")
                .unwrap_or_else(|_| "https://api.pollination.cloud".into()),
            api_token: std::env::var("API_TOKEN").ok().filter(|t| !t.is_empty()),
            project_owner: std::env::var("PROJECT_OWNER")
                .unwrap_or_else(|_| "ladybug-tools".into()),
            project_name: std::env::var("PROJECT_NAME").unwrap_or_else(|_| "sync-model".into()),
            viewer_url: std::env::var("VIEWER_URL").ok().filter(|u| !u.is_empty()),
            empty_filter: std::env::var("EMPTY_FILTER")
                .unwrap_or_else(|_| "show-all".into())
                .parse()
                .unwrap_or(EmptyFilter::ShowAll),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
