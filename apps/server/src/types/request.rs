// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request types for the API.

use serde::Deserialize;

/// Artifact fetch request: the artifact's path within the project store.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactRequest {
    pub path: String,
}

/// Grid-selection filter: concatenated element ids across the three tables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterRequest {
    #[serde(default)]
    pub ids: Vec<String>,
}

/// Query parameters for the compare endpoint.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct CompareParams {
    /// Re-run the comparison even when a report already exists for the
    /// current input pair.
    #[serde(default)]
    pub force: bool,
}
