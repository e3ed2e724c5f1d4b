// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response types for the API.

use modelsync_core::{CompareOptions, DiffEntry, Session};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response to session creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCreated {
    pub session_id: Uuid,
}

/// Response to a model upload or artifact fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelLoaded {
    /// Which slot the model landed in ("base" or "updated").
    pub slot: String,
    /// The document's own identifier.
    pub model: String,
    /// Number of elements in the document.
    pub elements: usize,
}

/// One table row of the comparison report (no geometry payloads).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRow {
    pub element_id: String,
    pub element_type: String,
    pub element_name: String,
    pub geometry_changed: bool,
    pub energy_changed: bool,
}

impl From<&DiffEntry> for ReportRow {
    fn from(entry: &DiffEntry) -> Self {
        Self {
            element_id: entry.element_id.clone(),
            element_type: entry.element_type.clone(),
            element_name: entry.element_name.clone(),
            geometry_changed: entry.geometry_changed,
            energy_changed: entry.energy_changed,
        }
    }
}

/// The three report tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportResponse {
    pub changed: Vec<ReportRow>,
    pub added: Vec<ReportRow>,
    pub deleted: Vec<ReportRow>,
    /// True when the invocation guard short-circuited and the returned
    /// report is the previously computed one.
    pub guarded: bool,
}

/// Lightweight session status for UI polling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStatus {
    pub base_loaded: bool,
    pub updated_loaded: bool,
    pub report_ready: bool,
    pub options: CompareOptions,
    pub filter_ids: Vec<String>,
    pub changed: usize,
    pub added: usize,
    pub deleted: usize,
}

impl SessionStatus {
    pub fn from_session(session: &Session) -> Self {
        let (changed, added, deleted) = session
            .report()
            .map(|r| {
                (
                    r.changed_objects.len(),
                    r.added_objects.len(),
                    r.deleted_objects.len(),
                )
            })
            .unwrap_or((0, 0, 0));
        Self {
            base_loaded: session.base().is_some(),
            updated_loaded: session.updated().is_some(),
            report_ready: session.report().is_some(),
            options: session.options(),
            filter_ids: session.id_filter().ids().to_vec(),
            changed,
            added,
            deleted,
        }
    }
}

/// Response to a viewer push.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushResponse {
    pub pushed: bool,
    /// True when the empty placeholder was pushed (nothing selected).
    pub empty: bool,
}
