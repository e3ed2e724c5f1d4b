// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The comparison report: a structured diff between two model documents,
//! partitioned into changed, added, and deleted element lists.
//!
//! The report is immutable once produced and is superseded wholesale when
//! either input model changes. `DiffEntry` doubles as the validation schema
//! for reports produced by an external engine: the change flags default to
//! `false` and `geometry` may be absent (such entries are skipped at view
//! build rather than failing).

use crate::document::Face;
use serde::{Deserialize, Serialize};

/// One row of the comparison report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffEntry {
    pub element_id: String,
    #[serde(default)]
    pub element_type: String,
    #[serde(default)]
    pub element_name: String,
    #[serde(default)]
    pub geometry_changed: bool,
    #[serde(default)]
    pub energy_changed: bool,
    /// Display geometry for the preview. For changed and deleted entries
    /// this is the base document's geometry; for added entries the updated
    /// document's. May be absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Vec<Face>>,
}

/// Structured diff between two model documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    #[serde(default)]
    pub changed_objects: Vec<DiffEntry>,
    #[serde(default)]
    pub added_objects: Vec<DiffEntry>,
    #[serde(default)]
    pub deleted_objects: Vec<DiffEntry>,
}

impl ComparisonReport {
    /// True when the two inputs had no differences.
    pub fn is_empty(&self) -> bool {
        self.changed_objects.is_empty()
            && self.added_objects.is_empty()
            && self.deleted_objects.is_empty()
    }

    /// All entries in report order: changed, then added, then deleted.
    pub fn entries(&self) -> impl Iterator<Item = &DiffEntry> {
        self.changed_objects
            .iter()
            .chain(self.added_objects.iter())
            .chain(self.deleted_objects.iter())
    }

    /// Look up an entry by element id across all three lists.
    pub fn find(&self, element_id: &str) -> Option<&DiffEntry> {
        self.entries().find(|e| e.element_id == element_id)
    }
}
