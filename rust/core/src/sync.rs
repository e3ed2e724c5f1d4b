// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sync instructions and the merge that applies them.
//!
//! Instructions are derived from (report, selection) immediately before
//! merging and consumed once. The merge never mutates its inputs; it clones
//! the base document and applies the accepted changes to the clone.

use crate::document::ModelDocument;
use crate::error::{Error, Result};
use crate::report::ComparisonReport;
use crate::selection::SelectionState;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Which of a changed element's attributes to carry over when merging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncDecision {
    pub update_geometry: bool,
    pub update_energy: bool,
}

/// Per-element merge flags derived from the current selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncInstructions {
    /// Decisions for elements present in both documents.
    pub changed: FxHashMap<String, SyncDecision>,
    /// Added elements the user accepted.
    pub add_elements: Vec<String>,
    /// Deleted elements the user accepted.
    pub delete_elements: Vec<String>,
}

impl SyncInstructions {
    pub fn is_empty(&self) -> bool {
        self.changed.values().all(|d| d == &SyncDecision::default())
            && self.add_elements.is_empty()
            && self.delete_elements.is_empty()
    }
}

/// Derive merge instructions from the report and the user's row selection.
///
/// A changed attribute is only carried over when the report flags it as
/// changed AND the user left its checkbox on. Added/deleted rows use the
/// geometry checkbox as the accept bit.
pub fn derive_instructions(
    report: &ComparisonReport,
    selection: &SelectionState,
) -> SyncInstructions {
    let mut instructions = SyncInstructions::default();

    for entry in &report.changed_objects {
        let Some(row) = selection.get(&entry.element_id) else {
            continue;
        };
        instructions.changed.insert(
            entry.element_id.clone(),
            SyncDecision {
                update_geometry: entry.geometry_changed && row.include_geometry,
                update_energy: entry.energy_changed && row.include_energy,
            },
        );
    }
    for entry in &report.added_objects {
        if selection.get(&entry.element_id).is_some_and(|r| r.include_geometry) {
            instructions.add_elements.push(entry.element_id.clone());
        }
    }
    for entry in &report.deleted_objects {
        if selection.get(&entry.element_id).is_some_and(|r| r.include_geometry) {
            instructions.delete_elements.push(entry.element_id.clone());
        }
    }

    instructions
}

/// Apply sync instructions to the base document, pulling accepted changes
/// from the updated document. Returns the merged document.
pub fn merge(
    base: &ModelDocument,
    updated: &ModelDocument,
    instructions: &SyncInstructions,
) -> Result<ModelDocument> {
    let mut merged = base.clone();

    for (element_id, decision) in &instructions.changed {
        let source = updated
            .find(element_id)
            .ok_or_else(|| Error::UnknownElement(element_id.clone()))?;
        let target = merged
            .elements
            .iter_mut()
            .find(|e| &e.identifier == element_id)
            .ok_or_else(|| Error::UnknownElement(element_id.clone()))?;
        if decision.update_geometry {
            target.geometry = source.geometry.clone();
        }
        if decision.update_energy {
            target.energy = source.energy.clone();
        }
    }

    for element_id in &instructions.add_elements {
        let source = updated
            .find(element_id)
            .ok_or_else(|| Error::UnknownElement(element_id.clone()))?;
        merged.elements.push(source.clone());
    }

    for element_id in &instructions.delete_elements {
        let before = merged.elements.len();
        merged.elements.retain(|e| &e.identifier != element_id);
        if merged.elements.len() == before {
            return Err(Error::UnknownElement(element_id.clone()));
        }
    }

    tracing::debug!(
        changed = instructions.changed.len(),
        added = instructions.add_elements.len(),
        deleted = instructions.delete_elements.len(),
        "Merged sync instructions into base document"
    );

    Ok(merged)
}
