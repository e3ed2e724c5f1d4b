// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Element-keyed comparison of two model documents.
//!
//! The comparison is a structural diff: elements are matched by identifier,
//! and an element present in both documents lands in `changed_objects` when
//! its geometry or energy payload differs. Entry order is deterministic
//! (updated-document order for changed/added, base-document order for
//! deleted), so identical inputs always produce identical reports.

use crate::document::ModelDocument;
use crate::error::Result;
use crate::report::{ComparisonReport, DiffEntry};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Flags controlling which change classes the comparison reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareOptions {
    #[serde(default)]
    pub ignore_added: bool,
    #[serde(default)]
    pub ignore_deleted: bool,
}

/// Fingerprint of a comparison's inputs, used by the invocation guard to
/// run the comparison at most once per input pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFingerprint(String);

/// Fingerprint both documents and the options (sha-256 over the canonical
/// JSON bytes). A change to either model or to the flags yields a new
/// fingerprint and therefore a fresh comparison.
pub fn fingerprint(
    base: &ModelDocument,
    updated: &ModelDocument,
    options: CompareOptions,
) -> Result<ReportFingerprint> {
    let mut hasher = Sha256::new();
    hasher.update(serde_json::to_vec(base)?);
    hasher.update(serde_json::to_vec(updated)?);
    hasher.update([options.ignore_added as u8, options.ignore_deleted as u8]);
    Ok(ReportFingerprint(hex::encode(hasher.finalize())))
}

/// Compare two model documents and produce the diff report.
pub fn compare(
    base: &ModelDocument,
    updated: &ModelDocument,
    options: CompareOptions,
) -> ComparisonReport {
    let base_by_id: FxHashMap<&str, &crate::document::Element> = base
        .elements()
        .map(|e| (e.identifier.as_str(), e))
        .collect();
    let updated_ids: FxHashSet<&str> =
        updated.elements().map(|e| e.identifier.as_str()).collect();

    let mut report = ComparisonReport::default();

    for element in updated.elements() {
        match base_by_id.get(element.identifier.as_str()) {
            Some(existing) => {
                let geometry_changed = existing.geometry != element.geometry;
                let energy_changed = existing.energy != element.energy;
                if geometry_changed || energy_changed {
                    report.changed_objects.push(DiffEntry {
                        element_id: element.identifier.clone(),
                        element_type: element.element_type.clone(),
                        element_name: element.display_name.clone(),
                        geometry_changed,
                        energy_changed,
                        // changed rows preview the existing geometry
                        geometry: existing.geometry.clone(),
                    });
                }
            }
            None if !options.ignore_added => {
                report.added_objects.push(DiffEntry {
                    element_id: element.identifier.clone(),
                    element_type: element.element_type.clone(),
                    element_name: element.display_name.clone(),
                    geometry_changed: element.geometry.is_some(),
                    energy_changed: element.energy.is_some(),
                    geometry: element.geometry.clone(),
                });
            }
            None => {}
        }
    }

    if !options.ignore_deleted {
        for element in base.elements() {
            if !updated_ids.contains(element.identifier.as_str()) {
                report.deleted_objects.push(DiffEntry {
                    element_id: element.identifier.clone(),
                    element_type: element.element_type.clone(),
                    element_name: element.display_name.clone(),
                    geometry_changed: element.geometry.is_some(),
                    energy_changed: element.energy.is_some(),
                    geometry: element.geometry.clone(),
                });
            }
        }
    }

    tracing::debug!(
        changed = report.changed_objects.len(),
        added = report.added_objects.len(),
        deleted = report.deleted_objects.len(),
        "Comparison complete"
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn model(value: serde_json::Value) -> ModelDocument {
        ModelDocument::from_value(value).unwrap()
    }

    fn wall(id: &str, x: f64) -> serde_json::Value {
        json!({
            "identifier": id,
            "display_name": format!("Wall {id}"),
            "type": "Wall",
            "geometry": [
                { "boundary": [[x, 0.0, 0.0], [x + 5.0, 0.0, 0.0], [x + 5.0, 0.0, 3.0], [x, 0.0, 3.0]] }
            ]
        })
    }

    #[test]
    fn identical_models_produce_empty_report() {
        let a = model(json!({ "identifier": "m", "elements": [wall("wall_1", 0.0)] }));
        let b = a.clone();

        let report = compare(&a, &b, CompareOptions::default());
        assert!(report.is_empty());
    }

    #[test]
    fn one_added_wall_is_reported_exactly_once() {
        let a = model(json!({ "identifier": "m", "elements": [wall("wall_1", 0.0)] }));
        let b = model(json!({
            "identifier": "m",
            "elements": [wall("wall_1", 0.0), wall("wall_2", 10.0)]
        }));

        let report = compare(&a, &b, CompareOptions::default());
        assert!(report.changed_objects.is_empty());
        assert!(report.deleted_objects.is_empty());
        assert_eq!(report.added_objects.len(), 1);
        assert_eq!(report.added_objects[0].element_id, "wall_2");
    }

    #[test]
    fn geometry_change_carries_existing_geometry() {
        let a = model(json!({ "identifier": "m", "elements": [wall("wall_1", 0.0)] }));
        let b = model(json!({ "identifier": "m", "elements": [wall("wall_1", 2.0)] }));

        let report = compare(&a, &b, CompareOptions::default());
        assert_eq!(report.changed_objects.len(), 1);
        let entry = &report.changed_objects[0];
        assert!(entry.geometry_changed);
        assert!(!entry.energy_changed);
        // preview shows where the element currently is, not where it moves to
        let faces = entry.geometry.as_ref().unwrap();
        assert_eq!(faces[0].boundary[0], [0.0, 0.0, 0.0]);
    }

    #[test]
    fn energy_only_change_sets_only_energy_flag() {
        let a = model(json!({
            "identifier": "m",
            "elements": [{ "identifier": "room_1", "type": "Room", "energy": { "program": "Office" } }]
        }));
        let b = model(json!({
            "identifier": "m",
            "elements": [{ "identifier": "room_1", "type": "Room", "energy": { "program": "Lab" } }]
        }));

        let report = compare(&a, &b, CompareOptions::default());
        assert_eq!(report.changed_objects.len(), 1);
        assert!(!report.changed_objects[0].geometry_changed);
        assert!(report.changed_objects[0].energy_changed);
    }

    #[test]
    fn ignore_flags_suppress_their_lists() {
        let a = model(json!({ "identifier": "m", "elements": [wall("wall_1", 0.0)] }));
        let b = model(json!({ "identifier": "m", "elements": [wall("wall_2", 10.0)] }));

        let options = CompareOptions {
            ignore_added: true,
            ignore_deleted: true,
        };
        let report = compare(&a, &b, options);
        assert!(report.is_empty());

        let report = compare(&a, &b, CompareOptions::default());
        assert_eq!(report.added_objects.len(), 1);
        assert_eq!(report.deleted_objects.len(), 1);
    }

    #[test]
    fn fingerprint_tracks_inputs_and_flags() {
        let a = model(json!({ "identifier": "m", "elements": [wall("wall_1", 0.0)] }));
        let b = model(json!({ "identifier": "m", "elements": [wall("wall_2", 10.0)] }));

        let fp1 = fingerprint(&a, &b, CompareOptions::default()).unwrap();
        let fp2 = fingerprint(&a, &b, CompareOptions::default()).unwrap();
        assert_eq!(fp1, fp2);

        let flagged = CompareOptions {
            ignore_added: true,
            ignore_deleted: false,
        };
        assert_ne!(fp1, fingerprint(&a, &b, flagged).unwrap());
        assert_ne!(fp1, fingerprint(&b, &a, CompareOptions::default()).unwrap());
    }
}
