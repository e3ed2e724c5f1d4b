// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Selection-driven view reconciliation.
//!
//! `reconcile` recomputes the 3D preview from the current report and id
//! filter without re-running the comparison. It is a pure function of its
//! inputs: identical (report, filter, convention) triples always yield
//! structurally identical visualization sets.

use crate::document::{Color, Face};
use crate::report::ComparisonReport;
use crate::selection::{EmptyFilter, IdFilter};
use serde::{Deserialize, Serialize};

/// Fixed identifier for the preview container pushed to the viewer.
pub const PREVIEW_CONTAINER_ID: &str = "preview_objects";

/// A face converted into its displayable form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayFace {
    pub boundary: Vec<[f64; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl DisplayFace {
    pub fn from_face(face: &Face) -> Self {
        Self {
            boundary: face.boundary.clone(),
            color: face.color,
        }
    }
}

/// A named group of display faces within a visualization set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextGeometry {
    pub identifier: String,
    pub faces: Vec<DisplayFace>,
}

/// A named collection of displayable geometry driving the 3D preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationSet {
    pub identifier: String,
    pub geometry: Vec<ContextGeometry>,
}

/// Rebuild the preview from the current report and id filter.
///
/// Returns `None` when there is no report or when no faces survive
/// filtering. Entries without a `geometry` payload are skipped.
pub fn reconcile(
    report: Option<&ComparisonReport>,
    filter: &IdFilter,
    convention: EmptyFilter,
) -> Option<VisualizationSet> {
    let report = report?;

    let mut faces = Vec::new();
    for entry in report.entries() {
        if !filter.retains(&entry.element_id, convention) {
            continue;
        }
        let Some(geometry) = &entry.geometry else {
            continue;
        };
        faces.extend(geometry.iter().map(DisplayFace::from_face));
    }

    if faces.is_empty() {
        return None;
    }

    Some(VisualizationSet {
        identifier: PREVIEW_CONTAINER_ID.to_string(),
        geometry: vec![ContextGeometry {
            identifier: PREVIEW_CONTAINER_ID.to_string(),
            faces,
        }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::DiffEntry;

    fn entry(id: &str, with_geometry: bool) -> DiffEntry {
        DiffEntry {
            element_id: id.to_string(),
            element_type: "Wall".to_string(),
            element_name: id.to_string(),
            geometry_changed: true,
            energy_changed: false,
            geometry: with_geometry.then(|| {
                vec![Face {
                    boundary: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]],
                    color: None,
                }]
            }),
        }
    }

    fn report(ids: &[&str]) -> ComparisonReport {
        ComparisonReport {
            changed_objects: ids.iter().map(|id| entry(id, true)).collect(),
            added_objects: vec![],
            deleted_objects: vec![],
        }
    }

    #[test]
    fn absent_report_yields_empty_preview() {
        let set = reconcile(None, &IdFilter::default(), EmptyFilter::ShowAll);
        assert!(set.is_none());
    }

    #[test]
    fn empty_report_yields_empty_preview() {
        let report = ComparisonReport::default();
        let set = reconcile(Some(&report), &IdFilter::default(), EmptyFilter::ShowAll);
        assert!(set.is_none());
    }

    #[test]
    fn filter_selects_exactly_the_named_entries() {
        let report = report(&["a", "b", "c"]);
        let filter = IdFilter::new(vec!["b".to_string()]);

        let set = reconcile(Some(&report), &filter, EmptyFilter::ShowAll).unwrap();
        assert_eq!(set.identifier, PREVIEW_CONTAINER_ID);
        assert_eq!(set.geometry.len(), 1);
        assert_eq!(set.geometry[0].faces.len(), 1);
    }

    #[test]
    fn empty_filter_follows_the_configured_convention() {
        let report = report(&["a", "b"]);
        let filter = IdFilter::default();

        let all = reconcile(Some(&report), &filter, EmptyFilter::ShowAll).unwrap();
        assert_eq!(all.geometry[0].faces.len(), 2);

        let none = reconcile(Some(&report), &filter, EmptyFilter::ShowNone);
        assert!(none.is_none());
    }

    #[test]
    fn entries_without_geometry_are_skipped() {
        let report = ComparisonReport {
            changed_objects: vec![entry("a", false), entry("b", true)],
            added_objects: vec![],
            deleted_objects: vec![],
        };

        let set = reconcile(
            Some(&report),
            &IdFilter::default(),
            EmptyFilter::ShowAll,
        )
        .unwrap();
        assert_eq!(set.geometry[0].faces.len(), 1);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let report = report(&["a", "b"]);
        let filter = IdFilter::new(vec!["a".to_string(), "b".to_string()]);

        let first = reconcile(Some(&report), &filter, EmptyFilter::ShowNone);
        let second = reconcile(Some(&report), &filter, EmptyFilter::ShowNone);
        assert_eq!(first, second);
    }
}
