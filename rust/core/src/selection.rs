// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-row selection state and the grid-selection id filter.
//!
//! Selection state exists only while a report exists: it is created with
//! defaults from a fresh report and dropped with it. The id filter is the
//! bridge from the table widgets' row check-marks back into the view
//! reconciliation (concatenated across the changed/added/deleted grids).

use crate::error::{Error, Result};
use crate::report::ComparisonReport;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// What an empty id filter means. The source variants of this workflow
/// disagreed, so the convention is an explicit configuration choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyFilter {
    /// No filter active: preview every report entry.
    ShowAll,
    /// Nothing checked: preview nothing.
    ShowNone,
}

impl std::str::FromStr for EmptyFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "show-all" => Ok(EmptyFilter::ShowAll),
            "show-none" => Ok(EmptyFilter::ShowNone),
            other => Err(format!("unknown empty-filter convention '{other}'")),
        }
    }
}

/// Per-element checkbox state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSelection {
    /// Apply this element's geometry change when merging. For added and
    /// deleted rows this is the accept-the-row bit.
    pub include_geometry: bool,
    /// Apply this element's energy change when merging.
    pub include_energy: bool,
    /// Include this element in the 3D preview.
    pub preview: bool,
}

/// Checkbox state for every row of the current report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    rows: FxHashMap<String, RowSelection>,
}

impl SelectionState {
    /// Default selection for a fresh report: changed rows start with their
    /// changed attributes included, added/deleted rows start accepted,
    /// nothing previewed.
    pub fn for_report(report: &ComparisonReport) -> Self {
        let mut rows = FxHashMap::default();
        for entry in &report.changed_objects {
            rows.insert(
                entry.element_id.clone(),
                RowSelection {
                    include_geometry: entry.geometry_changed,
                    include_energy: entry.energy_changed,
                    preview: false,
                },
            );
        }
        for entry in report.added_objects.iter().chain(&report.deleted_objects) {
            rows.insert(
                entry.element_id.clone(),
                RowSelection {
                    include_geometry: true,
                    include_energy: true,
                    preview: false,
                },
            );
        }
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, element_id: &str) -> Option<&RowSelection> {
        self.rows.get(element_id)
    }

    fn row_mut(&mut self, element_id: &str) -> Result<&mut RowSelection> {
        self.rows
            .get_mut(element_id)
            .ok_or_else(|| Error::UnknownElement(element_id.to_string()))
    }

    pub fn toggle_geometry(&mut self, element_id: &str) -> Result<bool> {
        let row = self.row_mut(element_id)?;
        row.include_geometry = !row.include_geometry;
        Ok(row.include_geometry)
    }

    pub fn toggle_energy(&mut self, element_id: &str) -> Result<bool> {
        let row = self.row_mut(element_id)?;
        row.include_energy = !row.include_energy;
        Ok(row.include_energy)
    }

    pub fn toggle_preview(&mut self, element_id: &str) -> Result<bool> {
        let row = self.row_mut(element_id)?;
        row.preview = !row.preview;
        Ok(row.preview)
    }

    /// Replace one row's state wholesale (checkbox group submitted at once).
    pub fn set(&mut self, element_id: &str, selection: RowSelection) -> Result<()> {
        *self.row_mut(element_id)? = selection;
        Ok(())
    }

    /// Ids of all rows with the preview box checked.
    pub fn previewed_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .rows
            .iter()
            .filter(|(_, row)| row.preview)
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &RowSelection)> {
        self.rows.iter()
    }
}

/// The concatenated element-id list from the grid widgets' row selections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdFilter {
    ids: Vec<String>,
    #[serde(skip)]
    index: FxHashSet<String>,
}

impl PartialEq for IdFilter {
    fn eq(&self, other: &Self) -> bool {
        self.ids == other.ids
    }
}

impl IdFilter {
    pub fn new(ids: Vec<String>) -> Self {
        let index = ids.iter().cloned().collect();
        Self { ids, index }
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, element_id: &str) -> bool {
        // index may be empty after deserialization; fall back to the list
        self.index.contains(element_id) || self.ids.iter().any(|id| id == element_id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Whether an entry with this id should be retained under the given
    /// empty-filter convention.
    pub fn retains(&self, element_id: &str, convention: EmptyFilter) -> bool {
        if self.is_empty() {
            convention == EmptyFilter::ShowAll
        } else {
            self.contains(element_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::DiffEntry;

    fn report_with(changed: &[&str], added: &[&str]) -> ComparisonReport {
        let entry = |id: &str, geo: bool| DiffEntry {
            element_id: id.to_string(),
            element_type: "Wall".to_string(),
            element_name: id.to_string(),
            geometry_changed: geo,
            energy_changed: !geo,
            geometry: None,
        };
        ComparisonReport {
            changed_objects: changed.iter().map(|id| entry(id, true)).collect(),
            added_objects: added.iter().map(|id| entry(id, true)).collect(),
            deleted_objects: vec![],
        }
    }

    #[test]
    fn defaults_mirror_changed_flags() {
        let report = report_with(&["wall_1"], &["wall_2"]);
        let selection = SelectionState::for_report(&report);

        let changed = selection.get("wall_1").unwrap();
        assert!(changed.include_geometry);
        assert!(!changed.include_energy);
        assert!(!changed.preview);

        let added = selection.get("wall_2").unwrap();
        assert!(added.include_geometry);
        assert!(added.include_energy);
    }

    #[test]
    fn toggles_flip_state_and_reject_unknown_ids() {
        let report = report_with(&["wall_1"], &[]);
        let mut selection = SelectionState::for_report(&report);

        assert!(selection.toggle_preview("wall_1").unwrap());
        assert!(!selection.toggle_preview("wall_1").unwrap());
        assert!(matches!(
            selection.toggle_geometry("ghost"),
            Err(Error::UnknownElement(_))
        ));
    }

    #[test]
    fn previewed_ids_are_sorted() {
        let report = report_with(&["b", "a", "c"], &[]);
        let mut selection = SelectionState::for_report(&report);
        selection.toggle_preview("c").unwrap();
        selection.toggle_preview("a").unwrap();

        assert_eq!(selection.previewed_ids(), vec!["a", "c"]);
    }

    #[test]
    fn empty_filter_convention_is_explicit() {
        let filter = IdFilter::default();
        assert!(filter.retains("wall_1", EmptyFilter::ShowAll));
        assert!(!filter.retains("wall_1", EmptyFilter::ShowNone));

        let filter = IdFilter::new(vec!["wall_1".to_string()]);
        assert!(filter.retains("wall_1", EmptyFilter::ShowNone));
        assert!(!filter.retains("wall_2", EmptyFilter::ShowAll));
    }

    #[test]
    fn empty_filter_parses_from_config_strings() {
        assert_eq!("show-all".parse::<EmptyFilter>(), Ok(EmptyFilter::ShowAll));
        assert_eq!(
            "show-none".parse::<EmptyFilter>(),
            Ok(EmptyFilter::ShowNone)
        );
        assert!("everything".parse::<EmptyFilter>().is_err());
    }
}
