// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The per-user session state machine.
//!
//! Every user interaction maps to exactly one [`Event`], and every event to
//! one state-transition. Rendering (the report tables, the 3D preview) is a
//! pure projection of the resulting state; no transition has side effects
//! beyond the session itself.

use crate::compare::{compare, fingerprint, CompareOptions, ReportFingerprint};
use crate::document::ModelDocument;
use crate::error::{Error, Result};
use crate::report::ComparisonReport;
use crate::selection::{EmptyFilter, IdFilter, RowSelection, SelectionState};
use crate::sync::{derive_instructions, merge, SyncInstructions};
use crate::viz::{reconcile, VisualizationSet};

/// One user interaction.
#[derive(Debug, Clone)]
pub enum Event {
    /// A base model arrived (CAD push, artifact download, or upload).
    SetBaseModel(ModelDocument),
    /// An updated model arrived.
    SetUpdatedModel(ModelDocument),
    /// The ignore-added / ignore-deleted toggles changed.
    SetCompareOptions(CompareOptions),
    /// The user pressed Run Comparison. With `force` false this is guarded:
    /// it does nothing when a report already exists for the current inputs.
    RunComparison { force: bool },
    /// The grid widgets' row selection changed.
    SetIdFilter(Vec<String>),
    /// Per-row checkbox toggles.
    ToggleGeometry(String),
    ToggleEnergy(String),
    TogglePreview(String),
    /// Replace one row's checkbox state wholesale.
    SetRowSelection(String, RowSelection),
    /// Drop the report, selection, and filter.
    ClearReport,
}

/// What a dispatched event did, for callers that care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    /// The comparison guard short-circuited: a report already exists for
    /// the current input pair.
    Guarded,
}

/// Process-lifetime state for one user's sync workflow.
#[derive(Debug, Clone, Default)]
pub struct Session {
    base: Option<ModelDocument>,
    updated: Option<ModelDocument>,
    options: CompareOptions,
    report: Option<ComparisonReport>,
    report_fingerprint: Option<ReportFingerprint>,
    selection: SelectionState,
    id_filter: IdFilter,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base(&self) -> Option<&ModelDocument> {
        self.base.as_ref()
    }

    pub fn updated(&self) -> Option<&ModelDocument> {
        self.updated.as_ref()
    }

    pub fn options(&self) -> CompareOptions {
        self.options
    }

    pub fn report(&self) -> Option<&ComparisonReport> {
        self.report.as_ref()
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn id_filter(&self) -> &IdFilter {
        &self.id_filter
    }

    /// Apply one user interaction to the session.
    pub fn dispatch(&mut self, event: Event) -> Result<Transition> {
        match event {
            Event::SetBaseModel(model) => {
                tracing::debug!(model = %model.identifier, "Base model set");
                self.base = Some(model);
                self.invalidate_report();
            }
            Event::SetUpdatedModel(model) => {
                tracing::debug!(model = %model.identifier, "Updated model set");
                self.updated = Some(model);
                self.invalidate_report();
            }
            Event::SetCompareOptions(options) => {
                if options != self.options {
                    self.options = options;
                    self.invalidate_report();
                }
            }
            Event::RunComparison { force } => return self.run_comparison(force),
            Event::SetIdFilter(ids) => {
                self.id_filter = IdFilter::new(ids);
            }
            Event::ToggleGeometry(id) => {
                self.selection.toggle_geometry(&id)?;
            }
            Event::ToggleEnergy(id) => {
                self.selection.toggle_energy(&id)?;
            }
            Event::TogglePreview(id) => {
                self.selection.toggle_preview(&id)?;
            }
            Event::SetRowSelection(id, row) => {
                self.selection.set(&id, row)?;
            }
            Event::ClearReport => self.invalidate_report(),
        }
        Ok(Transition::Applied)
    }

    /// The comparison invocation guard: run only when both inputs are
    /// present, and only once per input pair unless forced. On failure the
    /// previous report is retained untouched.
    fn run_comparison(&mut self, force: bool) -> Result<Transition> {
        let base = self.base.as_ref().ok_or(Error::InputMissing("base model"))?;
        let updated = self
            .updated
            .as_ref()
            .ok_or(Error::InputMissing("updated model"))?;

        let fp = fingerprint(base, updated, self.options)
            .map_err(|e| Error::ComparisonFailed(e.to_string()))?;
        if !force && self.report.is_some() && self.report_fingerprint.as_ref() == Some(&fp) {
            tracing::debug!("Comparison guarded: report already current");
            return Ok(Transition::Guarded);
        }

        let report = compare(base, updated, self.options);
        self.selection = SelectionState::for_report(&report);
        self.id_filter = IdFilter::default();
        self.report = Some(report);
        self.report_fingerprint = Some(fp);
        Ok(Transition::Applied)
    }

    fn invalidate_report(&mut self) {
        self.report = None;
        self.report_fingerprint = None;
        self.selection = SelectionState::default();
        self.id_filter = IdFilter::default();
    }

    /// The effective id filter for the preview: the grid selection plus any
    /// rows with their preview box checked.
    fn effective_filter(&self) -> IdFilter {
        let mut ids = self.id_filter.ids().to_vec();
        for id in self.selection.previewed_ids() {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        IdFilter::new(ids)
    }

    /// Project the current state into a visualization set. Pure: never
    /// mutates the session, never fails on an absent report.
    pub fn preview(&self, convention: EmptyFilter) -> Option<VisualizationSet> {
        reconcile(self.report.as_ref(), &self.effective_filter(), convention)
    }

    /// Derive merge instructions from the current report and selection.
    pub fn sync_instructions(&self) -> Result<SyncInstructions> {
        let report = self
            .report
            .as_ref()
            .ok_or(Error::InputMissing("comparison report"))?;
        Ok(derive_instructions(report, &self.selection))
    }

    /// Build the merged document for download.
    pub fn merge_selected(&self) -> Result<ModelDocument> {
        let base = self.base.as_ref().ok_or(Error::InputMissing("base model"))?;
        let updated = self
            .updated
            .as_ref()
            .ok_or(Error::InputMissing("updated model"))?;
        let instructions = self.sync_instructions()?;
        merge(base, updated, &instructions)
    }
}
