// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Model Sync Core
//!
//! Pure logic for the model sync workflow: load a base and an updated
//! building-model document, diff them, let the user select rows, preview the
//! selected geometry, and merge the accepted changes back into the base.
//!
//! The crate performs no I/O. Everything is a function of explicit state:
//!
//! - [`ModelDocument`] — validated JSON model documents
//! - [`compare`] / [`ComparisonReport`] — the element-keyed diff
//! - [`SelectionState`] / [`IdFilter`] — per-row checkbox and grid state
//! - [`reconcile`] / [`VisualizationSet`] — the selection-driven preview
//! - [`SyncInstructions`] / [`merge`] — applying accepted changes
//! - [`Session`] / [`Event`] — the event-dispatch state machine tying the
//!   pieces together for a host UI or server
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use modelsync_core::{Event, Session, EmptyFilter};
//!
//! let mut session = Session::new();
//! session.dispatch(Event::SetBaseModel(base))?;
//! session.dispatch(Event::SetUpdatedModel(updated))?;
//! session.dispatch(Event::RunComparison { force: false })?;
//!
//! if let Some(set) = session.preview(EmptyFilter::ShowAll) {
//!     // push `set` to the connected viewer
//! }
//! let merged = session.merge_selected()?;
//! ```

pub mod compare;
pub mod document;
pub mod error;
pub mod report;
pub mod selection;
pub mod session;
pub mod sync;
pub mod viz;

pub use compare::{compare, fingerprint, CompareOptions, ReportFingerprint};
pub use document::{Color, Element, Face, ModelDocument};
pub use error::{Error, Result};
pub use report::{ComparisonReport, DiffEntry};
pub use selection::{EmptyFilter, IdFilter, RowSelection, SelectionState};
pub use session::{Event, Session, Transition};
pub use sync::{derive_instructions, merge, SyncDecision, SyncInstructions};
pub use viz::{reconcile, ContextGeometry, DisplayFace, VisualizationSet, PREVIEW_CONTAINER_ID};
