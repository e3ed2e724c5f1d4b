// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Service modules: session registry, scratch storage, and HTTP clients.

pub mod artifact;
pub mod registry;
pub mod store;
pub mod viewer;

pub use artifact::ArtifactClient;
pub use registry::{SessionHandle, SessionRegistry};
pub use store::{ModelSlot, ScratchStore};
pub use viewer::{ViewerClient, ViewerOptions};
