// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory session registry.
//!
//! Each session holds one user's sync workflow state. Access to a session
//! is serialized through its own mutex, matching the strictly-serial
//! execution model the workflow assumes.

use crate::error::ApiError;
use modelsync_core::Session;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// Shared handle to one session's state.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Registry of live sessions keyed by generated identifier.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, SessionHandle>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new session and return its identifier.
    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(Session::new())));
        tracing::info!(session_id = %id, "Session created");
        id
    }

    /// Look up a session handle.
    pub async fn get(&self, id: Uuid) -> Result<SessionHandle, ApiError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(ApiError::SessionNotFound(id))
    }

    /// Drop a session. Returns an error when the id is unknown.
    pub async fn remove(&self, id: Uuid) -> Result<(), ApiError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| tracing::info!(session_id = %id, "Session removed"))
            .ok_or(ApiError::SessionNotFound(id))
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
