// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-session scratch store for uploaded model documents, using cacache.

use crate::error::ApiError;
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use uuid::Uuid;

/// The two model slots a session holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSlot {
    Base,
    Updated,
}

impl ModelSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelSlot::Base => "base",
            ModelSlot::Updated => "updated",
        }
    }
}

impl std::str::FromStr for ModelSlot {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "base" => Ok(ModelSlot::Base),
            "updated" => Ok(ModelSlot::Updated),
            other => Err(ApiError::InvalidSlot(other.to_string())),
        }
    }
}

/// Content-addressable scratch store keyed by session and slot.
#[derive(Debug, Clone)]
pub struct ScratchStore {
    scratch_dir: PathBuf,
}

impl ScratchStore {
    /// Create a new store in the specified directory.
    pub async fn new(scratch_dir: &str) -> Self {
        let path = PathBuf::from(scratch_dir);

        if let Err(e) = tokio::fs::create_dir_all(&path).await {
            tracing::warn!(
                error = %e,
                path = %path.display(),
                "Failed to create scratch directory"
            );
        }

        Self { scratch_dir: path }
    }

    fn key(session_id: Uuid, slot: ModelSlot) -> String {
        format!("{}/{}", session_id, slot.as_str())
    }

    /// Content hash of a document's raw bytes (SHA256).
    pub fn content_hash(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        hex::encode(hasher.finalize())
    }

    /// Persist the raw bytes of an uploaded model document.
    pub async fn save(
        &self,
        session_id: Uuid,
        slot: ModelSlot,
        data: &[u8],
    ) -> Result<(), ApiError> {
        let key = Self::key(session_id, slot);
        cacache::write(&self.scratch_dir, &key, data).await?;
        tracing::debug!(
            key = %key,
            size = data.len(),
            hash = %Self::content_hash(data),
            "Stored model document"
        );
        Ok(())
    }

    /// Load the raw bytes of a stored model document.
    #[allow(dead_code)]
    pub async fn load(
        &self,
        session_id: Uuid,
        slot: ModelSlot,
    ) -> Result<Option<Vec<u8>>, ApiError> {
        match cacache::read(&self.scratch_dir, Self::key(session_id, slot)).await {
            Ok(data) => Ok(Some(data)),
            Err(cacache::Error::EntryNotFound(_, _)) => Ok(None),
            Err(e) => Err(ApiError::Store(e.to_string())),
        }
    }

    /// Remove both of a session's slots. Missing entries are not an error.
    pub async fn remove_session(&self, session_id: Uuid) -> Result<(), ApiError> {
        for slot in [ModelSlot::Base, ModelSlot::Updated] {
            match cacache::remove(&self.scratch_dir, Self::key(session_id, slot)).await {
                Ok(()) => {}
                Err(cacache::Error::EntryNotFound(_, _)) => {}
                Err(e) => return Err(ApiError::Store(e.to_string())),
            }
        }
        Ok(())
    }
}
