// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Push client for the connected viewer session.
//!
//! The viewer protocol is a result-subscription call: the serialized
//! visualization set (or an empty placeholder object when nothing is
//! selected) is POSTed with a fixed set of recognized options controlling
//! viewer-side update semantics. A push failure never touches session
//! state; it is logged and surfaced as `ViewerPushFailed`.

use crate::error::ApiError;
use modelsync_core::VisualizationSet;
use serde::Serialize;

/// Viewer-side update semantics.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ViewerOptions {
    pub add: bool,
    pub delete: bool,
    pub preview: bool,
    pub clear: bool,
    #[serde(rename = "subscribe-preview")]
    pub subscribe_preview: bool,
}

impl Default for ViewerOptions {
    /// The subscribe-preview configuration: clear the previous preview and
    /// keep the viewer subscribed to replacements.
    fn default() -> Self {
        Self {
            add: false,
            delete: false,
            preview: false,
            clear: true,
            subscribe_preview: true,
        }
    }
}

/// Wire payload of one push.
#[derive(Debug, Serialize)]
struct PushPayload<'a> {
    results: &'a serde_json::Value,
    option: &'static str,
    options: ViewerOptions,
    label: &'static str,
}

/// Viewer push client.
pub struct ViewerClient {
    url: Option<String>,
    http: reqwest::Client,
}

impl ViewerClient {
    pub fn new(url: Option<String>) -> Self {
        Self {
            url,
            http: reqwest::Client::new(),
        }
    }

    /// Serialize a visualization set for the wire; an absent set becomes
    /// the empty placeholder object the viewer expects.
    pub fn serialize_results(set: Option<&VisualizationSet>) -> serde_json::Value {
        match set {
            Some(set) => serde_json::to_value(set).unwrap_or_else(|_| serde_json::json!({})),
            None => serde_json::json!({}),
        }
    }

    /// Push the current preview to the connected viewer.
    pub async fn push(&self, set: Option<&VisualizationSet>) -> Result<(), ApiError> {
        let url = self
            .url
            .as_ref()
            .ok_or_else(|| ApiError::ViewerPushFailed("no viewer endpoint configured".into()))?;

        let results = Self::serialize_results(set);
        let payload = PushPayload {
            results: &results,
            option: "subscribe-preview",
            options: ViewerOptions::default(),
            label: "Preview Changes",
        };

        let resp = self
            .http
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ApiError::ViewerPushFailed(format!("push request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(ApiError::ViewerPushFailed(format!(
                "viewer returned {}",
                resp.status()
            )));
        }

        tracing::debug!(empty = set.is_none(), "Pushed preview to viewer");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelsync_core::{ContextGeometry, DisplayFace, PREVIEW_CONTAINER_ID};

    #[test]
    fn absent_set_serializes_to_empty_placeholder() {
        let value = ViewerClient::serialize_results(None);
        assert_eq!(value, serde_json::json!({}));
    }

    #[test]
    fn options_serialize_with_the_recognized_keys() {
        let value = serde_json::to_value(ViewerOptions::default()).unwrap();
        let obj = value.as_object().unwrap();
        let keys: Vec<&str> = obj.keys().map(|k| k.as_str()).collect();
        assert_eq!(
            keys,
            vec!["add", "clear", "delete", "preview", "subscribe-preview"]
        );
        assert_eq!(obj["clear"], serde_json::json!(true));
        assert_eq!(obj["subscribe-preview"], serde_json::json!(true));
    }

    #[test]
    fn set_serializes_under_the_fixed_container_id() {
        let set = VisualizationSet {
            identifier: PREVIEW_CONTAINER_ID.to_string(),
            geometry: vec![ContextGeometry {
                identifier: PREVIEW_CONTAINER_ID.to_string(),
                faces: vec![DisplayFace {
                    boundary: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]],
                    color: None,
                }],
            }],
        };

        let value = ViewerClient::serialize_results(Some(&set));
        assert_eq!(value["identifier"], "preview_objects");
        assert_eq!(value["geometry"][0]["faces"].as_array().unwrap().len(), 1);
    }
}
