// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Client for the project artifact store.
//!
//! Fetching a model is a two-step flow: look up a signed download URL
//! against the `projects/{owner}/{project}/artifacts/download` endpoint
//! (bearer-authenticated), then download the document from the signed URL.
//! Any non-success response surfaces as `FetchFailed`; there is no silent
//! empty-document fallback.

use crate::error::ApiError;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

/// Artifact store client.
pub struct ArtifactClient {
    base_url: String,
    token: Option<String>,
    owner: String,
    project: String,
    http: reqwest::Client,
}

impl ArtifactClient {
    /// Create a new client for one project's artifacts.
    pub fn new(base_url: &str, token: Option<String>, owner: &str, project: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            owner: owner.to_string(),
            project: project.to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// URL of the signed-download lookup for an artifact path.
    fn download_url(&self) -> String {
        format!(
            "{}/projects/{}/{}/artifacts/download",
            self.base_url, self.owner, self.project
        )
    }

    /// Build authorization headers.
    fn auth_headers(&self) -> Result<HeaderMap, ApiError> {
        let token = self
            .token
            .as_ref()
            .ok_or_else(|| ApiError::FetchFailed("no API token configured".into()))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ApiError::FetchFailed(format!("invalid token header: {e}")))?,
        );
        Ok(headers)
    }

    /// Resolve an artifact path to a signed download URL.
    async fn signed_url(&self, path: &str) -> Result<String, ApiError> {
        let resp = self
            .http
            .get(self.download_url())
            .headers(self.auth_headers()?)
            .query(&[("path", path)])
            .send()
            .await
            .map_err(|e| ApiError::FetchFailed(format!("signed URL request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(ApiError::FetchFailed(format!(
                "signed URL lookup returned {}",
                resp.status()
            )));
        }

        resp.json::<String>()
            .await
            .map_err(|e| ApiError::FetchFailed(format!("signed URL response parse failed: {e}")))
    }

    /// Fetch a model document from the artifact store.
    pub async fn fetch_document(&self, path: &str) -> Result<serde_json::Value, ApiError> {
        let signed_url = self.signed_url(path).await?;
        tracing::debug!(path = %path, "Downloading artifact");

        let resp = self
            .http
            .get(&signed_url)
            .send()
            .await
            .map_err(|e| ApiError::FetchFailed(format!("artifact download failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(ApiError::FetchFailed(format!(
                "artifact download returned {}",
                resp.status()
            )));
        }

        resp.json::<serde_json::Value>()
            .await
            .map_err(|e| ApiError::FetchFailed(format!("artifact body parse failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    /// Minimal HTTP stub answering every connection with a fixed status
    /// and body. Returns the base URL to point the client at.
    async fn spawn_stub(status: &'static str, body: String) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let body = body.clone();
                tokio::spawn(async move {
                    let mut buf = [0u8; 1024];
                    let _ = socket.read(&mut buf).await;
                    let response = format!(
                        "HTTP/1.1 {status}\r\ncontent-type: application/json\r\n\
                         content-length: {}\r\nconnection: close\r\n\r\n{}",
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                });
            }
        });
        format!("http://{addr}")
    }

    #[test]
    fn download_url_follows_the_artifact_route() {
        let client = ArtifactClient::new(
            "https://api.example.com/",
            Some("token".into()),
            "ladybug-tools",
            "sync-model",
        );
        assert_eq!(
            client.download_url(),
            "https://api.example.com/projects/ladybug-tools/sync-model/artifacts/download"
        );
    }

    #[test]
    fn missing_token_is_fetch_failed() {
        let client = ArtifactClient::new("https://api.example.com", None, "owner", "project");
        assert!(matches!(
            client.auth_headers(),
            Err(ApiError::FetchFailed(_))
        ));
    }

    #[tokio::test]
    async fn non_success_lookup_is_fetch_failed() {
        let base = spawn_stub("503 Service Unavailable", String::new()).await;
        let client = ArtifactClient::new(&base, Some("token".into()), "owner", "project");

        let result = client.fetch_document("model.json").await;
        assert!(matches!(result, Err(ApiError::FetchFailed(_))));
    }

    #[tokio::test]
    async fn non_success_download_is_fetch_failed() {
        // the lookup succeeds and hands out a signed URL whose download 404s
        let download = spawn_stub("404 Not Found", String::new()).await;
        let lookup = spawn_stub("200 OK", format!("\"{download}/model.json\"")).await;
        let client = ArtifactClient::new(&lookup, Some("token".into()), "owner", "project");

        let result = client.fetch_document("model.json").await;
        assert!(matches!(result, Err(ApiError::FetchFailed(_))));
    }

    #[tokio::test]
    async fn successful_fetch_returns_the_document() {
        let download = spawn_stub("200 OK", r#"{"identifier":"m","elements":[]}"#.into()).await;
        let lookup = spawn_stub("200 OK", format!("\"{download}/model.json\"")).await;
        let client = ArtifactClient::new(&lookup, Some("token".into()), "owner", "project");

        let value = client.fetch_document("model.json").await.unwrap();
        assert_eq!(value["identifier"], "m");
    }
}
