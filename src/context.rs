//! Resolution of the personal TELOS context document.
//!
//! Sources are tried in a fixed order: the hosted repository (only when a
//! credential is configured), then the local fallback file, then a constant
//! placeholder. [`ContextSource::load`] never fails.

use std::path::{Path, PathBuf};

use base64::Engine;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::config::ServerConfig;

/// File name looked up in the remote repository.
pub const TELOS_FILE_NAME: &str = "telos.md";

/// Returned when neither the remote repository nor the local file yields a document.
pub const NO_CONTEXT_PLACEHOLDER: &str =
    "# TELOS Context\nNo personal context loaded. Please set up your TELOS file.";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("no GitHub token configured")]
    MissingCredential,
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("response body carries no base64 `content`")]
    Body,
    #[error("content is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("content is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Subset of the repository contents API response we rely on.
#[derive(Debug, Deserialize)]
struct ContentsResponse {
    content: Option<String>,
    encoding: Option<String>,
}

/// Loads the context document. Holds no per-request state.
#[derive(Clone)]
pub struct ContextSource {
    http: Client,
    github_token: Option<String>,
    contents_url: String,
    local_path: PathBuf,
}

impl ContextSource {
    /// Build a source from server configuration.
    ///
    /// The HTTP client carries the fetch timeout, so every remote call is
    /// bounded regardless of how the server behaves.
    pub fn new(config: &ServerConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(config.fetch_timeout)
            .build()?;

        Ok(Self {
            http,
            github_token: config.github_token.clone(),
            contents_url: format!(
                "{}/repos/{}/contents/{}",
                config.github_api_url, config.telos_repo, TELOS_FILE_NAME
            ),
            local_path: config.local_context_path.clone(),
        })
    }

    /// Load the context document, degrading through each fallback tier.
    pub async fn load(&self) -> String {
        match self.fetch_remote().await {
            Ok(content) => {
                tracing::debug!(url = %self.contents_url, bytes = content.len(), "loaded context from GitHub");
                return content;
            }
            Err(FetchError::MissingCredential) => {
                tracing::debug!("GITHUB_TOKEN not set, skipping remote context");
            }
            Err(err) => {
                tracing::warn!(url = %self.contents_url, error = %err, "error loading context from GitHub");
            }
        }

        match read_local(&self.local_path).await {
            Some(content) => content,
            None => NO_CONTEXT_PLACEHOLDER.to_string(),
        }
    }

    /// Fetch `telos.md` from the configured repository.
    pub async fn fetch_remote(&self) -> Result<String, FetchError> {
        let token = self
            .github_token
            .as_deref()
            .ok_or(FetchError::MissingCredential)?;

        let resp = self
            .http
            .get(&self.contents_url)
            .bearer_auth(token)
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, concat!("telos-mcp/", env!("CARGO_PKG_VERSION")))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(FetchError::Status(resp.status()));
        }

        let body: ContentsResponse = resp.json().await?;

        // Files over 1 MB come back with `encoding: "none"` and empty content.
        if body.encoding.as_deref().is_some_and(|e| e != "base64") {
            return Err(FetchError::Body);
        }
        match body.content {
            Some(encoded) if !encoded.trim().is_empty() => decode_content(&encoded),
            _ => Err(FetchError::Body),
        }
    }
}

/// Decode the base64 payload of a contents API response.
///
/// GitHub wraps the encoded text at 60 columns, so whitespace is dropped
/// before decoding.
pub fn decode_content(encoded: &str) -> Result<String, FetchError> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = base64::engine::general_purpose::STANDARD.decode(compact)?;
    Ok(String::from_utf8(bytes)?)
}

async fn read_local(path: &Path) -> Option<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => {
            tracing::debug!(path = %path.display(), "loaded context from local file");
            Some(content)
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "cannot read local context file");
            None
        }
    }
}
