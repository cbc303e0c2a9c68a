//! Artifact download service
//!
//! Submission records reference their artifact by URL; this service pulls
//! the artifact down into the configured save directory so the evaluator
//! can read it from local disk.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

/// Fallback file name for artifact URLs with no usable final path segment
const DEFAULT_ARTIFACT_NAME: &str = "submission_input";

/// Service trait for fetching submission artifacts to local disk
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Downloads the artifact at `url` and returns its local path
    async fn fetch(&self, url: &str) -> Result<PathBuf>;
}

/// Downloads artifacts over HTTP into a save directory
pub struct HttpArtifactStore {
    save_dir: PathBuf,
    http: Client,
}

impl HttpArtifactStore {
    /// Creates a store writing into `save_dir`
    pub fn new(save_dir: impl Into<PathBuf>) -> Self {
        Self {
            save_dir: save_dir.into(),
            http: Client::new(),
        }
    }

    /// File name for a downloaded artifact: the final path segment of its
    /// URL, ignoring any query string (pre-signed URLs carry long ones)
    fn file_name(url: &Url) -> String {
        url.path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_ARTIFACT_NAME)
            .to_string()
    }
}

#[async_trait]
impl ArtifactStore for HttpArtifactStore {
    async fn fetch(&self, url: &str) -> Result<PathBuf> {
        let parsed = Url::parse(url).with_context(|| format!("Invalid artifact URL: {}", url))?;
        let target = self.save_dir.join(Self::file_name(&parsed));

        debug!("Downloading {} to {}", url, target.display());

        let response = self
            .http
            .get(parsed)
            .send()
            .await
            .context("Artifact download request failed")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Artifact download failed with HTTP {}", status);
        }

        let bytes = response
            .bytes()
            .await
            .context("Failed to read artifact body")?;

        tokio::fs::write(&target, &bytes)
            .await
            .with_context(|| format!("Failed to write artifact to {}", target.display()))?;

        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_is_final_path_segment() {
        let url = Url::parse("https://cdn.example.org/media/submissions/1234/input.zip").unwrap();
        assert_eq!(HttpArtifactStore::file_name(&url), "input.zip");
    }

    #[test]
    fn test_file_name_ignores_query_string() {
        let url = Url::parse(
            "https://cdn.example.org/submissions/input.zip?X-Signature=abcdef&Expires=3600",
        )
        .unwrap();
        assert_eq!(HttpArtifactStore::file_name(&url), "input.zip");
    }

    #[test]
    fn test_file_name_falls_back_when_path_ends_with_slash() {
        let url = Url::parse("https://cdn.example.org/submissions/").unwrap();
        assert_eq!(HttpArtifactStore::file_name(&url), DEFAULT_ARTIFACT_NAME);
    }
}
