//! Worker configuration
//!
//! Configuration comes from two layers: the host-config JSON file a
//! challenge host ships with the worker, and process environment
//! variables. File values win over the environment; optional settings fall
//! back to defaults.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Host-config path probed when `--config` is not given
pub const DEFAULT_HOST_CONFIG_PATH: &str = "host_config.json";

/// Default queue polling interval in seconds
const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

/// The JSON configuration file a challenge host ships with the worker.
///
/// Every key is optional in the file itself; a key left out must be
/// provided through the corresponding environment variable instead (see
/// [`WorkerConfig::resolve`]).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HostConfig {
    pub token: Option<String>,
    pub api_host_url: Option<String>,
    pub queue_name: Option<String>,
    pub challenge_pk: Option<u64>,
    pub save_dir: Option<PathBuf>,
    pub evaluator_cmd: Option<String>,
}

impl HostConfig {
    /// Reads and parses a host-config file.
    ///
    /// A missing or malformed file is a startup error.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read host config {}", path.display()))?;

        serde_json::from_str(&raw)
            .with_context(|| format!("{} is not a valid host config", path.display()))
    }
}

/// Worker configuration
///
/// Resolved once at startup; holds everything the poll loop and services
/// need.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Unique identifier for this worker instance
    pub worker_id: String,

    /// Platform API token
    pub auth_token: String,

    /// Platform API base URL (e.g., "https://eval.example.org")
    pub api_server: String,

    /// Submission queue this worker consumes
    pub queue_name: String,

    /// Challenge this worker evaluates
    pub challenge_pk: u64,

    /// Directory submission artifacts are downloaded into
    pub save_dir: PathBuf,

    /// How often to poll the submission queue
    pub poll_interval: Duration,

    /// Host-provided scoring command
    pub evaluator_cmd: String,
}

impl WorkerConfig {
    /// Builds the worker configuration from an optional host-config file
    /// merged over the process environment.
    ///
    /// Environment variables (used when the host config leaves a key out):
    /// - AUTH_TOKEN (host config key: token)
    /// - API_SERVER (host config key: api_host_url)
    /// - QUEUE_NAME (host config key: queue_name)
    /// - CHALLENGE_PK (host config key: challenge_pk)
    /// - SAVE_DIR (host config key: save_dir; default: "./")
    /// - EVALUATOR_CMD (host config key: evaluator_cmd)
    /// - POLL_INTERVAL (seconds; default: 60)
    /// - WORKER_ID (default: generated UUID)
    pub fn resolve(host: Option<&HostConfig>) -> Result<Self> {
        let auth_token = host
            .and_then(|h| h.token.clone())
            .or_else(|| env::var("AUTH_TOKEN").ok())
            .context("AUTH_TOKEN is not set (host config key: token)")?;

        let api_server = host
            .and_then(|h| h.api_host_url.clone())
            .or_else(|| env::var("API_SERVER").ok())
            .context("API_SERVER is not set (host config key: api_host_url)")?;

        let queue_name = host
            .and_then(|h| h.queue_name.clone())
            .or_else(|| env::var("QUEUE_NAME").ok())
            .context("QUEUE_NAME is not set (host config key: queue_name)")?;

        let challenge_pk = match host.and_then(|h| h.challenge_pk) {
            Some(pk) => pk,
            None => env::var("CHALLENGE_PK")
                .context("CHALLENGE_PK is not set (host config key: challenge_pk)")?
                .parse::<u64>()
                .context("CHALLENGE_PK must be a number")?,
        };

        let save_dir = host
            .and_then(|h| h.save_dir.clone())
            .or_else(|| env::var("SAVE_DIR").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("./"));

        let evaluator_cmd = host
            .and_then(|h| h.evaluator_cmd.clone())
            .or_else(|| env::var("EVALUATOR_CMD").ok())
            .context("EVALUATOR_CMD is not set (host config key: evaluator_cmd)")?;

        let poll_interval = env::var("POLL_INTERVAL")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS));

        let worker_id = env::var("WORKER_ID").unwrap_or_else(|_| uuid::Uuid::new_v4().to_string());

        Ok(Self {
            worker_id,
            auth_token,
            api_server,
            queue_name,
            challenge_pk,
            save_dir,
            poll_interval,
            evaluator_cmd,
        })
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.auth_token.is_empty() {
            anyhow::bail!("auth token cannot be empty");
        }

        if self.queue_name.is_empty() {
            anyhow::bail!("queue name cannot be empty");
        }

        if !self.api_server.starts_with("http://") && !self.api_server.starts_with("https://") {
            anyhow::bail!("API server URL must start with http:// or https://");
        }

        if self.evaluator_cmd.trim().is_empty() {
            anyhow::bail!("evaluator command cannot be empty");
        }

        if self.poll_interval.as_secs() == 0 {
            anyhow::bail!("poll interval must be greater than 0");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_host_config() -> HostConfig {
        HostConfig {
            token: Some("secret".to_string()),
            api_host_url: Some("https://eval.example.org".to_string()),
            queue_name: Some("vision-challenge-queue".to_string()),
            challenge_pk: Some(42),
            save_dir: Some(PathBuf::from("/tmp/artifacts")),
            evaluator_cmd: Some("./evaluate".to_string()),
        }
    }

    fn make_config() -> WorkerConfig {
        WorkerConfig {
            worker_id: "worker-1".to_string(),
            auth_token: "secret".to_string(),
            api_server: "https://eval.example.org".to_string(),
            queue_name: "vision-challenge-queue".to_string(),
            challenge_pk: 42,
            save_dir: PathBuf::from("./"),
            poll_interval: Duration::from_secs(60),
            evaluator_cmd: "./evaluate".to_string(),
        }
    }

    #[test]
    fn test_host_config_parses_known_keys() {
        let host: HostConfig = serde_json::from_str(
            r#"{
                "token": "secret",
                "api_host_url": "https://eval.example.org",
                "queue_name": "vision-challenge-queue",
                "challenge_pk": 42,
                "save_dir": "/tmp/artifacts",
                "evaluator_cmd": "./evaluate"
            }"#,
        )
        .unwrap();

        assert_eq!(host.token.as_deref(), Some("secret"));
        assert_eq!(host.challenge_pk, Some(42));
        assert_eq!(host.save_dir, Some(PathBuf::from("/tmp/artifacts")));
    }

    #[test]
    fn test_partial_host_config_parses() {
        let host: HostConfig = serde_json::from_str(r#"{"token": "secret"}"#).unwrap();
        assert_eq!(host.token.as_deref(), Some("secret"));
        assert!(host.queue_name.is_none());
        assert!(host.save_dir.is_none());
    }

    #[test]
    fn test_resolve_from_full_host_config() {
        let config = WorkerConfig::resolve(Some(&full_host_config())).unwrap();

        assert_eq!(config.auth_token, "secret");
        assert_eq!(config.api_server, "https://eval.example.org");
        assert_eq!(config.queue_name, "vision-challenge-queue");
        assert_eq!(config.challenge_pk, 42);
        assert_eq!(config.save_dir, PathBuf::from("/tmp/artifacts"));
        assert_eq!(config.evaluator_cmd, "./evaluate");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_resolve_defaults_save_dir() {
        let host = HostConfig {
            save_dir: None,
            ..full_host_config()
        };

        let config = WorkerConfig::resolve(Some(&host)).unwrap();
        assert_eq!(config.save_dir, PathBuf::from("./"));
    }

    #[test]
    fn test_config_validation() {
        let mut config = make_config();
        assert!(config.validate().is_ok());

        config.auth_token = String::new();
        assert!(config.validate().is_err());

        config.auth_token = "secret".to_string();
        config.api_server = "not-a-url".to_string();
        assert!(config.validate().is_err());

        config.api_server = "https://eval.example.org".to_string();
        config.poll_interval = Duration::from_secs(0);
        assert!(config.validate().is_err());

        config.poll_interval = Duration::from_secs(60);
        config.evaluator_cmd = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
