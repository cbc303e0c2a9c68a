//! Gauntlet Worker
//!
//! A stateless worker that bridges a challenge platform's submission queue
//! with a host-provided scoring routine.
//!
//! Architecture:
//! - Configuration: host-config JSON file merged over environment variables
//! - Client: HTTP communication with the platform (queue, submissions, phases)
//! - Services: artifact download and evaluation
//! - Scheduler: the submission polling loop
//!
//! The worker polls the platform for submission notifications, downloads
//! each referenced artifact, scores it with the host's evaluator command,
//! and reports RUNNING/FINISHED/FAILED back to the platform.

mod config;
mod scheduler;
mod service;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{HostConfig, WorkerConfig};
use crate::scheduler::SubmissionPoller;
use crate::service::{HttpArtifactStore, ProcessEvaluator};
use gauntlet_client::PlatformClient;

#[derive(Parser)]
#[command(name = "gauntlet-worker")]
#[command(about = "Remote evaluation worker for Gauntlet challenges", long_about = None)]
struct Cli {
    /// Path to the host configuration JSON file
    #[arg(long, env = "HOST_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gauntlet_worker=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Gauntlet worker");

    let cli = Cli::parse();

    // Load configuration
    let config = load_config(cli.config.as_deref())?;
    info!(
        "Loaded configuration: worker_id={}, api_server={}, queue={}",
        config.worker_id, config.api_server, config.queue_name
    );

    tokio::fs::create_dir_all(&config.save_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create save directory {}",
                config.save_dir.display()
            )
        })?;

    // Initialize platform client
    let client = Arc::new(PlatformClient::new(
        config.api_server.clone(),
        config.auth_token.clone(),
        config.queue_name.clone(),
        config.challenge_pk,
    ));

    info!("Platform client initialized");

    // Initialize services
    let artifacts = Arc::new(HttpArtifactStore::new(config.save_dir.clone()));
    let evaluator = Arc::new(ProcessEvaluator::new(config.evaluator_cmd.clone()));

    info!("Services initialized");

    // Create submission poller
    let poller = SubmissionPoller::new(config, client, artifacts, evaluator);

    // Start polling loop
    info!("Starting submission polling loop");
    poller.run().await
}

/// Loads the worker configuration, merging an optional host-config file
/// over the process environment.
///
/// When `--config` is not given, the default host-config path is used if a
/// file exists there; otherwise the environment alone must provide the
/// required settings.
fn load_config(path: Option<&Path>) -> Result<WorkerConfig> {
    let host = match path {
        Some(path) => Some(HostConfig::load(path)?),
        None => {
            let default = Path::new(config::DEFAULT_HOST_CONFIG_PATH);
            if default.exists() {
                Some(HostConfig::load(default)?)
            } else {
                None
            }
        }
    };

    let config = WorkerConfig::resolve(host.as_ref())?;
    config.validate()?;

    Ok(config)
}
