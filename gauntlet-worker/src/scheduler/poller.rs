//! Submission poller
//!
//! Polls the platform for submission notifications and processes them one
//! at a time: fetch the submission and phase, report RUNNING, download the
//! artifact, evaluate, and report FINISHED or FAILED.
//!
//! An evaluation failure is reported to the platform and the loop keeps
//! going; API and download failures propagate out and terminate the
//! worker, which is expected to run under a supervisor.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tokio::time;
use tracing::{debug, info, warn};

use gauntlet_client::PlatformApi;
use gauntlet_core::domain::message::MessageBody;
use gauntlet_core::domain::submission::SubmissionStatus;
use gauntlet_core::dto::submission::{UpdateSubmissionData, UpdateSubmissionStatus};

use crate::config::WorkerConfig;
use crate::service::{ArtifactStore, Evaluator};

/// Submission poller that continuously polls for and evaluates submissions
pub struct SubmissionPoller {
    config: WorkerConfig,
    client: Arc<dyn PlatformApi>,
    artifacts: Arc<dyn ArtifactStore>,
    evaluator: Arc<dyn Evaluator>,
}

impl SubmissionPoller {
    /// Creates a new submission poller
    pub fn new(
        config: WorkerConfig,
        client: Arc<dyn PlatformApi>,
        artifacts: Arc<dyn ArtifactStore>,
        evaluator: Arc<dyn Evaluator>,
    ) -> Self {
        Self {
            config,
            client,
            artifacts,
            evaluator,
        }
    }

    /// Starts the polling loop.
    ///
    /// Ticks on the configured interval regardless of which branch the
    /// previous cycle took. Runs until Ctrl+C is received.
    pub async fn run(&self) -> Result<()> {
        info!(
            "Starting submission poller (interval: {:?})",
            self.config.poll_interval
        );

        // Keep a full interval between cycles even when one runs long.
        let mut interval = time::interval(self.config.poll_interval);
        interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    debug!("Polling submission queue");
                    self.poll_once().await?;
                }

                _ = signal::ctrl_c() => {
                    info!("Shutdown signal received, stopping poller");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Performs a single poll cycle
    async fn poll_once(&self) -> Result<()> {
        let message = self
            .client
            .get_queue_message()
            .await
            .context("Failed to fetch queue message")?;

        let Some(body) = message.body else {
            debug!("Queue is idle");
            return Ok(());
        };

        self.process_notification(&body, message.receipt_handle.as_deref())
            .await
    }

    /// Processes one submission notification to completion
    async fn process_notification(
        &self,
        body: &MessageBody,
        receipt_handle: Option<&str>,
    ) -> Result<()> {
        info!(
            "Processing submission {} (challenge {}, phase {})",
            body.submission_pk, body.challenge_pk, body.phase_pk
        );

        let submission = self
            .client
            .get_submission(body.submission_pk)
            .await
            .context("Failed to fetch submission")?;

        let phase = self
            .client
            .get_challenge_phase(body.challenge_pk, body.phase_pk)
            .await
            .context("Failed to fetch challenge phase")?;

        // A terminal submission needs no evaluation; drop its message.
        if submission.status.is_terminal() {
            match receipt_handle {
                Some(handle) => {
                    debug!(
                        "Submission {} already {}, deleting message",
                        submission.id, submission.status
                    );
                    self.client
                        .delete_queue_message(handle)
                        .await
                        .context("Failed to delete queue message")?;
                }
                None => {
                    warn!(
                        "Submission {} already {} but its message has no receipt handle",
                        submission.id, submission.status
                    );
                }
            }
            return Ok(());
        }

        if submission.status == SubmissionStatus::Submitted {
            self.client
                .update_submission_status(
                    body.challenge_pk,
                    UpdateSubmissionStatus::running(submission.id),
                )
                .await
                .context("Failed to report RUNNING status")?;
        }

        let artifact = self
            .artifacts
            .fetch(&submission.input_file)
            .await
            .context("Failed to download submission artifact")?;

        match self.evaluator.evaluate(&artifact, &phase.codename).await {
            Ok(output) => {
                let result = serde_json::to_string(&output.result)
                    .context("Failed to serialize evaluation result")?;

                let mut update = UpdateSubmissionData::finished(phase.id, submission.id, result);
                if let Some(stdout) = output.stdout {
                    update = update.with_stdout(stdout);
                }
                if let Some(metadata) = output.metadata {
                    update = update.with_metadata(metadata.to_string());
                }

                self.client
                    .update_submission_data(body.challenge_pk, update)
                    .await
                    .context("Failed to report FINISHED status")?;

                info!("Submission {} finished", submission.id);
            }
            Err(err) => {
                warn!("Evaluation of submission {} failed: {:#}", submission.id, err);

                let update =
                    UpdateSubmissionData::failed(phase.id, submission.id, format!("{:#}", err));

                self.client
                    .update_submission_data(body.challenge_pk, update)
                    .await
                    .context("Failed to report FAILED status")?;
            }
        }

        Ok(())
    }
}
