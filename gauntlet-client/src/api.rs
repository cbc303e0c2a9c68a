//! Platform API abstraction
//!
//! The worker's poll loop depends on this trait rather than on
//! [`PlatformClient`] directly, so tests can substitute an in-memory
//! implementation.

use async_trait::async_trait;

use gauntlet_core::domain::message::QueueMessage;
use gauntlet_core::domain::phase::ChallengePhase;
use gauntlet_core::domain::submission::Submission;
use gauntlet_core::dto::submission::{UpdateSubmissionData, UpdateSubmissionStatus};

use crate::PlatformClient;
use crate::error::Result;

/// The platform operations the evaluation worker consumes
#[async_trait]
pub trait PlatformApi: Send + Sync {
    /// Receive the next submission queue message, if any
    async fn get_queue_message(&self) -> Result<QueueMessage>;

    /// Delete a processed queue message by receipt handle
    async fn delete_queue_message(&self, receipt_handle: &str) -> Result<()>;

    /// Fetch a submission record
    async fn get_submission(&self, submission_pk: u64) -> Result<Submission>;

    /// Fetch a challenge phase
    async fn get_challenge_phase(
        &self,
        challenge_pk: u64,
        phase_pk: u64,
    ) -> Result<ChallengePhase>;

    /// Report a partial status update (RUNNING)
    async fn update_submission_status(
        &self,
        challenge_pk: u64,
        update: UpdateSubmissionStatus,
    ) -> Result<()>;

    /// Report a full submission update (FINISHED/FAILED)
    async fn update_submission_data(
        &self,
        challenge_pk: u64,
        update: UpdateSubmissionData,
    ) -> Result<()>;
}

#[async_trait]
impl PlatformApi for PlatformClient {
    async fn get_queue_message(&self) -> Result<QueueMessage> {
        PlatformClient::get_queue_message(self).await
    }

    async fn delete_queue_message(&self, receipt_handle: &str) -> Result<()> {
        PlatformClient::delete_queue_message(self, receipt_handle).await
    }

    async fn get_submission(&self, submission_pk: u64) -> Result<Submission> {
        PlatformClient::get_submission(self, submission_pk).await
    }

    async fn get_challenge_phase(
        &self,
        challenge_pk: u64,
        phase_pk: u64,
    ) -> Result<ChallengePhase> {
        PlatformClient::get_challenge_phase(self, challenge_pk, phase_pk).await
    }

    async fn update_submission_status(
        &self,
        challenge_pk: u64,
        update: UpdateSubmissionStatus,
    ) -> Result<()> {
        PlatformClient::update_submission_status(self, challenge_pk, update).await
    }

    async fn update_submission_data(
        &self,
        challenge_pk: u64,
        update: UpdateSubmissionData,
    ) -> Result<()> {
        PlatformClient::update_submission_data(self, challenge_pk, update).await
    }
}
