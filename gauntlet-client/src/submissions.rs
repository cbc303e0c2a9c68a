//! Submission endpoints

use crate::PlatformClient;
use crate::error::Result;
use gauntlet_core::domain::submission::Submission;
use gauntlet_core::dto::submission::{UpdateSubmissionData, UpdateSubmissionStatus};

impl PlatformClient {
    /// Fetch a submission record
    ///
    /// The record carries the submission's current status and the URL of
    /// the artifact to score.
    ///
    /// # Arguments
    /// * `submission_pk` - The submission primary key
    pub async fn get_submission(&self, submission_pk: u64) -> Result<Submission> {
        let url = format!("{}/api/submissions/{}", self.base_url, submission_pk);
        let response = self.client.get(&url).bearer_auth(&self.auth_token).send().await?;

        self.handle_response(response).await
    }

    /// Report a partial status update for a submission
    ///
    /// Used to mark a submission RUNNING before its artifact is downloaded.
    ///
    /// # Arguments
    /// * `challenge_pk` - The challenge the submission belongs to
    /// * `update` - The status update payload
    pub async fn update_submission_status(
        &self,
        challenge_pk: u64,
        update: UpdateSubmissionStatus,
    ) -> Result<()> {
        let url = format!(
            "{}/api/challenges/{}/submissions/status",
            self.base_url, challenge_pk
        );
        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.auth_token)
            .json(&update)
            .send()
            .await?;

        self.handle_empty_response(response).await
    }

    /// Report a full submission update carrying the evaluation outcome
    ///
    /// Used for FINISHED updates (serialized result, optional stdout and
    /// metadata) and FAILED updates (error text in `stderr`).
    ///
    /// # Arguments
    /// * `challenge_pk` - The challenge the submission belongs to
    /// * `update` - The submission data payload
    pub async fn update_submission_data(
        &self,
        challenge_pk: u64,
        update: UpdateSubmissionData,
    ) -> Result<()> {
        let url = format!(
            "{}/api/challenges/{}/submissions/data",
            self.base_url, challenge_pk
        );
        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.auth_token)
            .json(&update)
            .send()
            .await?;

        self.handle_empty_response(response).await
    }
}
