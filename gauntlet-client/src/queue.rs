//! Submission queue endpoints

use crate::PlatformClient;
use crate::error::Result;
use gauntlet_core::domain::message::QueueMessage;

impl PlatformClient {
    /// Receive the next message from the submission queue
    ///
    /// Returns a message with an empty body when the queue is idle. The
    /// message is not consumed by receiving it; call
    /// [`delete_queue_message`](PlatformClient::delete_queue_message) with
    /// its receipt handle once the submission needs no further processing.
    pub async fn get_queue_message(&self) -> Result<QueueMessage> {
        let url = format!(
            "{}/api/challenges/{}/queues/{}/message",
            self.base_url, self.challenge_pk, self.queue_name
        );
        let response = self.client.get(&url).bearer_auth(&self.auth_token).send().await?;

        self.handle_response(response).await
    }

    /// Delete a processed message from the submission queue
    ///
    /// # Arguments
    /// * `receipt_handle` - The receipt handle of the delivery to delete
    pub async fn delete_queue_message(&self, receipt_handle: &str) -> Result<()> {
        let url = format!(
            "{}/api/challenges/{}/queues/{}/receipt/{}",
            self.base_url, self.challenge_pk, self.queue_name, receipt_handle
        );
        let response = self
            .client
            .delete(&url)
            .bearer_auth(&self.auth_token)
            .send()
            .await?;

        self.handle_empty_response(response).await
    }
}
