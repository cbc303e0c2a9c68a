//! Queue message domain types

use serde::{Deserialize, Serialize};

/// One delivery from the submission queue.
///
/// The platform hands back an empty message (no body, no receipt handle)
/// when the queue has nothing to deliver.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueueMessage {
    pub body: Option<MessageBody>,
    /// Token needed to delete this delivery once processed
    pub receipt_handle: Option<String>,
}

/// Primary keys carried by a submission notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub submission_pk: u64,
    pub challenge_pk: u64,
    pub phase_pk: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_queue_message_has_no_body() {
        let message: QueueMessage = serde_json::from_str("{}").unwrap();
        assert!(message.body.is_none());
        assert!(message.receipt_handle.is_none());
    }

    #[test]
    fn test_message_deserializes_keys() {
        let message: QueueMessage = serde_json::from_str(
            r#"{
                "body": {"submission_pk": 11, "challenge_pk": 3, "phase_pk": 5},
                "receipt_handle": "r-9f2c"
            }"#,
        )
        .unwrap();

        let body = message.body.unwrap();
        assert_eq!(body.submission_pk, 11);
        assert_eq!(body.challenge_pk, 3);
        assert_eq!(body.phase_pk, 5);
        assert_eq!(message.receipt_handle.as_deref(), Some("r-9f2c"));
    }
}
