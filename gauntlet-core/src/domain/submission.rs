//! Submission domain types

use serde::{Deserialize, Serialize};

/// A participant's submission as served by the platform API.
///
/// Only the fields the worker acts on are modeled; the platform returns
/// more, and unknown fields are ignored on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: u64,
    pub status: SubmissionStatus,
    /// URL of the artifact to download and score
    pub input_file: String,
    pub method_name: Option<String>,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Lifecycle status of a submission record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    /// Submitted by a participant, not yet picked up
    Submitted,

    /// Accepted into the evaluation queue
    Queued,

    /// An evaluation is in progress
    Running,

    /// Evaluation completed and a result was recorded
    Finished,

    /// Evaluation failed
    Failed,

    /// Withdrawn before evaluation completed
    Cancelled,

    /// Any status string this worker does not act on
    #[serde(other)]
    Unknown,
}

impl SubmissionStatus {
    /// Whether the submission needs no further processing.
    ///
    /// A queue message for a terminal submission is deleted without
    /// re-evaluating.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished | Self::Failed | Self::Cancelled)
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::Submitted => write!(f, "submitted"),
            SubmissionStatus::Queued => write!(f, "queued"),
            SubmissionStatus::Running => write!(f, "running"),
            SubmissionStatus::Finished => write!(f, "finished"),
            SubmissionStatus::Failed => write!(f, "failed"),
            SubmissionStatus::Cancelled => write!(f, "cancelled"),
            SubmissionStatus::Unknown => write!(f, "unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_deserializes_lowercase() {
        let status: SubmissionStatus = serde_json::from_str("\"submitted\"").unwrap();
        assert_eq!(status, SubmissionStatus::Submitted);

        let status: SubmissionStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(status, SubmissionStatus::Cancelled);
    }

    #[test]
    fn test_unrecognized_status_maps_to_unknown() {
        let status: SubmissionStatus = serde_json::from_str("\"resuming\"").unwrap();
        assert_eq!(status, SubmissionStatus::Unknown);
        assert!(!status.is_terminal());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(SubmissionStatus::Finished.is_terminal());
        assert!(SubmissionStatus::Failed.is_terminal());
        assert!(SubmissionStatus::Cancelled.is_terminal());
        assert!(!SubmissionStatus::Submitted.is_terminal());
        assert!(!SubmissionStatus::Running.is_terminal());
        assert!(!SubmissionStatus::Queued.is_terminal());
    }

    #[test]
    fn test_submission_deserializes_with_missing_optionals() {
        let submission: Submission = serde_json::from_str(
            r#"{"id": 7, "status": "submitted", "input_file": "https://cdn.example.org/inputs/7.zip"}"#,
        )
        .unwrap();

        assert_eq!(submission.id, 7);
        assert_eq!(submission.status, SubmissionStatus::Submitted);
        assert!(submission.started_at.is_none());
    }
}
