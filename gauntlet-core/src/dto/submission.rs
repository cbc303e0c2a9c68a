//! Submission update DTOs

use serde::{Deserialize, Serialize};

/// Status value the worker reports on an update.
///
/// The platform expects these uppercase, distinct from the lowercase
/// record statuses it serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportedStatus {
    Running,
    Finished,
    Failed,
}

/// Partial status update, used to mark a submission RUNNING before the
/// artifact is downloaded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSubmissionStatus {
    pub submission: u64,
    pub submission_status: ReportedStatus,
}

impl UpdateSubmissionStatus {
    /// Marks a submission as picked up for evaluation
    pub fn running(submission: u64) -> Self {
        Self {
            submission,
            submission_status: ReportedStatus::Running,
        }
    }
}

/// Full submission update carrying the evaluation outcome.
///
/// `stdout`, `stderr`, and `metadata` always appear on the wire (empty
/// strings when there is nothing to report); `result` is only present on
/// FINISHED updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSubmissionData {
    pub challenge_phase: u64,
    pub submission: u64,
    pub submission_status: ReportedStatus,
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
    /// JSON-serialized scores payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default)]
    pub metadata: String,
}

impl UpdateSubmissionData {
    /// Builds a FINISHED update carrying the serialized scores
    pub fn finished(challenge_phase: u64, submission: u64, result: String) -> Self {
        Self {
            challenge_phase,
            submission,
            submission_status: ReportedStatus::Finished,
            stdout: String::new(),
            stderr: String::new(),
            result: Some(result),
            metadata: String::new(),
        }
    }

    /// Builds a FAILED update carrying the error text in `stderr`
    pub fn failed(challenge_phase: u64, submission: u64, stderr: String) -> Self {
        Self {
            challenge_phase,
            submission,
            submission_status: ReportedStatus::Failed,
            stdout: String::new(),
            stderr,
            result: None,
            metadata: String::new(),
        }
    }

    /// Attaches captured evaluator stdout
    pub fn with_stdout(mut self, stdout: String) -> Self {
        self.stdout = stdout;
        self
    }

    /// Attaches free-form metadata
    pub fn with_metadata(mut self, metadata: String) -> Self {
        self.metadata = metadata;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reported_status_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&ReportedStatus::Running).unwrap(),
            "\"RUNNING\""
        );
        assert_eq!(
            serde_json::to_string(&ReportedStatus::Finished).unwrap(),
            "\"FINISHED\""
        );
        assert_eq!(
            serde_json::to_string(&ReportedStatus::Failed).unwrap(),
            "\"FAILED\""
        );
    }

    #[test]
    fn test_finished_update_carries_result() {
        let update = UpdateSubmissionData::finished(5, 11, "{\"score\": 0.92}".to_string());
        let json = serde_json::to_value(&update).unwrap();

        assert_eq!(json["submission_status"], "FINISHED");
        assert_eq!(json["result"], "{\"score\": 0.92}");
        assert_eq!(json["stderr"], "");
    }

    #[test]
    fn test_failed_update_omits_result() {
        let update = UpdateSubmissionData::failed(5, 11, "scoring routine panicked".to_string());
        let json = serde_json::to_value(&update).unwrap();

        assert_eq!(json["submission_status"], "FAILED");
        assert_eq!(json["stderr"], "scoring routine panicked");
        assert!(json.get("result").is_none());
    }

    #[test]
    fn test_running_update_shape() {
        let update = UpdateSubmissionStatus::running(11);
        let json = serde_json::to_value(&update).unwrap();

        assert_eq!(json["submission"], 11);
        assert_eq!(json["submission_status"], "RUNNING");
    }
}
