//! Evaluation output types

use serde::{Deserialize, Serialize};

/// What a scoring routine hands back for a successfully evaluated
/// submission.
///
/// `result` is the scores payload the platform stores verbatim; `stdout`
/// and `metadata` are optional passthroughs attached to the FINISHED
/// update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluationOutput {
    pub result: serde_json::Value,
    pub stdout: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

impl EvaluationOutput {
    /// Wraps a bare scores payload with no stdout or metadata
    pub fn from_result(result: serde_json::Value) -> Self {
        Self {
            result,
            stdout: None,
            metadata: None,
        }
    }
}
