//! Challenge phase domain types

use serde::{Deserialize, Serialize};

/// A stage of a challenge.
///
/// The `codename` selects which scoring routine the evaluator runs for
/// submissions made to this phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengePhase {
    pub id: u64,
    pub name: String,
    pub codename: String,
    /// Challenge this phase belongs to
    pub challenge: u64,
    pub description: Option<String>,
}
