//! Challenge phase endpoints

use crate::PlatformClient;
use crate::error::Result;
use gauntlet_core::domain::phase::ChallengePhase;

impl PlatformClient {
    /// Fetch a challenge phase
    ///
    /// The phase's `codename` selects the scoring routine for submissions
    /// made to it.
    ///
    /// # Arguments
    /// * `challenge_pk` - The challenge primary key
    /// * `phase_pk` - The phase primary key
    pub async fn get_challenge_phase(
        &self,
        challenge_pk: u64,
        phase_pk: u64,
    ) -> Result<ChallengePhase> {
        let url = format!(
            "{}/api/challenges/{}/phases/{}",
            self.base_url, challenge_pk, phase_pk
        );
        let response = self.client.get(&url).bearer_auth(&self.auth_token).send().await?;

        self.handle_response(response).await
    }
}
