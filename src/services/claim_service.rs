use crate::models::user::{Claim, ClaimStatus};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use std::sync::Mutex;

pub const SIMULATED_SOURCE: &str = "Simulated Research";

/// Placeholder for a real fact-checking pipeline: every verdict is random and
/// nothing is persisted.
pub struct ClaimService {
    rng: Mutex<StdRng>,
}

impl ClaimService {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic generator, for tests and reproducible demos.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn verify(&self, claim_text: &str) -> Claim {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let status = *ClaimStatus::ALL
            .choose(&mut *rng)
            .unwrap_or(&ClaimStatus::Questionable);
        let confidence = rng.gen_range(0..100u8);

        tracing::debug!(%status, confidence, "simulated claim verification");

        Claim {
            claim_text: claim_text.to_string(),
            status,
            confidence,
            source: SIMULATED_SOURCE.to_string(),
        }
    }
}

impl Default for ClaimService {
    fn default() -> Self {
        Self::new()
    }
}
