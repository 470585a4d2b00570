use crate::models::influencer::{
    CategoryFollowers, InfluencerProfile, LeaderboardStats, TrustTierCounts,
};
use crate::models::user::Claim;
use crate::repositories::user_repository::{RepositoryError, UserRepository};
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

pub const HIGH_TRUST_MIN: i64 = 80;
pub const MEDIUM_TRUST_MIN: i64 = 50;

#[derive(Debug, thiserror::Error)]
pub enum InfluencerServiceError {
    #[error("Invalid influencer ID")]
    InvalidId,
    #[error("Influencer not found")]
    NotFound,
    #[error("{0}")]
    Validation(String),
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),
}

/// Read side of the store plus the administrative claim/delete operations.
pub struct InfluencerService {
    repository: Arc<dyn UserRepository>,
}

impl InfluencerService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_influencers(&self) -> Result<Vec<InfluencerProfile>, InfluencerServiceError> {
        let users = self.repository.list_users().await?;
        Ok(users.into_iter().map(InfluencerProfile::from).collect())
    }

    pub async fn get_influencer(
        &self,
        raw_id: &str,
    ) -> Result<InfluencerProfile, InfluencerServiceError> {
        let id = parse_id(raw_id)?;
        self.repository
            .find_by_id(id)
            .await?
            .map(InfluencerProfile::from)
            .ok_or(InfluencerServiceError::NotFound)
    }

    pub async fn leaderboard_stats(&self) -> Result<LeaderboardStats, InfluencerServiceError> {
        let influencers = self.list_influencers().await?;
        Ok(summarize(&influencers))
    }

    pub async fn add_claim(&self, raw_id: &str, claim: Claim) -> Result<(), InfluencerServiceError> {
        let id = parse_id(raw_id)?;

        if claim.claim_text.trim().is_empty() {
            return Err(InfluencerServiceError::Validation(
                "claimText is required".to_string(),
            ));
        }
        if claim.confidence > 100 {
            return Err(InfluencerServiceError::Validation(
                "confidence must be between 0 and 100".to_string(),
            ));
        }

        match self.repository.append_claim(id, &claim).await {
            Ok(()) => {
                tracing::info!(user_id = %id, status = %claim.status, "claim attached");
                Ok(())
            }
            Err(RepositoryError::NotFound) => Err(InfluencerServiceError::NotFound),
            Err(e) => Err(InfluencerServiceError::RepositoryError(e)),
        }
    }

    pub async fn delete_influencer(&self, raw_id: &str) -> Result<(), InfluencerServiceError> {
        let id = parse_id(raw_id)?;
        match self.repository.delete_user(id).await {
            Ok(()) => {
                tracing::info!(user_id = %id, "influencer deleted");
                Ok(())
            }
            Err(RepositoryError::NotFound) => Err(InfluencerServiceError::NotFound),
            Err(e) => Err(InfluencerServiceError::RepositoryError(e)),
        }
    }
}

fn parse_id(raw_id: &str) -> Result<Uuid, InfluencerServiceError> {
    Uuid::parse_str(raw_id.trim()).map_err(|_| InfluencerServiceError::InvalidId)
}

/// Followers per category (sorted by name) and trust-tier head counts.
/// Category totals saturate at `i64::MAX`.
pub fn summarize(influencers: &[InfluencerProfile]) -> LeaderboardStats {
    let mut by_category: BTreeMap<String, i64> = BTreeMap::new();
    let mut tiers = TrustTierCounts::default();

    for influencer in influencers {
        let category = if influencer.category.trim().is_empty() {
            "Unknown".to_string()
        } else {
            influencer.category.clone()
        };
        let total = by_category.entry(category).or_insert(0);
        *total = total.saturating_add(influencer.followers);

        match influencer.trust_score {
            s if s >= HIGH_TRUST_MIN => tiers.high += 1,
            s if s >= MEDIUM_TRUST_MIN => tiers.medium += 1,
            _ => tiers.low += 1,
        }
    }

    LeaderboardStats {
        total_influencers: influencers.len(),
        followers_by_category: by_category
            .into_iter()
            .map(|(category, followers)| CategoryFollowers {
                category,
                followers,
            })
            .collect(),
        trust_tiers: tiers,
    }
}
