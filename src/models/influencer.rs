use super::user::{Claim, User};
use serde::Serialize;
use uuid::Uuid;

/// Public projection of a user for the leaderboard and detail pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfluencerProfile {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    pub profile_picture: Option<String>,
    pub category: String,
    pub trust_score: i64,
    pub followers: i64,
    pub claims: Vec<Claim>,
}

impl From<User> for InfluencerProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            profile_picture: user.profile_picture,
            category: user.category,
            trust_score: user.trust_score,
            followers: user.followers,
            claims: user.claims,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryFollowers {
    pub category: String,
    pub followers: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrustTierCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardStats {
    pub total_influencers: usize,
    pub followers_by_category: Vec<CategoryFollowers>,
    pub trust_tiers: TrustTierCounts,
}
