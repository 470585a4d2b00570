use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Verdict attached to a health claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    Verified,
    Questionable,
    Debunked,
}

impl ClaimStatus {
    pub const ALL: [ClaimStatus; 3] = [
        ClaimStatus::Verified,
        ClaimStatus::Questionable,
        ClaimStatus::Debunked,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Verified => "Verified",
            ClaimStatus::Questionable => "Questionable",
            ClaimStatus::Debunked => "Debunked",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown claim status: {0}")]
pub struct ParseClaimStatusError(pub String);

impl FromStr for ClaimStatus {
    type Err = ParseClaimStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClaimStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseClaimStatusError(s.to_string()))
    }
}

/// A claim embedded in its owning user. Claims have no identity of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub claim_text: String,
    pub status: ClaimStatus,
    pub confidence: u8,
    pub source: String,
}

/// Stored user record. Deliberately not `Serialize`: responses go through
/// `InfluencerProfile` so the password hash cannot end up on the wire.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub profile_picture: Option<String>,
    pub category: String,
    pub trust_score: i64,
    pub followers: i64,
    pub claims: Vec<Claim>,
    pub created_at: Option<String>,
}

/// Fields required to insert a user. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub profile_picture: Option<String>,
    pub category: String,
    pub trust_score: i64,
    pub followers: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_status_parses_case_insensitively() {
        assert_eq!("verified".parse::<ClaimStatus>().unwrap(), ClaimStatus::Verified);
        assert_eq!(" Debunked ".parse::<ClaimStatus>().unwrap(), ClaimStatus::Debunked);
        assert!("maybe".parse::<ClaimStatus>().is_err());
    }

    #[test]
    fn claim_serializes_with_camel_case_keys() {
        let claim = Claim {
            claim_text: "Cold showers cure colds".to_string(),
            status: ClaimStatus::Questionable,
            confidence: 42,
            source: "Simulated Research".to_string(),
        };

        let json = serde_json::to_value(&claim).unwrap();
        assert_eq!(json["claimText"], "Cold showers cure colds");
        assert_eq!(json["status"], "Questionable");
        assert_eq!(json["confidence"], 42);
    }
}
