pub mod account;
pub mod influencer;
pub mod user;

pub use account::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest, VerifyRequest};
pub use influencer::{CategoryFollowers, InfluencerProfile, LeaderboardStats, TrustTierCounts};
pub use user::{Claim, ClaimStatus, NewUser, User};
