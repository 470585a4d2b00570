pub mod account_service;
pub mod claim_service;
pub mod influencer_service;
pub mod upload_service;

pub use account_service::{AccountService, AccountServiceError};
pub use claim_service::ClaimService;
pub use influencer_service::{InfluencerService, InfluencerServiceError};
pub use upload_service::{UploadError, UploadStore};
