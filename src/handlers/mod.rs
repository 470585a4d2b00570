pub mod account_handlers;
pub mod claim_handlers;
pub mod influencer_handlers;

pub use account_handlers::{login_handler, signup_handler};
pub use claim_handlers::verify_claim_handler;
pub use influencer_handlers::{
    get_influencer_handler, leaderboard_stats_handler, list_influencers_handler,
};
