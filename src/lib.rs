pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;

// Make test_utils available for both unit tests and integration tests
pub mod test_utils;

use repositories::{SqliteUserRepository, UserRepository};
use services::{AccountService, ClaimService, InfluencerService, UploadStore};
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<AccountService>,
    pub claim_service: Arc<ClaimService>,
    pub influencer_service: Arc<InfluencerService>,
    pub upload_store: Arc<UploadStore>,
}

impl AppState {
    /// Wires every service to one explicitly opened store handle.
    pub fn new(pool: SqlitePool, upload_store: UploadStore) -> Self {
        let user_repository: Arc<dyn UserRepository> = Arc::new(SqliteUserRepository::new(pool));
        Self::from_parts(user_repository, ClaimService::new(), upload_store)
    }

    pub fn from_parts(
        user_repository: Arc<dyn UserRepository>,
        claim_service: ClaimService,
        upload_store: UploadStore,
    ) -> Self {
        Self {
            account_service: Arc::new(AccountService::new(user_repository.clone())),
            claim_service: Arc::new(claim_service),
            influencer_service: Arc::new(InfluencerService::new(user_repository)),
            upload_store: Arc::new(upload_store),
        }
    }
}
