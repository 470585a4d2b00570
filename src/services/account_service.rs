use crate::models::account::{LoginRequest, LoginResponse, RegisterRequest};
use crate::models::user::NewUser;
use crate::repositories::user_repository::{RepositoryError, UniqueField, UserRepository};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, SaltString},
    Argon2, PasswordVerifier,
};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum AccountServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("A user with this {0} already exists")]
    DuplicateKey(UniqueField),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Password hashing failed: {0}")]
    HashingError(String),
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),
}

pub struct AccountService {
    repository: Arc<dyn UserRepository>,
}

impl AccountService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Registers a new influencer and returns the id assigned by the store.
    pub async fn register(&self, request: RegisterRequest) -> Result<Uuid, AccountServiceError> {
        let username = required_text("username", request.username)?;
        let email = required_text("email", request.email)?;
        let password = request
            .password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| missing("password"))?;
        let category = required_text("category", request.category)?;
        let trust_score = required_count("trustScore", request.trust_score)?;
        let followers = required_count("followers", request.followers)?;

        self.validate_email(&email)?;

        // Advisory only; the unique constraints in the store decide races.
        if self.repository.find_by_username(&username).await?.is_some() {
            return Err(AccountServiceError::DuplicateKey(UniqueField::Username));
        }
        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(AccountServiceError::DuplicateKey(UniqueField::Email));
        }

        let password_hash = hash_password_blocking(password).await?;

        let new_user = NewUser {
            username,
            email,
            password_hash,
            profile_picture: request.profile_picture,
            category,
            trust_score,
            followers,
        };

        match self.repository.create_user(&new_user).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, username = %user.username, "influencer registered");
                Ok(user.id)
            }
            Err(RepositoryError::AlreadyExists(field)) => {
                Err(AccountServiceError::DuplicateKey(field))
            }
            Err(e) => Err(AccountServiceError::RepositoryError(e)),
        }
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AccountServiceError> {
        let user = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or(AccountServiceError::InvalidCredentials)?;

        let password = request.password;
        let password_hash = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
            .await
            .map_err(|e| AccountServiceError::HashingError(e.to_string()))?;

        if !matches {
            tracing::debug!(user_id = %user.id, "password mismatch");
            return Err(AccountServiceError::InvalidCredentials);
        }

        Ok(LoginResponse {
            user_id: user.id,
            email: user.email,
        })
    }

    fn validate_email(&self, email: &str) -> Result<(), AccountServiceError> {
        if !email.contains('@') || email.len() > 255 {
            return Err(AccountServiceError::Validation(
                "Invalid email address".to_string(),
            ));
        }
        Ok(())
    }
}

fn missing(field: &str) -> AccountServiceError {
    AccountServiceError::Validation(format!("{} is required", field))
}

/// Blank input counts as missing, but the submitted string is kept verbatim so
/// that register and login see the same value.
fn required_text(field: &str, value: Option<String>) -> Result<String, AccountServiceError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| missing(field))
}

/// Zero is a legitimate value; only absence or a negative number is rejected.
fn required_count(field: &str, value: Option<i64>) -> Result<i64, AccountServiceError> {
    match value {
        None => Err(missing(field)),
        Some(v) if v < 0 => Err(AccountServiceError::Validation(format!(
            "{} must not be negative",
            field
        ))),
        Some(v) => Ok(v),
    }
}

async fn hash_password_blocking(password: String) -> Result<String, AccountServiceError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AccountServiceError::HashingError(e.to_string()))?
}

fn hash_password(password: &str) -> Result<String, AccountServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AccountServiceError::HashingError(e.to_string()))
}

/// Constant-time comparison is provided by the argon2 verifier.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    if let Ok(parsed_hash) = PasswordHash::new(password_hash) {
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    } else {
        false
    }
}
