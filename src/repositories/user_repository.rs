use crate::models::user::{Claim, NewUser, User};
use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Column whose uniqueness constraint rejected an insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Username,
    Email,
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniqueField::Username => f.write_str("username"),
            UniqueField::Email => f.write_str("email"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("User not found")]
    NotFound,
    #[error("User with this {0} already exists")]
    AlreadyExists(UniqueField),
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: &NewUser) -> RepositoryResult<User>;
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    async fn find_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>>;
    /// All users in insertion order, claims included.
    async fn list_users(&self) -> RepositoryResult<Vec<User>>;
    async fn append_claim(&self, id: Uuid, claim: &Claim) -> RepositoryResult<()>;
    /// Removes the user together with its claims.
    async fn delete_user(&self, id: Uuid) -> RepositoryResult<()>;
}

#[derive(FromRow)]
struct UserRow {
    id: String,
    username: String,
    email: String,
    password_hash: String,
    profile_picture: Option<String>,
    category: String,
    trust_score: i64,
    followers: i64,
    created_at: Option<String>,
}

#[derive(FromRow)]
struct ClaimRow {
    user_id: String,
    claim_text: String,
    status: String,
    confidence: i64,
    source: String,
}

impl UserRow {
    fn into_user(self, claims: Vec<Claim>) -> RepositoryResult<User> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Corrupt(format!("user id {}: {}", self.id, e)))?;

        Ok(User {
            id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            profile_picture: self.profile_picture,
            category: self.category,
            trust_score: self.trust_score,
            followers: self.followers,
            claims,
            created_at: self.created_at,
        })
    }
}

impl TryFrom<ClaimRow> for Claim {
    type Error = RepositoryError;

    fn try_from(row: ClaimRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse()
            .map_err(|e| RepositoryError::Corrupt(format!("claim status: {}", e)))?;
        let confidence = u8::try_from(row.confidence)
            .map_err(|_| RepositoryError::Corrupt(format!("claim confidence {}", row.confidence)))?;

        Ok(Claim {
            claim_text: row.claim_text,
            status,
            confidence,
            source: row.source,
        })
    }
}

const USER_COLUMNS: &str = "id, username, email, password_hash, profile_picture, category, \
                            trust_score, followers, created_at";

fn map_insert_error(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.is_unique_violation() {
            let field = if db_err.message().contains("users.email") {
                UniqueField::Email
            } else {
                UniqueField::Username
            };
            return RepositoryError::AlreadyExists(field);
        }
    }
    RepositoryError::Database(e)
}

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn claims_for(&self, user_id: &str) -> RepositoryResult<Vec<Claim>> {
        let rows = sqlx::query_as::<_, ClaimRow>(
            r#"
            SELECT user_id, claim_text, status, confidence, source
            FROM claims
            WHERE user_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Claim::try_from).collect()
    }

    async fn find_one(&self, column: &str, value: &str) -> RepositoryResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE {} = ?", USER_COLUMNS, column);
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let claims = self.claims_for(&row.id).await?;
                row.into_user(claims).map(Some)
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create_user(&self, user: &NewUser) -> RepositoryResult<User> {
        let id = Uuid::new_v4();
        let created_at = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO users (
                id, username, email, password_hash, profile_picture,
                category, trust_score, followers, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id.to_string())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.profile_picture)
        .bind(&user.category)
        .bind(user.trust_score)
        .bind(user.followers)
        .bind(&created_at)
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(User {
            id,
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            profile_picture: user.profile_picture.clone(),
            category: user.category.clone(),
            trust_score: user.trust_score,
            followers: user.followers,
            claims: Vec::new(),
            created_at: Some(created_at),
        })
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        self.find_one("email", email).await
    }

    async fn find_by_username(&self, username: &str) -> RepositoryResult<Option<User>> {
        self.find_one("username", username).await
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>> {
        self.find_one("id", &id.to_string()).await
    }

    async fn list_users(&self) -> RepositoryResult<Vec<User>> {
        let sql = format!("SELECT {} FROM users ORDER BY rowid ASC", USER_COLUMNS);
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        let claim_rows = sqlx::query_as::<_, ClaimRow>(
            "SELECT user_id, claim_text, status, confidence, source FROM claims ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut claims_by_user: HashMap<String, Vec<Claim>> = HashMap::new();
        for row in claim_rows {
            let user_id = row.user_id.clone();
            claims_by_user
                .entry(user_id)
                .or_default()
                .push(Claim::try_from(row)?);
        }

        rows.into_iter()
            .map(|row| {
                let claims = claims_by_user.remove(&row.id).unwrap_or_default();
                row.into_user(claims)
            })
            .collect()
    }

    async fn append_claim(&self, id: Uuid, claim: &Claim) -> RepositoryResult<()> {
        let user_id = id.to_string();
        let result = sqlx::query(
            r#"
            INSERT INTO claims (user_id, claim_text, status, confidence, source)
            SELECT ?, ?, ?, ?, ?
            WHERE EXISTS (SELECT 1 FROM users WHERE id = ?)
            "#,
        )
        .bind(&user_id)
        .bind(&claim.claim_text)
        .bind(claim.status.as_str())
        .bind(i64::from(claim.confidence))
        .bind(&claim.source)
        .bind(&user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete_user(&self, id: Uuid) -> RepositoryResult<()> {
        let user_id = id.to_string();
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM claims WHERE user_id = ?")
            .bind(&user_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(&user_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        tx.commit().await?;
        Ok(())
    }
}
