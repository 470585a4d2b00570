pub mod test_helpers {
    use crate::models::account::RegisterRequest;
    use crate::models::user::NewUser;
    use crate::repositories::{SqliteUserRepository, UserRepository};
    use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
    use uuid::Uuid;

    /// Create a new in-memory SQLite database for testing
    pub async fn create_test_db() -> Result<SqlitePool, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        // Run migrations
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(pool)
    }

    /// A complete registration for `username`, with `<username>@example.com`.
    pub fn register_request(username: &str) -> RegisterRequest {
        RegisterRequest {
            username: Some(username.to_string()),
            email: Some(format!("{}@example.com", username)),
            password: Some("password123".to_string()),
            category: Some("fitness".to_string()),
            trust_score: Some(50),
            followers: Some(1000),
            profile_picture: None,
        }
    }

    /// Insert a user directly through the store with an argon2 hash of `password`.
    pub async fn insert_test_user(
        pool: &SqlitePool,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Uuid, sqlx::Error> {
        use argon2::{
            password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
            Argon2,
        };

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                sqlx::Error::Configuration(format!("Password hashing failed: {}", e).into())
            })?
            .to_string();

        let repository = SqliteUserRepository::new(pool.clone());
        let user = repository
            .create_user(&NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
                profile_picture: None,
                category: "fitness".to_string(),
                trust_score: 0,
                followers: 0,
            })
            .await
            .map_err(|e| sqlx::Error::Protocol(e.to_string()))?;

        Ok(user.id)
    }
}
