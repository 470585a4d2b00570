use std::sync::Arc;
use trustboard::{
    models::{account::LoginRequest, account::RegisterRequest},
    repositories::{SqliteUserRepository, UniqueField, UserRepository},
    services::{
        account_service::{verify_password, AccountServiceError},
        AccountService,
    },
    test_utils::test_helpers,
};

async fn setup() -> (AccountService, Arc<SqliteUserRepository>) {
    let pool = test_helpers::create_test_db().await.unwrap();
    let repository = Arc::new(SqliteUserRepository::new(pool));
    (AccountService::new(repository.clone()), repository)
}

fn login(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_register_then_login_returns_same_id() {
    let (service, _) = setup().await;

    let request = RegisterRequest {
        username: Some("alice".to_string()),
        email: Some("a@x.com".to_string()),
        password: Some("pw123".to_string()),
        category: Some("fitness".to_string()),
        trust_score: Some(10),
        followers: Some(5),
        profile_picture: None,
    };
    let id = service.register(request).await.unwrap();

    let response = service.login(login("a@x.com", "pw123")).await.unwrap();
    assert_eq!(response.user_id, id);
    assert_eq!(response.email, "a@x.com");
}

#[tokio::test]
async fn test_padded_values_are_stored_as_submitted() {
    let (service, repository) = setup().await;

    let request = RegisterRequest {
        username: Some(" alice ".to_string()),
        email: Some("a@x.com ".to_string()),
        password: Some("pw123".to_string()),
        category: Some(" fitness".to_string()),
        trust_score: Some(10),
        followers: Some(5),
        profile_picture: None,
    };
    let id = service.register(request).await.unwrap();

    let user = repository.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(user.username, " alice ");
    assert_eq!(user.email, "a@x.com ");
    assert_eq!(user.category, " fitness");

    let response = service.login(login("a@x.com ", "pw123")).await.unwrap();
    assert_eq!(response.user_id, id);
    assert_eq!(response.email, "a@x.com ");
}

#[tokio::test]
async fn test_duplicate_username_rejected() {
    let (service, _) = setup().await;
    service
        .register(test_helpers::register_request("bob"))
        .await
        .unwrap();

    let mut second = test_helpers::register_request("bob");
    second.email = Some("other@example.com".to_string());

    let result = service.register(second).await;
    assert!(matches!(
        result,
        Err(AccountServiceError::DuplicateKey(UniqueField::Username))
    ));
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let (service, _) = setup().await;
    service
        .register(test_helpers::register_request("carol"))
        .await
        .unwrap();

    let mut second = test_helpers::register_request("dave");
    second.email = Some("carol@example.com".to_string());

    let result = service.register(second).await;
    assert!(matches!(
        result,
        Err(AccountServiceError::DuplicateKey(UniqueField::Email))
    ));
}

#[tokio::test]
async fn test_zero_trust_score_and_followers_are_accepted() {
    let (service, repository) = setup().await;

    let mut request = test_helpers::register_request("newbie");
    request.trust_score = Some(0);
    request.followers = Some(0);

    let id = service.register(request).await.unwrap();
    let stored = repository.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.trust_score, 0);
    assert_eq!(stored.followers, 0);
}

#[tokio::test]
async fn test_missing_fields_are_validation_errors() {
    let (service, repository) = setup().await;

    let cases: [(&str, fn(&mut RegisterRequest)); 6] = [
        ("username", |r| r.username = None),
        ("email", |r| r.email = Some(String::new())),
        ("password", |r| r.password = None),
        ("category", |r| r.category = None),
        ("trustScore", |r| r.trust_score = None),
        ("followers", |r| r.followers = None),
    ];

    for (field, strip) in cases {
        let mut request = test_helpers::register_request("eve");
        strip(&mut request);

        match service.register(request).await {
            Err(AccountServiceError::Validation(msg)) => {
                assert!(msg.contains(field), "{} not mentioned in {:?}", field, msg)
            }
            other => panic!("expected validation error for {}, got {:?}", field, other),
        }
    }

    assert!(repository.list_users().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_password_is_stored_hashed() {
    let (service, repository) = setup().await;

    let id = service
        .register(test_helpers::register_request("frank"))
        .await
        .unwrap();

    let stored = repository.find_by_id(id).await.unwrap().unwrap();
    assert_ne!(stored.password_hash, "password123");
    assert!(verify_password("password123", &stored.password_hash));
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (service, _) = setup().await;
    service
        .register(test_helpers::register_request("grace"))
        .await
        .unwrap();

    for attempt in ["wrongpassword", "", "PASSWORD123"] {
        let result = service.login(login("grace@example.com", attempt)).await;
        assert!(matches!(result, Err(AccountServiceError::InvalidCredentials)));
    }
}

#[tokio::test]
async fn test_login_unknown_email() {
    let (service, _) = setup().await;

    let result = service
        .login(login("nonexistent@example.com", "anypassword"))
        .await;
    assert!(matches!(result, Err(AccountServiceError::InvalidCredentials)));
}

#[tokio::test]
async fn test_login_against_directly_inserted_user() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let id = test_helpers::insert_test_user(&pool, "heidi", "heidi@example.com", "s3cret!")
        .await
        .unwrap();

    let service = AccountService::new(Arc::new(SqliteUserRepository::new(pool)));
    let response = service
        .login(login("heidi@example.com", "s3cret!"))
        .await
        .unwrap();
    assert_eq!(response.user_id, id);
}
