//! Run with `DATABASE_URL=postgres://... cargo test -- --ignored`.

use auth_service::domain::auth::errors::DirectoryError;
use auth_service::domain::auth::models::DisplayName;
use auth_service::domain::auth::models::NewUser;
use auth_service::domain::auth::models::PasswordHash;
use auth_service::domain::auth::models::Username;
use auth_service::domain::auth::ports::UserProvider;
use auth_service::domain::auth::ports::UserSaver;
use auth_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;

async fn repository() -> PostgresUserRepository {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("Failed to connect to Postgres");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    PostgresUserRepository::new(pool)
}

fn unique_username(prefix: &str) -> Username {
    let suffix = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    Username::new(format!("{}_{}", prefix, suffix)).unwrap()
}

fn new_user(username: Username) -> NewUser {
    NewUser {
        name: DisplayName::new("John".to_string()).unwrap(),
        username,
        password_hash: PasswordHash::new(b"$argon2id$v=19$stub".to_vec()),
    }
}

#[tokio::test]
#[ignore]
async fn test_save_then_find_by_username() {
    let repository = repository().await;
    let username = unique_username("save_find");

    let id = repository.save_user(new_user(username.clone())).await.unwrap();
    let user = repository
        .find_by_username(&username)
        .await
        .unwrap()
        .expect("saved user should be found");

    assert_eq!(user.id, id);
    assert_eq!(user.username, username);
    assert_eq!(user.name.as_str(), "John");
    assert_eq!(user.password_hash.as_bytes(), b"$argon2id$v=19$stub");
}

#[tokio::test]
#[ignore]
async fn test_duplicate_username_is_taken() {
    let repository = repository().await;
    let username = unique_username("duplicate");

    repository.save_user(new_user(username.clone())).await.unwrap();
    let result = repository.save_user(new_user(username.clone())).await;

    assert!(matches!(result, Err(DirectoryError::UsernameTaken(_))));
}

#[tokio::test]
#[ignore]
async fn test_unknown_username_is_none() {
    let repository = repository().await;

    let result = repository
        .find_by_username(&unique_username("missing"))
        .await
        .unwrap();

    assert!(result.is_none());
}
