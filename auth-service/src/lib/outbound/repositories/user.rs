use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::auth::errors::DirectoryError;
use crate::domain::auth::models::DisplayName;
use crate::domain::auth::models::NewUser;
use crate::domain::auth::models::PasswordHash;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::models::Username;
use crate::domain::auth::ports::UserProvider;
use crate::domain::auth::ports::UserSaver;

/// PostgreSQL user directory.
///
/// Username uniqueness is enforced by the `users_username_key` constraint.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    username: String,
    password_hash: Vec<u8>,
}

impl TryFrom<UserRow> for User {
    type Error = DirectoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            name: DisplayName::new(row.name)
                .map_err(|e| DirectoryError::InvalidRecord(format!("user {}: {}", row.id, e)))?,
            username: Username::new(row.username)
                .map_err(|e| DirectoryError::InvalidRecord(format!("user {}: {}", row.id, e)))?,
            password_hash: PasswordHash::new(row.password_hash),
        })
    }
}

#[async_trait]
impl UserProvider for PostgresUserRepository {
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, DirectoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, username, password_hash
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DirectoryError::Database(e.to_string()))?;

        row.map(User::try_from).transpose()
    }
}

#[async_trait]
impl UserSaver for PostgresUserRepository {
    async fn save_user(&self, user: NewUser) -> Result<UserId, DirectoryError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (name, username, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(user.name.as_str())
        .bind(user.username.as_str())
        .bind(user.password_hash.as_bytes())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return DirectoryError::UsernameTaken(user.username.as_str().to_string());
                }
            }
            DirectoryError::Database(e.to_string())
        })?;

        Ok(UserId(id))
    }
}
