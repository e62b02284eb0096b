use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use tracing::Instrument;
use tracing::Span;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::DirectoryError;
use crate::domain::auth::models::AccessToken;
use crate::domain::auth::models::Credentials;
use crate::domain::auth::models::NewUser;
use crate::domain::auth::models::RegisterUserCommand;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::PasswordHasher;
use crate::domain::auth::ports::TokenIssuer;
use crate::domain::auth::ports::UserProvider;
use crate::domain::auth::ports::UserSaver;

/// Domain service implementation for login and registration.
///
/// Holds no per-call state; one instance serves all concurrent requests.
/// Collaborator failures are classified and returned, never retried.
pub struct AuthService<UP, US, PH, TI>
where
    UP: UserProvider,
    US: UserSaver,
    PH: PasswordHasher,
    TI: TokenIssuer,
{
    user_provider: Arc<UP>,
    user_saver: Arc<US>,
    password_hasher: Arc<PH>,
    token_issuer: Arc<TI>,
    token_ttl: Duration,
    span: Span,
}

impl<UP, US, PH, TI> AuthService<UP, US, PH, TI>
where
    UP: UserProvider,
    US: UserSaver,
    PH: PasswordHasher,
    TI: TokenIssuer,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `user_provider` - Directory read side
    /// * `user_saver` - Directory write side
    /// * `password_hasher` - Adaptive password hash
    /// * `token_issuer` - Access token signer
    /// * `token_ttl` - Lifetime of every issued token
    /// * `span` - Parent span for all events emitted by this service
    pub fn new(
        user_provider: Arc<UP>,
        user_saver: Arc<US>,
        password_hasher: Arc<PH>,
        token_issuer: Arc<TI>,
        token_ttl: Duration,
        span: Span,
    ) -> Self {
        Self {
            user_provider,
            user_saver,
            password_hasher,
            token_issuer,
            token_ttl,
            span,
        }
    }
}

/// Run CPU-heavy hashing work on the blocking pool.
async fn run_blocking<T, F>(op: &'static str, work: F) -> Result<T, AuthError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AuthError::internal(op, e))
}

#[async_trait]
impl<UP, US, PH, TI> AuthServicePort for AuthService<UP, US, PH, TI>
where
    UP: UserProvider,
    US: UserSaver,
    PH: PasswordHasher,
    TI: TokenIssuer,
{
    async fn login(&self, credentials: Credentials) -> Result<AccessToken, AuthError> {
        const OP: &str = "auth.login";

        let Credentials { username, password } = credentials;
        let span = tracing::info_span!(parent: &self.span, "login", op = OP, username = %username);

        async move {
            tracing::info!("attempting to login user");

            let user = match self.user_provider.find_by_username(&username).await {
                Ok(Some(user)) => user,
                Ok(None) => {
                    // Same hashing cost as a wrong password.
                    let hasher = Arc::clone(&self.password_hasher);
                    run_blocking(OP, move || hasher.verify_decoy(&password)).await?;

                    tracing::warn!("user not found");
                    return Err(AuthError::InvalidCredentials { op: OP });
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to get user");
                    return Err(AuthError::internal(OP, e));
                }
            };

            let hasher = Arc::clone(&self.password_hasher);
            let stored_hash = user.password_hash.clone();
            let matches = run_blocking(OP, move || hasher.verify(&password, &stored_hash))
                .await?
                .map_err(|e| {
                    tracing::error!(user_id = %user.id, error = %e, "failed to verify password");
                    AuthError::internal(OP, e)
                })?;

            if !matches {
                tracing::info!("invalid credentials");
                return Err(AuthError::InvalidCredentials { op: OP });
            }

            let token = self
                .token_issuer
                .issue(&user, self.token_ttl)
                .map_err(|e| {
                    tracing::error!(user_id = %user.id, error = %e, "failed to generate token");
                    AuthError::internal(OP, e)
                })?;

            tracing::info!(user_id = %user.id, "user logged in successfully");

            Ok(token)
        }
        .instrument(span)
        .await
    }

    async fn register_new_user(
        &self,
        command: RegisterUserCommand,
    ) -> Result<UserId, AuthError> {
        const OP: &str = "auth.register_new_user";

        let RegisterUserCommand {
            name,
            username,
            password,
        } = command;
        let span = tracing::info_span!(
            parent: &self.span,
            "register_new_user",
            op = OP,
            username = %username
        );

        async move {
            tracing::info!("registering user");

            let hasher = Arc::clone(&self.password_hasher);
            let password_hash = run_blocking(OP, move || hasher.hash(&password))
                .await?
                .map_err(|e| {
                    tracing::error!(error = %e, "failed to generate password hash");
                    AuthError::internal(OP, e)
                })?;

            let new_user = NewUser {
                name,
                username,
                password_hash,
            };

            let id = self
                .user_saver
                .save_user(new_user)
                .await
                .map_err(|e| match e {
                    DirectoryError::UsernameTaken(_) => {
                        tracing::warn!("user already exists");
                        AuthError::UserAlreadyExists { op: OP }
                    }
                    other => {
                        tracing::error!(error = %other, "failed to save user");
                        AuthError::internal(OP, other)
                    }
                })?;

            tracing::info!(user_id = %id, "user registered successfully");

            Ok(id)
        }
        .instrument(span)
        .await
    }
}
