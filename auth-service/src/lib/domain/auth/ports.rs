use async_trait::async_trait;
use chrono::Duration;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::DirectoryError;
use crate::domain::auth::errors::PasswordError;
use crate::domain::auth::errors::TokenError;
use crate::domain::auth::models::AccessToken;
use crate::domain::auth::models::Credentials;
use crate::domain::auth::models::NewUser;
use crate::domain::auth::models::Password;
use crate::domain::auth::models::PasswordHash;
use crate::domain::auth::models::RegisterUserCommand;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::models::Username;

/// Port for authentication domain service operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and issue an access token.
    ///
    /// # Arguments
    /// * `credentials` - Non-empty username and password
    ///
    /// # Returns
    /// Signed access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `Internal` - Directory, verification, or signing failure
    async fn login(&self, credentials: Credentials) -> Result<AccessToken, AuthError>;

    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Display name, username, and plaintext password
    ///
    /// # Returns
    /// Identifier assigned by the directory
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Username is already taken
    /// * `Internal` - Hashing or directory failure
    async fn register_new_user(&self, command: RegisterUserCommand)
        -> Result<UserId, AuthError>;
}

/// Read side of the user directory.
#[async_trait]
pub trait UserProvider: Send + Sync + 'static {
    /// Retrieve user by username.
    ///
    /// # Arguments
    /// * `username` - Username to search for
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `InvalidRecord` - Stored row cannot be turned into a user
    /// * `Database` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, DirectoryError>;
}

/// Write side of the user directory.
#[async_trait]
pub trait UserSaver: Send + Sync + 'static {
    /// Persist a new user and assign its identifier.
    ///
    /// # Arguments
    /// * `user` - Name, username, and password hash
    ///
    /// # Returns
    /// Newly assigned user ID
    ///
    /// # Errors
    /// * `UsernameTaken` - Username uniqueness constraint violated
    /// * `Database` - Database operation failed
    async fn save_user(&self, user: NewUser) -> Result<UserId, DirectoryError>;
}

/// Adaptive, salted password hashing.
///
/// Implementations are deliberately slow; callers run them off the async executor.
pub trait PasswordHasher: Send + Sync + 'static {
    /// Hash a plaintext password with a fresh salt.
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordError>;

    /// Compare a plaintext password with a stored hash.
    ///
    /// Returns `Ok(false)` on mismatch; errors only when the stored hash is unusable.
    fn verify(&self, password: &Password, hash: &PasswordHash) -> Result<bool, PasswordError>;

    /// Spend the cost of one `verify` without a stored hash.
    fn verify_decoy(&self, password: &Password);
}

/// Creates signed access tokens.
pub trait TokenIssuer: Send + Sync + 'static {
    /// Issue a token for `user` that expires `ttl` from now.
    ///
    /// # Errors
    /// * `SigningFailed` - Claims could not be signed
    fn issue(&self, user: &User, ttl: Duration) -> Result<AccessToken, TokenError>;
}
