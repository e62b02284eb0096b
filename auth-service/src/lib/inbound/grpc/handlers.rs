use tonic::Status;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::ErrorKind;

pub mod login;
pub mod register_new_user;

/// Translate a service error into a caller-safe status.
///
/// Internal causes stay in the server logs; the caller only sees a generic message.
impl From<AuthError> for Status {
    fn from(err: AuthError) -> Self {
        match err.kind() {
            ErrorKind::InvalidCredentials => Status::not_found("user not found"),
            ErrorKind::UserAlreadyExists => Status::already_exists("user already exists"),
            ErrorKind::Internal => Status::internal("internal server error"),
        }
    }
}
