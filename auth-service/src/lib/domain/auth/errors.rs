use thiserror::Error;

/// Boxed cause carried by internal failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("username is empty")]
    Empty,
}

/// Error for DisplayName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DisplayNameError {
    #[error("name is empty")]
    Empty,
}

/// Error for plaintext password validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordInputError {
    #[error("password is empty")]
    Empty,
}

/// Error reported by the user directory.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("username already taken: {0}")]
    UsernameTaken(String),

    #[error("malformed user record: {0}")]
    InvalidRecord(String),

    #[error("database error: {0}")]
    Database(String),
}

/// Error for password hashing operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    HashingFailed(String),

    #[error("password verification failed: {0}")]
    VerificationFailed(String),
}

/// Error for token issuance
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token signing failed: {0}")]
    SigningFailed(String),
}

/// Classification of an `AuthError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidCredentials,
    UserAlreadyExists,
    Internal,
}

/// Error returned by the authentication service.
///
/// Every variant records the operation it came from. `InvalidCredentials`
/// deliberately does not say whether the username or the password was wrong.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{op}: invalid credentials")]
    InvalidCredentials { op: &'static str },

    #[error("{op}: user already exists")]
    UserAlreadyExists { op: &'static str },

    #[error("{op}: {source}")]
    Internal {
        op: &'static str,
        #[source]
        source: BoxError,
    },
}

impl AuthError {
    pub fn internal(op: &'static str, source: impl Into<BoxError>) -> Self {
        AuthError::Internal {
            op,
            source: source.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials { .. } => ErrorKind::InvalidCredentials,
            AuthError::UserAlreadyExists { .. } => ErrorKind::UserAlreadyExists,
            AuthError::Internal { .. } => ErrorKind::Internal,
        }
    }

    pub fn op(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials { op }
            | AuthError::UserAlreadyExists { op }
            | AuthError::Internal { op, .. } => op,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn test_internal_keeps_cause_chain() {
        let err = AuthError::internal(
            "auth.register_new_user",
            DirectoryError::Database("connection reset".to_string()),
        );

        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(err.op(), "auth.register_new_user");
        assert_eq!(
            err.to_string(),
            "auth.register_new_user: database error: connection reset"
        );

        let cause = err
            .source()
            .and_then(|e| e.downcast_ref::<DirectoryError>())
            .expect("cause should be the directory error");
        assert_eq!(
            cause,
            &DirectoryError::Database("connection reset".to_string())
        );
    }

    #[test]
    fn test_kind_ignores_operation() {
        let login = AuthError::InvalidCredentials { op: "auth.login" };
        let other = AuthError::InvalidCredentials { op: "elsewhere" };

        assert_eq!(login.kind(), other.kind());
        assert_ne!(
            login.kind(),
            AuthError::UserAlreadyExists { op: "auth.login" }.kind()
        );
    }
}
