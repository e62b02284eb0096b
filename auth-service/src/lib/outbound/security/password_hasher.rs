use crate::domain::auth::errors::PasswordError;
use crate::domain::auth::models::Password;
use crate::domain::auth::models::PasswordHash;
use crate::domain::auth::ports::PasswordHasher;

/// Argon2id password hashing backed by the shared `auth` library.
///
/// Hashes are stored as the UTF-8 bytes of the PHC string.
pub struct Argon2PasswordHasher {
    hasher: auth::PasswordHasher,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self {
            hasher: auth::PasswordHasher::new(),
        }
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl From<auth::PasswordError> for PasswordError {
    fn from(err: auth::PasswordError) -> Self {
        match err {
            auth::PasswordError::HashingFailed(msg) => PasswordError::HashingFailed(msg),
            auth::PasswordError::VerificationFailed(msg) => PasswordError::VerificationFailed(msg),
        }
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordError> {
        let phc = self.hasher.hash(password.expose())?;
        Ok(PasswordHash::new(phc.into_bytes()))
    }

    fn verify(&self, password: &Password, hash: &PasswordHash) -> Result<bool, PasswordError> {
        let phc = std::str::from_utf8(hash.as_bytes()).map_err(|e| {
            PasswordError::VerificationFailed(format!("stored hash is not UTF-8: {}", e))
        })?;

        Ok(self.hasher.verify(password.expose(), phc)?)
    }

    fn verify_decoy(&self, password: &Password) {
        self.hasher.verify_decoy(password.expose());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn password(value: &str) -> Password {
        Password::new(value.to_string()).unwrap()
    }

    #[test]
    fn test_round_trip() {
        let hasher = Argon2PasswordHasher::new();

        let hash = hasher.hash(&password("s3cret1")).unwrap();
        assert!(hash.as_bytes().starts_with(b"$argon2id$"));

        assert!(hasher.verify(&password("s3cret1"), &hash).unwrap());
        assert!(!hasher.verify(&password("wrongpw"), &hash).unwrap());
    }

    #[test]
    fn test_different_passwords_never_cross_verify() {
        let hasher = Argon2PasswordHasher::new();
        let pairs = [("a", "b"), ("s3cret1", "s3cret2"), ("pass word", "password")];

        for (stored, attempted) in pairs {
            let hash = hasher.hash(&password(stored)).unwrap();
            assert!(hasher.verify(&password(stored), &hash).unwrap());
            assert!(!hasher.verify(&password(attempted), &hash).unwrap());
        }
    }

    #[test]
    fn test_oversized_password_fails_hashing() {
        let hasher = Argon2PasswordHasher::new();
        let long = password(&"x".repeat(auth::MAX_PASSWORD_BYTES + 1));

        assert!(matches!(
            hasher.hash(&long),
            Err(PasswordError::HashingFailed(_))
        ));
    }

    #[test]
    fn test_verify_rejects_non_utf8_hash() {
        let hasher = Argon2PasswordHasher::new();
        let garbage = PasswordHash::new(vec![0xff, 0xfe, 0xfd]);

        assert!(matches!(
            hasher.verify(&password("s3cret1"), &garbage),
            Err(PasswordError::VerificationFailed(_))
        ));
    }
}
