//! Argon2id password storage for accounts.

use argon2::{
    Argon2, PasswordHash,
    password_hash::{self, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use dompet_shared::AppError;
use thiserror::Error;

/// Failures while storing or checking an account password.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// Registration could not hash the password.
    #[error("failed to hash password: {0}")]
    Hash(String),

    /// The password does not match the account.
    #[error("Invalid email or password")]
    Mismatch,

    /// The stored hash is not a PHC string Argon2 can check.
    #[error("unusable stored password hash: {0}")]
    StoredHash(String),
}

/// Hashes a new account password into a PHC string with a fresh salt.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Checks a login password against the account's stored hash.
///
/// # Errors
///
/// Returns `PasswordError::Mismatch` for a wrong password and
/// `PasswordError::StoredHash` when the stored value cannot be parsed.
pub fn check_password(password: &str, stored_hash: &str) -> Result<(), PasswordError> {
    let parsed =
        PasswordHash::new(stored_hash).map_err(|e| PasswordError::StoredHash(e.to_string()))?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|e| match e {
            password_hash::Error::Password => PasswordError::Mismatch,
            other => PasswordError::StoredHash(other.to_string()),
        })
}

impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::Mismatch => Self::Unauthorized(err.to_string()),
            PasswordError::Hash(_) | PasswordError::StoredHash(_) => {
                Self::Internal(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_hash_round_trip() {
        let stored = hash_password("rahasia123").unwrap();

        assert!(stored.starts_with("$argon2id$"));
        assert!(check_password("rahasia123", &stored).is_ok());
        assert!(matches!(
            check_password("rahasia124", &stored),
            Err(PasswordError::Mismatch)
        ));
    }

    #[test]
    fn test_each_account_gets_its_own_salt() {
        assert_ne!(hash_password("sama").unwrap(), hash_password("sama").unwrap());
    }

    #[test]
    fn test_wrong_password_is_unauthorized() {
        let err: AppError = PasswordError::Mismatch.into();

        assert_eq!(err.status_code(), 401);
        assert_eq!(err.message(), "Invalid email or password");
    }

    #[test]
    fn test_corrupt_stored_hash_is_internal() {
        let err = check_password("secret", "plaintext-left-in-db").unwrap_err();

        assert!(matches!(err, PasswordError::StoredHash(_)));
        assert!(AppError::from(err).is_server_error());
    }
}
