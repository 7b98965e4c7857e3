//! Authentication and password hashing.
//!
//! This module provides:
//! - Argon2id password storage and login checks
//! - Registration credential checks

mod password;

pub use password::{PasswordError, check_password, hash_password};

use dompet_shared::AppError;
use thiserror::Error;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Reasons registration credentials are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CredentialsError {
    /// Email or password missing or blank.
    #[error("Email and password are required")]
    Missing,

    /// Password shorter than [`MIN_PASSWORD_LEN`].
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
}

/// Credentials that passed the presence checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials<'a> {
    /// Trimmed email.
    pub email: &'a str,
    /// Password as given.
    pub password: &'a str,
}

/// Checks that both fields are present.
///
/// Used for login, where password length is not re-checked.
pub fn require_credentials<'a>(
    email: Option<&'a str>,
    password: Option<&'a str>,
) -> Result<Credentials<'a>, CredentialsError> {
    let email = email.map(str::trim).filter(|e| !e.is_empty());
    let password = password.filter(|p| !p.is_empty());

    match (email, password) {
        (Some(email), Some(password)) => Ok(Credentials { email, password }),
        _ => Err(CredentialsError::Missing),
    }
}

/// Checks presence and password length for a new account.
pub fn validate_registration<'a>(
    email: Option<&'a str>,
    password: Option<&'a str>,
) -> Result<Credentials<'a>, CredentialsError> {
    let credentials = require_credentials(email, password)?;
    if credentials.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CredentialsError::PasswordTooShort);
    }
    Ok(credentials)
}

impl From<CredentialsError> for AppError {
    fn from(err: CredentialsError) -> Self {
        Self::Validation(err.to_string())
    }
}
