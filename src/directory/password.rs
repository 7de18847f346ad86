//! Argon2id hashing for stored credentials.
//!
//! Hashing is CPU bound, so both operations run on the blocking pool and never
//! while the directory lock is held.

use super::error::{DirectoryError, Result};
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use secrecy::{ExposeSecret, SecretString};
use tracing::error;

/// Hash a password into a PHC string with a fresh random salt.
fn hash_blocking(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            error!("Error hashing password: {e}");

            DirectoryError::Internal("failed to hash password".to_string())
        })
}

/// Check a password against a stored PHC string.
fn verify_blocking(password: &str, password_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(password_hash).map_err(|e| {
        error!("Stored password hash is malformed: {e}");

        DirectoryError::Internal("malformed password hash".to_string())
    })?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

pub(super) async fn hash(password: &SecretString) -> Result<String> {
    let password = SecretString::from(password.expose_secret());

    tokio::task::spawn_blocking(move || hash_blocking(password.expose_secret()))
        .await
        .map_err(|e| DirectoryError::Internal(format!("hashing task failed: {e}")))?
}

pub(super) async fn verify(password: &SecretString, password_hash: &str) -> Result<bool> {
    let password = SecretString::from(password.expose_secret());
    let password_hash = password_hash.to_string();

    tokio::task::spawn_blocking(move || verify_blocking(password.expose_secret(), &password_hash))
        .await
        .map_err(|e| DirectoryError::Internal(format!("verification task failed: {e}")))?
}
