use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// A registered account as held by the directory.
#[derive(Debug, Clone)]
pub(super) struct Account {
    pub(super) username: String,
    pub(super) email: String,
    pub(super) password_hash: String,
}

impl Account {
    pub(super) fn public(&self) -> PublicAccount {
        PublicAccount {
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}

/// The view of an account returned to callers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PublicAccount {
    pub username: String,
    pub email: String,
}

/// Account used to initialise a directory.
#[derive(Deserialize, Debug, Clone)]
pub struct SeedAccount {
    pub username: String,
    pub email: String,
    pub password: SecretString,
}

impl SeedAccount {
    #[must_use]
    pub fn new(username: &str, email: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            email: email.to_string(),
            password: SecretString::from(password),
        }
    }
}

/// The neighbour every fresh town starts with.
#[must_use]
pub fn default_seed() -> Vec<SeedAccount> {
    vec![SeedAccount::new("Vecino1", "test@town.com", "password123")]
}

/// Read a JSON array of seed accounts.
///
/// # Errors
/// Returns an error if the file cannot be read or is not a JSON array of accounts.
pub fn load_seed_file(path: &Path) -> Result<Vec<SeedAccount>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file: {}", path.display()))?;

    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse seed file: {}", path.display()))
}
