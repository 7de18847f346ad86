//! The `{ success, message, user? }` envelope rendered by the front end.

use super::{account::PublicAccount, error::DirectoryError};
use serde::{Deserialize, Serialize};
use tracing::error;

pub const MSG_REGISTERED: &str = "User registered successfully.";
pub const MSG_LOGGED_IN: &str = "Login successful.";
pub const MSG_DUPLICATE_EMAIL: &str = "That email is already registered.";
pub const MSG_ACCOUNT_NOT_FOUND: &str = "Invalid credentials (user not found).";
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid credentials (wrong password).";
pub const MSG_INTERNAL: &str = "Internal error, please try again.";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<PublicAccount>,
}

impl Outcome {
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            user: None,
        }
    }

    #[must_use]
    pub fn from_register(result: Result<(), DirectoryError>) -> Self {
        match result {
            Ok(()) => Self {
                success: true,
                message: MSG_REGISTERED.to_string(),
                user: None,
            },
            Err(e) => Self::from_error(&e),
        }
    }

    #[must_use]
    pub fn from_authenticate(result: Result<PublicAccount, DirectoryError>) -> Self {
        match result {
            Ok(user) => Self {
                success: true,
                message: MSG_LOGGED_IN.to_string(),
                user: Some(user),
            },
            Err(e) => Self::from_error(&e),
        }
    }

    fn from_error(err: &DirectoryError) -> Self {
        let message = match err {
            DirectoryError::DuplicateEmail => MSG_DUPLICATE_EMAIL.to_string(),
            DirectoryError::WeakPassword { min } => {
                format!("Password must be at least {min} characters.")
            }
            DirectoryError::AccountNotFound => MSG_ACCOUNT_NOT_FOUND.to_string(),
            DirectoryError::InvalidCredentials => MSG_INVALID_CREDENTIALS.to_string(),
            DirectoryError::Internal(detail) => {
                error!("Request failed: {detail}");

                MSG_INTERNAL.to_string()
            }
        };

        Self::failure(message)
    }
}
