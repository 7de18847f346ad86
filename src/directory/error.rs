use thiserror::Error;

/// Outcomes of a directory request other than success.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("email already registered")]
    DuplicateEmail,
    #[error("password shorter than {min} characters")]
    WeakPassword { min: usize },
    #[error("account not found")]
    AccountNotFound,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("internal error: {0}")]
    Internal(String),
}

impl DirectoryError {
    /// Expected, user-facing outcomes as opposed to internal faults.
    #[must_use]
    pub const fn is_expected(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
