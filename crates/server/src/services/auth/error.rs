//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors from the phone-OTP flow.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The submitted code does not match a live, unused code.
    #[error("invalid or expired code")]
    InvalidCode,

    /// The code could not be dispatched to the phone.
    #[error("code dispatch failed: {0}")]
    Send(String),

    /// Underlying database failure.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}
