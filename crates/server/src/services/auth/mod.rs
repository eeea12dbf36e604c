//! Phone-OTP authentication service.
//!
//! Issue: generate a short-lived 6-digit code, store only its SHA-256, and
//! hand the plaintext to an [`OtpSender`] for delivery. Verify: consume a
//! matching unexpired code and lazily create the principal row on first
//! login. Sessions themselves are handled by the session layer; this module
//! only produces the verified [`User`].

mod error;
mod sender;

pub use error::AuthError;
pub use sender::{LogOtpSender, OtpSender};

use std::time::Duration;

use chrono::Utc;
use rand::Rng;
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use tracing::instrument;

use smile_tailor_core::PhoneNumber;

use crate::db;
use crate::models::User;

/// Phone-OTP issue/verify operations.
pub struct AuthService<'a> {
    pool: &'a PgPool,
    sender: &'a dyn OtpSender,
    ttl: Duration,
}

impl<'a> AuthService<'a> {
    /// Create a new auth service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, sender: &'a dyn OtpSender, ttl: Duration) -> Self {
        Self { pool, sender, ttl }
    }

    /// Issue a login code for the given phone and dispatch it.
    ///
    /// # Errors
    ///
    /// Returns error if storing the code or dispatching it fails.
    #[instrument(skip(self), fields(phone = %phone))]
    pub async fn request_code(&self, phone: &PhoneNumber) -> Result<(), AuthError> {
        let code = generate_code();
        let expires_at = Utc::now()
            + chrono::Duration::from_std(self.ttl)
                .map_err(|e| AuthError::Send(format!("invalid OTP ttl: {e}")))?;

        db::otp::insert_code(self.pool, phone, &hash_code(&code), expires_at).await?;

        // Stale rows accumulate one per request; sweep opportunistically.
        let _ = db::otp::prune_expired(self.pool).await;

        self.sender.send(phone, &code).await
    }

    /// Verify a submitted code and return the (lazily created) principal.
    ///
    /// The code is consumed on success; replaying it fails.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCode` if no matching live code exists.
    #[instrument(skip(self, code), fields(phone = %phone))]
    pub async fn verify_code(&self, phone: &PhoneNumber, code: &str) -> Result<User, AuthError> {
        let consumed = db::otp::consume_code(self.pool, phone, &hash_code(code.trim())).await?;
        if !consumed {
            return Err(AuthError::InvalidCode);
        }

        let user = db::users::create_if_missing(self.pool, phone).await?;
        Ok(user)
    }
}

/// Generate a 6-digit login code, zero-padded.
fn generate_code() -> String {
    let n: u32 = rand::rng().random_range(0..1_000_000);
    format!("{n:06}")
}

/// SHA-256 of the code, hex-encoded, as stored in the database.
fn hash_code(code: &str) -> String {
    let digest = Sha256::digest(code.as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_code_is_six_digits() {
        for _ in 0..50 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_hash_code_is_stable_hex() {
        let a = hash_code("123456");
        let b = hash_code("123456");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert_ne!(a, hash_code("123457"));
    }
}
