//! OTP delivery seam.
//!
//! Delivery goes through the hosted SMS gateway in production; the trait
//! keeps that collaborator swappable and lets development run without one.

use std::future::Future;
use std::pin::Pin;

use smile_tailor_core::PhoneNumber;

use super::AuthError;

/// Dispatches a one-time login code to a phone number.
pub trait OtpSender: Send + Sync {
    /// Deliver the plaintext code to the phone.
    fn send<'a>(
        &'a self,
        phone: &'a PhoneNumber,
        code: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(), AuthError>> + Send + 'a>>;
}

/// Development sender: logs the code instead of sending an SMS.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOtpSender;

impl OtpSender for LogOtpSender {
    fn send<'a>(
        &'a self,
        phone: &'a PhoneNumber,
        code: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(), AuthError>> + Send + 'a>> {
        Box::pin(async move {
            tracing::info!(phone = %phone, code, "OTP code issued (log sender)");
            Ok(())
        })
    }
}
