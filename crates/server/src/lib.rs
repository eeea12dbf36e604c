//! Smile Tailor server library.
//!
//! HTTP API for a small tailoring shop: guest order submission with image
//! uploads, WhatsApp deep-link summaries and notifications, a phone-OTP
//! login, and the admin order-lifecycle endpoints.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
