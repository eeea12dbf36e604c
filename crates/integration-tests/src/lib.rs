//! Integration tests for Smile Tailor.
//!
//! The tests in `tests/` exercise a running server over HTTP and are
//! `#[ignore]`d by default.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database, migrate and seed
//! cargo run -p smile-tailor-cli -- migrate
//! cargo run -p smile-tailor-cli -- seed services
//!
//! # Start the server
//! cargo run -p smile-tailor-server
//!
//! # Run integration tests
//! cargo test -p smile-tailor-integration-tests -- --ignored
//! ```
//!
//! The server under test is located via `TAILOR_BASE_URL`
//! (default `http://localhost:3000`).
