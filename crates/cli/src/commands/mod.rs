//! CLI subcommand implementations.

pub mod migrate;
pub mod seed;

use secrecy::SecretString;

/// Resolve the database URL from the environment.
///
/// Prefers `TAILOR_DATABASE_URL`, falling back to `DATABASE_URL` - the same
/// order the server uses.
pub fn database_url() -> Result<SecretString, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    std::env::var("TAILOR_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "TAILOR_DATABASE_URL (or DATABASE_URL) not set".into())
}
