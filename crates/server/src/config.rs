//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `TAILOR_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//! - `TAILOR_BASE_URL` - Public URL of the API
//! - `TAILOR_SESSION_SECRET` - Session signing secret (min 32 chars, high entropy)
//! - `SHOP_WHATSAPP_NUMBER` - The shop's WhatsApp number, e.g. `+60132068891`
//!   (new-order summaries go here)
//! - `STORAGE_ENDPOINT` - Object storage base URL
//! - `STORAGE_ACCESS_KEY` - Object storage service key
//!
//! ## Optional
//! - `TAILOR_HOST` - Bind address (default: 127.0.0.1)
//! - `TAILOR_PORT` - Listen port (default: 3000)
//! - `SHOP_NAME` - Shop display name used in messages (default: Smile Alteration & Fashions)
//! - `ADMIN_PHONE_NUMBERS` - Comma-separated phone allowlist for admin access
//! - `STORAGE_BUCKET` - Bucket for order images (default: order-images)
//! - `OTP_TTL_SECONDS` - Login code lifetime (default: 300)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use smile_tailor_core::PhoneNumber;

const MIN_SESSION_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL of the API
    pub base_url: String,
    /// Session signing secret
    pub session_secret: SecretString,
    /// Phones allowed to use admin endpoints
    pub admin_phones: Vec<PhoneNumber>,
    /// Shop identity used in customer messages
    pub shop: ShopConfig,
    /// Object storage configuration
    pub storage: StorageConfig,
    /// Lifetime of a login OTP code
    pub otp_ttl: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Shop identity used when composing WhatsApp messages.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// Display name, also the message signature.
    pub name: String,
    /// The shop's own WhatsApp number; new-order summaries are addressed here.
    pub whatsapp: PhoneNumber,
}

/// Object storage (hosted bucket) configuration.
///
/// Implements `Debug` manually to redact the service key.
#[derive(Clone)]
pub struct StorageConfig {
    /// Storage API base URL
    pub endpoint: String,
    /// Bucket that holds order images
    pub bucket: String,
    /// Service access key
    pub access_key: SecretString,
}

impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("endpoint", &self.endpoint)
            .field("bucket", &self.bucket)
            .field("access_key", &"[REDACTED]")
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("TAILOR_DATABASE_URL")?;
        let host = get_env_or_default("TAILOR_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("TAILOR_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("TAILOR_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("TAILOR_PORT".to_string(), e.to_string()))?;
        let base_url = get_required_env("TAILOR_BASE_URL")?;
        let session_secret = get_validated_secret("TAILOR_SESSION_SECRET")?;
        validate_session_secret(&session_secret, "TAILOR_SESSION_SECRET")?;

        let admin_phones = parse_admin_phones(
            &get_optional_env("ADMIN_PHONE_NUMBERS").unwrap_or_default(),
        )?;

        let shop = ShopConfig::from_env()?;
        let storage = StorageConfig::from_env()?;

        let otp_ttl_secs = get_env_or_default("OTP_TTL_SECONDS", "300")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("OTP_TTL_SECONDS".to_string(), e.to_string())
            })?;

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            session_secret,
            admin_phones,
            shop,
            storage,
            otp_ttl: Duration::from_secs(otp_ttl_secs),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the given phone is on the admin allowlist.
    #[must_use]
    pub fn is_admin_phone(&self, phone: &PhoneNumber) -> bool {
        self.admin_phones.contains(phone)
    }
}

impl ShopConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw_number = get_required_env("SHOP_WHATSAPP_NUMBER")?;
        let whatsapp = PhoneNumber::normalize(&raw_number).map_err(|e| {
            ConfigError::InvalidEnvVar("SHOP_WHATSAPP_NUMBER".to_string(), e.to_string())
        })?;

        Ok(Self {
            name: get_env_or_default("SHOP_NAME", "Smile Alteration & Fashions"),
            whatsapp,
        })
    }
}

impl StorageConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let endpoint = get_required_env("STORAGE_ENDPOINT")?;
        url::Url::parse(&endpoint).map_err(|e| {
            ConfigError::InvalidEnvVar("STORAGE_ENDPOINT".to_string(), e.to_string())
        })?;

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            bucket: get_env_or_default("STORAGE_BUCKET", "order-images"),
            access_key: get_validated_secret("STORAGE_ACCESS_KEY")?,
        })
    }
}

/// Parse the comma-separated admin allowlist.
///
/// Empty segments are skipped; each entry is normalized the same way a
/// customer phone is, so `0123456789` and `+60123456789` match each other.
fn parse_admin_phones(raw: &str) -> Result<Vec<PhoneNumber>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            PhoneNumber::normalize(s).map_err(|e| {
                ConfigError::InvalidEnvVar("ADMIN_PHONE_NUMBERS".to_string(), e.to_string())
            })
        })
        .collect()
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that a session secret meets minimum length requirements.
fn validate_session_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SESSION_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_admin_phones_skips_empty_segments() {
        let phones = parse_admin_phones("0123456789,, +60198765432 ,").unwrap();
        assert_eq!(phones.len(), 2);
        assert_eq!(phones[0].as_str(), "+60123456789");
        assert_eq!(phones[1].as_str(), "+60198765432");
    }

    #[test]
    fn test_parse_admin_phones_empty_list() {
        assert!(parse_admin_phones("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_admin_phones_rejects_garbage() {
        assert!(parse_admin_phones("not-a-phone").is_err());
    }

    #[test]
    fn test_allowlist_matches_normalized_forms() {
        let config = test_config(vec![PhoneNumber::normalize("0123456789").unwrap()]);
        let candidate = PhoneNumber::normalize("+60123456789").unwrap();
        assert!(config.is_admin_phone(&candidate));

        let other = PhoneNumber::normalize("0999999999").unwrap();
        assert!(!config.is_admin_phone(&other));
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("changeme123", "TEST_VAR");
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InsecureSecret(_, _)
        ));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        assert!(validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR").is_err());
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        assert!(validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "TEST_VAR").is_ok());
    }

    #[test]
    fn test_validate_session_secret_too_short() {
        let secret = SecretString::from("short");
        assert!(validate_session_secret(&secret, "TEST_SESSION").is_err());
    }

    #[test]
    fn test_socket_addr() {
        let config = test_config(vec![]);
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_storage_config_debug_redacts_key() {
        let config = StorageConfig {
            endpoint: "https://storage.example.dev".to_string(),
            bucket: "order-images".to_string(),
            access_key: SecretString::from("super_secret_service_key"),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("order-images"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_service_key"));
    }

    fn test_config(admin_phones: Vec<PhoneNumber>) -> ServerConfig {
        ServerConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            session_secret: SecretString::from("x".repeat(32)),
            admin_phones,
            shop: ShopConfig {
                name: "Smile Alteration & Fashions".to_string(),
                whatsapp: PhoneNumber::normalize("+60132068891").unwrap(),
            },
            storage: StorageConfig {
                endpoint: "https://storage.example.dev".to_string(),
                bucket: "order-images".to_string(),
                access_key: SecretString::from("key"),
            },
            otp_ttl: Duration::from_secs(300),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}
