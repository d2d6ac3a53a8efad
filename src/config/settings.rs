//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_TOKEN_ISSUER, MIN_HMAC_KEY_LENGTH, MIN_JWT_SECRET_LENGTH,
};

/// Application configuration, assembled once at startup and handed to
/// every component constructor.
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    jwt_secret: String,
    password_pepper: String,
    hmac_key: String,
    pub token_issuer: String,
    pub log_sql: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("password_pepper", &"[REDACTED]")
            .field("hmac_key", &"[REDACTED]")
            .field("token_issuer", &self.token_issuer)
            .field("log_sql", &self.log_sql)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if JWT_SECRET or HMAC_KEY is missing in a release build, or
    /// shorter than the required minimum.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let jwt_secret = secret_from_env("JWT_SECRET", "dev-secret-key-minimum-32-chars!!");
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            panic!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            );
        }

        let hmac_key = secret_from_env("HMAC_KEY", "the-secret-key");
        if hmac_key.len() < MIN_HMAC_KEY_LENGTH {
            panic!("HMAC_KEY must be at least {} characters long", MIN_HMAC_KEY_LENGTH);
        }

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret,
            password_pepper: secret_from_env("PASSWORD_PEPPER", "mUGD8rTdJe"),
            hmac_key,
            token_issuer: env::var("TOKEN_ISSUER")
                .unwrap_or_else(|_| DEFAULT_TOKEN_ISSUER.to_string()),
            log_sql: env::var("LOG_SQL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }

    /// Build a configuration from explicit values (tests, embedding).
    pub fn new(
        database_url: impl Into<String>,
        jwt_secret: impl Into<String>,
        password_pepper: impl Into<String>,
        hmac_key: impl Into<String>,
    ) -> Self {
        Self {
            database_url: database_url.into(),
            jwt_secret: jwt_secret.into(),
            password_pepper: password_pepper.into(),
            hmac_key: hmac_key.into(),
            token_issuer: DEFAULT_TOKEN_ISSUER.to_string(),
            log_sql: false,
        }
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Pepper mixed into every password hash.
    pub fn password_pepper(&self) -> &str {
        &self.password_pepper
    }

    /// Key used to hash password reset tokens before storage.
    pub fn hmac_key_bytes(&self) -> &[u8] {
        self.hmac_key.as_bytes()
    }
}

fn secret_from_env(key: &str, dev_default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        if cfg!(debug_assertions) {
            tracing::warn!("{} not set, using insecure default for development", key);
            dev_default.to_string()
        } else {
            panic!("{} environment variable must be set in production", key);
        }
    })
}
