//! Token service - Issues and verifies signed principal tokens.
//!
//! Signing is a capability (`TokenSigner`) so the issuance rules can be
//! tested independently of the JWT backend.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::{TOKEN_LIFETIME_HOURS, TOKEN_NOT_BEFORE_MINUTES};
use crate::errors::{AppError, AppResult};
use crate::infra::Clock;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Signed token payload. Times are Unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthClaims {
    pub iss: String,
    /// Authenticated principal
    pub email: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
}

/// Signature capability: produce and check signatures only.
/// Validity windows are enforced by `TokenIssuer`.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait TokenSigner: Send + Sync {
    fn sign(&self, claims: &AuthClaims) -> AppResult<String>;

    /// Unauthorized when the token is malformed or the signature does not match
    fn verify(&self, token: &str) -> AppResult<AuthClaims>;
}

/// HS256 JWT signer
pub struct JwtSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtSigner {
    pub fn new(secret: &[u8]) -> AppResult<Self> {
        if secret.is_empty() {
            return Err(AppError::internal("token signing key is not configured"));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.set_required_spec_claims(&["exp", "nbf", "iat", "iss"]);

        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        })
    }
}

impl TokenSigner for JwtSigner {
    fn sign(&self, claims: &AuthClaims) -> AppResult<String> {
        Ok(encode(&Header::new(Algorithm::HS256), claims, &self.encoding)?)
    }

    fn verify(&self, token: &str) -> AppResult<AuthClaims> {
        decode::<AuthClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Token rejected: {}", e);
                AppError::Unauthorized
            })
    }
}

/// Token service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TokenService: Send + Sync {
    /// Issue a token for the principal
    async fn issue(&self, principal: &str) -> AppResult<String>;

    /// Verify signature, issuer and validity window
    async fn verify(&self, token: &str) -> AppResult<AuthClaims>;
}

/// Concrete implementation of TokenService.
pub struct TokenIssuer {
    signer: Arc<dyn TokenSigner>,
    clock: Arc<dyn Clock>,
    issuer: String,
}

impl TokenIssuer {
    pub fn new(signer: Arc<dyn TokenSigner>, clock: Arc<dyn Clock>, issuer: impl Into<String>) -> Self {
        Self {
            signer,
            clock,
            issuer: issuer.into(),
        }
    }
}

#[async_trait]
impl TokenService for TokenIssuer {
    async fn issue(&self, principal: &str) -> AppResult<String> {
        let now = self.clock.now();
        let claims = AuthClaims {
            iss: self.issuer.clone(),
            email: principal.to_string(),
            iat: now.timestamp(),
            nbf: (now + Duration::minutes(TOKEN_NOT_BEFORE_MINUTES)).timestamp(),
            exp: (now + Duration::hours(TOKEN_LIFETIME_HOURS)).timestamp(),
        };

        let token = self.signer.sign(&claims)?;
        tracing::info!(principal, "Token issued");
        Ok(token)
    }

    async fn verify(&self, token: &str) -> AppResult<AuthClaims> {
        let claims = self.signer.verify(token)?;

        if claims.iss != self.issuer {
            tracing::warn!(issuer = %claims.iss, "Token from unknown issuer");
            return Err(AppError::Unauthorized);
        }

        let now = self.clock.now().timestamp();
        if now < claims.nbf {
            tracing::warn!(principal = %claims.email, "Token used before it is valid");
            return Err(AppError::Unauthorized);
        }
        if now > claims.exp {
            tracing::warn!(principal = %claims.email, "Token expired");
            return Err(AppError::Unauthorized);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_TOKEN_ISSUER;
    use crate::infra::ManualClock;
    use chrono::{TimeZone, Utc};

    const SECRET: &[u8] = b"test-secret-key-at-least-32-chars!!";

    fn issuer(clock: Arc<ManualClock>) -> TokenIssuer {
        let signer = Arc::new(JwtSigner::new(SECRET).unwrap());
        TokenIssuer::new(signer, clock, DEFAULT_TOKEN_ISSUER)
    }

    fn start() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()))
    }

    #[tokio::test]
    async fn test_claims_window() {
        let clock = start();
        let tokens = issuer(clock.clone());

        let token = tokens.issue("jon@calhoun.io").await.unwrap();
        let claims = JwtSigner::new(SECRET).unwrap().verify(&token).unwrap();

        assert_eq!(claims.iss, "Go JobBoard");
        assert_eq!(claims.email, "jon@calhoun.io");
        assert_eq!(claims.nbf - claims.iat, 30 * 60);
        assert_eq!(claims.exp - claims.iat, 24 * 30 * 12 * 3600);
    }

    #[tokio::test]
    async fn test_not_yet_valid_token_is_rejected() {
        let clock = start();
        let tokens = issuer(clock.clone());
        let token = tokens.issue("a@b.com").await.unwrap();

        let result = tokens.verify(&token).await;
        assert!(matches!(result, Err(AppError::Unauthorized)));

        clock.advance(Duration::minutes(31));
        assert!(tokens.verify(&token).await.is_ok());
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let clock = start();
        let tokens = issuer(clock.clone());
        let token = tokens.issue("a@b.com").await.unwrap();

        clock.advance(Duration::hours(TOKEN_LIFETIME_HOURS) + Duration::seconds(1));

        assert!(matches!(tokens.verify(&token).await, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_tampered_token_is_rejected() {
        let clock = start();
        let tokens = issuer(clock.clone());
        let mut token = tokens.issue("a@b.com").await.unwrap();
        clock.advance(Duration::hours(1));

        let last = token.pop().unwrap();
        token.push(if last == 'A' { 'B' } else { 'A' });

        assert!(matches!(tokens.verify(&token).await, Err(AppError::Unauthorized)));
        assert!(matches!(tokens.verify("not-a-token").await, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_foreign_issuer_is_rejected() {
        let clock = start();
        let signer = Arc::new(JwtSigner::new(SECRET).unwrap());
        let other = TokenIssuer::new(signer, clock.clone(), "someone else");
        let token = other.issue("a@b.com").await.unwrap();
        clock.advance(Duration::hours(1));

        assert!(matches!(issuer(clock).verify(&token).await, Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_empty_key_fails() {
        assert!(matches!(JwtSigner::new(b""), Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_signing_failure_is_surfaced() {
        let mut signer = MockTokenSigner::new();
        signer
            .expect_sign()
            .returning(|_| Err(AppError::internal("no key")));
        let tokens = TokenIssuer::new(Arc::new(signer), start(), DEFAULT_TOKEN_ISSUER);

        assert!(tokens.issue("a@b.com").await.is_err());
    }
}
