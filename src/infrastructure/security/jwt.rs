//! HS256 JSON Web Tokens with purpose scopes.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Purpose a token was issued for. A token is only accepted for its own scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenScope {
    AccessToken,
    RefreshToken,
    EmailVerificationToken,
    PasswordResetToken,
    PasswordSetToken,
}

impl fmt::Display for TokenScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenScope::AccessToken => "access_token",
            TokenScope::RefreshToken => "refresh_token",
            TokenScope::EmailVerificationToken => "email_verification_token",
            TokenScope::PasswordResetToken => "password_reset_token",
            TokenScope::PasswordSetToken => "password_set_token",
        };
        f.write_str(s)
    }
}

/// Registered claims carried by every token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Account email.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    /// Random nonce so tokens issued within the same second differ.
    pub jti: String,
    pub scope: TokenScope,
}

impl Claims {
    /// Seconds until expiry, clamped at zero.
    pub fn remaining_seconds(&self) -> u64 {
        (self.exp - Utc::now().timestamp()).max(0) as u64
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,
    #[error("token scope mismatch: expected {expected}")]
    WrongScope { expected: TokenScope },
    #[error("invalid token: {0}")]
    Invalid(String),
    #[error("failed to encode token: {0}")]
    Encoding(String),
}

/// Token lifetimes per scope.
#[derive(Debug, Clone, Copy)]
pub struct TokenLifetimes {
    pub access: Duration,
    pub refresh: Duration,
    /// Applies to both email verification and password reset tokens.
    pub email: Duration,
    pub password_set: Duration,
}

impl TokenLifetimes {
    pub fn from_seconds(access: u64, refresh: u64, email: u64, password_set: u64) -> Self {
        let secs = |s: u64| Duration::seconds(i64::try_from(s).unwrap_or(i64::MAX / 1000));
        Self {
            access: secs(access),
            refresh: secs(refresh),
            email: secs(email),
            password_set: secs(password_set),
        }
    }

    fn for_scope(&self, scope: TokenScope) -> Duration {
        match scope {
            TokenScope::AccessToken => self.access,
            TokenScope::RefreshToken => self.refresh,
            TokenScope::EmailVerificationToken | TokenScope::PasswordResetToken => self.email,
            TokenScope::PasswordSetToken => self.password_set,
        }
    }
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self::from_seconds(15 * 60, 7 * 24 * 3600, 7 * 24 * 3600, 15 * 60)
    }
}

/// Issues and verifies scoped tokens with a shared secret.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    lifetimes: TokenLifetimes,
}

impl TokenCodec {
    pub fn new(secret: &str, lifetimes: TokenLifetimes) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            lifetimes,
        }
    }

    /// Issues a token for `subject` with the lifetime configured for `scope`.
    pub fn issue(&self, subject: &str, scope: TokenScope) -> Result<String, TokenError> {
        self.issue_with_ttl(subject, scope, self.lifetimes.for_scope(scope))
    }

    pub fn issue_with_ttl(
        &self,
        subject: &str,
        scope: TokenScope,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::Encoding("token lifetime out of range".to_string()))?;
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: hex::encode(rand::rng().random::<[u8; 16]>()),
            scope,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Verifies signature, expiry and scope, returning the claims.
    pub fn verify(&self, token: &str, expected: TokenScope) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "Failed to decode token");
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Invalid(e.to_string()),
                }
            })?;

        if claims.scope != expected {
            return Err(TokenError::WrongScope { expected });
        }

        Ok(claims)
    }
}
