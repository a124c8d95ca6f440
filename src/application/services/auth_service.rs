//! Account authentication, token lifecycle and email verification.

use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::application::services::email_service::EmailService;
use crate::application::services::user_cache::UserCache;
use crate::domain::entities::{NewUser, Role, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::infrastructure::security::{
    HashError, PasswordHasher, TokenCodec, TokenError, TokenScope,
};
use crate::utils::gravatar::gravatar_url;

pub const SIGNUP_MESSAGE: &str =
    "The user successfully created. Check your email for confirmation";
pub const VERIFICATION_SENT_MESSAGE: &str = "Check your email for confirmation";
pub const ALREADY_CONFIRMED_MESSAGE: &str = "The email is already confirmed";
pub const EMAIL_CONFIRMED_MESSAGE: &str = "Email confirmed";
pub const RESET_SENT_MESSAGE: &str = "Check your email for a password reset";
pub const PASSWORD_SET_MESSAGE: &str = "The password has been reset";

/// Access and refresh tokens issued together on login or refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn credentials_error(reason: &str) -> AppError {
    AppError::unauthorized("Could not validate credentials", json!({ "reason": reason }))
}

fn bearer_token_error(e: TokenError) -> AppError {
    credentials_error(&e.to_string())
}

/// Errors for tokens delivered by email are client mistakes, not auth failures.
fn emailed_token_error(e: TokenError) -> AppError {
    AppError::bad_request("Invalid or expired token", json!({ "reason": e.to_string() }))
}

fn hash_error(e: HashError) -> AppError {
    AppError::internal("Password hashing failed", json!({ "reason": e.to_string() }))
}

/// Service behind the `/api/auth` routes and the bearer-token middleware.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    cache: UserCache,
    tokens: TokenCodec,
    hasher: PasswordHasher,
    email: Arc<EmailService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        cache: UserCache,
        tokens: TokenCodec,
        hasher: PasswordHasher,
        email: Arc<EmailService>,
    ) -> Self {
        Self {
            users,
            cache,
            tokens,
            hasher,
            email,
        }
    }

    /// Registers an account and emails a verification link.
    ///
    /// The first account ever created becomes an administrator.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email or username is taken.
    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        let email = normalize_email(email);
        let username = username.trim();

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(
                "The account already exists",
                json!({ "email": email }),
            ));
        }
        if self.users.find_by_username(username).await?.is_some() {
            return Err(AppError::conflict(
                "The username is already taken",
                json!({ "username": username }),
            ));
        }

        let password_hash = self.hasher.hash(password).map_err(hash_error)?;
        let role = if self.users.count().await? == 0 {
            Role::Administrator
        } else {
            Role::User
        };

        let user = self
            .users
            .create(NewUser {
                username: username.to_string(),
                avatar: Some(gravatar_url(&email)),
                email,
                password_hash,
                role,
                is_email_confirmed: false,
            })
            .await?;

        info!(user_id = user.id, role = %user.role, "User signed up");
        self.cache.put(&user).await;

        match self
            .tokens
            .issue(&user.email, TokenScope::EmailVerificationToken)
        {
            Ok(token) => self
                .email
                .send_verification(&user.email, &user.username, &token),
            Err(e) => warn!(user_id = user.id, error = %e, "Failed to issue verification token"),
        }

        Ok(user)
    }

    /// Exchanges credentials for a token pair and stores the refresh token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for an unknown email, an unconfirmed
    /// email, a password reset in progress, an inactive account or a wrong password.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AppError> {
        let email = normalize_email(email);
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid email", json!({})))?;

        if let Some(reason) = user.login_refusal() {
            return Err(AppError::unauthorized(reason, json!({})));
        }
        if !self
            .hasher
            .verify(password, &user.password_hash)
            .map_err(hash_error)?
        {
            return Err(AppError::unauthorized("Invalid password", json!({})));
        }

        let pair = self.issue_pair(&user).await?;
        info!(user_id = user.id, "User logged in");
        Ok(pair)
    }

    /// Rotates the token pair.
    ///
    /// A refresh token that does not match the stored one is treated as reuse:
    /// the stored token is cleared and the request rejected.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = self
            .tokens
            .verify(refresh_token, TokenScope::RefreshToken)
            .map_err(bearer_token_error)?;

        let user = self
            .users
            .find_by_email(&claims.sub)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid email", json!({})))?;

        if user.refresh_token.as_deref() != Some(refresh_token) {
            warn!(user_id = user.id, "Refresh token mismatch, revoking stored token");
            self.users.update_refresh_token(user.id, None).await?;
            self.cache.evict(&user.email).await;
            return Err(AppError::unauthorized(
                "Invalid refresh token",
                json!({}),
            ));
        }
        if !user.is_active {
            return Err(AppError::unauthorized("The account is inactive", json!({})));
        }

        self.issue_pair(&user).await
    }

    async fn issue_pair(&self, user: &User) -> Result<TokenPair, AppError> {
        let issue = |scope| {
            self.tokens.issue(&user.email, scope).map_err(|e| {
                AppError::internal("Failed to issue token", json!({ "reason": e.to_string() }))
            })
        };
        let pair = TokenPair {
            access_token: issue(TokenScope::AccessToken)?,
            refresh_token: issue(TokenScope::RefreshToken)?,
        };

        self.users
            .update_refresh_token(user.id, Some(pair.refresh_token.clone()))
            .await?;
        self.cache.evict(&user.email).await;
        Ok(pair)
    }

    /// Revokes the presented access token and the stored refresh token.
    ///
    /// Without a persistent cache only the refresh token is revoked.
    pub async fn logout(&self, access_token: &str, user: &User) -> Result<(), AppError> {
        let claims = self
            .tokens
            .verify(access_token, TokenScope::AccessToken)
            .map_err(bearer_token_error)?;

        self.cache
            .revoke_token(access_token, claims.remaining_seconds())
            .await;
        if !self.cache.remembers_revocations() {
            warn!(
                user_id = user.id,
                "Token blacklist unavailable, access token stays valid until expiry"
            );
        }

        self.users.update_refresh_token(user.id, None).await?;
        self.cache.evict(&user.email).await;
        info!(user_id = user.id, "User logged out");
        Ok(())
    }

    /// Resolves the account behind an access token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is revoked, invalid,
    /// expired, of another scope, or its account is missing or inactive.
    pub async fn current_user(&self, access_token: &str) -> Result<User, AppError> {
        if self.cache.is_revoked(access_token).await {
            return Err(credentials_error("token has been revoked"));
        }

        let claims = self
            .tokens
            .verify(access_token, TokenScope::AccessToken)
            .map_err(bearer_token_error)?;

        let user = match self.cache.get(&claims.sub).await {
            Some(user) => user,
            None => {
                let user = self
                    .users
                    .find_by_email(&claims.sub)
                    .await?
                    .ok_or_else(|| credentials_error("account not found"))?;
                self.cache.put(&user).await;
                user
            }
        };

        if !user.is_active {
            return Err(credentials_error("account is inactive"));
        }

        Ok(user)
    }

    /// Re-sends the verification email.
    ///
    /// The reply does not reveal whether the account exists.
    pub async fn request_verification_email(&self, email: &str) -> Result<&'static str, AppError> {
        let email = normalize_email(email);
        if let Some(user) = self.users.find_by_email(&email).await? {
            if user.is_email_confirmed {
                return Ok(ALREADY_CONFIRMED_MESSAGE);
            }
            if user.is_password_valid {
                match self
                    .tokens
                    .issue(&user.email, TokenScope::EmailVerificationToken)
                {
                    Ok(token) => self
                        .email
                        .send_verification(&user.email, &user.username, &token),
                    Err(e) => warn!(error = %e, "Failed to issue verification token"),
                }
            }
        }
        Ok(VERIFICATION_SENT_MESSAGE)
    }

    /// Marks the email behind a verification token as confirmed.
    pub async fn confirm_email(&self, token: &str) -> Result<&'static str, AppError> {
        let claims = self
            .tokens
            .verify(token, TokenScope::EmailVerificationToken)
            .map_err(emailed_token_error)?;

        let user = self
            .users
            .find_by_email(&claims.sub)
            .await?
            .filter(|u| u.is_password_valid)
            .ok_or_else(|| AppError::bad_request("Verification error", json!({})))?;

        if user.is_email_confirmed {
            return Ok(ALREADY_CONFIRMED_MESSAGE);
        }

        self.users.confirm_email(user.id).await?;
        self.cache.evict(&user.email).await;
        info!(user_id = user.id, "Email confirmed");
        Ok(EMAIL_CONFIRMED_MESSAGE)
    }

    /// Emails a password reset link to a confirmed account.
    ///
    /// The reply does not reveal whether the account exists.
    pub async fn request_password_reset(&self, email: &str) -> Result<&'static str, AppError> {
        let email = normalize_email(email);
        if let Some(user) = self.users.find_by_email(&email).await?
            && user.is_email_confirmed
        {
            match self.tokens.issue(&user.email, TokenScope::PasswordResetToken) {
                Ok(token) => self
                    .email
                    .send_password_reset(&user.email, &user.username, &token),
                Err(e) => warn!(error = %e, "Failed to issue password reset token"),
            }
        }
        Ok(RESET_SENT_MESSAGE)
    }

    /// Starts a password reset and returns a short-lived password-set token.
    ///
    /// Logging in is blocked until the new password is set.
    pub async fn reset_password(&self, token: &str) -> Result<String, AppError> {
        let claims = self
            .tokens
            .verify(token, TokenScope::PasswordResetToken)
            .map_err(emailed_token_error)?;

        let user = self
            .users
            .find_by_email(&claims.sub)
            .await?
            .filter(|u| u.is_email_confirmed)
            .ok_or_else(|| AppError::bad_request("Reset password error", json!({})))?;

        if user.is_password_valid {
            self.users.set_password_valid(user.id, false).await?;
            self.cache.evict(&user.email).await;
        }

        self.tokens
            .issue(&user.email, TokenScope::PasswordSetToken)
            .map_err(|e| {
                AppError::internal("Failed to issue token", json!({ "reason": e.to_string() }))
            })
    }

    /// Completes a password reset.
    pub async fn set_password(&self, token: &str, password: &str) -> Result<&'static str, AppError> {
        let claims = self
            .tokens
            .verify(token, TokenScope::PasswordSetToken)
            .map_err(emailed_token_error)?;

        let user = self
            .users
            .find_by_email(&claims.sub)
            .await?
            .filter(|u| u.is_email_confirmed && !u.is_password_valid)
            .ok_or_else(|| AppError::bad_request("Set password error", json!({})))?;

        let password_hash = self.hasher.hash(password).map_err(hash_error)?;
        self.users.update_password(user.id, &password_hash).await?;
        self.cache.evict(&user.email).await;
        info!(user_id = user.id, "Password changed");
        Ok(PASSWORD_SET_MESSAGE)
    }
}
