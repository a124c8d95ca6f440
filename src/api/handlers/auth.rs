//! Handlers for the `/api/auth` endpoints.

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::auth::{
    EmailRequest, LoginRequest, MessageResponse, PasswordSetTokenResponse, SetPasswordRequest,
    SignupRequest, SignupResponse, TokenResponse,
};
use crate::api::middleware::auth::BearerToken;
use crate::api::extract::{AppJson, AppPath};
use crate::application::services::auth_service::SIGNUP_MESSAGE;
use crate::domain::entities::User;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new account.
///
/// # Endpoint
///
/// `POST /api/auth/signup`
///
/// # Response Codes
///
/// - **201 Created**: `{ "user": {...}, "message": "..." }`; a verification email is queued
/// - **400 Bad Request**: Validation failed
/// - **409 Conflict**: Email or username already registered
pub async fn signup_handler(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    payload.validate()?;

    let user = state
        .auth_service
        .signup(&payload.username, &payload.email, &payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            user: user.into(),
            message: SIGNUP_MESSAGE.to_string(),
        }),
    ))
}

/// Exchanges email and password for a token pair.
///
/// # Endpoint
///
/// `POST /api/auth/login`
///
/// # Response
///
/// ```json
/// { "access_token": "...", "refresh_token": "...", "token_type": "bearer" }
/// ```
///
/// Returns **401 Unauthorized** for unknown or unconfirmed accounts, a pending
/// password reset, inactive accounts and wrong passwords.
pub async fn login_handler(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    payload.validate()?;

    let pair = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(pair.into()))
}

/// Rotates the token pair.
///
/// # Endpoint
///
/// `GET /api/auth/refresh_token` with `Authorization: Bearer <refresh_token>`
///
/// A refresh token can be used once. Presenting a stale one revokes the session.
pub async fn refresh_token_handler(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Json<TokenResponse>, AppError> {
    let pair = state.auth_service.refresh(&token).await?;
    Ok(Json(pair.into()))
}

/// Revokes the current access token and the stored refresh token.
///
/// # Endpoint
///
/// `POST /api/auth/logout` (authenticated)
pub async fn logout_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    BearerToken(token): BearerToken,
) -> Result<StatusCode, AppError> {
    state.auth_service.logout(&token, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/auth/verification_email`
pub async fn verification_email_handler(
    State(state): State<AppState>,
    AppJson(payload): AppJson<EmailRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    payload.validate()?;
    let message = state
        .auth_service
        .request_verification_email(&payload.email)
        .await?;
    Ok(Json(MessageResponse::new(message)))
}

/// `GET /api/auth/confirm_email/{token}`
///
/// Returns **400 Bad Request** for invalid or expired tokens.
pub async fn confirm_email_handler(
    State(state): State<AppState>,
    AppPath(token): AppPath<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let message = state.auth_service.confirm_email(&token).await?;
    Ok(Json(MessageResponse::new(message)))
}

/// `POST /api/auth/password_reset_email`
pub async fn password_reset_email_handler(
    State(state): State<AppState>,
    AppJson(payload): AppJson<EmailRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    payload.validate()?;
    let message = state
        .auth_service
        .request_password_reset(&payload.email)
        .await?;
    Ok(Json(MessageResponse::new(message)))
}

/// Starts a password reset from an emailed link.
///
/// # Endpoint
///
/// `GET /api/auth/reset_password/{token}`
///
/// Responds with `{ "password_set_token": "..." }` for use with `set_password`.
pub async fn reset_password_handler(
    State(state): State<AppState>,
    AppPath(token): AppPath<String>,
) -> Result<Json<PasswordSetTokenResponse>, AppError> {
    let password_set_token = state.auth_service.reset_password(&token).await?;
    Ok(Json(PasswordSetTokenResponse { password_set_token }))
}

/// `PATCH /api/auth/set_password/{token}`
pub async fn set_password_handler(
    State(state): State<AppState>,
    AppPath(token): AppPath<String>,
    AppJson(payload): AppJson<SetPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    payload.validate()?;
    let message = state
        .auth_service
        .set_password(&token, &payload.password)
        .await?;
    Ok(Json(MessageResponse::new(message)))
}
