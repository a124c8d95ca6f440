//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{error::AppError, state::AppState};

/// Raw bearer token from the `Authorization` header.
///
/// Rejects with `401 Unauthorized` instead of axum-auth's default `400`.
pub struct BearerToken(pub String);

impl<S: Send + Sync> FromRequestParts<S> for BearerToken {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthBearer(token) = AuthBearer::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                AppError::unauthorized(
                    "Not authenticated",
                    serde_json::json!({"reason": "Authorization header is missing or invalid"}),
                )
            })?;
        Ok(Self(token))
    }
}

/// Resolves the current user from an access token.
///
/// ```text
/// Authorization: Bearer <access_token>
/// ```
///
/// On success the [`crate::domain::entities::User`] is inserted into request
/// extensions, so handlers can take `Extension<User>`.
///
/// # Errors
///
/// Returns `401 Unauthorized` (with `WWW-Authenticate: Bearer`) if the header is
/// missing, or the token is invalid, expired, revoked or not an access token.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();
    let BearerToken(token) = BearerToken::from_request_parts(&mut parts, &()).await?;

    let user = st.auth_service.current_user(&token).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
