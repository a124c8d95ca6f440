//! Handlers for the `/api/users` endpoints.

use axum::{
    Extension, Json,
    extract::State,
};
use validator::Validate;

use crate::api::dto::user::{SetRoleRequest, UpdateProfileRequest, UserResponse};
use crate::api::extract::{AppJson, AppPath};
use crate::application::services::require_admin;
use crate::domain::entities::User;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/users/me`
pub async fn me_handler(Extension(user): Extension<User>) -> Json<UserResponse> {
    Json(user.into())
}

/// Replaces the caller's username and optionally the avatar URL.
///
/// # Endpoint
///
/// `PUT /api/users/me`
///
/// Returns **409 Conflict** if the username belongs to someone else.
pub async fn update_me_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppJson(payload): AppJson<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, AppError> {
    payload.validate()?;

    let updated = state
        .user_service
        .update_profile(&user, &payload.username, payload.avatar)
        .await?;

    Ok(Json(updated.into()))
}

/// `GET /api/users/{username}`
pub async fn get_user_handler(
    State(state): State<AppState>,
    AppPath(username): AppPath<String>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.user_service.get_by_username(&username).await?;
    Ok(Json(user.into()))
}

/// Changes a user's role. Administrators only.
///
/// # Endpoint
///
/// `PATCH /api/users/{username}/set_role` with `{ "role": "moderator" }`
pub async fn set_role_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    AppPath(username): AppPath<String>,
    AppJson(payload): AppJson<SetRoleRequest>,
) -> Result<Json<UserResponse>, AppError> {
    require_admin(&actor)?;
    let user = state
        .user_service
        .set_role(&username, payload.role)
        .await?;
    Ok(Json(user.into()))
}

/// `PATCH /api/users/{username}`: re-activates an account. Administrators only.
pub async fn activate_user_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    AppPath(username): AppPath<String>,
) -> Result<Json<UserResponse>, AppError> {
    require_admin(&actor)?;
    let user = state
        .user_service
        .set_active(&actor, &username, true)
        .await?;
    Ok(Json(user.into()))
}

/// `DELETE /api/users/{username}`: deactivates an account. Administrators only.
///
/// The account keeps its data but can no longer authenticate.
pub async fn deactivate_user_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    AppPath(username): AppPath<String>,
) -> Result<Json<UserResponse>, AppError> {
    require_admin(&actor)?;
    let user = state
        .user_service
        .set_active(&actor, &username, false)
        .await?;
    Ok(Json(user.into()))
}
