//! Handlers for the `/api/tags` endpoints.

use axum::{Extension, Json, extract::State, http::StatusCode};

use crate::api::dto::image::{TagListQuery, TagResponse};
use crate::api::extract::{AppPath, AppQuery};
use crate::api::handlers::pagination;
use crate::domain::entities::User;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/tags?tag_title=sun&offset=0&limit=10`: tags ordered by title.
pub async fn list_tags_handler(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<TagListQuery>,
) -> Result<Json<Vec<TagResponse>>, AppError> {
    let (offset, limit) = pagination(&query.pagination)?;

    let tags = state
        .tag_service
        .list(query.tag_title, offset, limit)
        .await?;

    Ok(Json(tags.into_iter().map(Into::into).collect()))
}

/// Returns a tag by title, creating it on first use.
///
/// # Endpoint
///
/// `GET /api/tags/{title}`
pub async fn get_tag_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppPath(title): AppPath<String>,
) -> Result<Json<TagResponse>, AppError> {
    let tag = state.tag_service.get_or_create(&user, &title).await?;
    Ok(Json(tag.into()))
}

/// `DELETE /api/tags/{title}`: **204 No Content**. Administrators only.
pub async fn delete_tag_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppPath(title): AppPath<String>,
) -> Result<StatusCode, AppError> {
    state.tag_service.delete(&user, &title).await?;
    Ok(StatusCode::NO_CONTENT)
}
