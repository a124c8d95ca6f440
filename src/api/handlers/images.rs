//! Handlers for the `/api/images` endpoints.
//!
//! Any authenticated user can read images. Writes are limited to the owner;
//! other users' images behave as if they did not exist.

use axum::{Extension, Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::image::{CreateImageRequest, ImageResponse, UpdateImageRequest};
use crate::api::dto::pagination::PaginationParams;
use crate::api::extract::{AppJson, AppPath, AppQuery};
use crate::api::handlers::pagination;
use crate::domain::entities::User;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/images?offset=0&limit=10`: the caller's images, newest first.
pub async fn list_images_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppQuery(params): AppQuery<PaginationParams>,
) -> Result<Json<Vec<ImageResponse>>, AppError> {
    let (offset, limit) = pagination(&params)?;

    let images = state
        .image_service
        .list_by_user(user.id, offset, limit)
        .await?;

    Ok(Json(images.into_iter().map(Into::into).collect()))
}

/// Publishes an image URL with optional description and tags.
///
/// # Endpoint
///
/// `POST /api/images`
///
/// # Response Codes
///
/// - **201 Created**: The stored image with its tags
/// - **400 Bad Request**: Invalid URL, tag title, or more than 5 tags
pub async fn create_image_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppJson(payload): AppJson<CreateImageRequest>,
) -> Result<(StatusCode, Json<ImageResponse>), AppError> {
    payload.validate()?;
    let (image, tags) = payload.into_parts();

    let image = state.image_service.create(&user, image, &tags).await?;

    Ok((StatusCode::CREATED, Json(image.into())))
}

/// `GET /api/images/{id}`
pub async fn get_image_handler(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ImageResponse>, AppError> {
    let image = state.image_service.get(id).await?;
    Ok(Json(image.into()))
}

/// `PATCH /api/images/{id}`: replaces the description of the caller's image.
pub async fn update_image_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<UpdateImageRequest>,
) -> Result<Json<ImageResponse>, AppError> {
    payload.validate()?;

    let image = state
        .image_service
        .update_description(user.id, id, payload.description)
        .await?;

    Ok(Json(image.into()))
}

/// `DELETE /api/images/{id}`: **204 No Content**. Comments and ratings go with it.
pub async fn delete_image_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode, AppError> {
    state.image_service.delete(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/images/{id}/tags/{title}`: attaches a tag, creating it if new.
pub async fn add_tag_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppPath((id, title)): AppPath<(i64, String)>,
) -> Result<Json<ImageResponse>, AppError> {
    let image = state.image_service.add_tag(&user, id, &title).await?;
    Ok(Json(image.into()))
}

/// `DELETE /api/images/{id}/tags/{title}`: detaches a tag from the caller's image.
pub async fn remove_tag_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppPath((id, title)): AppPath<(i64, String)>,
) -> Result<Json<ImageResponse>, AppError> {
    let image = state
        .image_service
        .remove_tag(user.id, id, &title)
        .await?;
    Ok(Json(image.into()))
}
