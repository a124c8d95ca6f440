//! Handlers for image ratings.

use axum::{Extension, Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::comment::{ImageRatingResponse, RatingRequest, RatingResponse};
use crate::api::dto::pagination::PaginationParams;
use crate::api::extract::{AppJson, AppPath, AppQuery};
use crate::api::handlers::pagination;
use crate::domain::entities::{Rating, User};
use crate::error::AppError;
use crate::state::AppState;

fn responses(ratings: Vec<Rating>) -> Json<Vec<RatingResponse>> {
    Json(ratings.into_iter().map(Into::into).collect())
}

/// Rates an image once.
///
/// # Endpoint
///
/// `POST /api/images/{id}/rates` with `{ "rate": 4 }`
///
/// # Response Codes
///
/// - **201 Created**: The rating
/// - **403 Forbidden**: The image is the caller's own
/// - **404 Not Found**: No such image
/// - **409 Conflict**: Already rated by the caller
pub async fn rate_image_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppPath(image_id): AppPath<i64>,
    AppJson(payload): AppJson<RatingRequest>,
) -> Result<(StatusCode, Json<RatingResponse>), AppError> {
    payload.validate()?;
    let rating = state
        .rating_service
        .rate(&user, image_id, payload.rate)
        .await?;
    Ok((StatusCode::CREATED, Json(rating.into())))
}

/// `GET /api/images/{id}/rates`: newest first.
pub async fn image_ratings_handler(
    State(state): State<AppState>,
    AppPath(image_id): AppPath<i64>,
    AppQuery(params): AppQuery<PaginationParams>,
) -> Result<Json<Vec<RatingResponse>>, AppError> {
    let (offset, limit) = pagination(&params)?;
    let ratings = state
        .rating_service
        .list_for_image(image_id, offset, limit)
        .await?;
    Ok(responses(ratings))
}

/// `GET /api/images/{id}/avg`
pub async fn image_average_handler(
    State(state): State<AppState>,
    AppPath(image_id): AppPath<i64>,
) -> Result<Json<ImageRatingResponse>, AppError> {
    let summary = state.rating_service.summary(image_id).await?;
    Ok(Json(summary.into()))
}

/// `GET /api/rates/avg_all`: images by average rating, highest first.
pub async fn top_images_handler(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PaginationParams>,
) -> Result<Json<Vec<ImageRatingResponse>>, AppError> {
    let (offset, limit) = pagination(&params)?;
    let top = state.rating_service.top_images(offset, limit).await?;
    Ok(Json(top.into_iter().map(Into::into).collect()))
}

/// `GET /api/rates`: ratings the caller gave.
pub async fn my_ratings_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppQuery(params): AppQuery<PaginationParams>,
) -> Result<Json<Vec<RatingResponse>>, AppError> {
    let (offset, limit) = pagination(&params)?;
    let ratings = state
        .rating_service
        .list_by_user(user.id, offset, limit)
        .await?;
    Ok(responses(ratings))
}

/// `GET /api/users/{username}/rates`
pub async fn user_ratings_handler(
    State(state): State<AppState>,
    AppPath(username): AppPath<String>,
    AppQuery(params): AppQuery<PaginationParams>,
) -> Result<Json<Vec<RatingResponse>>, AppError> {
    let (offset, limit) = pagination(&params)?;
    let rater = state.user_service.get_by_username(&username).await?;
    let ratings = state
        .rating_service
        .list_by_user(rater.id, offset, limit)
        .await?;
    Ok(responses(ratings))
}

/// `DELETE /api/rates/{id}`: **204 No Content**. Moderators and administrators.
pub async fn delete_rating_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode, AppError> {
    state.rating_service.delete(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
