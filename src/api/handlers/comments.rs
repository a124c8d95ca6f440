//! Handlers for comments on images.

use axum::{Extension, Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::comment::{CommentRequest, CommentResponse};
use crate::api::dto::pagination::PaginationParams;
use crate::api::extract::{AppJson, AppPath, AppQuery};
use crate::api::handlers::pagination;
use crate::domain::entities::{Comment, User};
use crate::error::AppError;
use crate::state::AppState;

fn responses(comments: Vec<Comment>) -> Json<Vec<CommentResponse>> {
    Json(comments.into_iter().map(Into::into).collect())
}

/// `GET /api/images/{id}/comments`: top-level comments, oldest first.
pub async fn list_image_comments_handler(
    State(state): State<AppState>,
    AppPath(image_id): AppPath<i64>,
    AppQuery(params): AppQuery<PaginationParams>,
) -> Result<Json<Vec<CommentResponse>>, AppError> {
    let (offset, limit) = pagination(&params)?;
    let comments = state
        .comment_service
        .list_for_image(image_id, offset, limit)
        .await?;
    Ok(responses(comments))
}

/// `POST /api/images/{id}/comments`: **201 Created**.
pub async fn create_comment_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppPath(image_id): AppPath<i64>,
    AppJson(payload): AppJson<CommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), AppError> {
    payload.validate()?;
    let comment = state
        .comment_service
        .comment_on_image(&user, image_id, payload.text)
        .await?;
    Ok((StatusCode::CREATED, Json(comment.into())))
}

/// `GET /api/comments/{id}/subcomments`: replies to a comment.
pub async fn list_replies_handler(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppQuery(params): AppQuery<PaginationParams>,
) -> Result<Json<Vec<CommentResponse>>, AppError> {
    let (offset, limit) = pagination(&params)?;
    let replies = state
        .comment_service
        .list_replies(id, offset, limit)
        .await?;
    Ok(responses(replies))
}

/// Replies to a top-level comment.
///
/// # Endpoint
///
/// `POST /api/comments/{id}/subcomments`
///
/// # Response Codes
///
/// - **201 Created**: The reply
/// - **400 Bad Request**: The parent is itself a reply
/// - **404 Not Found**: No such comment
pub async fn create_reply_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<CommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), AppError> {
    payload.validate()?;
    let reply = state
        .comment_service
        .reply(&user, id, payload.text)
        .await?;
    Ok((StatusCode::CREATED, Json(reply.into())))
}

/// `GET /api/comments`: the caller's comments.
pub async fn my_comments_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppQuery(params): AppQuery<PaginationParams>,
) -> Result<Json<Vec<CommentResponse>>, AppError> {
    let (offset, limit) = pagination(&params)?;
    let comments = state
        .comment_service
        .list_by_user(user.id, offset, limit)
        .await?;
    Ok(responses(comments))
}

/// `GET /api/users/{username}/comments`
pub async fn user_comments_handler(
    State(state): State<AppState>,
    AppPath(username): AppPath<String>,
    AppQuery(params): AppQuery<PaginationParams>,
) -> Result<Json<Vec<CommentResponse>>, AppError> {
    let (offset, limit) = pagination(&params)?;
    let author = state.user_service.get_by_username(&username).await?;
    let comments = state
        .comment_service
        .list_by_user(author.id, offset, limit)
        .await?;
    Ok(responses(comments))
}

/// `PATCH /api/comments/{id}`: edits the caller's own comment.
pub async fn update_comment_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<CommentRequest>,
) -> Result<Json<CommentResponse>, AppError> {
    payload.validate()?;
    let comment = state
        .comment_service
        .update(&user, id, &payload.text)
        .await?;
    Ok(Json(comment.into()))
}

/// `DELETE /api/comments/{id}`: **204 No Content**. Moderators and administrators.
pub async fn delete_comment_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode, AppError> {
    state.comment_service.delete(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
