//! Handlers for the `/api/contacts` endpoints.
//!
//! Every handler acts on the authenticated user's own contacts. Ids belonging
//! to other users behave as if they did not exist.

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::contact::{ContactListQuery, ContactRequest, ContactResponse};
use crate::api::dto::pagination::PaginationParams;
use crate::api::extract::{AppJson, AppPath, AppQuery};
use crate::api::handlers::pagination;
use crate::domain::entities::User;
use crate::error::AppError;
use crate::state::AppState;

/// Lists contacts with optional substring filters.
///
/// # Endpoint
///
/// `GET /api/contacts?offset=0&limit=10&first_name=&last_name=&email=`
///
/// Filters are case-insensitive substring matches. `limit` is 1..=1000.
pub async fn list_contacts_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppQuery(query): AppQuery<ContactListQuery>,
) -> Result<Json<Vec<ContactResponse>>, AppError> {
    let (offset, limit) = pagination(&query.pagination)?;

    let contacts = state
        .contact_service
        .list(user.id, query.filter(), offset, limit)
        .await?;

    Ok(Json(contacts.into_iter().map(Into::into).collect()))
}

/// Contacts with a birthday in the next `days` days (1..=31), soonest first.
///
/// # Endpoint
///
/// `GET /api/contacts/birthdays/{days}?offset=0&limit=10`
///
/// `days = 1` means today only.
pub async fn birthdays_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppPath(days): AppPath<u32>,
    AppQuery(params): AppQuery<PaginationParams>,
) -> Result<Json<Vec<ContactResponse>>, AppError> {
    let (offset, limit) = pagination(&params)?;

    let contacts = state
        .contact_service
        .upcoming_birthdays(user.id, days, offset, limit)
        .await?;

    Ok(Json(contacts.into_iter().map(Into::into).collect()))
}

/// `GET /api/contacts/{id}`
pub async fn get_contact_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ContactResponse>, AppError> {
    let contact = state.contact_service.get(user.id, id).await?;
    Ok(Json(contact.into()))
}

/// Creates a contact.
///
/// # Endpoint
///
/// `POST /api/contacts`
///
/// # Response Codes
///
/// - **201 Created**: The stored contact
/// - **400 Bad Request**: Validation failed
/// - **409 Conflict**: Email or phone already in the caller's contacts
pub async fn create_contact_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppJson(payload): AppJson<ContactRequest>,
) -> Result<(StatusCode, Json<ContactResponse>), AppError> {
    payload.validate()?;

    let contact = state
        .contact_service
        .create(user.id, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(contact.into())))
}

/// Replaces every field of a contact.
///
/// # Endpoint
///
/// `PUT /api/contacts/{id}`
pub async fn update_contact_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<ContactRequest>,
) -> Result<Json<ContactResponse>, AppError> {
    payload.validate()?;

    let contact = state
        .contact_service
        .replace(user.id, id, payload.into())
        .await?;

    Ok(Json(contact.into()))
}

/// `DELETE /api/contacts/{id}`: **204 No Content** on success.
pub async fn delete_contact_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode, AppError> {
    state.contact_service.delete(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
