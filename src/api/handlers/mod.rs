//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod auth;
pub mod comments;
pub mod contacts;
pub mod health;
pub mod images;
pub mod ratings;
pub mod tags;
pub mod users;

pub use health::{health_handler, healthchecker_handler, root_handler};

use serde_json::json;

use crate::api::dto::pagination::PaginationParams;
use crate::error::AppError;

/// `(offset, limit)` from query parameters, or `400`.
pub(crate) fn pagination(params: &PaginationParams) -> Result<(i64, i64), AppError> {
    params
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request(e, json!({})))
}
