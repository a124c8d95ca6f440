//! Handlers for liveness and health endpoints.

use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::error::AppError;
use crate::state::AppState;

/// `GET /`: `{ "message": "<API name>" }`.
pub async fn root_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "message": state.api_name }))
}

/// Database round trip.
///
/// # Endpoint
///
/// `GET /api/healthchecker`
///
/// Responds `{ "message": "OK" }`, or **500** when the database is unreachable.
pub async fn healthchecker_handler(
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    state.user_service.count().await.map_err(|e| {
        tracing::error!(error = %e, "Health checker failed");
        AppError::internal("Database is not configured correctly", json!({}))
    })?;

    Ok(Json(json!({ "message": "OK" })))
}

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /api/health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected, 3 users" },
///     "cache": { "status": "ok", "message": "Redis connected" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;
    let cache_check = check_cache(&state).await;

    let all_healthy = db_check.status == "ok" && cache_check.status == "ok";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database: db_check,
            cache: cache_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_database(state: &AppState) -> CheckStatus {
    match state.user_service.count().await {
        Ok(count) => CheckStatus {
            status: "ok".to_string(),
            message: Some(format!("Connected, {count} users")),
        },
        Err(e) => CheckStatus {
            status: "error".to_string(),
            message: Some(format!("Database error: {e}")),
        },
    }
}

async fn check_cache(state: &AppState) -> CheckStatus {
    if !state.cache.is_persistent() {
        return CheckStatus {
            status: "ok".to_string(),
            message: Some("Cache disabled".to_string()),
        };
    }

    if state.cache.health_check().await {
        CheckStatus {
            status: "ok".to_string(),
            message: Some("Redis connected".to_string()),
        }
    } else {
        CheckStatus {
            status: "error".to_string(),
            message: Some("Redis connection failed".to_string()),
        }
    }
}
