//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`     - API name (public)
//! - `/api/*`     - REST API, see [`crate::api::routes`]
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Process time** - `API-Process-Time` header on every response
//! - **CORS** - Configured origins only
//! - **Rate limiting** - Per-IP token bucket, stricter on credential endpoints
//! - **Authentication** - Bearer access token on protected routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::root_handler;
use crate::api::middleware::{auth, cors, process_time, rate_limit, tracing};
use crate::config::Config;
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// HTTP-level knobs that are not part of [`AppState`].
#[derive(Debug, Clone, Default)]
pub struct HttpSettings {
    /// `(replenish_seconds, burst)`; `None` disables rate limiting.
    pub rate_limit: Option<(u64, u32)>,
    pub cors_origins: Vec<String>,
}

impl HttpSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            rate_limit: Some((
                config.rate_limit_replenish_seconds,
                config.rate_limit_burst,
            )),
            cors_origins: config.cors_origins.clone(),
        }
    }
}

fn limited(router: Router<AppState>, layer: Option<rate_limit::RateLimitLayer>) -> Router<AppState> {
    match layer {
        Some(layer) => router.layer(layer),
        None => router,
    }
}

/// Builds the router without path normalization.
///
/// Rate limiting keys on the peer address, so when `settings.rate_limit` is set
/// the service must be served with connect info.
pub fn router(state: AppState, settings: &HttpSettings) -> Router {
    let (general, strict) = match settings.rate_limit {
        Some((replenish, burst)) => (rate_limit::layer(replenish, burst), rate_limit::auth_layer()),
        None => (None, None),
    };

    let protected = api::routes::protected_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth::layer,
    ));

    let api_router = Router::new()
        .merge(limited(api::routes::credential_routes(), strict))
        .merge(limited(
            Router::new()
                .merge(api::routes::token_routes())
                .merge(protected),
            general,
        ))
        .merge(api::routes::public_routes());

    Router::new()
        .route("/", get(root_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(middleware::from_fn(process_time::layer))
        .layer(cors::layer(&settings.cors_origins))
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
///
/// `/api/contacts/` and `/api/contacts` reach the same handler.
pub fn app_router(state: AppState, settings: &HttpSettings) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, settings))
}
