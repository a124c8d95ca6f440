//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache and mail setup, service wiring and the
//! Axum server lifecycle.

use crate::application::services::{
    AuthService, CommentService, ContactService, EmailService, ImageService, RatingService,
    TagService, UserCache, UserService,
};
use crate::config::Config;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::email::{EmailSender, HttpEmailSender, LogEmailSender};
use crate::infrastructure::persistence::{
    PgCommentRepository, PgContactRepository, PgImageRepository, PgRatingRepository,
    PgTagRepository, PgUserRepository,
};
use crate::infrastructure::security::{PasswordHasher, TokenCodec, TokenLifetimes};
use crate::routes::{HttpSettings, app_router};
use crate::state::{AppState, Services};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Opens the Postgres pool with the configured limits.
pub async fn connect_database(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    Ok(pool)
}

/// Connects Redis when a URL is configured, falling back to [`NullCache`].
///
/// Shared with the admin CLI so both evict the same cached user records.
pub async fn connect_cache(redis_url: Option<&str>, ttl_seconds: u64) -> Arc<dyn CacheService> {
    let Some(redis_url) = redis_url else {
        tracing::info!("Cache disabled (NullCache)");
        return Arc::new(NullCache::new());
    };

    match RedisCache::connect(redis_url, ttl_seconds).await {
        Ok(redis) => {
            tracing::info!("Cache enabled (Redis)");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to connect to Redis, using NullCache");
            Arc::new(NullCache::new())
        }
    }
}

fn email_sender(config: &Config) -> Result<Arc<dyn EmailSender>> {
    match &config.mail {
        Some(mail) => {
            let sender = HttpEmailSender::new(mail).context("Failed to build mail client")?;
            Ok(Arc::new(sender))
        }
        None => Ok(Arc::new(LogEmailSender)),
    }
}

/// Wires repositories, cache and mail delivery into the services.
pub fn build_state(
    config: &Config,
    pool: PgPool,
    cache: Arc<dyn CacheService>,
    sender: Arc<dyn EmailSender>,
) -> Result<AppState> {
    let pool = Arc::new(pool);
    let users = Arc::new(PgUserRepository::new(pool.clone()));
    let contacts = Arc::new(PgContactRepository::new(pool.clone()));
    let images = Arc::new(PgImageRepository::new(pool.clone()));
    let tags = Arc::new(PgTagRepository::new(pool.clone()));
    let comments = Arc::new(PgCommentRepository::new(pool.clone()));
    let ratings = Arc::new(PgRatingRepository::new(pool));

    let user_cache = UserCache::new(cache.clone(), config.cache_ttl_seconds);
    let tokens = TokenCodec::new(
        &config.jwt_secret,
        TokenLifetimes::from_seconds(
            config.access_token_ttl_seconds,
            config.refresh_token_ttl_seconds,
            config.email_token_ttl_seconds,
            config.password_set_token_ttl_seconds,
        ),
    );
    let hasher = PasswordHasher::new().context("Failed to initialize password hasher")?;
    let email = Arc::new(EmailService::new(sender, config.public_base_url.clone()));

    let services = Services {
        auth: AuthService::new(users.clone(), user_cache.clone(), tokens, hasher, email),
        users: UserService::new(users, user_cache),
        contacts: ContactService::new(contacts),
        images: ImageService::new(images.clone(), tags.clone()),
        tags: TagService::new(tags),
        comments: CommentService::new(comments, images.clone()),
        ratings: RatingService::new(ratings, images),
    };

    Ok(AppState::new(services, cache, config.api_name.clone()))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "Failed to listen for SIGTERM"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Redis cache (or NullCache fallback)
/// - Mail provider client (or log-only sender)
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Mail client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_database(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let cache = connect_cache(config.redis_url.as_deref(), config.cache_ttl_seconds).await;
    let sender = email_sender(&config)?;
    let state = build_state(&config, pool, cache, sender)?;

    let app = app_router(state, &HttpSettings::from_config(&config));

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address: {}", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}
