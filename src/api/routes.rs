//! API route configuration.
//!
//! Routes are grouped by how they authenticate:
//!
//! - [`credential_routes`] - accept credentials in the body, strictly rate limited
//! - [`token_routes`] - authenticate with a token in the path or header
//! - [`protected_routes`] - require an access token via [`crate::api::middleware::auth`]
//! - [`public_routes`] - health checks

use crate::api::handlers::{
    auth, comments, contacts, health_handler, healthchecker_handler, images, ratings, tags, users,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, patch, post},
};

/// Endpoints that take an email address or password in the body.
///
/// - `POST /auth/signup`
/// - `POST /auth/login`
/// - `POST /auth/verification_email`
/// - `POST /auth/password_reset_email`
pub fn credential_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(auth::signup_handler))
        .route("/auth/login", post(auth::login_handler))
        .route(
            "/auth/verification_email",
            post(auth::verification_email_handler),
        )
        .route(
            "/auth/password_reset_email",
            post(auth::password_reset_email_handler),
        )
}

/// Endpoints authenticated by the token they carry.
///
/// - `GET   /auth/refresh_token`            - refresh token as bearer
/// - `GET   /auth/confirm_email/{token}`
/// - `GET   /auth/reset_password/{token}`
/// - `PATCH /auth/set_password/{token}`
pub fn token_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/refresh_token", get(auth::refresh_token_handler))
        .route(
            "/auth/confirm_email/{token}",
            get(auth::confirm_email_handler),
        )
        .route(
            "/auth/reset_password/{token}",
            get(auth::reset_password_handler),
        )
        .route(
            "/auth/set_password/{token}",
            patch(auth::set_password_handler),
        )
}

/// Routes that need a valid access token.
///
/// # Endpoints
///
/// - `POST   /auth/logout`
/// - `GET    /users/me`                   - Current profile
/// - `PUT    /users/me`                   - Replace username / avatar
/// - `GET    /users/{username}`           - Public profile
/// - `PATCH  /users/{username}`           - Activate (admin)
/// - `DELETE /users/{username}`           - Deactivate (admin)
/// - `PATCH  /users/{username}/set_role`  - Change role (admin)
/// - `GET    /contacts`                   - List with filters (paginated)
/// - `POST   /contacts`                   - Create
/// - `GET    /contacts/birthdays/{days}`  - Upcoming birthdays (paginated)
/// - `GET    /contacts/{id}`              - Fetch
/// - `PUT    /contacts/{id}`              - Replace
/// - `DELETE /contacts/{id}`              - Remove
/// - `GET    /users/{username}/comments`  - A user's comments (paginated)
/// - `GET    /users/{username}/rates`     - A user's ratings (paginated)
///
/// Image gallery, see [`gallery_routes`].
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/logout", post(auth::logout_handler))
        .route(
            "/users/me",
            get(users::me_handler).put(users::update_me_handler),
        )
        .route(
            "/users/{username}",
            get(users::get_user_handler)
                .patch(users::activate_user_handler)
                .delete(users::deactivate_user_handler),
        )
        .route("/users/{username}/set_role", patch(users::set_role_handler))
        .route(
            "/contacts",
            get(contacts::list_contacts_handler).post(contacts::create_contact_handler),
        )
        .route(
            "/contacts/birthdays/{days}",
            get(contacts::birthdays_handler),
        )
        .route(
            "/contacts/{id}",
            get(contacts::get_contact_handler)
                .put(contacts::update_contact_handler)
                .delete(contacts::delete_contact_handler),
        )
        .route(
            "/users/{username}/comments",
            get(comments::user_comments_handler),
        )
        .route("/users/{username}/rates", get(ratings::user_ratings_handler))
        .merge(gallery_routes())
}

/// Images with their tags, comments and ratings. All need an access token.
///
/// # Endpoints
///
/// - `GET    /images`                        - Caller's images (paginated)
/// - `POST   /images`                        - Publish an image URL
/// - `GET    /images/{id}`                   - Fetch any image
/// - `PATCH  /images/{id}`                   - Change description (owner)
/// - `DELETE /images/{id}`                   - Remove (owner)
/// - `POST   /images/{id}/tags/{title}`      - Attach tag (owner)
/// - `DELETE /images/{id}/tags/{title}`      - Detach tag (owner)
/// - `GET    /images/{id}/comments`          - Top-level comments
/// - `POST   /images/{id}/comments`          - Comment
/// - `GET    /images/{id}/rates`             - Ratings
/// - `POST   /images/{id}/rates`             - Rate (not own image, once)
/// - `GET    /images/{id}/avg`               - Average rating
/// - `GET    /tags`                          - Search tags
/// - `GET    /tags/{title}`                  - Fetch or create
/// - `DELETE /tags/{title}`                  - Remove (admin)
/// - `GET    /comments`                      - Caller's comments
/// - `PATCH  /comments/{id}`                 - Edit (author)
/// - `DELETE /comments/{id}`                 - Remove (moderator)
/// - `GET    /comments/{id}/subcomments`     - Replies
/// - `POST   /comments/{id}/subcomments`     - Reply
/// - `GET    /rates`                         - Caller's ratings
/// - `GET    /rates/avg_all`                 - Images by average rating
/// - `DELETE /rates/{id}`                    - Remove (moderator)
pub fn gallery_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/images",
            get(images::list_images_handler).post(images::create_image_handler),
        )
        .route(
            "/images/{id}",
            get(images::get_image_handler)
                .patch(images::update_image_handler)
                .delete(images::delete_image_handler),
        )
        .route(
            "/images/{id}/tags/{title}",
            post(images::add_tag_handler).delete(images::remove_tag_handler),
        )
        .route(
            "/images/{id}/comments",
            get(comments::list_image_comments_handler).post(comments::create_comment_handler),
        )
        .route(
            "/images/{id}/rates",
            get(ratings::image_ratings_handler).post(ratings::rate_image_handler),
        )
        .route("/images/{id}/avg", get(ratings::image_average_handler))
        .route("/tags", get(tags::list_tags_handler))
        .route(
            "/tags/{title}",
            get(tags::get_tag_handler).delete(tags::delete_tag_handler),
        )
        .route("/comments", get(comments::my_comments_handler))
        .route(
            "/comments/{id}",
            patch(comments::update_comment_handler).delete(comments::delete_comment_handler),
        )
        .route(
            "/comments/{id}/subcomments",
            get(comments::list_replies_handler).post(comments::create_reply_handler),
        )
        .route("/rates", get(ratings::my_ratings_handler))
        .route("/rates/avg_all", get(ratings::top_images_handler))
        .route("/rates/{id}", delete(ratings::delete_rating_handler))
}

/// - `GET /healthchecker` - Database round trip
/// - `GET /health`        - Component status
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/healthchecker", get(healthchecker_handler))
        .route("/health", get(health_handler))
}
