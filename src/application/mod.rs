//! Application layer services implementing business logic.
//!
//! Services consume repository traits and infrastructure abstractions and
//! expose a plain API to HTTP handlers and the admin CLI.
//!
//! - [`services::auth_service::AuthService`] - Signup, login, tokens, email verification
//! - [`services::user_service::UserService`] - Profiles, roles and activation
//! - [`services::contact_service::ContactService`] - Per-user contact book
//! - [`services::email_service::EmailService`] - Templated notification emails

pub mod services;
