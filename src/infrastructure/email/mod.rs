//! Email delivery.
//!
//! - [`HttpEmailSender`] - Mail provider JSON API via `reqwest`
//! - [`LogEmailSender`] - Logs messages when no provider is configured

mod http_sender;
mod log_sender;
mod sender;

pub use http_sender::HttpEmailSender;
pub use log_sender::LogEmailSender;
pub use sender::{EmailError, EmailMessage, EmailSender};
