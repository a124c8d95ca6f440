//! User entity and role model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Access level of an account.
///
/// The first account ever created becomes [`Role::Administrator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Administrator,
    Moderator,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrator => "administrator",
            Role::Moderator => "moderator",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "administrator" | "admin" => Ok(Role::Administrator),
            "moderator" => Ok(Role::Moderator),
            "user" => Ok(Role::User),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// A registered account.
///
/// Serializable so it can be stored in the user cache; never returned
/// directly by the API (see `UserResponse`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub avatar: Option<String>,
    pub role: Role,
    pub refresh_token: Option<String>,
    pub is_email_confirmed: bool,
    /// `false` while a password reset is in progress.
    pub is_password_valid: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Administrator
    }

    /// Why the account may not obtain tokens with a password, if it may not.
    pub fn login_refusal(&self) -> Option<&'static str> {
        if !self.is_email_confirmed {
            Some("The email is not confirmed")
        } else if !self.is_password_valid {
            Some("Password reset is not confirmed")
        } else if !self.is_active {
            Some("The account is inactive")
        } else {
            None
        }
    }

    /// Moderators and administrators can remove other users' comments and ratings.
    pub fn can_moderate(&self) -> bool {
        matches!(self.role, Role::Administrator | Role::Moderator)
    }
}

/// Input data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub avatar: Option<String>,
    pub role: Role,
    pub is_email_confirmed: bool,
}
