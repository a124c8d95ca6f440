//! DTOs for the `/api/contacts` endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::api::dto::pagination::PaginationParams;
use crate::domain::entities::{Contact, ContactData, ContactFilter};

/// Digits with optional leading `+`, spaces, dashes and parentheses.
static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9][0-9 ()\-]*$").unwrap());

/// Request body for `POST /api/contacts` and `PUT /api/contacts/{id}`.
///
/// PUT replaces every field, so `address` set to null clears it.
#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 2, max = 254))]
    pub first_name: String,

    #[validate(length(min = 2, max = 254))]
    pub last_name: String,

    #[validate(email(message = "Invalid email address"), length(max = 254))]
    pub email: String,

    #[validate(
        length(min = 3, max = 38),
        regex(path = *PHONE_REGEX, message = "Invalid phone number")
    )]
    pub phone: String,

    pub birthday: NaiveDate,

    #[validate(length(max = 254))]
    pub address: Option<String>,
}

impl From<ContactRequest> for ContactData {
    fn from(req: ContactRequest) -> Self {
        Self {
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
            email: req.email.trim().to_lowercase(),
            phone: req.phone.trim().to_string(),
            birthday: req.birthday,
            address: req.address,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub id: i64,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub birthday: NaiveDate,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Contact> for ContactResponse {
    fn from(c: Contact) -> Self {
        Self {
            id: c.id,
            user_id: c.user_id,
            first_name: c.first_name,
            last_name: c.last_name,
            email: c.email,
            phone: c.phone,
            birthday: c.birthday,
            address: c.address,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Query parameters for `GET /api/contacts`.
#[derive(Debug, Deserialize)]
pub struct ContactListQuery {
    #[serde(flatten)]
    pub pagination: PaginationParams,

    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl ContactListQuery {
    /// Filters with blank values dropped.
    pub fn filter(&self) -> ContactFilter {
        let clean = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        ContactFilter {
            first_name: clean(&self.first_name),
            last_name: clean(&self.last_name),
            email: clean(&self.email),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(phone: &str) -> ContactRequest {
        ContactRequest {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: phone.to_string(),
            birthday: NaiveDate::from_ymd_opt(1815, 12, 10).unwrap(),
            address: None,
        }
    }

    #[test]
    fn test_phone_validation() {
        assert!(request("+44 (20) 7946-0958").validate().is_ok());
        assert!(request("5550100").validate().is_ok());
        assert!(request("call me").validate().is_err());
        assert!(request(&"1".repeat(39)).validate().is_err());
    }

    #[test]
    fn test_birthday_must_be_iso_date() {
        let json = r#"{"first_name":"Ada","last_name":"Lovelace","email":"ada@example.com",
                       "phone":"5550100","birthday":"10.12.1815"}"#;
        assert!(serde_json::from_str::<ContactRequest>(json).is_err());
    }

    #[test]
    fn test_into_contact_data_normalizes_email() {
        let mut req = request("5550100");
        req.email = " Ada@Example.com ".to_string();
        let data = ContactData::from(req);
        assert_eq!(data.email, "ada@example.com");
    }

    #[test]
    fn test_blank_filters_are_ignored() {
        let query = ContactListQuery {
            pagination: PaginationParams {
                offset: None,
                limit: None,
            },
            first_name: Some("  ".to_string()),
            last_name: Some("Love".to_string()),
            email: None,
        };
        let filter = query.filter();
        assert!(filter.first_name.is_none());
        assert_eq!(filter.last_name.as_deref(), Some("Love"));
    }
}
