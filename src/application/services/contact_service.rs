//! Contact book operations scoped to the requesting user.

use chrono::{NaiveDate, Utc};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::domain::birthdays::{MAX_WINDOW_DAYS, upcoming_birthdays};
use crate::domain::entities::{Contact, ContactData, ContactFilter};
use crate::domain::repositories::ContactRepository;
use crate::error::AppError;

/// Service behind the `/api/contacts` routes.
///
/// Every operation takes the owner id. A contact owned by someone else is
/// reported exactly like a missing one.
pub struct ContactService {
    contacts: Arc<dyn ContactRepository>,
}

fn contact_not_found(id: i64) -> AppError {
    AppError::not_found("Contact not found", json!({ "id": id }))
}

impl ContactService {
    pub fn new(contacts: Arc<dyn ContactRepository>) -> Self {
        Self { contacts }
    }

    pub async fn list(
        &self,
        owner_id: i64,
        filter: ContactFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Contact>, AppError> {
        self.contacts.list(owner_id, filter, offset, limit).await
    }

    /// Contacts with a birthday in the next `days` days, today included.
    pub async fn upcoming_birthdays(
        &self,
        owner_id: i64,
        days: u32,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Contact>, AppError> {
        self.upcoming_birthdays_from(owner_id, Utc::now().date_naive(), days, offset, limit)
            .await
    }

    /// Same as [`Self::upcoming_birthdays`] with an explicit reference date.
    pub async fn upcoming_birthdays_from(
        &self,
        owner_id: i64,
        today: NaiveDate,
        days: u32,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Contact>, AppError> {
        if !(1..=MAX_WINDOW_DAYS).contains(&days) {
            return Err(AppError::bad_request(
                format!("Days must be between 1 and {MAX_WINDOW_DAYS}"),
                json!({ "days": days }),
            ));
        }

        let all = self.contacts.list_all(owner_id).await?;
        Ok(upcoming_birthdays(all, today, days)
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    pub async fn get(&self, owner_id: i64, id: i64) -> Result<Contact, AppError> {
        self.contacts
            .find(owner_id, id)
            .await?
            .ok_or_else(|| contact_not_found(id))
    }

    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the owner already has a contact with
    /// the same email or phone.
    pub async fn create(&self, owner_id: i64, data: ContactData) -> Result<Contact, AppError> {
        let contact = self.contacts.create(owner_id, data).await?;
        info!(user_id = owner_id, contact_id = contact.id, "Contact created");
        Ok(contact)
    }

    /// Replaces every writable field. Repeating the same call leaves the same state.
    pub async fn replace(
        &self,
        owner_id: i64,
        id: i64,
        data: ContactData,
    ) -> Result<Contact, AppError> {
        self.contacts
            .update(owner_id, id, data)
            .await?
            .ok_or_else(|| contact_not_found(id))
    }

    pub async fn delete(&self, owner_id: i64, id: i64) -> Result<(), AppError> {
        if !self.contacts.delete(owner_id, id).await? {
            return Err(contact_not_found(id));
        }
        info!(user_id = owner_id, contact_id = id, "Contact deleted");
        Ok(())
    }
}
