//! Typed accessors for every persisted key.
//!
//! Nothing else in the crate touches the raw key strings; date
//! normalization and boolean encoding live here and only here.

use chrono::NaiveDate;

use super::KeyValueStore;
use crate::error::PersistenceError;

pub const SOBRIETY_START_DATE: &str = "sobrietyStartDate";
pub const LAST_QUOTE_ID: &str = "lastQuoteId";
pub const NOTIFICATIONS_ENABLED: &str = "notificationsEnabled";
pub const SCHEDULED_NOTIFICATION: &str = "scheduledNotification";

/// Calendar-day storage format for the start date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One get/set pair per persisted key.
#[derive(Debug)]
pub struct Preferences<S> {
    store: S,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stored sobriety start date.
    ///
    /// A value that does not parse as `YYYY-MM-DD` is reported as absent.
    pub fn start_date(&self) -> Result<Option<NaiveDate>, PersistenceError> {
        let Some(raw) = self.store.get(SOBRIETY_START_DATE)? else {
            return Ok(None);
        };
        match NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT) {
            Ok(date) => Ok(Some(date)),
            Err(e) => {
                tracing::warn!(value = %raw, error = %e, "ignoring unparsable start date");
                Ok(None)
            }
        }
    }

    pub fn set_start_date(&self, date: NaiveDate) -> Result<(), PersistenceError> {
        self.store
            .set(SOBRIETY_START_DATE, &date.format(DATE_FORMAT).to_string())
    }

    pub fn last_quote_id(&self) -> Result<Option<String>, PersistenceError> {
        Ok(self
            .store
            .get(LAST_QUOTE_ID)?
            .filter(|id| !id.is_empty()))
    }

    pub fn set_last_quote_id(&self, id: &str) -> Result<(), PersistenceError> {
        self.store.set(LAST_QUOTE_ID, id)
    }

    /// Notification opt-in; defaults to off when never set.
    pub fn notifications_enabled(&self) -> Result<bool, PersistenceError> {
        Ok(self
            .store
            .get(NOTIFICATIONS_ENABLED)?
            .map(|v| v.trim() == "true")
            .unwrap_or(false))
    }

    pub fn set_notifications_enabled(&self, enabled: bool) -> Result<(), PersistenceError> {
        self.store
            .set(NOTIFICATIONS_ENABLED, if enabled { "true" } else { "false" })
    }

    /// JSON of the currently scheduled daily notification, empty when none.
    pub fn scheduled_notification(&self) -> Result<Option<String>, PersistenceError> {
        Ok(self
            .store
            .get(SCHEDULED_NOTIFICATION)?
            .filter(|v| !v.is_empty()))
    }

    pub fn set_scheduled_notification(&self, json: Option<&str>) -> Result<(), PersistenceError> {
        self.store.set(SCHEDULED_NOTIFICATION, json.unwrap_or(""))
    }
}
