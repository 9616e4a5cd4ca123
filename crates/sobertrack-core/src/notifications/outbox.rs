//! Store-backed scheduler.
//!
//! Records the currently scheduled daily notification as JSON so a host
//! without an OS notification service (the CLI) can show or hand it off.

use super::{NotificationScheduler, ScheduleRequest};
use crate::error::{CoreError, NotificationError};
use crate::storage::{KeyValueStore, Preferences};

pub struct OutboxScheduler<S> {
    prefs: Preferences<S>,
}

impl<S: KeyValueStore> OutboxScheduler<S> {
    pub fn new(store: S) -> Self {
        Self {
            prefs: Preferences::new(store),
        }
    }

    /// The request currently held in the outbox, if any.
    pub fn pending(&self) -> Result<Option<ScheduleRequest>, CoreError> {
        match self.prefs.scheduled_notification()? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }
}

impl<S: KeyValueStore> NotificationScheduler for OutboxScheduler<S> {
    fn schedule_daily(&self, request: &ScheduleRequest) -> Result<(), NotificationError> {
        let json = serde_json::to_string(request)
            .map_err(|e| NotificationError::ScheduleFailed(e.to_string()))?;
        self.prefs
            .set_scheduled_notification(Some(&json))
            .map_err(|e| NotificationError::ScheduleFailed(e.to_string()))
    }

    fn cancel_all(&self) -> Result<(), NotificationError> {
        self.prefs
            .set_scheduled_notification(None)
            .map_err(|e| NotificationError::CancelFailed(e.to_string()))
    }
}
