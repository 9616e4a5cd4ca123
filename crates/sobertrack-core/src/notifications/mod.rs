//! Daily motivational notification boundary.
//!
//! Delivery, permissions and recurrence belong to an external scheduler
//! behind [`NotificationScheduler`]. This module turns a fetched quote
//! into a payload and keeps the scheduler in line with the stored
//! opt-in preference. It has no timer: the host calls
//! [`NotificationService::refresh`] once a day.

mod outbox;

pub use outbox::OutboxScheduler;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, NotificationError};
use crate::quotes::{Quote, QuoteFetcher, QuoteSource};
use crate::storage::{KeyValueStore, NotificationsConfig, Preferences};

/// How a delivered notification is presented while the app is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationOptions {
    pub show_alert: bool,
    pub play_sound: bool,
    pub set_badge: bool,
}

impl From<&NotificationsConfig> for PresentationOptions {
    fn from(config: &NotificationsConfig) -> Self {
        Self {
            show_alert: config.show_alert,
            play_sound: config.play_sound,
            set_badge: config.set_badge,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
}

/// Local wall-clock time of the daily repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTrigger {
    pub hour: u32,
    pub minute: u32,
}

/// Everything an external scheduler needs to register the daily alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub payload: NotificationPayload,
    pub trigger: DailyTrigger,
    pub presentation: PresentationOptions,
    /// Id of the quote used for the body.
    pub quote_id: String,
}

/// External notification service.
pub trait NotificationScheduler {
    /// Replace any pending daily notification with this one.
    fn schedule_daily(&self, request: &ScheduleRequest) -> Result<(), NotificationError>;

    /// Remove every pending notification.
    fn cancel_all(&self) -> Result<(), NotificationError>;
}

impl<T: NotificationScheduler + ?Sized> NotificationScheduler for &T {
    fn schedule_daily(&self, request: &ScheduleRequest) -> Result<(), NotificationError> {
        (**self).schedule_daily(request)
    }

    fn cancel_all(&self) -> Result<(), NotificationError> {
        (**self).cancel_all()
    }
}

/// Build the daily notification from a quote.
pub fn daily_notification_payload(title: &str, quote: &Quote) -> NotificationPayload {
    NotificationPayload {
        title: title.to_string(),
        body: quote.text.clone(),
    }
}

/// Keeps the external scheduler in sync with the opt-in preference.
pub struct NotificationService<N, Q, S> {
    scheduler: N,
    fetcher: QuoteFetcher<Q, S>,
    prefs: Preferences<S>,
    title: String,
    trigger: DailyTrigger,
    presentation: PresentationOptions,
}

/// One-time startup initialization of the notification service.
///
/// Presentation flags and the delivery time are taken from `config` here
/// and nowhere else.
pub fn init_notification_service<N, Q, S>(
    config: &NotificationsConfig,
    scheduler: N,
    fetcher: QuoteFetcher<Q, S>,
    store: S,
) -> NotificationService<N, Q, S>
where
    N: NotificationScheduler,
    Q: QuoteSource,
    S: KeyValueStore,
{
    let presentation = PresentationOptions::from(config);
    tracing::debug!(
        show_alert = presentation.show_alert,
        play_sound = presentation.play_sound,
        set_badge = presentation.set_badge,
        "notification service initialized"
    );
    NotificationService {
        scheduler,
        fetcher,
        prefs: Preferences::new(store),
        title: config.title.clone(),
        trigger: DailyTrigger {
            hour: config.hour,
            minute: config.minute,
        },
        presentation,
    }
}

impl<N, Q, S> NotificationService<N, Q, S>
where
    N: NotificationScheduler,
    Q: QuoteSource,
    S: KeyValueStore,
{
    pub fn presentation(&self) -> PresentationOptions {
        self.presentation
    }

    pub fn trigger(&self) -> DailyTrigger {
        self.trigger
    }

    /// Stored opt-in state; unreadable counts as off.
    pub fn is_enabled(&self) -> bool {
        self.prefs.notifications_enabled().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not read notification preference");
            false
        })
    }

    /// Toggle daily notifications.
    ///
    /// The scheduler is updated first; the preference is written only once
    /// the scheduler accepted the change, so a denied permission never
    /// leaves the preference switched on. If the preference write fails the
    /// scheduler change is undone before the error is returned.
    pub async fn set_enabled(&self, enabled: bool) -> Result<Option<ScheduleRequest>, CoreError> {
        let request = if enabled {
            Some(self.schedule_fresh().await?)
        } else {
            self.scheduler.cancel_all()?;
            tracing::info!("daily notifications cancelled");
            None
        };
        if let Err(e) = self.prefs.set_notifications_enabled(enabled) {
            tracing::warn!(error = %e, enabled, "could not store notification preference");
            self.revert_scheduler(enabled).await;
            return Err(e.into());
        }
        Ok(request)
    }

    async fn revert_scheduler(&self, attempted: bool) {
        if attempted {
            if let Err(e) = self.scheduler.cancel_all() {
                tracing::error!(error = %e, "scheduled notification left without stored opt-in");
            }
        } else if self.is_enabled() {
            if let Err(e) = self.schedule_fresh().await {
                tracing::error!(error = %e, "stored opt-in left without scheduled notification");
            }
        }
    }

    /// Reschedule with fresh quote content when enabled; no-op otherwise.
    pub async fn refresh(&self) -> Result<Option<ScheduleRequest>, CoreError> {
        if !self.is_enabled() {
            tracing::debug!("notifications disabled, nothing to refresh");
            return Ok(None);
        }
        self.schedule_fresh().await.map(Some)
    }

    /// Fetch a quote and build today's payload. Never fails: an unreachable
    /// source yields the fallback body.
    pub async fn daily_payload(&self) -> NotificationPayload {
        self.payload_with_id().await.0
    }

    async fn payload_with_id(&self) -> (NotificationPayload, String) {
        let quote = self.fetcher.fetch_quote().await;
        (daily_notification_payload(&self.title, &quote), quote.id)
    }

    async fn schedule_fresh(&self) -> Result<ScheduleRequest, CoreError> {
        let (payload, quote_id) = self.payload_with_id().await;
        let request = ScheduleRequest {
            payload,
            trigger: self.trigger,
            presentation: self.presentation,
            quote_id,
        };
        self.scheduler.schedule_daily(&request)?;
        tracing::info!(
            hour = request.trigger.hour,
            minute = request.trigger.minute,
            quote_id = %request.quote_id,
            "daily notification scheduled"
        );
        Ok(request)
    }
}
