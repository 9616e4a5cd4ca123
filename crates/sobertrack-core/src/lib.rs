//! # Sobertrack Core Library
//!
//! Core logic behind the Sobertrack sobriety companion. Every display
//! surface (the CLI here, a mobile UI elsewhere) goes through this crate so
//! day counts, quotes and notification content agree everywhere.
//!
//! ## Architecture
//!
//! - **Streak**: the persisted start date and everything derived from it
//! - **Quotes**: remote motivational quotes with bounded retry, dedup
//!   against the last shown quote and a built-in fallback
//! - **Notifications**: daily payload building and the contract with an
//!   external scheduler
//! - **Storage**: SQLite key-value store, typed key accessors and TOML
//!   configuration
//!
//! ## Key Components
//!
//! - [`StreakTracker`]: start date owner
//! - [`QuoteFetcher`]: never-failing quote retrieval
//! - [`NotificationService`]: keeps the scheduler in line with the opt-in
//! - [`Database`]: key-value persistence
//! - [`Config`]: application configuration management

pub mod error;
pub mod notifications;
pub mod quotes;
pub mod storage;
pub mod streak;

pub use error::{
    ConfigError, CoreError, FetchError, NotificationError, PersistenceError, ValidationError,
};
pub use notifications::{
    daily_notification_payload, init_notification_service, NotificationPayload,
    NotificationScheduler, NotificationService, OutboxScheduler, ScheduleRequest,
};
pub use quotes::{HttpQuoteSource, Quote, QuoteFetcher, QuoteSource, RetryPolicy};
pub use storage::{Config, Database, KeyValueStore, MemoryStore, Preferences};
pub use streak::{Milestone, StreakSnapshot, StreakTracker};
