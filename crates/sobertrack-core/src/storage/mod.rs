mod config;
pub mod database;
pub mod keys;
pub mod memory;

pub use config::{Config, NotificationsConfig, QuotesConfig};
pub use database::Database;
pub use keys::Preferences;
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::error::{ConfigError, PersistenceError};

/// String-keyed, string-valued persistent store.
///
/// Each call is an atomic single-key read or write; callers never need
/// multi-key transactions.
pub trait KeyValueStore {
    /// Read a value. `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Insert or overwrite a value.
    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        (**self).set(key, value)
    }
}

/// Returns the data directory, creating it if needed.
///
/// `SOBERTRACK_HOME` wins when set. Otherwise `~/.config/sobertrack[-dev]/`
/// based on `SOBERTRACK_ENV` (set it to `dev` for a development directory).
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("SOBERTRACK_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("SOBERTRACK_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("sobertrack-dev")
            } else {
                base_dir.join("sobertrack")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
