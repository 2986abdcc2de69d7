//! Core runtime configuration.
//!
//! # Responsibility
//! - Collect the storage and logging settings a host needs to start the core.
//! - Normalize and validate values before they reach storage or logging.
//!
//! # Invariants
//! - A validated config always has a non-blank storage key and database path.
//! - `log_dir`, when set, is absolute.

use crate::logging::{default_log_level, normalize_level};
use crate::repo::note_store::DEFAULT_STORAGE_KEY;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Database file used when the host does not pick one.
pub const DEFAULT_DB_FILE_NAME: &str = "quicknote.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    BlankStorageKey,
    BlankDbPath,
    InvalidLogLevel(String),
    RelativeLogDir(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankStorageKey => write!(f, "storage key cannot be blank"),
            Self::BlankDbPath => write!(f, "database path cannot be empty"),
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
            Self::RelativeLogDir(path) => write!(
                f,
                "log_dir must be an absolute path, got `{}`",
                path.display()
            ),
        }
    }
}

impl Error for ConfigError {}

/// Settings for opening the note store and its diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// Key-value entry holding the serialized collection.
    pub storage_key: String,
    pub db_path: PathBuf,
    pub log_level: String,
    /// Rolling log directory. File logging stays off when `None`.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    pub fn with_db_path(mut self, db_path: impl Into<PathBuf>) -> Self {
        self.db_path = db_path.into();
        self
    }

    pub fn with_storage_key(mut self, storage_key: impl Into<String>) -> Self {
        self.storage_key = storage_key.into();
        self
    }

    pub fn with_log_level(mut self, log_level: impl Into<String>) -> Self {
        self.log_level = log_level.into();
        self
    }

    pub fn with_log_dir(mut self, log_dir: Option<PathBuf>) -> Self {
        self.log_dir = log_dir;
        self
    }

    /// Returns a normalized copy, or the first invalid setting.
    pub fn validate(self) -> Result<Self, ConfigError> {
        let storage_key = self.storage_key.trim().to_string();
        if storage_key.is_empty() {
            return Err(ConfigError::BlankStorageKey);
        }
        if self.db_path.as_os_str().is_empty() {
            return Err(ConfigError::BlankDbPath);
        }
        let log_level = normalize_level(&self.log_level).map_err(ConfigError::InvalidLogLevel)?;
        if let Some(dir) = self.log_dir.as_ref() {
            if !dir.is_absolute() {
                return Err(ConfigError::RelativeLogDir(dir.clone()));
            }
        }

        Ok(Self {
            storage_key,
            db_path: self.db_path,
            log_level: log_level.to_string(),
            log_dir: self.log_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig};
    use std::path::PathBuf;

    #[test]
    fn default_config_is_valid() {
        let config = CoreConfig::default().validate().unwrap();
        assert_eq!(config.storage_key, "notes");
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn validate_normalizes_key_and_level() {
        let config = CoreConfig::default()
            .with_storage_key("  work-notes ")
            .with_log_level("WARNING")
            .validate()
            .unwrap();
        assert_eq!(config.storage_key, "work-notes");
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn validate_rejects_bad_values() {
        let blank = CoreConfig::default().with_storage_key(" ").validate();
        assert_eq!(blank.unwrap_err(), ConfigError::BlankStorageKey);

        let level = CoreConfig::default().with_log_level("loud").validate();
        assert!(matches!(level.unwrap_err(), ConfigError::InvalidLogLevel(_)));

        let relative = CoreConfig::default()
            .with_log_dir(Some(PathBuf::from("logs")))
            .validate();
        assert!(matches!(relative.unwrap_err(), ConfigError::RelativeLogDir(_)));
    }
}
