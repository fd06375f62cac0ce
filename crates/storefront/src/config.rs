//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `MRSEAFARM_DATA_DIR` - Directory for persisted carts and the local catalog (default: `.mrseafarm`)
//! - `MRSEAFARM_ADMIN_EMAIL` - The single account allowed into the admin panel (default: `mrseafarm@gmail.com`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name (e.g. `production`)

use std::path::PathBuf;

use mrseafarm_core::Email;
use thiserror::Error;

use crate::storage::FileStore;

const DEFAULT_DATA_DIR: &str = ".mrseafarm";
const DEFAULT_ADMIN_EMAIL: &str = "mrseafarm@gmail.com";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory backing the file store
    pub data_dir: PathBuf,
    /// Email of the only admin identity
    pub admin_email: Email,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_dir = non_empty("MRSEAFARM_DATA_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        let admin_email_raw =
            non_empty("MRSEAFARM_ADMIN_EMAIL").unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_string());
        let admin_email = Email::parse(admin_email_raw.trim()).map_err(|e| {
            ConfigError::InvalidEnvVar("MRSEAFARM_ADMIN_EMAIL".to_string(), e.to_string())
        })?;

        Ok(Self {
            data_dir,
            admin_email,
            sentry_dsn: non_empty("SENTRY_DSN"),
            sentry_environment: non_empty("SENTRY_ENVIRONMENT"),
        })
    }

    /// Whether `email` belongs to the admin.
    #[must_use]
    pub fn is_admin(&self, email: &Email) -> bool {
        email == &self.admin_email
    }

    /// File-backed storage rooted at the data directory.
    #[must_use]
    pub fn file_store(&self) -> FileStore {
        FileStore::new(self.data_dir.clone())
    }
}
