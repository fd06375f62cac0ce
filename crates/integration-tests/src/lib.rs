//! Integration tests for Mr Sea Farm.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p mrseafarm-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - carts written to disk and hydrated by a fresh process
//! - `admin_catalog` - admin edits flowing into carts and listings
//!
//! Every test builds a [`TestContext`] with its own temporary data directory.

use std::path::{Path, PathBuf};

use mrseafarm_storefront::config::StorefrontConfig;
use mrseafarm_storefront::error::Result;
use mrseafarm_storefront::state::AppState;
use mrseafarm_storefront::storage::FileStore;
use tempfile::TempDir;

/// The admin identity used when no override is configured.
pub const ADMIN_EMAIL: &str = "mrseafarm@gmail.com";

/// A throwaway data directory plus the configuration pointing at it.
pub struct TestContext {
    dir: TempDir,
    pub config: StorefrontConfig,
}

impl TestContext {
    /// Create a context with an empty data directory and default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn new() -> std::result::Result<Self, Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let data_dir = dir.path().join("data");
        let config = StorefrontConfig::from_lookup(|key| {
            (key == "MRSEAFARM_DATA_DIR").then(|| data_dir.display().to_string())
        })?;
        Ok(Self { dir, config })
    }

    /// Open application state the way a fresh process would.
    ///
    /// # Errors
    ///
    /// Returns an error if the saved catalog cannot be loaded.
    pub fn open(&self) -> Result<AppState<FileStore>> {
        AppState::from_config(self.config.clone())
    }

    /// Path of the file backing `key`.
    #[must_use]
    pub fn file_for(&self, key: &str) -> PathBuf {
        self.config.data_dir.join(format!("{key}.json"))
    }

    /// Root of the temporary directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}
