//! Unified error handling with Sentry integration.
//!
//! Every fallible storefront operation surfaces as an [`AppError`]. Callers
//! at the edge (the CLI) call [`AppError::report`] once before giving up so
//! that unexpected failures reach Sentry.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Catalog operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller is not allowed to perform the operation.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl AppError {
    /// Whether the failure is on our side rather than the caller's.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        match self {
            Self::Config(_) | Self::Storage(_) => true,
            Self::Catalog(err) => matches!(
                err,
                CatalogError::Storage(_) | CatalogError::Malformed(_)
            ),
            Self::NotFound(_) | Self::Unauthorized(_) => false,
        }
    }

    /// Log the error and capture internal failures to Sentry.
    pub fn report(&self) {
        if self.is_internal() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Command error"
            );
        } else {
            tracing::warn!(error = %self, "Command rejected");
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "milk")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use mrseafarm_core::ProductId;

    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product-123".to_string());
        assert_eq!(err.to_string(), "Not found: product-123");

        let err = AppError::Unauthorized("admin only".to_string());
        assert_eq!(err.to_string(), "Unauthorized: admin only");
    }

    #[test]
    fn test_internal_classification() {
        assert!(AppError::Storage(StorageError::Poisoned).is_internal());
        assert!(!AppError::Unauthorized("x".to_string()).is_internal());

        let missing = CatalogError::NotFound(ProductId::generate());
        assert!(!AppError::from(missing).is_internal());

        let broken = CatalogError::Storage(StorageError::Poisoned);
        assert!(AppError::from(broken).is_internal());
    }

    #[test]
    fn test_report_without_sentry_client_is_noop() {
        AppError::Storage(StorageError::Poisoned).report();
        AppError::NotFound("product milk".to_string()).report();
        add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "milk")]));
    }
}
