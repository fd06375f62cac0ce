//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod contact;

use mrseafarm_core::ProductId;
use mrseafarm_storefront::error::AppError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    App(#[from] AppError),

    /// Writing command output failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    /// Arguments were rejected before reaching the storefront.
    #[error("Invalid input: {0}")]
    Invalid(String),
}

fn parse_id(raw: &str) -> Result<ProductId, CommandError> {
    ProductId::parse(raw).map_err(|e| CommandError::Invalid(e.to_string()))
}
