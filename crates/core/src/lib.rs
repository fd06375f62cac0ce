//! Mr Sea Farm Core - Shared types library.
//!
//! This crate provides common types used across all Mr Sea Farm components:
//! - `storefront` - Cart store, local persistence, catalog and contact form
//! - `cli` - Command-line front end over the storefront library
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no storage
//! access, no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product records, the cart model, price parsing, IDs and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
