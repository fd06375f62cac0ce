//! Mr Sea Farm storefront library.
//!
//! Cart stores with local persistence, the admin product catalog and contact
//! form validation. The CLI and integration tests drive everything through
//! [`state::AppState`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod contact;
pub mod error;
pub mod state;
pub mod storage;
