//! Core types for Mr Sea Farm.
//!
//! This module provides type-safe wrappers and records for the storefront domain.

pub mod cart;
pub mod email;
pub mod id;
pub mod price;
pub mod product;
pub mod scope;

pub use cart::{Cart, CartLineItem, CartTotal, EMPTY_CART_MESSAGE};
pub use email::{Email, EmailError};
pub use id::{ProductId, ProductIdError};
pub use price::{CURRENCY_SYMBOL, Price, format_amount, parse_price_text};
pub use product::{DEFAULT_UNIT, Product, ProductDraft, ProductDraftError};
pub use scope::{CartScope, ClearPolicy};
