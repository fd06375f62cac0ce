//! The shopping cart model.
//!
//! [`Cart`] is the pure state machine behind both storefront carts: an
//! insertion-ordered list of line items, at most one per product, each with a
//! quantity of at least one. It knows nothing about storage; the storefront's
//! `CartStore` wraps it and persists after every mutation.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::{CURRENCY_SYMBOL, format_amount};
use super::product::Product;

const SUMMARY_RULE: &str = "─────────────────────";

/// Message shown instead of a summary when the cart has no lines.
pub const EMPTY_CART_MESSAGE: &str = "Cart is empty";

const fn default_quantity() -> u32 {
    1
}

/// A product snapshot plus how many of it are in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Product fields as captured on first add. Never refreshed afterwards.
    pub product: Product,
    /// Always at least one while the line is in a cart.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl CartLineItem {
    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.product.id
    }

    /// Parsed unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.product.price.amount() * f64::from(self.quantity)
    }
}

/// Sum of all line subtotals.
///
/// Kept as a plain `f64`; `Display` renders exactly two decimals with halves
/// rounded up.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct CartTotal(f64);

impl CartTotal {
    #[must_use]
    pub const fn amount(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for CartTotal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_amount(self.0))
    }
}

/// An ordered collection of line items keyed by product ID.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLineItem>", into = "Vec<CartLineItem>")]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Rebuild a cart from previously stored lines.
    ///
    /// A stored quantity of zero is treated as unset (one). If an identifier
    /// appears more than once, the first line wins and later ones are dropped.
    #[must_use]
    pub fn from_items(items: Vec<CartLineItem>) -> Self {
        let mut cart = Self::new();
        for mut item in items {
            if cart.position(item.id()).is_some() {
                continue;
            }
            item.quantity = item.quantity.max(1);
            cart.items.push(item);
        }
        cart
    }

    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add one unit of `product`.
    ///
    /// An existing line keeps its original snapshot and gains one unit; a new
    /// product is appended with quantity one. Returns the line's quantity.
    pub fn add(&mut self, product: &Product) -> u32 {
        if let Some(index) = self.position(&product.id) {
            if let Some(item) = self.items.get_mut(index) {
                item.quantity = item.quantity.saturating_add(1);
                return item.quantity;
            }
        }
        self.items.push(CartLineItem {
            product: product.clone(),
            quantity: 1,
        });
        1
    }

    /// Remove the line for `id`. Returns whether a line was removed.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        self.items.len() != before
    }

    /// Set the quantity of an existing line.
    ///
    /// Zero or negative removes the line. Unknown IDs are ignored; this never
    /// creates a line. Returns whether the cart changed shape or quantity.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(id);
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        match self.items.iter_mut().find(|item| item.id() == id) {
            Some(item) if item.quantity != quantity => {
                item.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of distinct lines, not the sum of quantities.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn total(&self) -> CartTotal {
        CartTotal(self.items.iter().map(CartLineItem::subtotal).sum())
    }

    /// Multi-line order preview listing each line and the total.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.items.is_empty() {
            return EMPTY_CART_MESSAGE.to_owned();
        }

        let lines: Vec<String> = self
            .items
            .iter()
            .map(|item| {
                format!(
                    "{} x{} - {CURRENCY_SYMBOL}{}",
                    item.product.title,
                    item.quantity,
                    format_amount(item.subtotal())
                )
            })
            .collect();

        format!(
            "CART SUMMARY\n\n{}\n\n{SUMMARY_RULE}\nTOTAL: {CURRENCY_SYMBOL}{}\n{SUMMARY_RULE}",
            lines.join("\n"),
            self.total()
        )
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }
}

impl From<Vec<CartLineItem>> for Cart {
    fn from(items: Vec<CartLineItem>) -> Self {
        Self::from_items(items)
    }
}

impl From<Cart> for Vec<CartLineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}
