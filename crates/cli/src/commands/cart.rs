//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! mrseafarm cart show
//! mrseafarm cart add <PRODUCT_ID>
//! mrseafarm cart set <PRODUCT_ID> 3
//! mrseafarm cart --admin --as mrseafarm@gmail.com clear
//! ```

use std::io::Write;

use mrseafarm_core::{CURRENCY_SYMBOL, CartScope, Email};
use mrseafarm_storefront::error::add_breadcrumb;
use mrseafarm_storefront::state::AppState;
use mrseafarm_storefront::storage::KeyValueStore;

use super::{CommandError, parse_id};

/// Print the cart summary.
pub fn show<S: KeyValueStore + Clone>(
    out: &mut impl Write,
    state: &AppState<S>,
    scope: CartScope,
    who: Option<&Email>,
) -> Result<(), CommandError> {
    if scope == CartScope::Admin {
        state.require_admin(who)?;
    }
    let cart = state.cart(scope);
    writeln!(out, "{}", cart.summary())?;
    if cart.item_count() > 0 {
        writeln!(out, "\n{} item(s) in cart", cart.item_count())?;
    }
    Ok(())
}

/// Add one unit of a catalog product.
pub fn add<S: KeyValueStore + Clone>(
    out: &mut impl Write,
    state: &mut AppState<S>,
    scope: CartScope,
    who: Option<&Email>,
    product_id: &str,
) -> Result<(), CommandError> {
    let id = parse_id(product_id)?;
    let product = state.product(&id)?.clone();
    let cart = state.cart_mut(scope, who)?;
    cart.add(&product);

    let quantity = cart.cart().get(&id).map_or(0, |line| line.quantity);
    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", id.as_str())]));
    writeln!(
        out,
        "Added {} ({quantity} in cart). Total: {CURRENCY_SYMBOL}{}",
        product.title,
        cart.total()
    )?;
    Ok(())
}

/// Remove a product line.
pub fn remove<S: KeyValueStore + Clone>(
    out: &mut impl Write,
    state: &mut AppState<S>,
    scope: CartScope,
    who: Option<&Email>,
    product_id: &str,
) -> Result<(), CommandError> {
    let id = parse_id(product_id)?;
    let cart = state.cart_mut(scope, who)?;
    let present = cart.cart().get(&id).is_some();
    cart.remove(&id);

    if present {
        writeln!(out, "Removed {id}")?;
    } else {
        writeln!(out, "{id} is not in the cart")?;
    }
    Ok(())
}

/// Set the quantity of a line.
pub fn set<S: KeyValueStore + Clone>(
    out: &mut impl Write,
    state: &mut AppState<S>,
    scope: CartScope,
    who: Option<&Email>,
    product_id: &str,
    quantity: i64,
) -> Result<(), CommandError> {
    let id = parse_id(product_id)?;
    let cart = state.cart_mut(scope, who)?;
    let present = cart.cart().get(&id).is_some();
    cart.update_quantity(&id, quantity);

    if !present {
        writeln!(out, "{id} is not in the cart")?;
    } else if quantity <= 0 {
        writeln!(out, "Removed {id}")?;
    } else {
        let quantity = cart.cart().get(&id).map_or(0, |line| line.quantity);
        writeln!(out, "Set {id} to {quantity}")?;
    }
    Ok(())
}

/// Empty the cart.
pub fn clear<S: KeyValueStore + Clone>(
    out: &mut impl Write,
    state: &mut AppState<S>,
    scope: CartScope,
    who: Option<&Email>,
) -> Result<(), CommandError> {
    state.cart_mut(scope, who)?.clear();
    writeln!(out, "Cart cleared")?;
    Ok(())
}
