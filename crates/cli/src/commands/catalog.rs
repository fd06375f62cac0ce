//! Catalog commands.
//!
//! Listing is open to everyone; add, update and delete require `--as` with
//! the admin email and save the catalog immediately.

use std::io::Write;

use chrono::Utc;
use clap::Args;
use mrseafarm_core::{Email, ProductDraft};
use mrseafarm_storefront::catalog::{ProductQuery, ProductSort};
use mrseafarm_storefront::error::AppError;
use mrseafarm_storefront::state::AppState;
use mrseafarm_storefront::storage::KeyValueStore;

use super::{CommandError, parse_id};

/// The admin product form as command-line flags.
#[derive(Debug, Clone, Default, Args)]
pub struct ProductFields {
    #[arg(long, default_value = "")]
    pub title: String,

    /// Free-text price, e.g. "₹60 / liter"
    #[arg(long, default_value = "")]
    pub price: String,

    #[arg(long = "desc", default_value = "")]
    pub description: String,

    #[arg(long, default_value = "")]
    pub category: String,

    #[arg(long)]
    pub image_url: Option<String>,

    #[arg(long)]
    pub stock: Option<String>,

    /// Pack size, e.g. "500"
    #[arg(long = "quantity")]
    pub pack_size: Option<String>,

    /// Pack unit (defaults to litre)
    #[arg(long)]
    pub unit: Option<String>,

    #[arg(long)]
    pub featured: bool,
}

impl ProductFields {
    fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            title: self.title.clone(),
            price: self.price.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            image_url: self.image_url.clone(),
            stock: self.stock.clone(),
            pack_size: self.pack_size.clone(),
            unit: self.unit.clone(),
            featured: self.featured,
        }
    }
}

/// List products matching the filters, one per line.
pub fn list<S: KeyValueStore + Clone>(
    out: &mut impl Write,
    state: &AppState<S>,
    search: Option<String>,
    category: Option<String>,
    sort: ProductSort,
) -> Result<(), CommandError> {
    let query = ProductQuery {
        search,
        category,
        sort,
    };
    let products = state.catalog().query(&query);
    if products.is_empty() {
        writeln!(out, "No products found")?;
        return Ok(());
    }

    for product in products {
        let pack = product
            .pack_size
            .as_deref()
            .map(|size| format!(" ({size} {})", product.unit_or_default()))
            .unwrap_or_default();
        let featured = if product.featured { " *" } else { "" };
        writeln!(
            out,
            "{}\t{}{pack}{featured}\t{}\t{}",
            product.id, product.title, product.price, product.category
        )?;
    }
    Ok(())
}

/// Add a product.
pub fn add<S: KeyValueStore + Clone>(
    out: &mut impl Write,
    state: &mut AppState<S>,
    who: &Email,
    fields: &ProductFields,
) -> Result<(), CommandError> {
    let product = state
        .catalog_mut(Some(who))?
        .create(&fields.to_draft(), Utc::now())
        .map_err(AppError::from)?;
    state.save_catalog()?;
    writeln!(out, "Added product {} ({})", product.id, product.title)?;
    Ok(())
}

/// Replace a product's fields, keeping its ID and creation time.
pub fn update<S: KeyValueStore + Clone>(
    out: &mut impl Write,
    state: &mut AppState<S>,
    who: &Email,
    product_id: &str,
    fields: &ProductFields,
) -> Result<(), CommandError> {
    let id = parse_id(product_id)?;
    let title = state
        .catalog_mut(Some(who))?
        .update(&id, &fields.to_draft(), Utc::now())
        .map_err(AppError::from)?
        .title
        .clone();
    state.save_catalog()?;
    writeln!(out, "Updated product {id} ({title})")?;
    Ok(())
}

/// Delete a product.
pub fn delete<S: KeyValueStore + Clone>(
    out: &mut impl Write,
    state: &mut AppState<S>,
    who: &Email,
    product_id: &str,
) -> Result<(), CommandError> {
    let id = parse_id(product_id)?;
    let product = state
        .catalog_mut(Some(who))?
        .delete(&id)
        .map_err(AppError::from)?;
    state.save_catalog()?;
    writeln!(out, "Deleted product {} ({})", product.id, product.title)?;
    Ok(())
}
