//! Admin catalog edits, listings and their interaction with carts.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use chrono::{Duration, TimeZone, Utc};
use mrseafarm_core::{CartScope, Email, ProductDraft};
use mrseafarm_integration_tests::{ADMIN_EMAIL, TestContext};
use mrseafarm_storefront::catalog::{ProductQuery, ProductSort};
use mrseafarm_storefront::error::AppError;

fn admin() -> Email {
    Email::parse(ADMIN_EMAIL).unwrap()
}

fn draft(title: &str, category: &str, price: &str) -> ProductDraft {
    ProductDraft {
        title: title.to_string(),
        price: price.to_string(),
        description: format!("{title}, straight from the farm"),
        category: category.to_string(),
        image_url: Some(format!("https://img.example.com/{}.jpg", title.len())),
        ..ProductDraft::default()
    }
}

#[test]
fn test_saved_products_reload_with_listing_order() {
    let ctx = TestContext::new().unwrap();
    let start = Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap();
    {
        let mut state = ctx.open().unwrap();
        let catalog = state.catalog_mut(Some(&admin())).unwrap();
        catalog.create(&draft("Fresh Milk", "Milk", "₹60"), start).unwrap();
        catalog
            .create(&draft("Country Eggs", "Poultry", "₹120"), start + Duration::days(1))
            .unwrap();
        catalog
            .create(&draft("Buttermilk", "Milk", "₹30"), start + Duration::days(2))
            .unwrap();
        state.save_catalog().unwrap();
    }

    let state = ctx.open().unwrap();
    let titles = |query: &ProductQuery| -> Vec<String> {
        state
            .catalog()
            .query(query)
            .into_iter()
            .map(|p| p.title.clone())
            .collect()
    };

    assert_eq!(
        titles(&ProductQuery::new()),
        ["Buttermilk", "Country Eggs", "Fresh Milk"]
    );
    assert_eq!(
        titles(&ProductQuery::new().sorted_by(ProductSort::Oldest)),
        ["Fresh Milk", "Country Eggs", "Buttermilk"]
    );
    assert_eq!(
        titles(&ProductQuery::new().with_category("Milk").sorted_by(ProductSort::AToZ)),
        ["Buttermilk", "Fresh Milk"]
    );
    assert_eq!(
        titles(&ProductQuery::new().with_search("EGG")),
        ["Country Eggs"]
    );
    assert_eq!(state.catalog().categories(), ["Milk", "Poultry"]);
}

#[test]
fn test_cart_keeps_snapshot_after_catalog_edit() {
    let ctx = TestContext::new().unwrap();
    let mut state = ctx.open().unwrap();
    let now = Utc::now();

    let product = state
        .catalog_mut(Some(&admin()))
        .unwrap()
        .create(&draft("Fresh Milk", "Milk", "₹60"), now)
        .unwrap();
    state.cart_mut(CartScope::Customer, None).unwrap().add(&product);

    state
        .catalog_mut(Some(&admin()))
        .unwrap()
        .update(&product.id, &draft("Fresh Milk", "Milk", "₹75"), now)
        .unwrap();
    let updated = state.product(&product.id).unwrap().clone();
    state.cart_mut(CartScope::Customer, None).unwrap().add(&updated);

    let cart = state.cart(CartScope::Customer);
    assert_eq!(cart.items()[0].quantity, 2);
    assert_eq!(cart.total().to_string(), "120.00");
}

#[test]
fn test_only_admin_may_edit() {
    let ctx = TestContext::new().unwrap();
    let mut state = ctx.open().unwrap();
    let visitor = Email::parse("visitor@example.in").unwrap();

    assert!(matches!(
        state.catalog_mut(Some(&visitor)),
        Err(AppError::Unauthorized(_))
    ));
    assert!(matches!(
        state.catalog_mut(None),
        Err(AppError::Unauthorized(_))
    ));
}

#[test]
fn test_custom_admin_email() {
    let mut ctx = TestContext::new().unwrap();
    ctx.config.admin_email = Email::parse("owner@farm.in").unwrap();
    let mut state = ctx.open().unwrap();

    assert!(state.catalog_mut(Some(&admin())).is_err());
    assert!(
        state
            .catalog_mut(Some(&Email::parse("owner@farm.in").unwrap()))
            .is_ok()
    );
}
