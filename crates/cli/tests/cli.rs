//! End-to-end tests for the `mrseafarm` binary.
//!
//! Each test gets its own data directory, so state persisted by one
//! invocation is what the next invocation hydrates from.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

const ADMIN: &str = "mrseafarm@gmail.com";

/// Helper to create a command bound to `dir`
fn mrseafarm(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("mrseafarm");
    cmd.current_dir(dir.path())
        .env("MRSEAFARM_DATA_DIR", dir.path().join("data"))
        .env_remove("MRSEAFARM_ADMIN_EMAIL")
        .env_remove("SENTRY_DSN")
        .env("RUST_LOG", "off");
    cmd
}

/// Add a product as the admin and return its generated ID
fn add_product(dir: &TempDir, title: &str, price: &str) -> String {
    let output = mrseafarm(dir)
        .args(["catalog", "add", "--as", ADMIN, "--title", title])
        .args(["--price", price, "--desc", "From the farm", "--category", "Milk"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout
        .trim()
        .strip_prefix("Added product ")
        .and_then(|rest| rest.split_whitespace().next())
        .unwrap()
        .to_string()
}

// =============================================================================
// Basic CLI Tests
// =============================================================================

mod cli_basics {
    use super::*;

    #[test]
    fn test_help() {
        let dir = TempDir::new().unwrap();
        mrseafarm(&dir).arg("--help").assert().success();
    }

    #[test]
    fn test_empty_cart() {
        let dir = TempDir::new().unwrap();
        mrseafarm(&dir)
            .args(["cart", "show"])
            .assert()
            .success()
            .stdout("Cart is empty\n");
    }
}

// =============================================================================
// Cart Tests
// =============================================================================

mod cart {
    use super::*;

    #[test]
    fn test_cart_survives_restarts() {
        let dir = TempDir::new().unwrap();
        let milk = add_product(&dir, "Fresh Milk", "₹80/liter");
        let eggs = add_product(&dir, "Eggs", "120");

        mrseafarm(&dir).args(["cart", "add", &milk]).assert().success();
        mrseafarm(&dir).args(["cart", "add", &milk]).assert().success();
        mrseafarm(&dir).args(["cart", "add", &eggs]).assert().success();

        mrseafarm(&dir)
            .args(["cart", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Fresh Milk x2 - ₹160.00"))
            .stdout(predicate::str::contains("TOTAL: ₹280.00"))
            .stdout(predicate::str::contains("2 item(s) in cart"));

        assert!(dir.path().join("data/websiteCart.json").exists());
    }

    #[test]
    fn test_negative_quantity_removes_line() {
        let dir = TempDir::new().unwrap();
        let milk = add_product(&dir, "Fresh Milk", "60");
        mrseafarm(&dir).args(["cart", "add", &milk]).assert().success();

        mrseafarm(&dir)
            .args(["cart", "set", &milk, "-1"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Removed"));

        mrseafarm(&dir)
            .args(["cart", "show"])
            .assert()
            .stdout("Cart is empty\n");
    }

    #[test]
    fn test_unknown_product_fails() {
        let dir = TempDir::new().unwrap();
        mrseafarm(&dir).args(["cart", "add", "ghost"]).assert().failure();
    }

    #[test]
    fn test_admin_cart_requires_admin_email() {
        let dir = TempDir::new().unwrap();
        mrseafarm(&dir)
            .args(["cart", "--admin", "show"])
            .assert()
            .failure();
        mrseafarm(&dir)
            .args(["cart", "--admin", "--as", "visitor@example.in", "show"])
            .assert()
            .failure();
        mrseafarm(&dir)
            .args(["cart", "--admin", "--as", ADMIN, "show"])
            .assert()
            .success();
    }

    #[test]
    fn test_admin_clear_removes_file() {
        let dir = TempDir::new().unwrap();
        let milk = add_product(&dir, "Fresh Milk", "60");
        let admin_file = dir.path().join("data/adminCart.json");

        mrseafarm(&dir)
            .args(["cart", "--admin", "--as", ADMIN, "add", &milk])
            .assert()
            .success();
        assert!(admin_file.exists());

        mrseafarm(&dir)
            .args(["cart", "--admin", "--as", ADMIN, "clear"])
            .assert()
            .success();
        assert!(!admin_file.exists());
    }
}

// =============================================================================
// Catalog and Contact Tests
// =============================================================================

mod catalog {
    use super::*;

    #[test]
    fn test_list_sorted_by_title() {
        let dir = TempDir::new().unwrap();
        add_product(&dir, "buttermilk", "30");
        add_product(&dir, "A2 Milk", "80");

        let output = mrseafarm(&dir)
            .args(["catalog", "list", "--sort", "a-z"])
            .output()
            .unwrap();
        let stdout = String::from_utf8(output.stdout).unwrap();
        let titles: Vec<&str> = stdout
            .lines()
            .filter_map(|line| line.split('\t').nth(1))
            .collect();
        assert_eq!(titles, ["A2 Milk", "buttermilk"]);
    }

    #[test]
    fn test_visitor_cannot_add() {
        let dir = TempDir::new().unwrap();
        mrseafarm(&dir)
            .args(["catalog", "add", "--as", "visitor@example.in", "--title", "Milk"])
            .args(["--price", "60", "--desc", "Fresh", "--category", "Milk"])
            .assert()
            .failure();
        mrseafarm(&dir)
            .args(["catalog", "list"])
            .assert()
            .stdout("No products found\n");
    }

    #[test]
    fn test_contact_validation() {
        let dir = TempDir::new().unwrap();
        mrseafarm(&dir)
            .args(["contact", "--name", "Priya", "--email", "priya@example.in"])
            .args(["--message", "Hello"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Phone: Not provided"));

        mrseafarm(&dir)
            .args(["contact", "--name", "Priya", "--email", "priya"])
            .assert()
            .failure();
    }
}
