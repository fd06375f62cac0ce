//! Mr Sea Farm CLI - carts, catalog and contact form from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add a catalog product to the customer cart and show the summary
//! mrseafarm cart add 3f2b9c1e
//! mrseafarm cart show
//!
//! # Work with the admin cart
//! mrseafarm cart --admin --as mrseafarm@gmail.com set 3f2b9c1e 4
//!
//! # List products, newest first, filtered by category
//! mrseafarm catalog list --category Milk --sort latest
//!
//! # Add a product (admin only)
//! mrseafarm catalog add --as mrseafarm@gmail.com --title "A2 Milk" \
//!     --price "₹80 / liter" --desc "Morning milking" --category Milk \
//!     --image-url https://img.example.com/a2.jpg
//! ```
//!
//! # Commands
//!
//! - `cart` - Show and edit the customer or admin cart
//! - `catalog` - List products, or add/update/delete them as the admin
//! - `contact` - Validate a contact form submission and print the message body
//!
//! State lives under `MRSEAFARM_DATA_DIR` (default `.mrseafarm`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use mrseafarm_core::Email;
use mrseafarm_storefront::catalog::ProductSort;
use mrseafarm_storefront::config::StorefrontConfig;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::CommandError;

#[derive(Parser)]
#[command(name = "mrseafarm")]
#[command(author, version, about = "Mr Sea Farm storefront tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show and edit a cart
    Cart {
        /// Use the admin cart instead of the customer cart
        #[arg(long)]
        admin: bool,

        /// Signed-in email (required for the admin cart)
        #[arg(long = "as", value_name = "EMAIL")]
        as_email: Option<Email>,

        #[command(subcommand)]
        action: CartAction,
    },
    /// List and manage catalog products
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Validate a contact form submission
    Contact {
        #[arg(long, default_value = "")]
        name: String,

        #[arg(long, default_value = "")]
        email: String,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long, default_value = "")]
        message: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print the cart summary
    Show,
    /// Add one unit of a catalog product
    Add { product_id: String },
    /// Remove a product line
    Remove { product_id: String },
    /// Set the quantity of a line (0 or less removes it)
    Set {
        product_id: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products
    List {
        /// Case-insensitive search over title and description
        #[arg(long)]
        search: Option<String>,

        /// Exact category
        #[arg(long)]
        category: Option<String>,

        /// latest, oldest, a-z or z-a
        #[arg(long, default_value_t = ProductSort::Latest)]
        sort: ProductSort,
    },
    /// Add a product
    Add {
        #[arg(long = "as", value_name = "EMAIL")]
        as_email: Email,

        #[command(flatten)]
        fields: commands::catalog::ProductFields,
    },
    /// Update a product
    Update {
        product_id: String,

        #[arg(long = "as", value_name = "EMAIL")]
        as_email: Email,

        #[command(flatten)]
        fields: commands::catalog::ProductFields,
    },
    /// Delete a product
    Delete {
        product_id: String,

        #[arg(long = "as", value_name = "EMAIL")]
        as_email: Email,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mrseafarm_storefront=info,mrseafarm_cli=info".into());

    // stdout carries command output, logs go to stderr
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing();
            tracing::error!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let sentry_guard = init_sentry(&config);
    init_tracing();
    if sentry_guard.is_some() {
        tracing::info!("Sentry initialized");
    }

    let result = run(cli, config);

    if let Err(e) = result {
        if let CommandError::App(app) = &e {
            app.report();
        }
        tracing::error!("Command failed: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(cli: Cli, config: StorefrontConfig) -> Result<(), CommandError> {
    let mut state = mrseafarm_storefront::state::AppState::from_config(config)?;
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Cart {
            admin,
            as_email,
            action,
        } => {
            let scope = if admin {
                mrseafarm_core::CartScope::Admin
            } else {
                mrseafarm_core::CartScope::Customer
            };
            let who = as_email.as_ref();
            match action {
                CartAction::Show => commands::cart::show(&mut out, &state, scope, who)?,
                CartAction::Add { product_id } => {
                    commands::cart::add(&mut out, &mut state, scope, who, &product_id)?;
                }
                CartAction::Remove { product_id } => {
                    commands::cart::remove(&mut out, &mut state, scope, who, &product_id)?;
                }
                CartAction::Set {
                    product_id,
                    quantity,
                } => {
                    commands::cart::set(&mut out, &mut state, scope, who, &product_id, quantity)?;
                }
                CartAction::Clear => commands::cart::clear(&mut out, &mut state, scope, who)?,
            }
        }
        Commands::Catalog { action } => match action {
            CatalogAction::List {
                search,
                category,
                sort,
            } => commands::catalog::list(&mut out, &state, search, category, sort)?,
            CatalogAction::Add { as_email, fields } => {
                commands::catalog::add(&mut out, &mut state, &as_email, &fields)?;
            }
            CatalogAction::Update {
                product_id,
                as_email,
                fields,
            } => commands::catalog::update(&mut out, &mut state, &as_email, &product_id, &fields)?,
            CatalogAction::Delete {
                product_id,
                as_email,
            } => commands::catalog::delete(&mut out, &mut state, &as_email, &product_id)?,
        },
        Commands::Contact {
            name,
            email,
            phone,
            message,
        } => {
            let form = mrseafarm_storefront::contact::ContactForm {
                name,
                email,
                phone,
                message,
            };
            commands::contact::submit(&mut out, &form)?;
        }
    }
    Ok(())
}
