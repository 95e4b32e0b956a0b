//! Command-line shell
//!
//! Wires the catalog fixture, the file-backed cart store and the terminal
//! renderers together behind a small set of subcommands.

use std::io;

use clap::Subcommand;
use thiserror::Error;
use tracing::{debug, warn};
use tracing_subscriber::util::TryInitError;

use crate::{
    catalog::CategoryFilter,
    checkout::{CheckoutError, checkout},
    fixtures::{FixtureError, load_catalog},
    presentation::{EMPTY_CART_NOTICE, ProductDetail, product_cards},
    products::ProductId,
    storage::FileStorage,
    store::{CartStore, CartStoreError},
};

pub mod config;
pub mod logging;
pub mod render;

pub use config::{Config, LogFormat, LoggingConfig};

/// Shell subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List products, optionally limited to one category
    Catalog {
        /// Category to show; `all` or empty shows everything
        #[arg(short, long)]
        category: Option<CategoryFilter>,
    },

    /// Show a product with similar products from its category
    Product {
        /// Product id
        id: u32,
    },

    /// Add a product to the cart
    Add {
        /// Product id
        id: u32,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },

    /// Remove a product from the cart
    Remove {
        /// Product id
        id: u32,
    },

    /// Show the cart with totals and discount
    Cart,

    /// Empty the cart
    Clear,

    /// Submit the cart as an order and empty it
    Checkout,
}

/// Shell errors.
#[derive(Debug, Error)]
pub enum AppError {
    /// Logging could not be initialised
    #[error("Failed to initialise logging: {0}")]
    Logging(#[from] TryInitError),

    /// Catalog could not be loaded
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    /// Cart could not be persisted
    #[error(transparent)]
    Store(#[from] CartStoreError),

    /// Order could not be submitted
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Output could not be written
    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Run one subcommand against the configured catalog and cart.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the cart cannot be
/// saved, or output cannot be written.
pub fn run(config: Config, mut out: impl io::Write) -> Result<(), AppError> {
    let catalog = load_catalog(&config.catalog)?;
    let mut store = CartStore::with_key(FileStorage::new(&config.data_dir), config.cart_key);

    store.subscribe(|total: u32| debug!(total, "cart badge updated"));

    match config.command {
        Command::Catalog { category } => {
            let filter = category.unwrap_or_default();
            let cart = store.load();
            let cards = product_cards(&catalog, &filter, &cart);

            render::write_catalog(&mut out, &cards, cart.total_quantity())?;
        }
        Command::Product { id } => {
            let id = ProductId::new(id);

            if let Some(product) = catalog.get(id) {
                let detail = ProductDetail::new(&catalog, product, &store.load());

                render::write_product(&mut out, &detail)?;
            } else {
                warn!(%id, "product not found");
                writeln!(out, "Товар {id} не найден")?;
            }
        }
        Command::Add { id, quantity } => {
            store.add(&catalog, ProductId::new(id), quantity)?;
            render::write_cart(&mut out, &store.summary(&catalog))?;
        }
        Command::Remove { id } => {
            store.remove(ProductId::new(id))?;
            render::write_cart(&mut out, &store.summary(&catalog))?;
        }
        Command::Cart => render::write_cart(&mut out, &store.summary(&catalog))?,
        Command::Clear => {
            store.clear()?;
            render::write_cart(&mut out, &store.summary(&catalog))?;
        }
        Command::Checkout => match checkout(&mut store, &catalog) {
            Ok(form) => render::write_order(&mut out, &form)?,
            Err(CheckoutError::EmptyCart) => writeln!(out, "{EMPTY_CART_NOTICE}")?,
            Err(err) => return Err(err.into()),
        },
    }

    Ok(())
}
