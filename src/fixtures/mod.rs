//! Fixtures
//!
//! Loads the static product catalog from YAML files. A fixture set named
//! `stamps` lives at `<base>/products/stamps.yml`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::{Catalog, CatalogError},
    products::Product,
};

pub mod products;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file {path}: {source}")]
    Io {
        /// File being read
        path: PathBuf,

        /// Underlying IO error
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid product data
    #[error("Invalid product {id}: {reason}")]
    InvalidProduct {
        /// Offending product id
        id: u32,

        /// What is wrong with it
        reason: &'static str,
    },

    /// The products do not form a valid catalog
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Fixture
#[derive(Debug, Clone)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// Create a fixture loader with the default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a fixture loader with a custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Path of the product file for a fixture set
    pub fn products_path(&self, name: &str) -> PathBuf {
        self.base_path.join("products").join(format!("{name}.yml"))
    }

    /// Load the catalog for a fixture set
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the products are invalid.
    pub fn load_catalog(&self, name: &str) -> Result<Catalog, FixtureError> {
        load_catalog(self.products_path(name))
    }

    /// Load the catalog of the named set under `./fixtures`
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    pub fn from_set(name: &str) -> Result<Catalog, FixtureError> {
        Self::new().load_catalog(name)
    }
}

/// Load a catalog from a YAML file
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if the products are invalid.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog, FixtureError> {
    let path = path.as_ref();

    let contents = fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = parse_catalog(&contents)?;

    debug!(path = %path.display(), products = catalog.len(), "catalog loaded");

    Ok(catalog)
}

/// Parse a catalog from YAML text
///
/// # Errors
///
/// Returns an error if the YAML is invalid or the products do not form a valid catalog.
pub fn parse_catalog(contents: &str) -> Result<Catalog, FixtureError> {
    let fixture: products::ProductsFixture = serde_norway::from_str(contents)?;

    let products = fixture
        .products
        .into_iter()
        .map(Product::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Catalog::new(products)?)
}
