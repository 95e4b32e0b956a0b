//! Products

use std::fmt;

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};

use crate::pricing::roubles;

/// Product identifier, unique within a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u32);

impl ProductId {
    /// Wrap a raw product id.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Return the raw product id.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Product id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Product price in whole roubles
    pub price: u32,

    /// Category tag used for filtering and "similar products"
    pub category: String,

    /// Long description shown in the detail view
    pub description: String,

    /// Image reference (path or URL)
    pub image: String,
}

impl Product {
    /// Product price as money.
    pub fn price_money(&self) -> Money<'static, Currency> {
        roubles(i64::from(self.price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_id_round_trips_raw_value() {
        let id = ProductId::from(42);

        assert_eq!(id.get(), 42);
        assert_eq!(id, ProductId::new(42));
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn price_money_is_whole_roubles() {
        let product = Product {
            id: ProductId::new(1),
            name: "Марка".to_string(),
            price: 250,
            category: "ussr".to_string(),
            description: String::new(),
            image: String::new(),
        };

        assert_eq!(product.price_money(), roubles(250));
    }
}
