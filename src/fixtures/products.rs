//! Product Fixtures

use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    products::{Product, ProductId},
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Products in catalog order
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product id
    pub id: u32,

    /// Product name
    pub name: String,

    /// Product price in whole roubles
    pub price: u32,

    /// Product category
    pub category: String,

    /// Product description
    #[serde(default)]
    pub description: String,

    /// Product image reference
    #[serde(default)]
    pub image: String,
}

impl TryFrom<ProductFixture> for Product {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let name = fixture.name.trim();
        let category = fixture.category.trim();

        if name.is_empty() {
            return Err(FixtureError::InvalidProduct {
                id: fixture.id,
                reason: "empty name",
            });
        }

        if category.is_empty() {
            return Err(FixtureError::InvalidProduct {
                id: fixture.id,
                reason: "empty category",
            });
        }

        Ok(Product {
            id: ProductId::new(fixture.id),
            name: name.to_string(),
            price: fixture.price,
            category: category.to_string(),
            description: fixture.description,
            image: fixture.image,
        })
    }
}
