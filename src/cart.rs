//! Cart
//!
//! The cart is an ordered list of line items with at most one line per
//! product id. It serializes as a plain JSON array of
//! `{id, name, price, quantity}` records.

use serde::{Deserialize, Serialize};

use crate::products::{Product, ProductId};

/// One cart entry: a product id with its aggregated quantity.
///
/// `name` and `price` are snapshots taken when the product was first added,
/// used for display when the product has since left the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Referenced product id; may no longer exist in the catalog.
    pub id: ProductId,

    /// Product name at add time.
    #[serde(default)]
    pub name: String,

    /// Product price in whole roubles at add time.
    #[serde(default)]
    pub price: u32,

    /// Units of this product in the cart, at least 1.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

impl CartLineItem {
    /// Snapshot a catalog product into a new line item.
    pub fn snapshot(product: &Product, quantity: u32) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            quantity: quantity.max(1),
        }
    }
}

/// Cart
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLineItem>", into = "Vec<CartLineItem>")]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from line items.
    ///
    /// Quantities of zero are read as one, and repeated ids are merged into
    /// the first line for that id.
    pub fn with_items(items: impl IntoIterator<Item = CartLineItem>) -> Self {
        let mut cart = Self::new();

        for mut item in items {
            item.quantity = item.quantity.max(1);

            match cart.get_mut(item.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(item.quantity);
                }
                None => cart.items.push(item),
            }
        }

        cart
    }

    /// Iterate over the line items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartLineItem> {
        self.items.iter()
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Line item for a product id.
    pub fn get(&self, id: ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    fn get_mut(&mut self, id: ProductId) -> Option<&mut CartLineItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Quantity of a product in the cart, or 0.
    pub fn quantity_of(&self, id: ProductId) -> u32 {
        self.get(id).map_or(0, |item| item.quantity)
    }

    /// Sum of quantities across all line items.
    pub fn total_quantity(&self) -> u32 {
        self.items
            .iter()
            .fold(0, |total: u32, item| total.saturating_add(item.quantity))
    }

    /// Add `quantity` units of `product`.
    ///
    /// Increments the existing line for the product, or appends a new line
    /// snapshotting the product's current name and price. Adding zero units
    /// leaves the cart unchanged.
    pub fn add(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 {
            return;
        }

        match self.get_mut(product.id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(quantity),
            None => self.items.push(CartLineItem::snapshot(product, quantity)),
        }
    }

    /// Remove the line for a product id, returning it if it was present.
    pub fn remove(&mut self, id: ProductId) -> Option<CartLineItem> {
        let position = self.items.iter().position(|item| item.id == id)?;

        Some(self.items.remove(position))
    }
}

impl From<Vec<CartLineItem>> for Cart {
    fn from(items: Vec<CartLineItem>) -> Self {
        Self::with_items(items)
    }
}

impl From<Cart> for Vec<CartLineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}
