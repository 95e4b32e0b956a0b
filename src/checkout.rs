//! Checkout
//!
//! Turns the cart into the three text fields handed to the external order
//! handler, then clears the cart. There is no acknowledgement: once the
//! fields are produced the order is considered submitted.

use thiserror::Error;
use tracing::info;

use crate::{
    catalog::Catalog,
    presentation::{discount_annotation, format_price},
    storage::CartStorage,
    store::{CartStore, CartStoreError},
    summary::CartSummary,
};

/// Discount field value for orders without a discount.
pub const NO_DISCOUNT: &str = "—";

/// Errors raised at checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart is empty; nothing was submitted and the cart is untouched.
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// The cart could not be cleared after submission.
    #[error(transparent)]
    Store(#[from] CartStoreError),
}

/// Order hand-off fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderForm {
    /// One line per item: `name — qty шт. × unit price`.
    pub items: String,

    /// Formatted total after discount.
    pub total: String,

    /// Discount annotation such as `10% (−55 ₽)`, or [`NO_DISCOUNT`].
    pub discount: String,
}

impl OrderForm {
    /// Build the order fields from a summary, or `None` for an empty cart.
    pub fn from_summary(summary: &CartSummary) -> Option<Self> {
        if summary.is_empty() {
            return None;
        }

        let items = summary
            .lines()
            .iter()
            .map(|line| {
                format!(
                    "{} — {} шт. × {}",
                    line.name,
                    line.quantity,
                    format_price(i64::from(line.unit_price))
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        Some(Self {
            items,
            total: format_price(summary.total_roubles()),
            discount: discount_annotation(summary).unwrap_or_else(|| NO_DISCOUNT.to_string()),
        })
    }
}

/// Submit the persisted cart: produce the order fields and clear the cart.
///
/// # Errors
///
/// - [`CheckoutError::EmptyCart`]: the cart is empty; it is left untouched.
/// - [`CheckoutError::Store`]: the cart could not be cleared.
pub fn checkout<S: CartStorage>(
    store: &mut CartStore<S>,
    catalog: &Catalog,
) -> Result<OrderForm, CheckoutError> {
    let summary = store.summary(catalog);
    let form = OrderForm::from_summary(&summary).ok_or(CheckoutError::EmptyCart)?;

    info!(
        lines = summary.lines().len(),
        total_quantity = summary.total_quantity(),
        total = summary.total_roubles(),
        discount_percent = summary.discount_percent(),
        "order submitted"
    );

    store.clear()?;

    Ok(form)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::{
        products::{Product, ProductId},
        storage::MemoryStorage,
    };

    fn product(id: u32, name: &str, price: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price,
            category: "ussr".to_string(),
            description: String::new(),
            image: String::new(),
        }
    }

    fn test_catalog() -> Result<Catalog, crate::catalog::CatalogError> {
        Catalog::new([
            product(1, "Спутник-1", 100),
            product(2, "Гагарин", 250),
        ])
    }

    #[test]
    fn empty_cart_is_rejected_and_untouched() -> TestResult {
        let catalog = test_catalog()?;
        let mut store = CartStore::new(MemoryStorage::new());

        let result = checkout(&mut store, &catalog);

        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
        assert!(store.load().is_empty());
        assert_eq!(store.storage().writes(), 0);

        Ok(())
    }

    #[test]
    fn checkout_produces_fields_and_clears_cart() -> TestResult {
        let catalog = test_catalog()?;
        let mut store = CartStore::new(MemoryStorage::new());

        store.add(&catalog, ProductId::new(1), 3)?;
        store.add(&catalog, ProductId::new(2), 1)?;

        let form = checkout(&mut store, &catalog)?;

        assert_eq!(
            form.items,
            "Спутник-1 — 3 шт. × 100\u{a0}₽\nГагарин — 1 шт. × 250\u{a0}₽"
        );
        assert_eq!(form.total, "495\u{a0}₽");
        assert_eq!(form.discount, "10% (−55\u{a0}₽)");
        assert!(store.load().is_empty());

        Ok(())
    }

    #[test]
    fn single_item_has_no_discount_marker() -> TestResult {
        let catalog = test_catalog()?;
        let mut store = CartStore::new(MemoryStorage::new());

        store.add(&catalog, ProductId::new(2), 1)?;

        let form = checkout(&mut store, &catalog)?;

        assert_eq!(form.total, "250\u{a0}₽");
        assert_eq!(form.discount, NO_DISCOUNT);

        Ok(())
    }

    #[test]
    fn from_summary_of_empty_cart_is_none() {
        let summary = CartSummary::build(&crate::cart::Cart::new(), &Catalog::default());

        assert_eq!(OrderForm::from_summary(&summary), None);
    }
}
