//! Stampcart prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartLineItem},
    catalog::{Catalog, CatalogError, CategoryFilter},
    checkout::{CheckoutError, OrderForm, checkout},
    discounts::{DISCOUNT_TIERS, DiscountTier, TierHint, discount_amount, discount_percent},
    fixtures::{Fixture, FixtureError},
    presentation::{ProductCard, ProductDetail, format_price, plural_goods},
    pricing::roubles,
    products::{Product, ProductId},
    storage::{CartStorage, FileStorage, MemoryStorage, StorageError},
    store::{CartObserver, CartStore, CartStoreError, NoopObserver},
    summary::{CartSummary, SummaryLine},
};
