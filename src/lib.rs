//! Stampcart
//!
//! Cart and discount core for a stamp-shop catalog: persisted cart state,
//! quantity-tier discounts and the view data a catalog widget renders.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod cli;
pub mod discounts;
pub mod fixtures;
pub mod prelude;
pub mod presentation;
pub mod pricing;
pub mod products;
pub mod storage;
pub mod store;
pub mod summary;
