//! Pricing
//!
//! All catalog prices are whole roubles. Money values carry kopecks as their
//! minor unit, so conversions go through [`KOPECKS_PER_ROUBLE`].

use rusty_money::{
    Money,
    iso::{self, Currency},
};

/// Minor units in one rouble.
pub const KOPECKS_PER_ROUBLE: i64 = 100;

/// Convert a whole-rouble amount to money.
pub fn roubles(amount: i64) -> Money<'static, Currency> {
    Money::from_minor(amount.saturating_mul(KOPECKS_PER_ROUBLE), iso::RUB)
}

/// Price of `quantity` units at `unit_price` roubles each.
pub fn line_total(unit_price: u32, quantity: u32) -> i64 {
    i64::from(unit_price).saturating_mul(i64::from(quantity))
}
