//! Discounts
//!
//! Quantity-tiered discounts. The more units in the cart, the larger the
//! percentage taken off the subtotal. The tier table is fixed and strictly
//! increasing in both the quantity threshold and the percentage, so the
//! highest satisfied threshold is always unambiguous.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

/// A single threshold in the discount table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountTier {
    min_quantity: u32,
    percent: u8,
}

impl DiscountTier {
    const fn new(min_quantity: u32, percent: u8) -> Self {
        Self {
            min_quantity,
            percent,
        }
    }

    /// Smallest total quantity that unlocks this tier.
    pub const fn min_quantity(&self) -> u32 {
        self.min_quantity
    }

    /// Discount percentage granted by this tier.
    pub const fn percent(&self) -> u8 {
        self.percent
    }
}

/// The discount table, ordered by ascending threshold.
pub const DISCOUNT_TIERS: [DiscountTier; 5] = [
    DiscountTier::new(2, 5),
    DiscountTier::new(4, 10),
    DiscountTier::new(6, 15),
    DiscountTier::new(8, 20),
    DiscountTier::new(10, 25),
];

/// Upper bound applied to any percentage before it touches a subtotal.
const MAX_PERCENT: u8 = 99;

/// Distance to the next discount tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierHint {
    /// Additional units needed to reach the next tier.
    pub units_needed: u32,

    /// Percentage granted once the next tier is reached.
    pub next_percent: u8,
}

/// Discount percentage for a total cart quantity.
///
/// Returns the percentage of the highest tier whose threshold is at most
/// `total_quantity`, or `0` below the first threshold.
pub fn discount_percent(total_quantity: u32) -> u8 {
    DISCOUNT_TIERS
        .iter()
        .rev()
        .find(|tier| total_quantity >= tier.min_quantity)
        .map_or(0, DiscountTier::percent)
}

/// Hint towards the next discount tier.
///
/// Returns `None` once the top tier is reached. Exactly on a threshold the
/// hint refers to the following threshold, not the current one.
pub fn next_tier_hint(total_quantity: u32) -> Option<TierHint> {
    DISCOUNT_TIERS
        .iter()
        .find(|tier| tier.min_quantity > total_quantity)
        .map(|tier| TierHint {
            units_needed: tier.min_quantity - total_quantity,
            next_percent: tier.percent,
        })
}

/// Discount taken off `subtotal` (whole roubles) at `percent`.
///
/// The result is rounded to whole roubles with midpoints rounded away from
/// zero, which for the non-negative subtotals seen here is round-half-up.
/// `percent` is clamped below 100 so the discount never exceeds the subtotal.
pub fn discount_amount(subtotal: i64, percent: u8) -> i64 {
    let percent = Decimal::from(percent.min(MAX_PERCENT));

    Decimal::from(subtotal)
        .checked_mul(percent)
        .and_then(|applied| applied.checked_div(Decimal::ONE_HUNDRED))
        .map(|applied| applied.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|rounded| rounded.to_i64())
        .unwrap_or(0)
}
