//! Cart Summary
//!
//! The renderable view of a cart: each line resolved against the live
//! catalog, the subtotal, the tiered discount and the total. A summary is
//! derived on demand and never persisted; building it twice from the same
//! cart and catalog yields identical values.

use rusty_money::{Money, iso::Currency};
use tracing::trace;

use crate::{
    cart::{Cart, CartLineItem},
    catalog::Catalog,
    discounts::{TierHint, discount_amount, discount_percent, next_tier_hint},
    pricing::{line_total, roubles},
    products::{Product, ProductId},
};

/// Where a line's display name and unit price came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The product is still listed; live catalog values were used.
    Catalog,

    /// The product is no longer listed; the values captured at add time were used.
    Snapshot,
}

/// A line item resolved to its display values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedLine<'a> {
    /// Resolved from the live catalog entry.
    FromCatalog(&'a Product),

    /// Resolved from the line's own snapshot.
    FromSnapshot(&'a CartLineItem),
}

impl<'a> ResolvedLine<'a> {
    /// Resolve a line item, preferring the live catalog entry.
    pub fn resolve(line: &'a CartLineItem, catalog: &'a Catalog) -> Self {
        catalog
            .get(line.id)
            .map_or(ResolvedLine::FromSnapshot(line), ResolvedLine::FromCatalog)
    }

    /// Display name.
    pub fn name(&self) -> &'a str {
        match *self {
            ResolvedLine::FromCatalog(product) => &product.name,
            ResolvedLine::FromSnapshot(line) => &line.name,
        }
    }

    /// Unit price in whole roubles.
    pub fn unit_price(&self) -> u32 {
        match *self {
            ResolvedLine::FromCatalog(product) => product.price,
            ResolvedLine::FromSnapshot(line) => line.price,
        }
    }

    /// Which source the values came from.
    pub fn resolution(&self) -> Resolution {
        match self {
            ResolvedLine::FromCatalog(_) => Resolution::Catalog,
            ResolvedLine::FromSnapshot(_) => Resolution::Snapshot,
        }
    }
}

/// One line of a [`CartSummary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    /// Product id
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Unit price in whole roubles
    pub unit_price: u32,

    /// Units in the cart
    pub quantity: u32,

    /// Source of name and price
    pub resolution: Resolution,
}

impl SummaryLine {
    /// Unit price as money.
    pub fn unit_price_money(&self) -> Money<'static, Currency> {
        roubles(i64::from(self.unit_price))
    }

    /// Unit price times quantity, in whole roubles.
    pub fn line_total(&self) -> i64 {
        line_total(self.unit_price, self.quantity)
    }

    /// Unit price times quantity, as money.
    pub fn line_total_money(&self) -> Money<'static, Currency> {
        roubles(self.line_total())
    }
}

/// Derived cart totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary {
    lines: Vec<SummaryLine>,
    total_quantity: u32,
    subtotal: i64,
    discount_percent: u8,
    discount_amount: i64,
    next_tier_hint: Option<TierHint>,
}

impl CartSummary {
    /// Summarise `cart` against `catalog`.
    pub fn build(cart: &Cart, catalog: &Catalog) -> Self {
        let lines: Vec<SummaryLine> = cart
            .iter()
            .map(|line| {
                let resolved = ResolvedLine::resolve(line, catalog);

                SummaryLine {
                    id: line.id,
                    name: resolved.name().to_string(),
                    unit_price: resolved.unit_price(),
                    quantity: line.quantity,
                    resolution: resolved.resolution(),
                }
            })
            .collect();

        let total_quantity = lines
            .iter()
            .fold(0, |total: u32, line| total.saturating_add(line.quantity));

        let subtotal = lines
            .iter()
            .fold(0, |total: i64, line| total.saturating_add(line.line_total()));

        let discount_percent = discount_percent(total_quantity);
        let discount_amount = discount_amount(subtotal, discount_percent);
        let next_tier_hint = next_tier_hint(total_quantity).filter(|hint| hint.units_needed > 0);

        trace!(
            lines = lines.len(),
            total_quantity, subtotal, discount_percent, discount_amount, "cart summarised"
        );

        Self {
            lines,
            total_quantity,
            subtotal,
            discount_percent,
            discount_amount,
            next_tier_hint,
        }
    }

    /// Resolved lines in cart order.
    pub fn lines(&self) -> &[SummaryLine] {
        &self.lines
    }

    /// Check if the summarised cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities.
    pub fn total_quantity(&self) -> u32 {
        self.total_quantity
    }

    /// Subtotal before discount, in whole roubles.
    pub fn subtotal_roubles(&self) -> i64 {
        self.subtotal
    }

    /// Subtotal before discount.
    pub fn subtotal(&self) -> Money<'static, Currency> {
        roubles(self.subtotal)
    }

    /// Discount percentage for the total quantity.
    pub fn discount_percent(&self) -> u8 {
        self.discount_percent
    }

    /// Discount amount, in whole roubles.
    pub fn discount_amount_roubles(&self) -> i64 {
        self.discount_amount
    }

    /// Discount amount.
    pub fn discount_amount(&self) -> Money<'static, Currency> {
        roubles(self.discount_amount)
    }

    /// Total after discount, in whole roubles.
    pub fn total_roubles(&self) -> i64 {
        self.subtotal - self.discount_amount
    }

    /// Total after discount.
    pub fn total(&self) -> Money<'static, Currency> {
        roubles(self.total_roubles())
    }

    /// Units needed to reach the next discount tier, if any.
    pub fn next_tier_hint(&self) -> Option<TierHint> {
        self.next_tier_hint
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::catalog::CatalogError;

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

    fn line(id: u32, name: &str, price: u32, quantity: u32) -> CartLineItem {
        CartLineItem {
            id: ProductId::new(id),
            name: name.to_string(),
            price,
            quantity,
        }
    }

    fn test_catalog() -> Result<Catalog, CatalogError> {
        Catalog::new([product(1, "Спутник", 100), product(2, "Гагарин", 250)])
    }

    #[test]
    fn scenario_four_units_ten_percent() -> TestResult {
        let catalog = test_catalog()?;
        let cart = Cart::with_items([
            line(1, "Спутник", 100, 3),
            line(2, "Гагарин", 250, 1),
        ]);

        let summary = CartSummary::build(&cart, &catalog);

        assert_eq!(summary.total_quantity(), 4);
        assert_eq!(summary.subtotal(), roubles(550));
        assert_eq!(summary.discount_percent(), 10);
        assert_eq!(summary.discount_amount(), roubles(55));
        assert_eq!(summary.total(), roubles(495));
        assert_eq!(
            summary.next_tier_hint(),
            Some(TierHint {
                units_needed: 2,
                next_percent: 15
            })
        );

        Ok(())
    }

    #[test]
    fn empty_cart_summary() {
        let summary = CartSummary::build(&Cart::new(), &Catalog::default());

        assert!(summary.is_empty());
        assert_eq!(summary.subtotal_roubles(), 0);
        assert_eq!(summary.discount_percent(), 0);
        assert_eq!(summary.total_roubles(), 0);
        assert_eq!(
            summary.next_tier_hint(),
            Some(TierHint {
                units_needed: 2,
                next_percent: 5
            })
        );
    }

    #[test]
    fn live_catalog_price_wins_over_snapshot() -> TestResult {
        let catalog = test_catalog()?;
        let cart = Cart::with_items([line(1, "Старое имя", 80, 2)]);

        let summary = CartSummary::build(&cart, &catalog);
        let first = summary.lines().first();

        assert_eq!(first.map(|l| l.name.as_str()), Some("Спутник"));
        assert_eq!(first.map(|l| l.unit_price), Some(100));
        assert_eq!(first.map(|l| l.resolution), Some(Resolution::Catalog));
        assert_eq!(summary.subtotal_roubles(), 200);

        Ok(())
    }

    #[test]
    fn bare_record_is_priced_from_catalog() -> TestResult {
        let catalog = test_catalog()?;
        let cart: Cart = serde_json::from_str(r#"[{"id":1,"quantity":3}]"#)?;

        let summary = CartSummary::build(&cart, &catalog);

        assert_eq!(
            summary.lines().first().map(|l| l.name.as_str()),
            Some("Спутник")
        );
        assert_eq!(summary.subtotal_roubles(), 300);

        Ok(())
    }

    #[test]
    fn delisted_product_uses_snapshot() -> TestResult {
        let catalog = test_catalog()?;
        let cart = Cart::with_items([
            line(1, "Спутник", 100, 1),
            line(9, "Снятая с продажи", 70, 2),
        ]);

        let summary = CartSummary::build(&cart, &catalog);
        let resolutions: Vec<Resolution> =
            summary.lines().iter().map(|l| l.resolution).collect();

        assert_eq!(resolutions, [Resolution::Catalog, Resolution::Snapshot]);
        assert_eq!(
            summary.lines().get(1).map(|l| l.name.as_str()),
            Some("Снятая с продажи")
        );
        assert_eq!(summary.subtotal_roubles(), 240);

        Ok(())
    }

    #[test]
    fn resolve_reports_path_taken() -> TestResult {
        let catalog = test_catalog()?;
        let listed = line(2, "x", 1, 1);
        let delisted = line(3, "Блок", 500, 1);

        let from_catalog = ResolvedLine::resolve(&listed, &catalog);
        let from_snapshot = ResolvedLine::resolve(&delisted, &catalog);

        assert!(matches!(from_catalog, ResolvedLine::FromCatalog(p) if p.name == "Гагарин"));
        assert_eq!(from_catalog.unit_price(), 250);
        assert!(matches!(from_snapshot, ResolvedLine::FromSnapshot(_)));
        assert_eq!(from_snapshot.name(), "Блок");
        assert_eq!(from_snapshot.unit_price(), 500);

        Ok(())
    }

    #[test]
    fn top_tier_has_no_hint() -> TestResult {
        let catalog = test_catalog()?;
        let cart = Cart::with_items([line(1, "Спутник", 100, 12)]);

        let summary = CartSummary::build(&cart, &catalog);

        assert_eq!(summary.discount_percent(), 25);
        assert_eq!(summary.discount_amount_roubles(), 300);
        assert_eq!(summary.total_roubles(), 900);
        assert_eq!(summary.next_tier_hint(), None);

        Ok(())
    }

    #[test]
    fn build_is_idempotent() -> TestResult {
        let catalog = test_catalog()?;
        let cart = Cart::with_items([line(1, "Спутник", 100, 3), line(7, "Блок", 33, 2)]);

        assert_eq!(
            CartSummary::build(&cart, &catalog),
            CartSummary::build(&cart, &catalog)
        );

        Ok(())
    }

    #[test]
    fn line_totals_multiply_quantity() {
        let summary_line = SummaryLine {
            id: ProductId::new(1),
            name: "Спутник".to_string(),
            unit_price: 100,
            quantity: 3,
            resolution: Resolution::Catalog,
        };

        assert_eq!(summary_line.line_total(), 300);
        assert_eq!(summary_line.line_total_money(), roubles(300));
        assert_eq!(summary_line.unit_price_money(), roubles(100));
    }
}
