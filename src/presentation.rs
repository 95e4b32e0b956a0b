//! Presentation
//!
//! Text and view state shown to shoppers: rouble formatting, Russian plural
//! forms, in-cart labels and per-product card state. Renderers take these
//! as-is; nothing here touches storage.

use rusty_money::{Formatter, Money, Params, Position, iso::Currency};
use smallvec::SmallVec;

use crate::{
    cart::Cart,
    catalog::{Catalog, CategoryFilter, SIMILAR_PRODUCTS_LIMIT},
    discounts::TierHint,
    pricing::roubles,
    products::Product,
    summary::CartSummary,
};

/// Separator used between digit groups.
const NBSP: char = '\u{a0}';

/// Currency sign, preceded by a no-break space.
const ROUBLE_SIGN: &str = "\u{a0}₽";

/// Thousands grouping, wide enough for any `i64` rouble amount.
const DIGIT_GROUPS: [usize; 6] = [3; 6];

const PRICE_POSITIONS: [Position; 3] = [Position::Sign, Position::Amount, Position::Symbol];

/// Shown when checkout is attempted with an empty cart.
pub const EMPTY_CART_NOTICE: &str = "Добавьте товары в корзину.";

/// Body text of an empty cart.
pub const EMPTY_CART_TEXT: &str = "Корзина пуста";

/// Format a money amount the ru-RU way, in whole roubles: `1 234 ₽`.
pub fn format_money(money: &Money<'_, Currency>) -> String {
    Formatter::money(
        money,
        Params {
            digit_separator: NBSP,
            exponent_separator: ',',
            separator_pattern: &DIGIT_GROUPS,
            positions: &PRICE_POSITIONS,
            rounding: Some(0),
            symbol: Some(ROUBLE_SIGN),
            code: None,
        },
    )
}

/// Format whole roubles, see [`format_money`].
pub fn format_price(amount: i64) -> String {
    format_money(&roubles(amount))
}

/// `n` followed by the matching plural form of "товар".
pub fn plural_goods(n: u32) -> String {
    let word = match (n % 10, n % 100) {
        (1, rem) if rem != 11 => "товар",
        (2..=4, rem) if !(12..=14).contains(&rem) => "товара",
        _ => "товаров",
    };

    format!("{n} {word}")
}

/// Upsell line for the next discount tier.
pub fn tier_hint_text(hint: TierHint) -> String {
    format!(
        "Ещё {} до скидки {}%",
        plural_goods(hint.units_needed),
        hint.next_percent
    )
}

/// Label of the discount row, or `None` when no discount applies.
pub fn discount_label(summary: &CartSummary) -> Option<String> {
    (summary.discount_percent() > 0).then(|| format!("Скидка {}%", summary.discount_percent()))
}

/// Discount annotation submitted with an order: `10% (−55 ₽)`, or `None` without a discount.
pub fn discount_annotation(summary: &CartSummary) -> Option<String> {
    (summary.discount_percent() > 0).then(|| {
        format!(
            "{}% (−{})",
            summary.discount_percent(),
            format_price(summary.discount_amount_roubles())
        )
    })
}

/// A catalog card: a product plus how many of it are in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductCard<'a> {
    /// The listed product.
    pub product: &'a Product,

    /// Units of the product in the cart.
    pub in_cart: u32,
}

impl ProductCard<'_> {
    /// Check if the product is in the cart.
    pub fn is_in_cart(&self) -> bool {
        self.in_cart > 0
    }

    /// Badge next to the add button: empty, `В корзине`, or `В корзине (n)`.
    pub fn in_cart_label(&self) -> String {
        match self.in_cart {
            0 => String::new(),
            1 => "В корзине".to_string(),
            n => format!("В корзине ({n})"),
        }
    }

    /// Caption of the add button.
    pub fn add_button_label(&self) -> &'static str {
        if self.is_in_cart() {
            "Добавить ещё"
        } else {
            "Добавить в корзину"
        }
    }

    /// Formatted price.
    pub fn price_label(&self) -> String {
        format_price(i64::from(self.product.price))
    }
}

/// Cards for every product passing `filter`, with in-cart state from `cart`.
///
/// `cart` is read once by the caller per render pass so every card sees the same state.
pub fn product_cards<'a>(
    catalog: &'a Catalog,
    filter: &'a CategoryFilter,
    cart: &Cart,
) -> Vec<ProductCard<'a>> {
    catalog
        .filter(filter)
        .map(|product| ProductCard {
            product,
            in_cart: cart.quantity_of(product.id),
        })
        .collect()
}

/// Product detail view: the product, its cart state and similar products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetail<'a> {
    /// The product and its cart state.
    pub card: ProductCard<'a>,

    /// Other products from the same category.
    pub similar: SmallVec<[&'a Product; SIMILAR_PRODUCTS_LIMIT]>,
}

impl<'a> ProductDetail<'a> {
    /// Build the detail view for `product`.
    pub fn new(catalog: &'a Catalog, product: &'a Product, cart: &Cart) -> Self {
        Self {
            card: ProductCard {
                product,
                in_cart: cart.quantity_of(product.id),
            },
            similar: catalog.similar(product, SIMILAR_PRODUCTS_LIMIT),
        }
    }

    /// Cart status line, e.g. `В корзине: 2 шт.`, or `None` when not in the cart.
    pub fn cart_status(&self) -> Option<String> {
        self.card
            .is_in_cart()
            .then(|| format!("В корзине: {} шт.", self.card.in_cart))
    }
}
