//! Terminal rendering of catalog, cart and order views.

use std::io;

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Style, Theme,
        object::{Columns, Rows},
    },
};

use crate::{
    checkout::OrderForm,
    presentation::{
        EMPTY_CART_TEXT, ProductCard, ProductDetail, discount_label, format_money, format_price,
        plural_goods, tier_hint_text,
    },
    summary::CartSummary,
};

/// Write the catalog grid and the cart badge.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_catalog(
    out: &mut impl io::Write,
    cards: &[ProductCard<'_>],
    cart_quantity: u32,
) -> io::Result<()> {
    if cards.is_empty() {
        writeln!(out, "Нет товаров в этой категории")?;
    } else {
        let mut builder = Builder::default();

        builder.push_record(["ID", "Товар", "Категория", "Цена", ""]);

        for card in cards {
            builder.push_record([
                card.product.id.to_string(),
                card.product.name.clone(),
                card.product.category.clone(),
                card.price_label(),
                card.in_cart_label(),
            ]);
        }

        write_table(out, builder, 3..4)?;
    }

    writeln!(out, "Корзина: {}", plural_goods(cart_quantity))
}

/// Write a product detail view with its similar products.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_product(out: &mut impl io::Write, detail: &ProductDetail<'_>) -> io::Result<()> {
    let product = detail.card.product;

    writeln!(out, "{} (#{})", product.name, product.id)?;
    writeln!(out, "Цена: {}", detail.card.price_label())?;

    if !product.description.is_empty() {
        writeln!(out, "{}", product.description)?;
    }

    match detail.cart_status() {
        Some(status) => writeln!(out, "{status}")?,
        None => writeln!(out, "[{}]", detail.card.add_button_label())?,
    }

    if detail.similar.is_empty() {
        return Ok(());
    }

    writeln!(out, "\nПохожие товары")?;

    let mut builder = Builder::default();

    builder.push_record(["ID", "Товар", "Цена"]);

    for similar in &detail.similar {
        builder.push_record([
            similar.id.to_string(),
            similar.name.clone(),
            format_price(i64::from(similar.price)),
        ]);
    }

    write_table(out, builder, 2..3)
}

/// Write the cart lines, totals and the next-tier hint.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_cart(out: &mut impl io::Write, summary: &CartSummary) -> io::Result<()> {
    if summary.is_empty() {
        return writeln!(out, "{EMPTY_CART_TEXT}");
    }

    let mut builder = Builder::default();

    builder.push_record(["ID", "Товар", "Кол-во", "Цена", "Сумма"]);

    for line in summary.lines() {
        builder.push_record([
            line.id.to_string(),
            line.name.clone(),
            line.quantity.to_string(),
            format_money(&line.unit_price_money()),
            format_money(&line.line_total_money()),
        ]);
    }

    write_table(out, builder, 2..5)?;

    writeln!(out, "Товаров: {}", plural_goods(summary.total_quantity()))?;
    writeln!(out, "Сумма: {}", format_money(&summary.subtotal()))?;

    if let Some(label) = discount_label(summary) {
        writeln!(out, "{label}: −{}", format_money(&summary.discount_amount()))?;
    }

    writeln!(out, "Итого: {}", format_money(&summary.total()))?;

    if let Some(hint) = summary.next_tier_hint() {
        writeln!(out, "{}", tier_hint_text(hint))?;
    }

    Ok(())
}

/// Write the submitted order fields.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_order(out: &mut impl io::Write, form: &OrderForm) -> io::Result<()> {
    writeln!(out, "Заказ оформлен")?;
    writeln!(out, "{}", form.items)?;
    writeln!(out, "Скидка: {}", form.discount)?;
    writeln!(out, "Итого: {}", form.total)
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    numeric_columns: std::ops::Range<usize>,
) -> io::Result<()> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(
        1,
        HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
    );

    table.with(theme);
    table.modify(Rows::first(), Alignment::center());
    table.modify(Columns::new(numeric_columns), Alignment::right());

    writeln!(out, "{table}")
}
