//! Command-line shell tests

use std::path::Path;

use clap::Parser;
use testresult::TestResult;

use stampcart::cli::{self, Config};

const CATALOG: &str = "fixtures/products/stamps.yml";

fn run(data_dir: &Path, args: &[&str]) -> Result<String, Box<dyn std::error::Error>> {
    let data_dir = data_dir.to_string_lossy();
    let mut argv = vec![
        "stampcart",
        "--catalog",
        CATALOG,
        "--data-dir",
        data_dir.as_ref(),
        "--cart-key",
        "stamps_cart",
    ];
    argv.extend_from_slice(args);

    let config = Config::try_parse_from(argv)?;
    let mut out = Vec::new();

    cli::run(config, &mut out)?;

    Ok(String::from_utf8(out)?)
}

#[test]
fn catalog_filters_by_category() -> TestResult {
    let dir = tempfile::tempdir()?;

    let all = run(dir.path(), &["catalog"])?;
    let world = run(dir.path(), &["catalog", "--category", "world"])?;

    assert!(all.contains("Гагарин, 1961"));
    assert!(all.contains("Penny Black"));
    assert!(world.contains("Penny Black"));
    assert!(!world.contains("Гагарин, 1961"));
    assert!(world.contains("Корзина: 0 товаров"));

    Ok(())
}

#[test]
fn category_all_lists_everything() -> TestResult {
    let dir = tempfile::tempdir()?;

    for category in ["all", " all "] {
        let text = run(dir.path(), &["catalog", "--category", category])?;

        assert!(text.contains("Penny Black"), "category {category:?}");
        assert!(text.contains("Гагарин, 1961"), "category {category:?}");
        assert!(text.contains("Пинцет филателистический"), "category {category:?}");
    }

    Ok(())
}

#[test]
fn add_then_checkout() -> TestResult {
    let dir = tempfile::tempdir()?;

    run(dir.path(), &["add", "1", "--quantity", "2"])?;
    let cart = run(dir.path(), &["add", "2"])?;

    assert!(cart.contains("Скидка 5%"));
    assert!(cart.contains("Ещё 1 товар до скидки 10%"));

    let order = run(dir.path(), &["checkout"])?;

    assert!(order.contains("Заказ оформлен"));
    assert!(order.contains("Спутник-1, 1957 — 2 шт."));
    assert!(order.contains("Скидка: 5%"));

    let again = run(dir.path(), &["checkout"])?;

    assert_eq!(again.trim(), "Добавьте товары в корзину.");

    Ok(())
}

#[test]
fn unknown_product_is_not_added() -> TestResult {
    let dir = tempfile::tempdir()?;

    let cart = run(dir.path(), &["add", "999"])?;
    let product = run(dir.path(), &["product", "999"])?;

    assert_eq!(cart.trim(), "Корзина пуста");
    assert!(product.contains("не найден"));

    Ok(())
}

#[test]
fn product_view_shows_cart_state_and_similar() -> TestResult {
    let dir = tempfile::tempdir()?;

    run(dir.path(), &["add", "5", "-q", "2"])?;
    let text = run(dir.path(), &["product", "5"])?;

    assert!(text.contains("В корзине: 2 шт."));
    assert!(text.contains("Похожие товары"));
    assert!(text.contains("Байкал, 2016"));
    assert!(!text.contains("Гагарин"));

    Ok(())
}

#[test]
fn remove_and_clear_empty_the_cart() -> TestResult {
    let dir = tempfile::tempdir()?;

    run(dir.path(), &["add", "8"])?;
    run(dir.path(), &["add", "9"])?;

    let after_remove = run(dir.path(), &["remove", "8"])?;
    assert!(after_remove.contains("Флора Японии"));
    assert!(!after_remove.contains("Penny Black"));

    let after_clear = run(dir.path(), &["clear"])?;
    assert_eq!(after_clear.trim(), "Корзина пуста");

    Ok(())
}
