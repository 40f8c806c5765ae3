//! Integration tests for YAML fixture loading.

use std::fs;

use rusty_money::{Money, iso::INR};
use testresult::TestResult;

use rebate::{
    cart::Cart,
    customers::{CustomerProfile, CustomerTier},
    fixtures::{Fixture, FixtureError},
    prices::Amount,
};

fn rupees(minor: i64) -> Amount {
    Money::from_minor(minor, INR)
}

fn standard_fixture() -> Result<Fixture, FixtureError> {
    let mut fixture = Fixture::new();
    fixture.load_products("standard")?.load_rules("standard")?;

    Ok(fixture)
}

#[test]
fn standard_set_loads_and_prices() -> TestResult {
    let fixture = standard_fixture()?;

    let cart = Cart::with_items(vec![fixture.cart_item("puma_tshirt", 1, "M")?], INR)?;
    let customer = CustomerProfile::new("C001", CustomerTier::Silver, rupees(0));

    let receipt = fixture.engine()?.price(&cart, &customer, None, None)?;

    // 40% brand then 10% category, same as the rules built in code.
    assert_eq!(receipt.original_price(), rupees(100_000));
    assert_eq!(receipt.final_price(), rupees(54_000));

    Ok(())
}

#[test]
fn products_carry_tier_and_category_from_yaml() -> TestResult {
    let fixture = standard_fixture()?;

    let shoes = fixture.product("nike_shoes")?;
    assert_eq!(shoes.brand(), "NIKE");
    assert_eq!(shoes.category(), "Shoes");
    assert_eq!(shoes.base_price(), rupees(500_000));

    assert_eq!(fixture.currency(), Some(INR));

    Ok(())
}

#[test]
fn unknown_product_key_is_an_error() -> TestResult {
    let fixture = standard_fixture()?;
    let result = fixture.product("hoverboard");

    assert!(matches!(
        result,
        Err(FixtureError::ProductNotFound(key)) if key == "hoverboard"
    ));

    Ok(())
}

#[test]
fn engine_requires_rules_to_be_loaded() -> TestResult {
    let mut fixture = Fixture::new();
    fixture.load_products("standard")?;

    assert!(matches!(fixture.engine(), Err(FixtureError::NoRules)));

    Ok(())
}

#[test]
fn malformed_yaml_is_a_parse_error() -> TestResult {
    let dir = tempfile::tempdir()?;
    fs::create_dir_all(dir.path().join("products"))?;
    fs::write(
        dir.path().join("products").join("broken.yml"),
        "products: [not, a, map",
    )?;

    let mut fixture = Fixture::with_base_path(dir.path());
    let result = fixture.load_products("broken");

    assert!(matches!(result, Err(FixtureError::Yaml(_))));

    Ok(())
}

#[test]
fn bad_price_string_is_rejected() -> TestResult {
    let dir = tempfile::tempdir()?;
    fs::create_dir_all(dir.path().join("products"))?;
    fs::write(
        dir.path().join("products").join("bad_price.yml"),
        r#"
products:
  widget:
    brand: ACME
    tier: regular
    category: Widgets
    price: "1000.00INR"
"#,
    )?;

    let mut fixture = Fixture::with_base_path(dir.path());
    let result = fixture.load_products("bad_price");

    assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));

    Ok(())
}

#[test]
fn unknown_currency_is_rejected() -> TestResult {
    let dir = tempfile::tempdir()?;
    fs::create_dir_all(dir.path().join("products"))?;
    fs::write(
        dir.path().join("products").join("doubloons.yml"),
        r#"
products:
  widget:
    brand: ACME
    tier: regular
    category: Widgets
    price: "1000.00 DBL"
"#,
    )?;

    let mut fixture = Fixture::with_base_path(dir.path());
    let result = fixture.load_products("doubloons");

    assert!(matches!(
        result,
        Err(FixtureError::UnknownCurrency(code)) if code == "DBL"
    ));

    Ok(())
}

#[test]
fn mixed_currencies_across_products_are_rejected() -> TestResult {
    let dir = tempfile::tempdir()?;
    fs::create_dir_all(dir.path().join("products"))?;
    fs::write(
        dir.path().join("products").join("inr.yml"),
        r#"
products:
  widget:
    brand: ACME
    tier: regular
    category: Widgets
    price: "1000.00 INR"
"#,
    )?;
    fs::write(
        dir.path().join("products").join("usd.yml"),
        r#"
products:
  gadget:
    brand: ACME
    tier: regular
    category: Widgets
    price: "10.00 USD"
"#,
    )?;

    let mut fixture = Fixture::with_base_path(dir.path());
    fixture.load_products("inr")?;
    let result = fixture.load_products("usd");

    assert!(matches!(result, Err(FixtureError::CurrencyMismatch(_, _))));

    Ok(())
}

#[test]
fn missing_fixture_file_is_an_io_error() -> TestResult {
    let dir = tempfile::tempdir()?;
    let mut fixture = Fixture::with_base_path(dir.path());

    let result = fixture.load_products("nope");

    assert!(matches!(result, Err(FixtureError::Io(_))));

    Ok(())
}
