//! Product Fixtures

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{Currency, GBP, INR, USD},
};
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    products::{BrandTier, Product},
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Map of product key -> product fixture
    pub products: FxHashMap<String, ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Brand name (e.g., "PUMA")
    pub brand: String,

    /// Brand tier
    pub tier: BrandTier,

    /// Category name (e.g., "T-shirts")
    pub category: String,

    /// Base price (e.g., "1000.00 INR")
    pub price: String,
}

impl ProductFixture {
    /// Build a [`Product`] from this fixture, using the YAML map key as its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the price string cannot be parsed.
    pub fn into_product(self, id: &str) -> Result<Product, FixtureError> {
        let (minor_units, currency) = parse_price(&self.price)?;
        let price = Money::from_minor(minor_units, currency);

        Ok(Product::new(id, self.brand, self.tier, self.category, price))
    }
}

/// Parse price string (e.g., "1000.00 INR") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency_code = parts
        .get(1)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "INR" => INR,
        "USD" => USD,
        "GBP" => GBP,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}

/// Parse percentage string (e.g., "40%" or "0.4") into a `Percentage`
///
/// Accepts two formats:
/// - Percentage format: "40%" for 40%
/// - Decimal format: "0.4" for 40%
///
/// # Errors
///
/// Returns an error if the string cannot be parsed.
pub fn parse_percentage(s: &str) -> Result<Percentage, FixtureError> {
    let trimmed = s.trim();

    if let Some(percent_str) = trimmed.strip_suffix('%') {
        let value = percent_str
            .trim()
            .parse::<f64>()
            .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))?;

        // Convert from percent points to a fraction (40 -> 0.4)
        Ok(Percentage::from(value / 100.0))
    } else {
        let value = trimmed
            .parse::<f64>()
            .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))?;

        Ok(Percentage::from(value))
    }
}
