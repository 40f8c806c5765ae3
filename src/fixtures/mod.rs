//! Fixtures
//!
//! YAML-backed catalog and rule loading, for demos and integration tests.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::{
    cart::CartItem,
    engine::PricingEngine,
    products::Product,
    rules::{
        bank::BankOfferRule, brand::BrandRule, category::CategoryRule, voucher::VoucherRule,
    },
};

pub mod products;
pub mod rules;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Currency mismatch between products
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No rules loaded
    #[error("No rules loaded; cannot create a pricing engine")]
    NoRules,
}

/// The four discount rules parsed from a rules fixture.
#[derive(Debug, Clone)]
pub struct LoadedRules {
    /// Brand -> percentage rule
    pub brand: BrandRule,

    /// Category -> percentage rule
    pub category: CategoryRule,

    /// Voucher code rule
    pub voucher: VoucherRule,

    /// Bank offer rule
    pub bank: BankOfferRule,
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Product catalog keyed by fixture key
    products: FxHashMap<String, Product>,

    /// Discount rules, once loaded
    rules: Option<LoadedRules>,

    /// Currency for the fixture set
    currency: Option<&'static rusty_money::iso::Currency>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            products: FxHashMap::default(),
            rules: None,
            currency: None,
        }
    }

    /// Load products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if products
    /// mix currencies.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: products::ProductsFixture = serde_norway::from_str(&contents)?;

        for (key, product_fixture) in fixture.products {
            let (_minor_units, currency) = products::parse_price(&product_fixture.price)?;

            if let Some(existing_currency) = self.currency {
                if existing_currency != currency {
                    return Err(FixtureError::CurrencyMismatch(
                        existing_currency.iso_alpha_code.to_string(),
                        currency.iso_alpha_code.to_string(),
                    ));
                }
            } else {
                self.currency = Some(currency);
            }

            let product = product_fixture.into_product(&key)?;
            self.products.insert(key, product);
        }

        Ok(self)
    }

    /// Load discount rules from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_rules(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("rules").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: rules::RulesFixture = serde_norway::from_str(&contents)?;

        self.rules = Some(fixture.into_rules()?);

        Ok(self)
    }

    /// Lookup a loaded product by fixture key
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::ProductNotFound`] if no product was loaded
    /// under that key.
    pub fn product(&self, key: &str) -> Result<&Product, FixtureError> {
        self.products
            .get(key)
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// Build a cart item from a loaded product
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::ProductNotFound`] if no product was loaded
    /// under that key.
    pub fn cart_item(
        &self,
        key: &str,
        quantity: u32,
        size: &str,
    ) -> Result<CartItem, FixtureError> {
        let product = self.product(key)?;

        Ok(CartItem::new(product.clone(), quantity, size))
    }

    /// Currency of the loaded products, if any were loaded
    #[must_use]
    pub fn currency(&self) -> Option<&'static rusty_money::iso::Currency> {
        self.currency
    }

    /// Build a pricing engine from the loaded rules
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::NoRules`] if no rules fixture was loaded.
    pub fn engine(&self) -> Result<PricingEngine, FixtureError> {
        let rules = self.rules.as_ref().ok_or(FixtureError::NoRules)?;

        Ok(PricingEngine::new(
            rules.brand.clone(),
            rules.category.clone(),
            rules.voucher.clone(),
            rules.bank.clone(),
        ))
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
