//! Rule Fixtures

use rustc_hash::FxHashMap;
use rusty_money::Money;
use serde::Deserialize;

use crate::{
    customers::CustomerTier,
    fixtures::{
        FixtureError, LoadedRules,
        products::{parse_percentage, parse_price},
    },
    payments::CardType,
    products::BrandTier,
    rules::{
        bank::{BankOffer, BankOfferRule},
        brand::BrandRule,
        category::CategoryRule,
        voucher::{Voucher, VoucherRule},
    },
};

/// Wrapper for discount rules in YAML
#[derive(Debug, Deserialize)]
pub struct RulesFixture {
    /// Map of brand name -> percentage string
    #[serde(default)]
    pub brands: FxHashMap<String, String>,

    /// Map of category name -> percentage string
    #[serde(default)]
    pub categories: FxHashMap<String, String>,

    /// Map of voucher code -> voucher fixture
    #[serde(default)]
    pub vouchers: FxHashMap<String, VoucherFixture>,

    /// Map of bank name -> offer fixture
    #[serde(default)]
    pub bank_offers: FxHashMap<String, BankOfferFixture>,
}

/// Voucher Fixture
#[derive(Debug, Deserialize)]
pub struct VoucherFixture {
    /// Percentage string (e.g., "69%" or "0.69")
    pub percentage: String,

    /// Minimum cart value (e.g., "100.00 INR")
    pub min_cart_value: Option<String>,

    /// Brands the voucher cannot be combined with
    #[serde(default)]
    pub excluded_brands: Vec<String>,

    /// When set, every cart item must be in one of these categories
    pub allowed_categories: Option<Vec<String>>,

    /// Brand tiers the voucher cannot be combined with
    #[serde(default)]
    pub excluded_brand_tiers: Vec<BrandTier>,

    /// Minimum loyalty tier required to redeem
    pub min_customer_tier: Option<CustomerTier>,
}

/// Bank Offer Fixture
#[derive(Debug, Deserialize)]
pub struct BankOfferFixture {
    /// Percentage string (e.g., "10%" or "0.1")
    pub percentage: String,

    /// Required card type, if the offer is card-type specific
    pub card_type: Option<CardType>,

    /// Minimum transaction value (e.g., "100.00 INR")
    pub min_transaction_value: Option<String>,
}

impl RulesFixture {
    /// Build the four discount rules from this fixture.
    ///
    /// # Errors
    ///
    /// Returns an error if any percentage or price string cannot be parsed.
    pub fn into_rules(self) -> Result<LoadedRules, FixtureError> {
        let mut brand_table = FxHashMap::default();
        for (brand, percent) in self.brands {
            brand_table.insert(brand, parse_percentage(&percent)?);
        }

        let mut category_table = FxHashMap::default();
        for (category, percent) in self.categories {
            category_table.insert(category, parse_percentage(&percent)?);
        }

        let mut vouchers = Vec::with_capacity(self.vouchers.len());
        for (code, fixture) in self.vouchers {
            vouchers.push(fixture.into_voucher(code)?);
        }

        let mut offers = Vec::with_capacity(self.bank_offers.len());
        for (bank_name, fixture) in self.bank_offers {
            offers.push(fixture.into_offer(bank_name)?);
        }

        Ok(LoadedRules {
            brand: BrandRule::new(brand_table),
            category: CategoryRule::new(category_table),
            voucher: VoucherRule::new(vouchers),
            bank: BankOfferRule::new(offers),
        })
    }
}

impl VoucherFixture {
    fn into_voucher(self, code: String) -> Result<Voucher, FixtureError> {
        let mut voucher = Voucher::new(code, parse_percentage(&self.percentage)?)
            .with_excluded_brands(self.excluded_brands)
            .with_excluded_brand_tiers(self.excluded_brand_tiers);

        if let Some(min) = self.min_cart_value {
            let (minor, currency) = parse_price(&min)?;
            voucher = voucher.with_min_cart_value(Money::from_minor(minor, currency));
        }

        if let Some(categories) = self.allowed_categories {
            voucher = voucher.with_allowed_categories(categories);
        }

        if let Some(tier) = self.min_customer_tier {
            voucher = voucher.with_min_customer_tier(tier);
        }

        Ok(voucher)
    }
}

impl BankOfferFixture {
    fn into_offer(self, bank_name: String) -> Result<BankOffer, FixtureError> {
        let mut offer = BankOffer::new(bank_name, parse_percentage(&self.percentage)?);

        if let Some(card_type) = self.card_type {
            offer = offer.with_card_type(card_type);
        }

        if let Some(min) = self.min_transaction_value {
            let (minor, currency) = parse_price(&min)?;
            offer = offer.with_min_transaction_value(Money::from_minor(minor, currency));
        }

        Ok(offer)
    }
}

#[cfg(test)]
mod tests {
    use decimal_percentage::Percentage;

    use super::*;

    #[test]
    fn parses_a_full_rule_set_from_yaml() -> Result<(), Box<dyn std::error::Error>> {
        let yaml = r#"
brands:
  PUMA: "40%"
categories:
  T-shirts: "10%"
vouchers:
  SUPER69:
    percentage: "69%"
    min_cart_value: "100.00 INR"
    excluded_brand_tiers: [premium]
bank_offers:
  HDFC:
    percentage: "15%"
    card_type: credit
    min_transaction_value: "500.00 INR"
"#;

        let fixture: RulesFixture = serde_norway::from_str(yaml)?;
        let rules = fixture.into_rules()?;

        let voucher = rules.voucher.get("SUPER69").ok_or("missing voucher")?;
        assert_eq!(voucher.percentage(), Percentage::from(0.69));

        let offer = rules.bank.get("HDFC").ok_or("missing offer")?;
        assert_eq!(offer.percentage(), Percentage::from(0.15));

        Ok(())
    }

    #[test]
    fn missing_sections_default_to_empty() -> Result<(), Box<dyn std::error::Error>> {
        let yaml = r#"
brands:
  NIKE: "0.3"
"#;

        let fixture: RulesFixture = serde_norway::from_str(yaml)?;

        assert!(fixture.categories.is_empty());
        assert!(fixture.vouchers.is_empty());
        assert!(fixture.bank_offers.is_empty());

        Ok(())
    }

    #[test]
    fn bad_percentage_surfaces_as_invalid_percentage() -> Result<(), Box<dyn std::error::Error>> {
        let yaml = r#"
brands:
  PUMA: "lots"
"#;

        let fixture: RulesFixture = serde_norway::from_str(yaml)?;
        let result = fixture.into_rules();

        assert!(matches!(result, Err(FixtureError::InvalidPercentage(_))));

        Ok(())
    }
}
