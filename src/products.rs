//! Products

use serde::Deserialize;
use std::fmt;

use crate::prices::Amount;

/// Brand tier classification used for voucher eligibility gating.
///
/// Independent of any brand-specific discount percentage: a premium brand may
/// carry no brand discount and still be excluded from a voucher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrandTier {
    /// Premium brands (luxury labels).
    Premium,

    /// Regular high-street brands.
    Regular,

    /// Budget brands.
    Budget,
}

impl fmt::Display for BrandTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrandTier::Premium => write!(f, "premium"),
            BrandTier::Regular => write!(f, "regular"),
            BrandTier::Budget => write!(f, "budget"),
        }
    }
}

/// Product
///
/// Carries two prices: the immutable list price and a working price that the
/// brand and category rules lower as the stacking pipeline runs. The working
/// price never exceeds the list price within a pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: String,
    brand: String,
    brand_tier: BrandTier,
    category: String,
    base_price: Amount,
    current_price: Amount,
}

impl Product {
    /// Create a new product; the working price starts at the list price.
    pub fn new(
        id: impl Into<String>,
        brand: impl Into<String>,
        brand_tier: BrandTier,
        category: impl Into<String>,
        base_price: Amount,
    ) -> Self {
        Self {
            id: id.into(),
            brand: brand.into(),
            brand_tier,
            category: category.into(),
            base_price,
            current_price: base_price,
        }
    }

    /// Product identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Brand name, matched against rule tables and voucher exclusions.
    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// Brand tier.
    pub fn brand_tier(&self) -> BrandTier {
        self.brand_tier
    }

    /// Category name.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Immutable list price.
    pub fn base_price(&self) -> Amount {
        self.base_price
    }

    /// Working price reflecting the discounts applied so far.
    pub fn current_price(&self) -> Amount {
        self.current_price
    }

    /// Lower the working price. Rules that compound on earlier stages read the
    /// value this sets.
    pub(crate) fn set_current_price(&mut self, price: Amount) {
        self.current_price = price;
    }
}
