//! Voucher codes
//!
//! Customer-supplied codes (e.g. "SUPER69" for 69% off) applied to the cart
//! total after the brand and category stages. Vouchers carry the richest
//! eligibility rules: cart value floors, brand and brand-tier exclusions,
//! category restrictions, and loyalty tier floors. Validation collects every
//! failing reason instead of stopping at the first.

use decimal_percentage::Percentage;
use rustc_hash::{FxHashMap, FxHashSet};
use rusty_money::Money;

use crate::{
    customers::CustomerTier,
    discounts::{DiscountError, percent_of},
    prices::Amount,
    products::BrandTier,
};

use super::{DiscountRule, EvaluationContext, Verdict};

/// A single voucher definition.
#[derive(Debug, Clone)]
pub struct Voucher {
    code: String,
    percentage: Percentage,
    min_cart_value: Option<Amount>,
    excluded_brands: FxHashSet<String>,
    allowed_categories: Option<FxHashSet<String>>,
    excluded_brand_tiers: FxHashSet<BrandTier>,
    min_customer_tier: Option<CustomerTier>,
}

impl Voucher {
    /// Create an unrestricted voucher for a percentage off the cart total.
    pub fn new(code: impl Into<String>, percentage: Percentage) -> Self {
        Self {
            code: code.into(),
            percentage,
            min_cart_value: None,
            excluded_brands: FxHashSet::default(),
            allowed_categories: None,
            excluded_brand_tiers: FxHashSet::default(),
            min_customer_tier: None,
        }
    }

    /// Require a minimum cart subtotal.
    #[must_use]
    pub fn with_min_cart_value(mut self, min: Amount) -> Self {
        self.min_cart_value = Some(min);
        self
    }

    /// Reject carts containing any of these brands.
    #[must_use]
    pub fn with_excluded_brands<I, S>(mut self, brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_brands = brands.into_iter().map(Into::into).collect();
        self
    }

    /// Require every cart item to belong to one of these categories.
    #[must_use]
    pub fn with_allowed_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    /// Reject carts containing any of these brand tiers.
    #[must_use]
    pub fn with_excluded_brand_tiers(mut self, tiers: impl IntoIterator<Item = BrandTier>) -> Self {
        self.excluded_brand_tiers = tiers.into_iter().collect();
        self
    }

    /// Require at least this loyalty tier.
    #[must_use]
    pub fn with_min_customer_tier(mut self, tier: CustomerTier) -> Self {
        self.min_customer_tier = Some(tier);
        self
    }

    /// The voucher code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Percentage off the cart total.
    pub fn percentage(&self) -> Percentage {
        self.percentage
    }
}

/// Voucher rule over a code -> voucher table.
#[derive(Debug, Clone, Default)]
pub struct VoucherRule {
    vouchers: FxHashMap<String, Voucher>,
}

impl VoucherRule {
    /// Create a voucher rule from the given voucher definitions, keyed by code.
    pub fn new(vouchers: impl IntoIterator<Item = Voucher>) -> Self {
        Self {
            vouchers: vouchers
                .into_iter()
                .map(|voucher| (voucher.code.clone(), voucher))
                .collect(),
        }
    }

    /// Look up a voucher by code.
    pub fn get(&self, code: &str) -> Option<&Voucher> {
        self.vouchers.get(code)
    }
}

impl DiscountRule for VoucherRule {
    fn name(&self) -> &'static str {
        "Voucher Code"
    }

    fn calculate(&self, ctx: &mut EvaluationContext<'_>) -> Result<Amount, DiscountError> {
        let zero = Money::from_minor(0, ctx.cart().currency());

        let Some(code) = ctx.voucher_code() else {
            return Ok(zero);
        };

        let Some(voucher) = self.vouchers.get(code) else {
            return Ok(zero);
        };

        percent_of(&voucher.percentage, ctx.cart().current_total())
    }

    fn validate(&self, ctx: &EvaluationContext<'_>) -> Verdict {
        let mut verdict = Verdict::valid();

        let Some(code) = ctx.voucher_code() else {
            verdict.push("No voucher code provided");
            return verdict;
        };

        let Some(voucher) = self.vouchers.get(code) else {
            verdict.push(format!("Voucher code '{code}' is invalid"));
            return verdict;
        };

        if let Some(min) = voucher.min_cart_value {
            let total = ctx.cart().current_total();

            if total.to_minor_units() < min.to_minor_units() {
                verdict.push(format!(
                    "Minimum cart value of {min} not met (current: {total})"
                ));
            }
        }

        if !voucher.excluded_brands.is_empty() {
            let mut excluded_in_cart: Vec<&str> = ctx
                .cart()
                .iter()
                .map(|item| item.product().brand())
                .filter(|brand| voucher.excluded_brands.contains(*brand))
                .collect();
            excluded_in_cart.sort_unstable();
            excluded_in_cart.dedup();

            if !excluded_in_cart.is_empty() {
                verdict.push(format!(
                    "Voucher not valid for brands: {}",
                    excluded_in_cart.join(", ")
                ));
            }
        }

        if let Some(allowed) = &voucher.allowed_categories {
            let outside = ctx
                .cart()
                .iter()
                .any(|item| !allowed.contains(item.product().category()));

            if outside {
                let mut names: Vec<&str> = allowed.iter().map(String::as_str).collect();
                names.sort_unstable();

                verdict.push(format!(
                    "Voucher only valid for categories: {}",
                    names.join(", ")
                ));
            }
        }

        if !voucher.excluded_brand_tiers.is_empty() {
            let mut tiers_in_cart: Vec<String> = ctx
                .cart()
                .iter()
                .map(|item| item.product().brand_tier())
                .filter(|tier| voucher.excluded_brand_tiers.contains(tier))
                .map(|tier| tier.to_string())
                .collect();
            tiers_in_cart.sort_unstable();
            tiers_in_cart.dedup();

            if !tiers_in_cart.is_empty() {
                verdict.push(format!(
                    "Voucher not valid for {} brand products",
                    tiers_in_cart.join(", ")
                ));
            }
        }

        if let Some(required) = voucher.min_customer_tier {
            let tier = ctx.customer().tier();

            if tier < required {
                verdict.push(format!(
                    "Voucher requires {required} membership (current: {tier})"
                ));
            }
        }

        verdict
    }
}
