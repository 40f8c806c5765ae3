//! Category discounts
//!
//! Automatic percentage discounts keyed by category (e.g. "extra 10% off
//! T-shirts"). Runs after the brand rule and takes its percentage of the
//! working price, so the two genuinely compound instead of summing.

use decimal_percentage::Percentage;
use rustc_hash::FxHashMap;
use rusty_money::Money;

use crate::{
    discounts::{DiscountError, percent_of_minor},
    prices::Amount,
};

use super::{DiscountRule, EvaluationContext, Verdict};

/// Category discount rule.
#[derive(Debug, Clone, Default)]
pub struct CategoryRule {
    discounts: FxHashMap<String, Percentage>,
}

impl CategoryRule {
    /// Create a category rule from a category -> percentage table.
    pub fn new(discounts: impl IntoIterator<Item = (String, Percentage)>) -> Self {
        Self {
            discounts: discounts.into_iter().collect(),
        }
    }
}

impl DiscountRule for CategoryRule {
    fn name(&self) -> &'static str {
        "Category Discount"
    }

    fn calculate(&self, ctx: &mut EvaluationContext<'_>) -> Result<Amount, DiscountError> {
        let currency = ctx.cart().currency();
        let mut total_minor = 0i64;

        for item in ctx.cart_mut().items_mut() {
            let Some(percent) = self.discounts.get(item.product().category()) else {
                continue;
            };

            let current = item.product().current_price();
            let off_minor = percent_of_minor(percent, current.to_minor_units())?;

            item.product_mut().set_current_price(Money::from_minor(
                current.to_minor_units() - off_minor,
                currency,
            ));

            total_minor += off_minor * i64::from(item.quantity());
        }

        Ok(Money::from_minor(total_minor, currency))
    }

    fn validate(&self, _ctx: &EvaluationContext<'_>) -> Verdict {
        // Category discounts are automatic; there is nothing to gate on.
        Verdict::valid()
    }
}
