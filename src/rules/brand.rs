//! Brand discounts
//!
//! Automatic percentage discounts keyed by brand name (e.g. "40% off PUMA").
//! Applied first in the stacking pipeline: percentages are taken of the list
//! price, and each discounted item's working price is lowered so later stages
//! compound on the result.

use decimal_percentage::Percentage;
use rustc_hash::FxHashMap;
use rusty_money::Money;

use crate::{
    discounts::{DiscountError, percent_of_minor},
    prices::Amount,
};

use super::{DiscountRule, EvaluationContext, Verdict};

/// Brand discount rule.
#[derive(Debug, Clone, Default)]
pub struct BrandRule {
    discounts: FxHashMap<String, Percentage>,
}

impl BrandRule {
    /// Create a brand rule from a brand name -> percentage table.
    pub fn new(discounts: impl IntoIterator<Item = (String, Percentage)>) -> Self {
        Self {
            discounts: discounts.into_iter().collect(),
        }
    }
}

impl DiscountRule for BrandRule {
    fn name(&self) -> &'static str {
        "Brand Discount"
    }

    fn calculate(&self, ctx: &mut EvaluationContext<'_>) -> Result<Amount, DiscountError> {
        let currency = ctx.cart().currency();
        let mut total_minor = 0i64;

        for item in ctx.cart_mut().items_mut() {
            let Some(percent) = self.discounts.get(item.product().brand()) else {
                continue;
            };

            let base = item.product().base_price();
            let off_minor = percent_of_minor(percent, base.to_minor_units())?;

            item.product_mut()
                .set_current_price(Money::from_minor(base.to_minor_units() - off_minor, currency));

            total_minor += off_minor * i64::from(item.quantity());
        }

        Ok(Money::from_minor(total_minor, currency))
    }

    fn validate(&self, _ctx: &EvaluationContext<'_>) -> Verdict {
        // Brand discounts are automatic; there is nothing to gate on.
        Verdict::valid()
    }
}
