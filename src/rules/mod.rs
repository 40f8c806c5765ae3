//! Discount rules
//!
//! The four rule evaluators (brand, category, voucher, bank offer) share one
//! contract: compute a discount amount for an evaluation context, and report
//! an eligibility verdict with every failing reason collected. Failure to
//! qualify is a verdict, never an error — the pipeline keeps going and
//! surfaces the reasons in the result message.

use rusty_money::Money;
use smallvec::SmallVec;

use crate::{
    cart::Cart, customers::CustomerProfile, discounts::DiscountError, payments::PaymentInfo,
    prices::Amount,
};

pub mod bank;
pub mod brand;
pub mod category;
pub mod voucher;

/// Everything a rule may inspect while evaluating one pricing run.
///
/// The cart is a working copy owned by the context: brand and category rules
/// lower its working prices without touching the caller's cart, and the
/// context lives for exactly one pipeline invocation.
#[derive(Debug)]
pub struct EvaluationContext<'a> {
    cart: Cart,
    customer: &'a CustomerProfile,
    payment: Option<&'a PaymentInfo>,
    voucher_code: Option<&'a str>,
    voucher_deduction: Option<Amount>,
}

impl<'a> EvaluationContext<'a> {
    /// Create a context over a working cart copy.
    pub fn new(cart: Cart, customer: &'a CustomerProfile) -> Self {
        Self {
            cart,
            customer,
            payment: None,
            voucher_code: None,
            voucher_deduction: None,
        }
    }

    /// Attach payment info for the bank offer stage.
    #[must_use]
    pub fn with_payment(mut self, payment: Option<&'a PaymentInfo>) -> Self {
        self.payment = payment;
        self
    }

    /// Attach a voucher code for the voucher stage.
    #[must_use]
    pub fn with_voucher_code(mut self, code: Option<&'a str>) -> Self {
        self.voucher_code = code;
        self
    }

    /// The working cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub(crate) fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    /// The customer being priced for.
    pub fn customer(&self) -> &CustomerProfile {
        self.customer
    }

    /// Payment info, if any was supplied.
    pub fn payment(&self) -> Option<&PaymentInfo> {
        self.payment
    }

    /// Voucher code, if one was supplied.
    pub fn voucher_code(&self) -> Option<&str> {
        self.voucher_code
    }

    /// Cart subtotal the bank offer stage prices against: the working total
    /// net of any voucher discount already applied in this run.
    pub fn bankable_total(&self) -> Amount {
        let total = self.cart.current_total();

        self.voucher_deduction.map_or(total, |deduction| {
            Money::from_minor(
                total.to_minor_units() - deduction.to_minor_units(),
                self.cart.currency(),
            )
        })
    }

    pub(crate) fn set_voucher_deduction(&mut self, amount: Amount) {
        self.voucher_deduction = Some(amount);
    }
}

/// Outcome of a rule's eligibility checks.
///
/// Valid exactly when no failing reason was collected. Reasons keep their
/// insertion order so messages read in check order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Verdict {
    reasons: SmallVec<[String; 4]>,
}

impl Verdict {
    /// A verdict with no failing reasons.
    #[must_use]
    pub fn valid() -> Self {
        Self::default()
    }

    /// Record a failing reason.
    pub fn push(&mut self, reason: impl Into<String>) {
        self.reasons.push(reason.into());
    }

    /// Whether the rule may be applied.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.reasons.is_empty()
    }

    /// The collected failing reasons, in check order.
    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    /// Reasons joined with `"; "`.
    #[must_use]
    pub fn message(&self) -> String {
        self.reasons.join("; ")
    }
}

/// Common contract implemented by the four discount rule evaluators.
pub trait DiscountRule {
    /// Display name used in receipts and messages.
    fn name(&self) -> &'static str;

    /// Compute the discount amount for the context.
    ///
    /// Brand and category rules also lower the working prices in the context's
    /// cart; voucher and bank rules only read the totals. A rule that does not
    /// apply returns zero, it does not fail.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if percentage arithmetic overflows.
    fn calculate(&self, ctx: &mut EvaluationContext<'_>) -> Result<Amount, DiscountError>;

    /// Check eligibility, collecting every failing reason.
    fn validate(&self, ctx: &EvaluationContext<'_>) -> Verdict;
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::INR;

    use crate::customers::CustomerTier;

    use super::*;

    #[test]
    fn empty_verdict_is_valid() {
        let verdict = Verdict::valid();

        assert!(verdict.is_valid());
        assert_eq!(verdict.message(), "");
    }

    #[test]
    fn reasons_invalidate_and_join_in_order() {
        let mut verdict = Verdict::valid();
        verdict.push("first reason");
        verdict.push("second reason");

        assert!(!verdict.is_valid());
        assert_eq!(verdict.message(), "first reason; second reason");
    }

    #[test]
    fn bankable_total_nets_out_voucher_deduction() {
        let customer =
            CustomerProfile::new("C001", CustomerTier::New, Money::from_minor(0, INR));
        let mut ctx = EvaluationContext::new(Cart::new(INR), &customer);

        assert_eq!(ctx.bankable_total(), Money::from_minor(0, INR));

        ctx.set_voucher_deduction(Money::from_minor(1_000, INR));

        assert_eq!(ctx.bankable_total(), Money::from_minor(-1_000, INR));
    }
}
