//! Pricing engine
//!
//! Runs the discount pipeline over a cart and produces a [`Receipt`]. Two
//! modes are supported: stacking (brand, then category, then voucher, then
//! bank offer, each on the running total) and best-discount (each rule
//! evaluated independently against the original cart, only the largest
//! single deduction applied).

use rusty_money::Money;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    cart::Cart,
    customers::CustomerProfile,
    discounts::DiscountError,
    payments::PaymentInfo,
    prices::Amount,
    receipt::{AppliedDiscount, Receipt},
    rules::{
        DiscountRule, EvaluationContext, bank::BankOfferRule, brand::BrandRule,
        category::CategoryRule, voucher::VoucherRule,
    },
};

/// Errors that can occur while pricing a cart.
#[derive(Debug, Error)]
pub enum PricingError {
    /// Wrapper for discount calculation errors.
    #[error(transparent)]
    Discount(#[from] DiscountError),
}

/// The discount pipeline: four rules and a stacking policy.
#[derive(Debug, Clone)]
pub struct PricingEngine {
    brand: BrandRule,
    category: CategoryRule,
    voucher: VoucherRule,
    bank: BankOfferRule,
    stacking: bool,
}

impl PricingEngine {
    /// Create an engine with the given rules. Stacking is the default policy.
    #[must_use]
    pub fn new(
        brand: BrandRule,
        category: CategoryRule,
        voucher: VoucherRule,
        bank: BankOfferRule,
    ) -> Self {
        Self {
            brand,
            category,
            voucher,
            bank,
            stacking: true,
        }
    }

    /// Choose between stacking (`true`) and best-discount (`false`) pricing.
    #[must_use]
    pub fn with_stacking(mut self, stacking: bool) -> Self {
        self.stacking = stacking;
        self
    }

    /// Whether the engine stacks discounts.
    #[must_use]
    pub fn stacking(&self) -> bool {
        self.stacking
    }

    /// Price a cart for a customer, optionally with payment details and a
    /// voucher code.
    ///
    /// The caller's cart is left untouched; pricing works on a copy.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if a discount amount cannot be calculated.
    pub fn price(
        &self,
        cart: &Cart,
        customer: &CustomerProfile,
        payment: Option<&PaymentInfo>,
        voucher_code: Option<&str>,
    ) -> Result<Receipt, PricingError> {
        if self.stacking {
            self.price_stacked(cart, customer, payment, voucher_code)
        } else {
            self.price_best(cart, customer, payment, voucher_code)
        }
    }

    /// Check whether a voucher code would pass validation for this cart and
    /// customer, without pricing anything.
    #[must_use]
    pub fn validate_code(&self, code: &str, cart: &Cart, customer: &CustomerProfile) -> bool {
        let ctx = EvaluationContext::new(cart.clone(), customer).with_voucher_code(Some(code));

        self.voucher.validate(&ctx).is_valid()
    }

    fn price_stacked(
        &self,
        cart: &Cart,
        customer: &CustomerProfile,
        payment: Option<&PaymentInfo>,
        voucher_code: Option<&str>,
    ) -> Result<Receipt, PricingError> {
        let currency = cart.currency();
        let original = cart.original_total();

        let mut ctx = EvaluationContext::new(cart.clone(), customer)
            .with_payment(payment)
            .with_voucher_code(voucher_code);

        let mut applied: SmallVec<[AppliedDiscount; 4]> = SmallVec::new();
        let mut notes: Vec<String> = Vec::new();

        let brand_amount = self.brand.calculate(&mut ctx)?;
        if brand_amount.to_minor_units() > 0 {
            notes.push(format!("Brand discount: {brand_amount}"));
            applied.push(AppliedDiscount::new(self.brand.name(), brand_amount));
        }

        let category_amount = self.category.calculate(&mut ctx)?;
        if category_amount.to_minor_units() > 0 {
            notes.push(format!("Category discount: {category_amount}"));
            applied.push(AppliedDiscount::new(self.category.name(), category_amount));
        }

        if let Some(code) = voucher_code {
            let verdict = self.voucher.validate(&ctx);

            if verdict.is_valid() {
                let amount = self.voucher.calculate(&mut ctx)?;

                if amount.to_minor_units() > 0 {
                    notes.push(format!("Voucher '{code}' applied: {amount}"));
                    applied.push(AppliedDiscount::new(format!("Voucher ({code})"), amount));
                    ctx.set_voucher_deduction(amount);
                }
            } else {
                notes.push(format!("Voucher validation failed: {}", verdict.message()));
            }
        }

        if let Some(info) = payment {
            let verdict = self.bank.validate(&ctx);

            if verdict.is_valid() {
                let amount = self.bank.calculate(&mut ctx)?;

                if amount.to_minor_units() > 0 {
                    let bank_name = info.bank_name.as_deref().unwrap_or("card");

                    notes.push(format!("Bank offer applied: {amount}"));
                    applied.push(AppliedDiscount::new(
                        format!("{} ({bank_name})", self.bank.name()),
                        amount,
                    ));
                }
            } else {
                notes.push(format!(
                    "Bank offer validation failed: {}",
                    verdict.message()
                ));
            }
        }

        let deducted: i64 = applied
            .iter()
            .map(|line| line.amount().to_minor_units())
            .sum();

        let final_minor = (original.to_minor_units() - deducted).max(0);
        let final_price = Money::from_minor(final_minor, currency);

        let message = if notes.is_empty() {
            "No discounts applied".to_owned()
        } else {
            notes.join(" | ")
        };

        Ok(Receipt::new(original, final_price, applied, message))
    }

    fn price_best(
        &self,
        cart: &Cart,
        customer: &CustomerProfile,
        payment: Option<&PaymentInfo>,
        voucher_code: Option<&str>,
    ) -> Result<Receipt, PricingError> {
        let currency = cart.currency();
        let original = cart.original_total();

        let mut best: Option<AppliedDiscount> = None;

        // Each rule sees the original cart, never another rule's repricing.
        let mut consider = |label: String, amount: Amount| {
            let minor = amount.to_minor_units();

            if minor <= 0 {
                return;
            }

            // Strictly greater, so on ties the earlier rule in pipeline
            // order keeps the win.
            let beats = best
                .as_ref()
                .is_none_or(|current| minor > current.amount().to_minor_units());

            if beats {
                best = Some(AppliedDiscount::new(label, amount));
            }
        };

        let mut ctx = EvaluationContext::new(cart.clone(), customer);
        let amount = self.brand.calculate(&mut ctx)?;
        consider(self.brand.name().to_owned(), amount);

        let mut ctx = EvaluationContext::new(cart.clone(), customer);
        let amount = self.category.calculate(&mut ctx)?;
        consider(self.category.name().to_owned(), amount);

        if let Some(code) = voucher_code {
            let mut ctx =
                EvaluationContext::new(cart.clone(), customer).with_voucher_code(Some(code));

            if self.voucher.validate(&ctx).is_valid() {
                let amount = self.voucher.calculate(&mut ctx)?;
                consider(format!("Voucher ({code})"), amount);
            }
        }

        if let Some(info) = payment {
            let mut ctx = EvaluationContext::new(cart.clone(), customer).with_payment(payment);

            if self.bank.validate(&ctx).is_valid() {
                let amount = self.bank.calculate(&mut ctx)?;
                let bank_name = info.bank_name.as_deref().unwrap_or("card");

                consider(format!("{} ({bank_name})", self.bank.name()), amount);
            }
        }

        let Some(winner) = best else {
            return Ok(Receipt::new(
                original,
                original,
                SmallVec::new(),
                "No discounts applied".to_owned(),
            ));
        };

        let final_minor = (original.to_minor_units() - winner.amount().to_minor_units()).max(0);
        let final_price = Money::from_minor(final_minor, currency);
        let message = format!(
            "Best discount applied: {} - {}",
            winner.label(),
            winner.amount()
        );

        let mut applied: SmallVec<[AppliedDiscount; 4]> = SmallVec::new();
        applied.push(winner);

        Ok(Receipt::new(original, final_price, applied, message))
    }
}
