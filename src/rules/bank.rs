//! Bank card offers
//!
//! Instant-discount offers tied to the customer's card issuer (e.g. 10% off
//! with an ICICI card). Bank offers apply last, to the cart total net of any
//! voucher deduction recorded earlier in the pipeline.

use decimal_percentage::Percentage;
use rustc_hash::FxHashMap;
use rusty_money::Money;

use crate::{
    discounts::{DiscountError, percent_of},
    payments::CardType,
    prices::Amount,
};

use super::{DiscountRule, EvaluationContext, Verdict};

/// A single bank offer definition.
#[derive(Debug, Clone)]
pub struct BankOffer {
    bank_name: String,
    percentage: Percentage,
    card_type: Option<CardType>,
    min_transaction_value: Option<Amount>,
}

impl BankOffer {
    /// Create an offer for any card from the given bank.
    pub fn new(bank_name: impl Into<String>, percentage: Percentage) -> Self {
        Self {
            bank_name: bank_name.into(),
            percentage,
            card_type: None,
            min_transaction_value: None,
        }
    }

    /// Restrict the offer to one card type.
    #[must_use]
    pub fn with_card_type(mut self, card_type: CardType) -> Self {
        self.card_type = Some(card_type);
        self
    }

    /// Require a minimum transaction value.
    #[must_use]
    pub fn with_min_transaction_value(mut self, min: Amount) -> Self {
        self.min_transaction_value = Some(min);
        self
    }

    /// The issuing bank's name.
    pub fn bank_name(&self) -> &str {
        &self.bank_name
    }

    /// Percentage off the transaction total.
    pub fn percentage(&self) -> Percentage {
        self.percentage
    }
}

/// Bank offer rule over a bank name -> offer table.
#[derive(Debug, Clone, Default)]
pub struct BankOfferRule {
    offers: FxHashMap<String, BankOffer>,
}

impl BankOfferRule {
    /// Create a bank offer rule from the given offers, keyed by bank name.
    pub fn new(offers: impl IntoIterator<Item = BankOffer>) -> Self {
        Self {
            offers: offers
                .into_iter()
                .map(|offer| (offer.bank_name.clone(), offer))
                .collect(),
        }
    }

    /// Look up an offer by bank name.
    pub fn get(&self, bank_name: &str) -> Option<&BankOffer> {
        self.offers.get(bank_name)
    }
}

impl DiscountRule for BankOfferRule {
    fn name(&self) -> &'static str {
        "Bank Offer"
    }

    fn calculate(&self, ctx: &mut EvaluationContext<'_>) -> Result<Amount, DiscountError> {
        let zero = Money::from_minor(0, ctx.cart().currency());

        let Some(payment) = ctx.payment() else {
            return Ok(zero);
        };

        let Some(bank_name) = &payment.bank_name else {
            return Ok(zero);
        };

        let Some(offer) = self.offers.get(bank_name) else {
            return Ok(zero);
        };

        if let Some(required) = offer.card_type
            && payment.card_type != Some(required)
        {
            return Ok(zero);
        }

        let total = ctx.bankable_total();

        if let Some(min) = offer.min_transaction_value
            && total.to_minor_units() < min.to_minor_units()
        {
            return Ok(zero);
        }

        percent_of(&offer.percentage, total)
    }

    fn validate(&self, ctx: &EvaluationContext<'_>) -> Verdict {
        let mut verdict = Verdict::valid();

        let Some(payment) = ctx.payment() else {
            return verdict;
        };

        let Some(bank_name) = &payment.bank_name else {
            return verdict;
        };

        let Some(offer) = self.offers.get(bank_name) else {
            verdict.push(format!("No offers available for {bank_name}"));
            return verdict;
        };

        if let Some(required) = offer.card_type
            && payment.card_type != Some(required)
        {
            let provided = payment
                .card_type
                .map_or_else(|| "none".to_owned(), |card| card.to_string());

            verdict.push(format!(
                "{bank_name} offer requires {required} card (provided: {provided})"
            ));
        }

        if let Some(min) = offer.min_transaction_value {
            let total = ctx.bankable_total();

            if total.to_minor_units() < min.to_minor_units() {
                verdict.push(format!(
                    "Minimum transaction value of {min} not met (current: {total})"
                ));
            }
        }

        verdict
    }
}
