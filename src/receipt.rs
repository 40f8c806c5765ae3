//! Receipt

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::FromPrimitive};
use rusty_money::MoneyError;
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::prices::Amount;

/// Errors that can occur when building or writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// IO error
    #[error("IO error")]
    Io(#[from] io::Error),
}

/// A single applied discount line.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedDiscount {
    label: String,
    amount: Amount,
}

impl AppliedDiscount {
    /// Create an applied discount line.
    pub fn new(label: impl Into<String>, amount: Amount) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }

    /// Display label, e.g. `Brand Discount` or `Voucher (SUPER69)`.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Amount deducted by this line.
    #[must_use]
    pub fn amount(&self) -> Amount {
        self.amount
    }
}

/// Final receipt for a priced cart.
#[derive(Debug, Clone)]
pub struct Receipt {
    /// Cart total before any discounts.
    original_price: Amount,

    /// Amount due after all discounts.
    final_price: Amount,

    /// Applied discount lines, in pipeline order.
    applied: SmallVec<[AppliedDiscount; 4]>,

    /// Human-readable notes joined from each pricing stage.
    message: String,
}

impl Receipt {
    /// Create a new receipt with the given details.
    #[must_use]
    pub fn new(
        original_price: Amount,
        final_price: Amount,
        applied: SmallVec<[AppliedDiscount; 4]>,
        message: String,
    ) -> Self {
        Self {
            original_price,
            final_price,
            applied,
            message,
        }
    }

    /// Cart total before any discounts.
    #[must_use]
    pub fn original_price(&self) -> Amount {
        self.original_price
    }

    /// Amount due after all discounts.
    #[must_use]
    pub fn final_price(&self) -> Amount {
        self.final_price
    }

    /// Applied discount lines, in pipeline order.
    #[must_use]
    pub fn applied_discounts(&self) -> &[AppliedDiscount] {
        &self.applied
    }

    /// Human-readable notes joined from each pricing stage.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Lookup the deducted amount for a given label.
    pub fn amount_for(&self, label: &str) -> Option<Amount> {
        self.applied
            .iter()
            .find(|line| line.label == label)
            .map(AppliedDiscount::amount)
    }

    /// Sum of all applied discount lines, in minor units.
    #[must_use]
    pub fn total_discount_minor(&self) -> i64 {
        self.applied
            .iter()
            .map(|line| line.amount.to_minor_units())
            .sum()
    }

    /// Calculate the savings made by applying discounts.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction operation fails.
    pub fn savings(&self) -> Result<Amount, MoneyError> {
        self.original_price.sub(self.final_price)
    }

    /// Calculates the savings as a fraction of the original price.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction operation fails.
    pub fn savings_percent(&self) -> Result<Percentage, MoneyError> {
        let savings_minor = self.savings()?.to_minor_units();
        let original_minor = self.original_price.to_minor_units();

        if original_minor == 0 {
            return Ok(Percentage::from(0.0));
        }

        let savings_dec = Decimal::from_i64(savings_minor).unwrap_or(Decimal::ZERO);
        let original_dec = Decimal::from_i64(original_minor).unwrap_or(Decimal::ZERO);

        Ok(Percentage::from(savings_dec / original_dec))
    }

    /// Prints the receipt to the given writer.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if the receipt cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["Discount", "Amount"]);

        if self.applied.is_empty() {
            builder.push_record(["(none)", ""]);
        }

        for line in &self.applied {
            builder.push_record([line.label.clone(), format!("-{}", line.amount)]);
        }

        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(1..2), Alignment::right());

        writeln!(out, "\n{table}")?;

        let savings = self.savings()?;
        let savings_points = percent_points(self.savings_percent()?);

        writeln!(out, " Original: {}", self.original_price)?;
        writeln!(out, " Total:    {}", self.final_price)?;
        writeln!(out, " Savings:  ({savings_points:.2}%) {savings}")?;
        writeln!(out, " {}", self.message)?;

        Ok(())
    }
}

/// Converts a fractional percentage to percent points for display.
fn percent_points(percentage: Percentage) -> Decimal {
    // `Percentage` is a fraction (e.g. 0.25), so multiply by 100 to print percent points.
    ((percentage * Decimal::ONE) * Decimal::from_i64(100).unwrap_or(Decimal::ZERO)).round_dp(2)
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::INR};
    use smallvec::smallvec;
    use testresult::TestResult;

    use super::*;

    fn rupees(minor: i64) -> Amount {
        Money::from_minor(minor, INR)
    }

    fn sample() -> Receipt {
        Receipt::new(
            rupees(100_000),
            rupees(54_000),
            smallvec![
                AppliedDiscount::new("Brand Discount", rupees(40_000)),
                AppliedDiscount::new("Category Discount", rupees(6_000)),
            ],
            "Brand discount: ₹400.00 | Category discount: ₹60.00".to_owned(),
        )
    }

    #[test]
    fn savings_and_lookup() -> TestResult {
        let receipt = sample();

        assert_eq!(receipt.savings()?, rupees(46_000));
        assert_eq!(receipt.total_discount_minor(), 46_000);
        assert_eq!(receipt.amount_for("Brand Discount"), Some(rupees(40_000)));
        assert_eq!(receipt.amount_for("Bank Offer (ICICI)"), None);

        Ok(())
    }

    #[test]
    fn savings_percent_is_a_fraction_of_original() -> TestResult {
        let receipt = sample();
        let percent = receipt.savings_percent()?;

        assert_eq!(percent * Decimal::ONE, Decimal::new(46, 2));

        Ok(())
    }

    #[test]
    fn zero_original_price_has_zero_savings_percent() -> TestResult {
        let receipt = Receipt::new(
            rupees(0),
            rupees(0),
            smallvec![],
            "No discounts applied".to_owned(),
        );

        assert_eq!(receipt.savings_percent()? * Decimal::ONE, Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn write_to_renders_lines_and_summary() -> TestResult {
        let mut buf = Vec::new();
        sample().write_to(&mut buf)?;

        let rendered = String::from_utf8(buf)?;
        assert!(rendered.contains("Brand Discount"));
        assert!(rendered.contains("Original: ₹1,000.00"));
        assert!(rendered.contains("Total:    ₹540.00"));

        Ok(())
    }

    #[test]
    fn empty_receipt_renders_placeholder_row() -> TestResult {
        let receipt = Receipt::new(
            rupees(50_000),
            rupees(50_000),
            smallvec![],
            "No discounts applied".to_owned(),
        );

        let mut buf = Vec::new();
        receipt.write_to(&mut buf)?;

        let rendered = String::from_utf8(buf)?;
        assert!(rendered.contains("(none)"));
        assert!(rendered.contains("No discounts applied"));

        Ok(())
    }
}
