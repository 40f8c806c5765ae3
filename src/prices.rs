//! Prices

use rusty_money::{Money, iso::Currency};

/// Monetary amount used throughout the engine.
///
/// Every currency in play comes from rusty-money's ISO table, so the currency
/// reference inside a money value is always `'static`. The reference data uses
/// INR, a two-decimal currency, which makes "rounded to two decimal places"
/// and "whole minor units" the same thing.
pub type Amount = Money<'static, Currency>;
