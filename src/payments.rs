//! Payments

use serde::Deserialize;
use std::fmt;

/// Card type tag for bank offers that only apply to one kind of card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    /// Credit card.
    Credit,

    /// Debit card.
    Debit,
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardType::Credit => write!(f, "CREDIT"),
            CardType::Debit => write!(f, "DEBIT"),
        }
    }
}

/// Payment method details for bank offer calculation.
///
/// A missing bank name means no bank offer can apply; that is not an error,
/// the offer stage simply has nothing to do.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentInfo {
    /// Payment method tag (opaque: "CARD", "UPI", ...).
    pub method: String,

    /// Issuing bank, matched against the bank offer table.
    pub bank_name: Option<String>,

    /// Card type, when the method involves a card.
    pub card_type: Option<CardType>,
}

impl PaymentInfo {
    /// Create payment info for a non-card method with no bank attached.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            bank_name: None,
            card_type: None,
        }
    }

    /// Create payment info for a card issued by the given bank.
    pub fn card(bank_name: impl Into<String>, card_type: Option<CardType>) -> Self {
        Self {
            method: "CARD".to_string(),
            bank_name: Some(bank_name.into()),
            card_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_helper_fills_bank_and_method() {
        let payment = PaymentInfo::card("ICICI", Some(CardType::Credit));

        assert_eq!(payment.method, "CARD");
        assert_eq!(payment.bank_name.as_deref(), Some("ICICI"));
        assert_eq!(payment.card_type, Some(CardType::Credit));
    }

    #[test]
    fn card_type_displays_uppercase() {
        assert_eq!(CardType::Credit.to_string(), "CREDIT");
        assert_eq!(CardType::Debit.to_string(), "DEBIT");
    }
}
