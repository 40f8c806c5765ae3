//! Customers

use serde::Deserialize;
use std::fmt;

use crate::prices::Amount;

/// Loyalty tier gating certain vouchers.
///
/// The derived ordering is the loyalty ranking: `New < Silver < Gold <
/// Platinum`. Voucher tier floors compare with this ordering directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerTier {
    /// Freshly registered customer.
    New,

    /// Silver member.
    Silver,

    /// Gold member.
    Gold,

    /// Platinum member.
    Platinum,
}

impl fmt::Display for CustomerTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomerTier::New => write!(f, "new"),
            CustomerTier::Silver => write!(f, "silver"),
            CustomerTier::Gold => write!(f, "gold"),
            CustomerTier::Platinum => write!(f, "platinum"),
        }
    }
}

/// Customer profile used for discount eligibility.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerProfile {
    id: String,
    tier: CustomerTier,
    total_purchases: Amount,
}

impl CustomerProfile {
    /// Create a new customer profile.
    pub fn new(id: impl Into<String>, tier: CustomerTier, total_purchases: Amount) -> Self {
        Self {
            id: id.into(),
            tier,
            total_purchases,
        }
    }

    /// Customer identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Loyalty tier.
    pub fn tier(&self) -> CustomerTier {
        self.tier
    }

    /// Cumulative historical purchase value.
    pub fn total_purchases(&self) -> Amount {
        self.total_purchases
    }
}
