//! Rebate prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartItem},
    customers::{CustomerProfile, CustomerTier},
    discounts::DiscountError,
    engine::{PricingEngine, PricingError},
    fixtures::{Fixture, FixtureError},
    payments::{CardType, PaymentInfo},
    prices::Amount,
    products::{BrandTier, Product},
    receipt::{AppliedDiscount, Receipt, ReceiptError},
    rules::{
        DiscountRule, EvaluationContext, Verdict,
        bank::{BankOffer, BankOfferRule},
        brand::BrandRule,
        category::CategoryRule,
        voucher::{Voucher, VoucherRule},
    },
};
