//! Rebate
//!
//! Rebate is a deterministic shopping-cart pricing engine: brand, category,
//! voucher and bank-offer discounts applied in a fixed order, with stacking
//! and best-discount policies.

pub mod cart;
pub mod customers;
pub mod discounts;
pub mod engine;
pub mod fixtures;
pub mod payments;
pub mod prelude;
pub mod prices;
pub mod products;
pub mod receipt;
pub mod rules;
