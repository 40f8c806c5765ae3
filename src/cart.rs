//! Carts

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{prices::Amount, products::Product};

/// Errors related to cart construction.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// An item's currency differs from the cart currency (index, item currency, cart currency).
    #[error("Item {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),
}

/// A line in a shopping cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    product: Product,
    quantity: u32,
    size: String,
}

impl CartItem {
    /// Create a new cart line.
    pub fn new(product: Product, quantity: u32, size: impl Into<String>) -> Self {
        Self {
            product,
            quantity,
            size: size.into(),
        }
    }

    /// The product on this line.
    pub fn product(&self) -> &Product {
        &self.product
    }

    pub(crate) fn product_mut(&mut self) -> &mut Product {
        &mut self.product
    }

    /// Number of units on this line.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Size tag (opaque to the engine).
    pub fn size(&self) -> &str {
        &self.size
    }

    /// Line subtotal at the working price.
    pub fn subtotal(&self) -> Amount {
        let price = self.product.current_price();
        let minor = price.to_minor_units() * i64::from(self.quantity);

        Money::from_minor(minor, price.currency())
    }

    /// Line subtotal at the list price.
    pub fn base_subtotal(&self) -> Amount {
        let price = self.product.base_price();
        let minor = price.to_minor_units() * i64::from(self.quantity);

        Money::from_minor(minor, price.currency())
    }
}

/// Cart
///
/// A single-currency collection of cart lines. The pricing engine clones it
/// into each evaluation context, so rule mutations never reach the caller's
/// copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
    currency: &'static Currency,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            items: Vec::new(),
            currency,
        }
    }

    /// Create a cart with the given lines.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::CurrencyMismatch`] if any line is priced in a
    /// currency other than the cart's.
    pub fn with_items(
        items: impl Into<Vec<CartItem>>,
        currency: &'static Currency,
    ) -> Result<Self, CartError> {
        let items = items.into();

        items.iter().enumerate().try_for_each(|(i, item)| {
            let item_currency = item.product().base_price().currency();

            if item_currency == currency {
                Ok(())
            } else {
                Err(CartError::CurrencyMismatch(
                    i,
                    item_currency.iso_alpha_code,
                    currency.iso_alpha_code,
                ))
            }
        })?;

        Ok(Cart { items, currency })
    }

    /// Iterate over the cart lines.
    pub fn iter(&self) -> impl Iterator<Item = &CartItem> {
        self.items.iter()
    }

    pub(crate) fn items_mut(&mut self) -> impl Iterator<Item = &mut CartItem> {
        self.items.iter_mut()
    }

    /// Number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Cart currency.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Total at list prices. Fixed for the lifetime of a pricing run.
    #[must_use]
    pub fn original_total(&self) -> Amount {
        let minor: i64 = self
            .items
            .iter()
            .map(|item| item.base_subtotal().to_minor_units())
            .sum();

        Money::from_minor(minor, self.currency)
    }

    /// Total at working prices, reflecting the discounts applied so far.
    #[must_use]
    pub fn current_total(&self) -> Amount {
        let minor: i64 = self
            .items
            .iter()
            .map(|item| item.subtotal().to_minor_units())
            .sum();

        Money::from_minor(minor, self.currency)
    }
}
