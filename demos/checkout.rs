//! Checkout Example
//!
//! This example prices a small cart against the standard fixture set.
//!
//! Use `-v` to apply a voucher code (e.g. `SUPER69`)
//! Use `-b` to pay with a card from a given bank (e.g. `ICICI`)
//! Use `-c` to set the card type (`credit` or `debit`)
//! Use `--best` to apply only the single best discount instead of stacking
//! Use `-n` to set the T-shirt quantity
//!
//! Run with: `cargo run --example checkout -- -v SUPER69 -b ICICI -c debit`

use std::io;

use anyhow::{Result, bail};
use clap::Parser;
use rusty_money::{Money, iso};

use rebate::{
    cart::Cart,
    customers::{CustomerProfile, CustomerTier},
    fixtures::Fixture,
    payments::{CardType, PaymentInfo},
};

/// Arguments for the checkout example
#[derive(Debug, Parser)]
struct CheckoutArgs {
    /// Voucher code to apply
    #[clap(short, long)]
    voucher: Option<String>,

    /// Bank name for a card payment
    #[clap(short, long)]
    bank: Option<String>,

    /// Card type: credit or debit
    #[clap(short, long)]
    card: Option<String>,

    /// Apply only the single best discount instead of stacking
    #[clap(long)]
    best: bool,

    /// Number of T-shirts in the cart
    #[clap(short, long, default_value_t = 1)]
    n: u32,
}

/// Checkout Example
pub fn main() -> Result<()> {
    let args = CheckoutArgs::parse();

    let card_type = match args.card.as_deref() {
        Some("credit") => Some(CardType::Credit),
        Some("debit") => Some(CardType::Debit),
        Some(other) => bail!("unknown card type: {other}"),
        None => None,
    };

    let mut fixture = Fixture::new();
    fixture.load_products("standard")?.load_rules("standard")?;

    let engine = fixture.engine()?.with_stacking(!args.best);

    let cart = Cart::with_items(
        vec![
            fixture.cart_item("puma_tshirt", args.n, "M")?,
            fixture.cart_item("adidas_jeans", 1, "32")?,
        ],
        iso::INR,
    )?;

    let customer = CustomerProfile::new(
        "C001",
        CustomerTier::Silver,
        Money::from_minor(500_000, iso::INR),
    );

    let payment = args
        .bank
        .map(|bank| PaymentInfo::card(bank, card_type));

    let receipt = engine.price(&cart, &customer, payment.as_ref(), args.voucher.as_deref())?;

    receipt.write_to(io::stdout().lock())?;

    Ok(())
}
