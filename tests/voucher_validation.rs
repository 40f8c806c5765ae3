//! Integration tests for voucher code validation.
//!
//! `PricingEngine::validate_code` answers "would this code apply?" without
//! pricing anything; `VoucherRule::validate` reports every failing check.

use decimal_percentage::Percentage;
use rusty_money::{Money, iso::INR};
use testresult::TestResult;

use rebate::{
    cart::{Cart, CartError, CartItem},
    customers::{CustomerProfile, CustomerTier},
    engine::PricingEngine,
    prices::Amount,
    products::{BrandTier, Product},
    rules::{
        DiscountRule, EvaluationContext,
        bank::BankOfferRule,
        brand::BrandRule,
        category::CategoryRule,
        voucher::{Voucher, VoucherRule},
    },
};

fn rupees(minor: i64) -> Amount {
    Money::from_minor(minor, INR)
}

fn vouchers() -> VoucherRule {
    VoucherRule::new([
        Voucher::new("SUPER69", Percentage::from(0.69))
            .with_min_cart_value(rupees(10_000))
            .with_excluded_brand_tiers([BrandTier::Premium]),
        Voucher::new("TSHIRT15", Percentage::from(0.15)).with_allowed_categories(["T-shirts"]),
        Voucher::new("GOLD50", Percentage::from(0.50))
            .with_min_cart_value(rupees(100_000))
            .with_excluded_brands(["PUMA", "NIKE"])
            .with_min_customer_tier(CustomerTier::Gold),
    ])
}

fn engine() -> PricingEngine {
    PricingEngine::new(
        BrandRule::new([]),
        CategoryRule::new([]),
        vouchers(),
        BankOfferRule::new([]),
    )
}

fn puma_tshirt() -> Product {
    Product::new(
        "P001",
        "PUMA",
        BrandTier::Regular,
        "T-shirts",
        rupees(100_000),
    )
}

fn adidas_jeans() -> Product {
    Product::new(
        "P003",
        "ADIDAS",
        BrandTier::Regular,
        "Jeans",
        rupees(250_000),
    )
}

fn nike_shoes() -> Product {
    Product::new("P002", "NIKE", BrandTier::Premium, "Shoes", rupees(500_000))
}

fn cart_of(products: Vec<Product>) -> Result<Cart, CartError> {
    let items = products
        .into_iter()
        .map(|product| CartItem::new(product, 1, "M"))
        .collect::<Vec<_>>();

    Cart::with_items(items, INR)
}

fn customer(tier: CustomerTier) -> CustomerProfile {
    CustomerProfile::new("C001", tier, rupees(0))
}

#[test]
fn valid_code_passes() -> TestResult {
    let cart = cart_of(vec![puma_tshirt()])?;
    let customer = customer(CustomerTier::New);

    assert!(engine().validate_code("SUPER69", &cart, &customer));

    Ok(())
}

#[test]
fn unknown_code_fails() -> TestResult {
    let cart = cart_of(vec![puma_tshirt()])?;
    let customer = customer(CustomerTier::New);

    assert!(!engine().validate_code("NOSUCHCODE", &cart, &customer));

    Ok(())
}

#[test]
fn validation_is_repeatable_and_does_not_touch_the_cart() -> TestResult {
    let cart = cart_of(vec![puma_tshirt()])?;
    let customer = customer(CustomerTier::New);
    let engine = engine();

    assert!(engine.validate_code("SUPER69", &cart, &customer));
    assert!(engine.validate_code("SUPER69", &cart, &customer));
    assert_eq!(cart.current_total(), rupees(100_000));

    Ok(())
}

#[test]
fn premium_tier_exclusion_fails() -> TestResult {
    let cart = cart_of(vec![nike_shoes()])?;
    let customer = customer(CustomerTier::New);

    assert!(!engine().validate_code("SUPER69", &cart, &customer));

    Ok(())
}

#[test]
fn customer_tier_floor_gates_the_code() -> TestResult {
    let cart = cart_of(vec![adidas_jeans()])?;
    let engine = engine();

    assert!(!engine.validate_code("GOLD50", &cart, &customer(CustomerTier::New)));
    assert!(!engine.validate_code("GOLD50", &cart, &customer(CustomerTier::Silver)));
    assert!(engine.validate_code("GOLD50", &cart, &customer(CustomerTier::Gold)));
    assert!(engine.validate_code("GOLD50", &cart, &customer(CustomerTier::Platinum)));

    Ok(())
}

#[test]
fn category_restriction_rejects_mixed_carts() -> TestResult {
    let engine = engine();
    let customer = customer(CustomerTier::New);

    let tshirts_only = cart_of(vec![puma_tshirt()])?;
    assert!(engine.validate_code("TSHIRT15", &tshirts_only, &customer));

    let mixed = cart_of(vec![puma_tshirt(), adidas_jeans()])?;
    assert!(!engine.validate_code("TSHIRT15", &mixed, &customer));

    Ok(())
}

#[test]
fn minimum_cart_value_gates_the_code() -> TestResult {
    let cheap = Product::new("P004", "LOCAL", BrandTier::Budget, "Socks", rupees(5_000));
    let cart = cart_of(vec![cheap])?;
    let customer = customer(CustomerTier::New);

    assert!(!engine().validate_code("SUPER69", &cart, &customer));

    Ok(())
}

#[test]
fn all_failing_reasons_are_joined_in_the_message() -> TestResult {
    // GOLD50 against a cheap PUMA cart and a new customer trips the cart
    // minimum, the brand exclusion and the tier floor at once.
    let cheap_puma = Product::new("P009", "PUMA", BrandTier::Regular, "Socks", rupees(5_000));
    let cart = cart_of(vec![cheap_puma])?;
    let customer = customer(CustomerTier::New);

    let ctx = EvaluationContext::new(cart, &customer).with_voucher_code(Some("GOLD50"));
    let verdict = vouchers().validate(&ctx);

    assert_eq!(verdict.reasons().len(), 3);

    let message = verdict.message();
    assert_eq!(message.matches("; ").count(), 2);
    assert!(message.contains("Minimum cart value"));
    assert!(message.contains("Voucher not valid for brands: PUMA"));
    assert!(message.contains("requires gold membership"));

    Ok(())
}
