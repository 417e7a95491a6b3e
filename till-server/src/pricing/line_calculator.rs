//! Line Item Calculator
//!
//! Calculate a single line's figures from unit price, quantity, tax rate,
//! and an optional per-line discount. Fixed discounts are taken per line,
//! not per unit; percentage discounts apply to the base amount. Tax is
//! computed on the post-discount subtotal.
//!
//! Uses rust_decimal for precision calculations.

use rust_decimal::Decimal;
use serde::Serialize;
use shared::transaction::{Discount, DiscountType, LinePricingInput};

use super::money::{self, to_decimal};
use super::PricingError;

/// Result of line price calculation
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LineCalculationResult {
    /// Base amount (unit_price * quantity)
    pub base_amount: Decimal,
    /// Line discount amount
    pub discount_amount: Decimal,
    /// Post-discount subtotal (may be negative, never clamped)
    pub subtotal: Decimal,
    /// Tax on the post-discount subtotal
    pub tax_amount: Decimal,
}

/// Calculate the discount amount for a single discount
///
/// Percentages apply to `basis`; fixed amounts are direct currency values.
/// The percentage divisor is always 100.
pub(crate) fn calculate_discount_amount(discount: &Discount, basis: Decimal) -> Decimal {
    let amount = to_decimal(discount.amount);
    match discount.discount_type {
        DiscountType::Percentage => basis * amount / Decimal::ONE_HUNDRED,
        DiscountType::Fixed => amount, // direct currency amount
    }
}

/// Calculate a line's figures
///
/// # Arguments
/// * `unit_price` - The line's unit price
/// * `quantity` - Quantity (>= 1)
/// * `tax_rate_percent` - Tax rate in percentage (10 = 10%)
/// * `discount` - Per-line discount
///
/// # Calculation Steps
/// 1. base_amount = unit_price * quantity
/// 2. Fixed: discount taken as-is (not scaled by quantity);
///    Percentage: base_amount * amount / 100
/// 3. subtotal = base_amount - discount_amount (not clamped)
/// 4. tax_amount = subtotal * tax_rate_percent / 100
///
/// # Errors
/// `InvalidQuantity` for quantity < 1; `InvalidInput` for negative or
/// non-finite price, discount, or tax rate. Rejected before any
/// computation.
pub fn calculate_line(
    unit_price: f64,
    quantity: i32,
    tax_rate_percent: f64,
    discount: &Discount,
) -> Result<LineCalculationResult, PricingError> {
    money::validate_unit_price(unit_price)?;
    money::validate_quantity(quantity)?;
    money::validate_tax_rate(tax_rate_percent)?;
    money::validate_discount(discount)?;

    // Step 1: base amount
    let base_amount = to_decimal(unit_price) * Decimal::from(quantity);

    // Step 2: line discount
    let discount_amount = calculate_discount_amount(discount, base_amount);

    // Step 3: post-discount subtotal, passed through even when negative
    let subtotal = base_amount - discount_amount;

    // Step 4: tax on the post-discount subtotal, not the base amount
    let tax_amount = subtotal * to_decimal(tax_rate_percent) / Decimal::ONE_HUNDRED;

    Ok(LineCalculationResult {
        base_amount,
        discount_amount,
        subtotal,
        tax_amount,
    })
}

/// Calculate a line from a [`LinePricingInput`] DTO
pub fn calculate_line_input(
    input: &LinePricingInput,
) -> Result<LineCalculationResult, PricingError> {
    calculate_line(
        input.unit_price,
        input.quantity,
        input.tax_rate_percent,
        &input.discount,
    )
}

// ==================== Tests ====================
