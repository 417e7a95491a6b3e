//! Transaction-Level Calculator
//!
//! Aggregate per-line figures and apply the transaction-level discount and
//! shipping charge. Percentage discounts are applied to the pre-tax
//! subtotal, not to subtotal + tax.
//!
//! The aggregator is pure and total: it is re-run in full whenever any
//! line or transaction-level field changes; there is no incremental
//! update path. An empty line list yields all-zero figures.

use rust_decimal::Decimal;
use serde::Serialize;
use shared::transaction::{Discount, LinePricingInput};

use super::line_calculator::{
    calculate_discount_amount, calculate_line_input, LineCalculationResult,
};
use super::money::{self, to_decimal};
use super::PricingError;

/// Result of transaction-level calculation
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TransactionCalculationResult {
    /// Sum of line subtotals (post line-discount, pre-tax)
    pub subtotal: Decimal,
    /// Sum of line tax amounts
    pub tax_total: Decimal,
    /// Transaction-level discount amount
    pub discount_total: Decimal,
    /// Shipping charge
    pub shipping_charge: Decimal,
    /// subtotal + tax_total - discount_total + shipping_charge
    pub grand_total: Decimal,
}

impl TransactionCalculationResult {
    /// All-zero figures (empty transaction)
    pub fn zero() -> Self {
        Self {
            subtotal: Decimal::ZERO,
            tax_total: Decimal::ZERO,
            discount_total: Decimal::ZERO,
            shipping_charge: Decimal::ZERO,
            grand_total: Decimal::ZERO,
        }
    }

    /// Whether a discount exceeded its basis somewhere and a figure went
    /// negative. Callers are expected to surface this rather than silently
    /// accept a negative charge.
    pub fn is_negative(&self) -> bool {
        self.grand_total < Decimal::ZERO || self.subtotal < Decimal::ZERO
    }
}

/// Aggregate pre-computed line figures into transaction totals
///
/// # Calculation Steps
/// 1. subtotal = sum of line subtotals; tax_total = sum of line taxes
/// 2. discount_total: fixed amounts as-is; percentages applied to the
///    pre-tax subtotal
/// 3. grand_total = subtotal + tax_total - discount_total + shipping
///
/// # Errors
/// `InvalidInput` for a negative or non-finite transaction discount or
/// shipping charge.
pub fn calculate_transaction(
    lines: &[LineCalculationResult],
    discount: &Discount,
    shipping_charge: f64,
) -> Result<TransactionCalculationResult, PricingError> {
    money::validate_discount(discount)?;
    money::validate_shipping(shipping_charge)?;

    let mut subtotal = Decimal::ZERO;
    let mut tax_total = Decimal::ZERO;
    for line in lines {
        subtotal += line.subtotal;
        tax_total += line.tax_amount;
    }

    // Percentage discounts apply to the pre-tax subtotal
    let discount_total = calculate_discount_amount(discount, subtotal);
    let shipping = to_decimal(shipping_charge);
    let grand_total = subtotal + tax_total - discount_total + shipping;

    Ok(TransactionCalculationResult {
        subtotal,
        tax_total,
        discount_total,
        shipping_charge: shipping,
        grand_total,
    })
}

/// Price a full transaction: every line, then the aggregate
///
/// Convenience pipeline used by the quote endpoint and the checkout
/// manager. Each line is validated and priced; a single bad line fails the
/// whole call with no partial state.
pub fn price_transaction(
    lines: &[LinePricingInput],
    discount: &Discount,
    shipping_charge: f64,
) -> Result<(Vec<LineCalculationResult>, TransactionCalculationResult), PricingError> {
    let line_results = lines
        .iter()
        .map(calculate_line_input)
        .collect::<Result<Vec<_>, _>>()?;
    let totals = calculate_transaction(&line_results, discount, shipping_charge)?;
    Ok((line_results, totals))
}

// ==================== Tests ====================
