//! Money conversion and input validation
//!
//! All calculations are done using `Decimal` internally; `f64` appears only
//! at the DTO boundary. Inputs are validated here before any computation.

use rust_decimal::prelude::*;
use shared::transaction::{Discount, PaymentInput};

use super::PricingError;

/// Maximum allowed monetary amount per field (1,000,000)
pub const MAX_AMOUNT: f64 = 1_000_000.0;
/// Maximum allowed quantity per line
pub const MAX_QUANTITY: i32 = 9999;

/// Convert f64 to Decimal for calculation
///
/// Input values are pre-validated via the checks below; a non-finite value
/// reaching here falls back to zero.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field: &str) -> Result<(), PricingError> {
    if !value.is_finite() {
        return Err(PricingError::InvalidInput(format!(
            "{} must be a finite number, got {}",
            field, value
        )));
    }
    Ok(())
}

/// Validate a unit price before pricing
pub fn validate_unit_price(unit_price: f64) -> Result<(), PricingError> {
    require_finite(unit_price, "unit_price")?;
    if unit_price < 0.0 {
        return Err(PricingError::InvalidInput(format!(
            "unit_price must be non-negative, got {}",
            unit_price
        )));
    }
    if unit_price > MAX_AMOUNT {
        return Err(PricingError::InvalidInput(format!(
            "unit_price exceeds maximum allowed ({}), got {}",
            MAX_AMOUNT, unit_price
        )));
    }
    Ok(())
}

/// Validate a quantity before pricing
pub fn validate_quantity(quantity: i32) -> Result<(), PricingError> {
    if quantity < 1 {
        return Err(PricingError::InvalidQuantity(format!(
            "quantity must be at least 1, got {}",
            quantity
        )));
    }
    if quantity > MAX_QUANTITY {
        return Err(PricingError::InvalidQuantity(format!(
            "quantity exceeds maximum allowed ({}), got {}",
            MAX_QUANTITY, quantity
        )));
    }
    Ok(())
}

/// Validate a tax rate before pricing
pub fn validate_tax_rate(tax_rate_percent: f64) -> Result<(), PricingError> {
    require_finite(tax_rate_percent, "tax_rate_percent")?;
    if tax_rate_percent < 0.0 {
        return Err(PricingError::InvalidInput(format!(
            "tax_rate_percent must be non-negative, got {}",
            tax_rate_percent
        )));
    }
    Ok(())
}

/// Validate a discount specification before pricing
///
/// Percentage amounts above 100 are allowed (not hard-capped); the
/// resulting negative subtotal is the caller's problem to surface.
pub fn validate_discount(discount: &Discount) -> Result<(), PricingError> {
    require_finite(discount.amount, "discount amount")?;
    if discount.amount < 0.0 {
        return Err(PricingError::InvalidInput(format!(
            "discount amount must be non-negative, got {}",
            discount.amount
        )));
    }
    Ok(())
}

/// Validate a shipping charge before aggregation
pub fn validate_shipping(shipping_charge: f64) -> Result<(), PricingError> {
    require_finite(shipping_charge, "shipping_charge")?;
    if shipping_charge < 0.0 {
        return Err(PricingError::InvalidInput(format!(
            "shipping_charge must be non-negative, got {}",
            shipping_charge
        )));
    }
    Ok(())
}

/// Validate a tendered amount before reconciliation
pub fn validate_tendered(tendered: f64) -> Result<(), PricingError> {
    if !tendered.is_finite() {
        return Err(PricingError::InvalidAmount(format!(
            "tendered must be a finite number, got {}",
            tendered
        )));
    }
    if tendered < 0.0 {
        return Err(PricingError::InvalidAmount(format!(
            "tendered must be non-negative, got {}",
            tendered
        )));
    }
    if tendered > MAX_AMOUNT {
        return Err(PricingError::InvalidAmount(format!(
            "tendered exceeds maximum allowed ({}), got {}",
            MAX_AMOUNT, tendered
        )));
    }
    Ok(())
}

/// Validate a PaymentInput before processing
pub fn validate_payment(payment: &PaymentInput) -> Result<(), PricingError> {
    validate_tendered(payment.tendered)
}
