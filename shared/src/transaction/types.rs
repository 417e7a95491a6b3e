//! Shared types for transaction checkout

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// Discount Types
// ============================================================================

/// Discount adjustment type
///
/// A closed enum so an unrecognized type can never silently fall through
/// as a zero discount.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    /// Fixed currency amount
    #[default]
    Fixed,
    /// Percentage of the basis amount (0-100 convention, not hard-capped)
    Percentage,
}

/// A discount specification (type + amount)
///
/// The amount is interpreted as a currency value for [`DiscountType::Fixed`]
/// and as a percentage for [`DiscountType::Percentage`]. The percentage
/// divisor is always 100.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Discount {
    pub discount_type: DiscountType,
    pub amount: f64,
}

impl Discount {
    /// No discount (fixed zero)
    pub const fn none() -> Self {
        Self {
            discount_type: DiscountType::Fixed,
            amount: 0.0,
        }
    }

    pub const fn fixed(amount: f64) -> Self {
        Self {
            discount_type: DiscountType::Fixed,
            amount,
        }
    }

    pub const fn percentage(amount: f64) -> Self {
        Self {
            discount_type: DiscountType::Percentage,
            amount,
        }
    }

    pub fn is_none(&self) -> bool {
        self.amount == 0.0
    }
}

impl Default for Discount {
    fn default() -> Self {
        Self::none()
    }
}

// ============================================================================
// Line Item Types
// ============================================================================

/// Line pricing input - one line of a stateless price quote
///
/// Carries the pricing figures directly, with no catalog lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinePricingInput {
    /// Unit price in currency units
    pub unit_price: f64,
    /// Quantity (>= 1)
    pub quantity: i32,
    /// Tax rate in percentage (e.g., 10 = 10%)
    #[serde(default)]
    pub tax_rate_percent: f64,
    /// Per-line discount; defaults to no discount
    #[serde(default)]
    pub discount: Discount,
}

/// Line item input - for adding items to a transaction
///
/// Price and tax rate are resolved from the catalog and frozen into the
/// snapshot at add time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemInput {
    /// Product ID
    pub product_id: String,
    /// Quantity (>= 1); defaults to 1
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    /// Per-line discount; defaults to no discount
    #[serde(default)]
    pub discount: Discount,
    /// Line note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

fn default_quantity() -> i32 {
    1
}

/// Item changes for modification (None = no change)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ItemChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<Discount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

// ============================================================================
// Payment Types
// ============================================================================

/// Payment input for adding a payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInput {
    pub method: String,
    /// Amount presented by the customer
    pub tendered: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Classification of a tendered amount against the amount due
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Underpaid,
    Exact,
    Overpaid,
}

/// Transaction-level payment state
///
/// Due -> Partial -> Paid. No transition leaves Paid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentState {
    #[default]
    Due,
    Partial,
    Paid,
}

/// Payment record in snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentRecord {
    pub payment_id: String,
    pub method: String,
    /// Amount presented by the customer
    pub tendered: Decimal,
    /// How the tendered amount compared to the amount due at payment time
    pub status: PaymentStatus,
    /// Change returned to the customer (zero unless overpaid)
    pub change_due: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_default_is_none() {
        let d = Discount::default();
        assert_eq!(d.discount_type, DiscountType::Fixed);
        assert!(d.is_none());
    }

    #[test]
    fn test_line_item_input_defaults() {
        let input: LineItemInput =
            serde_json::from_str(r#"{"product_id": "prod-1"}"#).unwrap();
        assert_eq!(input.quantity, 1);
        assert!(input.discount.is_none());
        assert!(input.note.is_none());
    }

    #[test]
    fn test_discount_type_wire_format() {
        let json = serde_json::to_string(&DiscountType::Percentage).unwrap();
        assert_eq!(json, r#""PERCENTAGE""#);
        let parsed: DiscountType = serde_json::from_str(r#""FIXED""#).unwrap();
        assert_eq!(parsed, DiscountType::Fixed);
    }
}
