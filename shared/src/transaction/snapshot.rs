//! Transaction snapshot - the explicit transaction value object
//!
//! The snapshot is passed into and out of the pricing engine; there is no
//! ambient cart state. All derived figures are recomputed in full by the
//! server whenever any input field changes.

use super::types::{Discount, PaymentRecord, PaymentState};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Transaction status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    #[default]
    Open,
    Completed,
}

/// A line within a transaction, with product data frozen at add time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineSnapshot {
    /// Line instance ID (unique within the transaction)
    pub line_id: String,
    /// Product ID
    pub product_id: String,
    /// SKU at add time (frozen)
    pub sku: String,
    /// Product name at add time (frozen)
    pub name: String,
    /// Unit price at add time (frozen)
    pub unit_price: f64,
    /// Tax rate in percentage at add time (frozen)
    pub tax_rate_percent: f64,
    /// Quantity (>= 1)
    pub quantity: i32,
    /// Per-line discount
    pub discount: Discount,

    // === Computed Fields ===
    /// unit_price * quantity
    pub base_amount: Decimal,
    /// Line discount amount (fixed, or percentage of base_amount)
    pub discount_amount: Decimal,
    /// base_amount - discount_amount (may be negative, never clamped)
    pub subtotal: Decimal,
    /// Tax on the post-discount subtotal
    pub tax_amount: Decimal,

    /// Line note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Transaction snapshot - full checkout state with derived totals
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionSnapshot {
    /// Transaction ID (assigned by server)
    pub transaction_id: String,
    /// Customer reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    /// Customer name snapshot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    /// Transaction status
    pub status: TransactionStatus,
    /// Lines in display order (aggregation is order-independent)
    pub lines: Vec<LineSnapshot>,
    /// Transaction-level discount
    pub discount: Discount,
    /// Shipping charge
    pub shipping_charge: f64,

    // === Computed Totals ===
    /// Sum of line subtotals (post line-discount, pre-tax)
    pub subtotal: Decimal,
    /// Sum of line tax amounts
    pub tax_total: Decimal,
    /// Transaction-level discount amount
    pub discount_total: Decimal,
    /// subtotal + tax_total - discount_total + shipping_charge
    pub grand_total: Decimal,

    // === Payments ===
    /// Payment records in order of arrival
    pub payments: Vec<PaymentRecord>,
    /// Cumulative tendered amount
    pub paid_amount: Decimal,
    /// Payment state (Due -> Partial -> Paid)
    pub payment_state: PaymentState,

    /// Opaque receipt ID returned by the submission endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_id: Option<String>,
    /// Creation timestamp (epoch millis)
    pub created_at: i64,
    /// Last update timestamp (epoch millis)
    pub updated_at: i64,
    /// Completion timestamp (epoch millis)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<i64>,
}

impl TransactionSnapshot {
    /// Create a new empty transaction
    pub fn new(transaction_id: String) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            transaction_id,
            customer_id: None,
            customer_name: None,
            status: TransactionStatus::Open,
            lines: Vec::new(),
            discount: Discount::none(),
            shipping_charge: 0.0,
            subtotal: Decimal::ZERO,
            tax_total: Decimal::ZERO,
            discount_total: Decimal::ZERO,
            grand_total: Decimal::ZERO,
            payments: Vec::new(),
            paid_amount: Decimal::ZERO,
            payment_state: PaymentState::Due,
            receipt_id: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    /// Check if the transaction is open for mutation
    pub fn is_open(&self) -> bool {
        self.status == TransactionStatus::Open
    }

    /// Check if the transaction is completed
    pub fn is_completed(&self) -> bool {
        self.status == TransactionStatus::Completed
    }

    /// Check if any payment has been recorded
    pub fn has_payments(&self) -> bool {
        !self.payments.is_empty()
    }

    /// Calculate remaining amount to pay (never negative)
    pub fn remaining_amount(&self) -> Decimal {
        (self.grand_total - self.paid_amount).max(Decimal::ZERO)
    }

    /// Check if fully paid
    pub fn is_fully_paid(&self) -> bool {
        self.paid_amount >= self.grand_total
    }

    /// Check if the grand total went negative (discount exceeded the basis)
    pub fn has_negative_total(&self) -> bool {
        self.grand_total < Decimal::ZERO
    }
}

impl Default for TransactionSnapshot {
    fn default() -> Self {
        Self::new(String::new())
    }
}
