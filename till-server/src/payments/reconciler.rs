//! Payment Reconciler
//!
//! Classify a tendered amount against the computed grand total and derive
//! change due or remaining balance.

use rust_decimal::Decimal;
use serde::Serialize;
use shared::transaction::PaymentStatus;

use crate::pricing::money::{self, to_decimal};
use crate::pricing::PricingError;

/// Result of payment reconciliation
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PaymentOutcome {
    pub status: PaymentStatus,
    /// Change owed to the customer (zero unless overpaid)
    pub change_due: Decimal,
    /// Balance still owed (zero unless underpaid)
    pub remaining: Decimal,
}

/// Classify an already-validated tendered amount against the total
pub fn classify(tendered: Decimal, grand_total: Decimal) -> PaymentOutcome {
    if tendered < grand_total {
        PaymentOutcome {
            status: PaymentStatus::Underpaid,
            change_due: Decimal::ZERO,
            remaining: grand_total - tendered,
        }
    } else if tendered == grand_total {
        PaymentOutcome {
            status: PaymentStatus::Exact,
            change_due: Decimal::ZERO,
            remaining: Decimal::ZERO,
        }
    } else {
        PaymentOutcome {
            status: PaymentStatus::Overpaid,
            change_due: tendered - grand_total,
            remaining: Decimal::ZERO,
        }
    }
}

/// Reconcile a tendered amount against the grand total
///
/// # Errors
/// `InvalidAmount` when the tendered amount is non-finite, negative, or
/// above the allowed maximum. Rejected before any computation.
pub fn reconcile(tendered: f64, grand_total: Decimal) -> Result<PaymentOutcome, PricingError> {
    money::validate_tendered(tendered)?;
    Ok(classify(to_decimal(tendered), grand_total))
}

// ==================== Tests ====================
