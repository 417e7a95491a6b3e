//! Transaction Pricing Engine Module
//!
//! Pure, deterministic pricing for the checkout flow: per-line figures,
//! then transaction-level aggregation. Everything here is a function of
//! its inputs; no I/O, no shared state, no logging.
//!
//! Uses rust_decimal for precision calculations. Results are passed
//! through unrounded; display rounding is a host concern.

mod line_calculator;
pub mod money;
mod transaction_calculator;

pub use line_calculator::*;
pub use transaction_calculator::*;

use thiserror::Error;

/// Pricing engine errors
///
/// Raised synchronously at the point of computation, before any partial
/// state is produced.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PricingError {
    /// Negative or non-finite price, discount, or tax rate
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Quantity below 1 or above the allowed maximum
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    /// Non-finite, negative, or out-of-range tendered amount
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}
