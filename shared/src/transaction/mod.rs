//! Transaction Checkout Module
//!
//! This module provides types for the transaction pricing and checkout flow:
//! - Inputs: line item, item change, and payment DTOs sent by clients
//! - Snapshots: the transaction value object with its derived totals

pub mod snapshot;
pub mod types;

// Re-exports
pub use snapshot::{LineSnapshot, TransactionSnapshot, TransactionStatus};
pub use types::*;
