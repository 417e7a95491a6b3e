//! Payment Module
//!
//! Reconciliation of tendered amounts against the computed grand total,
//! and the transaction-level payment state machine.

pub mod reconciler;
pub mod state;

pub use reconciler::{classify, reconcile, PaymentOutcome};
pub use state::advance_state;
