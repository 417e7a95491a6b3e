//! Shared types for the Till checkout service
//!
//! Common types used by the server and its clients: catalog models,
//! transaction DTOs and snapshots, and the API response envelope.

pub mod models;
pub mod response;
pub mod transaction;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use response::ApiResponse;
pub use transaction::{
    Discount, DiscountType, ItemChanges, LineItemInput, LinePricingInput, LineSnapshot,
    PaymentInput, PaymentRecord, PaymentState, PaymentStatus, TransactionSnapshot,
    TransactionStatus,
};
