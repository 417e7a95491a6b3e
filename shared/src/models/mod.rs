//! Data models
//!
//! Catalog and directory entities shared between till-server and clients.

pub mod customer;
pub mod product;

// Re-exports
pub use customer::*;
pub use product::*;
