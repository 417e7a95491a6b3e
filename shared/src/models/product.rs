//! Product Model

use serde::{Deserialize, Serialize};

/// Catalog product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Option<String>,
    /// Stock keeping unit (business identifier)
    pub sku: String,
    pub name: String,
    /// Unit price in currency units
    pub unit_price: f64,
    /// Tax rate in percentage (e.g., 10 = 10%)
    pub tax_rate_percent: f64,
    pub is_active: bool,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub sku: String,
    pub name: String,
    pub unit_price: f64,
    pub tax_rate_percent: Option<f64>,
}
