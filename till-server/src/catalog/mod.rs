//! Catalog Service
//!
//! In-memory product and customer lookup. The checkout manager consumes
//! this as a black box: id in, pricing metadata out. Product data is
//! frozen into line snapshots at add time, so later catalog edits never
//! reprice an open transaction.

use dashmap::DashMap;
use shared::models::{Customer, CustomerCreate, Product, ProductCreate};

/// Catalog service holding products and customers
#[derive(Debug, Default)]
pub struct CatalogService {
    products: DashMap<String, Product>,
    customers: DashMap<String, Customer>,
}

impl CatalogService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a product, assigning a fresh ID
    pub fn add_product(&self, create: ProductCreate) -> Product {
        let id = uuid::Uuid::new_v4().to_string();
        let product = Product {
            id: Some(id.clone()),
            sku: create.sku,
            name: create.name,
            unit_price: create.unit_price,
            tax_rate_percent: create.tax_rate_percent.unwrap_or(0.0),
            is_active: true,
        };
        self.products.insert(id, product.clone());
        product
    }

    /// Replace a product (keyed by its ID)
    pub fn upsert_product(&self, product: Product) -> Option<Product> {
        let id = product.id.clone()?;
        self.products.insert(id, product)
    }

    /// Look up a product by ID
    pub fn product(&self, id: &str) -> Option<Product> {
        self.products.get(id).map(|p| p.clone())
    }

    /// Insert a customer, assigning a fresh ID
    pub fn add_customer(&self, create: CustomerCreate) -> Customer {
        let id = uuid::Uuid::new_v4().to_string();
        let customer = Customer {
            id: Some(id.clone()),
            name: create.name,
            email: create.email,
            phone: create.phone,
            is_active: true,
        };
        self.customers.insert(id, customer.clone());
        customer
    }

    /// Look up a customer by ID
    pub fn customer(&self, id: &str) -> Option<Customer> {
        self.customers.get(id).map(|c| c.clone())
    }

    /// Seed a handful of demo products and customers (development only)
    pub fn seed_demo(&self) {
        self.add_product(ProductCreate {
            sku: "CF-001".to_string(),
            name: "House Blend Coffee".to_string(),
            unit_price: 12.50,
            tax_rate_percent: Some(10.0),
        });
        self.add_product(ProductCreate {
            sku: "MG-014".to_string(),
            name: "Ceramic Mug".to_string(),
            unit_price: 8.99,
            tax_rate_percent: Some(21.0),
        });
        self.add_product(ProductCreate {
            sku: "GC-050".to_string(),
            name: "Gift Card".to_string(),
            unit_price: 50.00,
            tax_rate_percent: None,
        });
        self.add_customer(CustomerCreate {
            name: "Walk-in".to_string(),
            email: None,
            phone: None,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_lookup_product() {
        let catalog = CatalogService::new();
        let product = catalog.add_product(ProductCreate {
            sku: "SKU-1".to_string(),
            name: "Widget".to_string(),
            unit_price: 4.20,
            tax_rate_percent: Some(10.0),
        });

        let id = product.id.as_deref().unwrap();
        let found = catalog.product(id).unwrap();
        assert_eq!(found.name, "Widget");
        assert_eq!(found.tax_rate_percent, 10.0);
        assert!(found.is_active);

        assert!(catalog.product("missing").is_none());
    }

    #[test]
    fn test_missing_tax_rate_defaults_to_zero() {
        let catalog = CatalogService::new();
        let product = catalog.add_product(ProductCreate {
            sku: "SKU-2".to_string(),
            name: "Untaxed".to_string(),
            unit_price: 1.0,
            tax_rate_percent: None,
        });
        assert_eq!(product.tax_rate_percent, 0.0);
    }
}
