//! CheckoutManager test suite

use std::sync::Arc;

use rust_decimal::Decimal;
use shared::models::{CustomerCreate, ProductCreate};
use shared::transaction::{
    Discount, ItemChanges, LineItemInput, PaymentInput, PaymentState, PaymentStatus,
    TransactionStatus,
};

use crate::catalog::CatalogService;
use crate::submit::InMemorySubmitter;

use super::manager::{CheckoutError, CheckoutManager};

fn dec(value: &str) -> Decimal {
    value.parse().unwrap()
}

fn setup() -> (Arc<CatalogService>, Arc<InMemorySubmitter>, CheckoutManager) {
    let catalog = Arc::new(CatalogService::new());
    let submitter = Arc::new(InMemorySubmitter::new());
    let manager = CheckoutManager::new(catalog.clone(), submitter.clone());
    (catalog, submitter, manager)
}

fn seed_product(catalog: &CatalogService, sku: &str, price: f64, tax: f64) -> String {
    catalog
        .add_product(ProductCreate {
            sku: sku.to_string(),
            name: format!("Product {}", sku),
            unit_price: price,
            tax_rate_percent: Some(tax),
        })
        .id
        .unwrap()
}

fn item(product_id: &str, quantity: i32, discount: Discount) -> LineItemInput {
    LineItemInput {
        product_id: product_id.to_string(),
        quantity,
        discount,
        note: None,
    }
}

fn cash(tendered: f64) -> PaymentInput {
    PaymentInput {
        method: "CASH".to_string(),
        tendered,
        note: None,
    }
}

// ==================== Lifecycle Tests ====================

#[test]
fn test_create_and_get() {
    let (_, _, manager) = setup();

    let snapshot = manager.create(None).unwrap();
    assert_eq!(snapshot.status, TransactionStatus::Open);
    assert_eq!(snapshot.payment_state, PaymentState::Due);

    let fetched = manager.get(&snapshot.transaction_id).unwrap();
    assert_eq!(fetched, snapshot);
}

#[test]
fn test_get_unknown_transaction_fails() {
    let (_, _, manager) = setup();
    let result = manager.get("nonexistent");
    assert!(matches!(result, Err(CheckoutError::TransactionNotFound(_))));
}

#[test]
fn test_create_with_customer_freezes_name() {
    let (catalog, _, manager) = setup();
    let customer = catalog.add_customer(CustomerCreate {
        name: "Ada".to_string(),
        email: None,
        phone: None,
    });

    let snapshot = manager.create(customer.id.clone()).unwrap();
    assert_eq!(snapshot.customer_id, customer.id);
    assert_eq!(snapshot.customer_name.as_deref(), Some("Ada"));
}

#[test]
fn test_create_with_unknown_customer_fails() {
    let (_, _, manager) = setup();
    let result = manager.create(Some("ghost".to_string()));
    assert!(matches!(result, Err(CheckoutError::CustomerNotFound(_))));
}

// ==================== Item Tests ====================

#[test]
fn test_add_item_computes_totals() {
    let (catalog, _, manager) = setup();
    let product_id = seed_product(&catalog, "A-1", 29.99, 10.0);
    let txn = manager.create(None).unwrap();

    let snapshot = manager
        .add_item(&txn.transaction_id, item(&product_id, 1, Discount::none()))
        .unwrap();

    assert_eq!(snapshot.lines.len(), 1);
    assert_eq!(snapshot.lines[0].subtotal, dec("29.99"));
    assert_eq!(snapshot.lines[0].tax_amount, dec("2.999"));
    assert_eq!(snapshot.subtotal, dec("29.99"));
    assert_eq!(snapshot.tax_total, dec("2.999"));
    assert_eq!(snapshot.grand_total, dec("32.989"));
}

#[test]
fn test_add_item_unknown_product_fails() {
    let (_, _, manager) = setup();
    let txn = manager.create(None).unwrap();

    let result = manager.add_item(&txn.transaction_id, item("ghost", 1, Discount::none()));
    assert!(matches!(result, Err(CheckoutError::ProductNotFound(_))));
}

#[test]
fn test_add_item_inactive_product_fails() {
    let (catalog, _, manager) = setup();
    let product_id = seed_product(&catalog, "A-1", 10.0, 0.0);
    let mut product = catalog.product(&product_id).unwrap();
    product.is_active = false;
    catalog.upsert_product(product);

    let txn = manager.create(None).unwrap();
    let result = manager.add_item(&txn.transaction_id, item(&product_id, 1, Discount::none()));
    assert!(matches!(result, Err(CheckoutError::InvalidOperation(_))));
}

#[test]
fn test_add_item_invalid_quantity_fails() {
    let (catalog, _, manager) = setup();
    let product_id = seed_product(&catalog, "A-1", 10.0, 0.0);
    let txn = manager.create(None).unwrap();

    let result = manager.add_item(&txn.transaction_id, item(&product_id, 0, Discount::none()));
    assert!(matches!(
        result,
        Err(CheckoutError::Pricing(
            crate::pricing::PricingError::InvalidQuantity(_)
        ))
    ));
}

#[test]
fn test_price_frozen_at_add_time() {
    let (catalog, _, manager) = setup();
    let product_id = seed_product(&catalog, "A-1", 10.0, 0.0);
    let txn = manager.create(None).unwrap();
    manager
        .add_item(&txn.transaction_id, item(&product_id, 1, Discount::none()))
        .unwrap();

    // Reprice the catalog entry after the item was added
    let mut product = catalog.product(&product_id).unwrap();
    product.unit_price = 99.0;
    catalog.upsert_product(product);

    // A later edit recomputes with the frozen price, not the new one
    let line_id = manager.get(&txn.transaction_id).unwrap().lines[0]
        .line_id
        .clone();
    let snapshot = manager
        .modify_item(
            &txn.transaction_id,
            &line_id,
            ItemChanges {
                quantity: Some(2),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(snapshot.lines[0].unit_price, 10.0);
    assert_eq!(snapshot.grand_total, dec("20"));
}

#[test]
fn test_modify_item_recomputes() {
    let (catalog, _, manager) = setup();
    let product_id = seed_product(&catalog, "A-1", 19.99, 10.0);
    let txn = manager.create(None).unwrap();
    let snapshot = manager
        .add_item(&txn.transaction_id, item(&product_id, 1, Discount::none()))
        .unwrap();
    let line_id = snapshot.lines[0].line_id.clone();

    let snapshot = manager
        .modify_item(
            &txn.transaction_id,
            &line_id,
            ItemChanges {
                quantity: Some(2),
                discount: Some(Discount::fixed(5.0)),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(snapshot.lines[0].base_amount, dec("39.98"));
    assert_eq!(snapshot.lines[0].subtotal, dec("34.98"));
    assert_eq!(snapshot.lines[0].tax_amount, dec("3.498"));
}

#[test]
fn test_modify_unknown_line_fails() {
    let (_, _, manager) = setup();
    let txn = manager.create(None).unwrap();

    let result = manager.modify_item(&txn.transaction_id, "ghost", ItemChanges::default());
    assert!(matches!(result, Err(CheckoutError::ItemNotFound(_))));
}

#[test]
fn test_remove_item_recomputes() {
    let (catalog, _, manager) = setup();
    let product_id = seed_product(&catalog, "A-1", 10.0, 0.0);
    let txn = manager.create(None).unwrap();
    let snapshot = manager
        .add_item(&txn.transaction_id, item(&product_id, 2, Discount::none()))
        .unwrap();
    assert_eq!(snapshot.grand_total, dec("20"));

    let line_id = snapshot.lines[0].line_id.clone();
    let snapshot = manager.remove_item(&txn.transaction_id, &line_id).unwrap();
    assert!(snapshot.lines.is_empty());
    assert_eq!(snapshot.grand_total, Decimal::ZERO);

    let result = manager.remove_item(&txn.transaction_id, &line_id);
    assert!(matches!(result, Err(CheckoutError::ItemNotFound(_))));
}

// ==================== Transaction-Level Tests ====================

#[test]
fn test_discount_and_shipping_full_scenario() {
    let (catalog, _, manager) = setup();
    let first = seed_product(&catalog, "A-1", 199.99, 10.0);
    let second = seed_product(&catalog, "A-2", 19.99, 10.0);
    let txn = manager.create(None).unwrap();

    manager
        .add_item(&txn.transaction_id, item(&first, 1, Discount::none()))
        .unwrap();
    manager
        .add_item(&txn.transaction_id, item(&second, 2, Discount::fixed(5.0)))
        .unwrap();
    manager
        .set_discount(&txn.transaction_id, Discount::fixed(10.0))
        .unwrap();
    let snapshot = manager.set_shipping(&txn.transaction_id, 10.0).unwrap();

    assert_eq!(snapshot.subtotal, dec("234.97"));
    assert_eq!(snapshot.tax_total, dec("23.497"));
    assert_eq!(snapshot.discount_total, dec("10"));
    assert_eq!(snapshot.grand_total, dec("258.467"));
}

#[test]
fn test_percentage_discount_on_pretax_subtotal() {
    let (catalog, _, manager) = setup();
    let product_id = seed_product(&catalog, "A-1", 100.0, 10.0);
    let txn = manager.create(None).unwrap();
    manager
        .add_item(&txn.transaction_id, item(&product_id, 2, Discount::none()))
        .unwrap();

    let snapshot = manager
        .set_discount(&txn.transaction_id, Discount::percentage(10.0))
        .unwrap();

    assert_eq!(snapshot.discount_total, dec("20")); // 10% of 200, not of 220
    assert_eq!(snapshot.grand_total, dec("200"));
}

#[test]
fn test_negative_total_passes_through() {
    let (catalog, _, manager) = setup();
    let product_id = seed_product(&catalog, "A-1", 10.0, 0.0);
    let txn = manager.create(None).unwrap();
    manager
        .add_item(
            &txn.transaction_id,
            item(&product_id, 1, Discount::percentage(150.0)),
        )
        .unwrap();

    // No error; the negative figure is stored verbatim
    let snapshot = manager.get(&txn.transaction_id).unwrap();
    assert_eq!(snapshot.lines[0].subtotal, dec("-5"));
    assert_eq!(snapshot.grand_total, dec("-5"));
    assert!(snapshot.has_negative_total());
}

// ==================== Payment Tests ====================

#[test]
fn test_partial_then_paid() {
    let (catalog, _, manager) = setup();
    let product_id = seed_product(&catalog, "A-1", 50.0, 0.0);
    let txn = manager.create(None).unwrap();
    manager
        .add_item(&txn.transaction_id, item(&product_id, 1, Discount::none()))
        .unwrap();

    // First payment: 20 of 50
    let snapshot = manager.add_payment(&txn.transaction_id, cash(20.0)).unwrap();
    assert_eq!(snapshot.payment_state, PaymentState::Partial);
    assert_eq!(snapshot.payments[0].status, PaymentStatus::Underpaid);
    assert_eq!(snapshot.payments[0].change_due, Decimal::ZERO);
    assert_eq!(snapshot.remaining_amount(), dec("30"));

    // Second payment: 40 more, cumulative 60 against 50
    let snapshot = manager.add_payment(&txn.transaction_id, cash(40.0)).unwrap();
    assert_eq!(snapshot.payment_state, PaymentState::Paid);
    assert_eq!(snapshot.payments[1].status, PaymentStatus::Overpaid);
    assert_eq!(snapshot.payments[1].change_due, dec("10"));
    assert_eq!(snapshot.remaining_amount(), Decimal::ZERO);
}

#[test]
fn test_exact_payment_reaches_paid() {
    let (catalog, _, manager) = setup();
    let product_id = seed_product(&catalog, "A-1", 32.99, 0.0);
    let txn = manager.create(None).unwrap();
    manager
        .add_item(&txn.transaction_id, item(&product_id, 1, Discount::none()))
        .unwrap();

    let snapshot = manager.add_payment(&txn.transaction_id, cash(32.99)).unwrap();
    assert_eq!(snapshot.payment_state, PaymentState::Paid);
    assert_eq!(snapshot.payments[0].status, PaymentStatus::Exact);
}

#[test]
fn test_zero_tender_stays_due() {
    let (catalog, _, manager) = setup();
    let product_id = seed_product(&catalog, "A-1", 10.0, 0.0);
    let txn = manager.create(None).unwrap();
    manager
        .add_item(&txn.transaction_id, item(&product_id, 1, Discount::none()))
        .unwrap();

    let snapshot = manager.add_payment(&txn.transaction_id, cash(0.0)).unwrap();
    assert_eq!(snapshot.payment_state, PaymentState::Due);
}

#[test]
fn test_payment_after_paid_rejected() {
    let (catalog, _, manager) = setup();
    let product_id = seed_product(&catalog, "A-1", 10.0, 0.0);
    let txn = manager.create(None).unwrap();
    manager
        .add_item(&txn.transaction_id, item(&product_id, 1, Discount::none()))
        .unwrap();
    manager.add_payment(&txn.transaction_id, cash(10.0)).unwrap();

    let result = manager.add_payment(&txn.transaction_id, cash(5.0));
    assert!(matches!(result, Err(CheckoutError::InvalidOperation(_))));
}

#[test]
fn test_negative_payment_rejected() {
    let (catalog, _, manager) = setup();
    let product_id = seed_product(&catalog, "A-1", 10.0, 0.0);
    let txn = manager.create(None).unwrap();
    manager
        .add_item(&txn.transaction_id, item(&product_id, 1, Discount::none()))
        .unwrap();

    let result = manager.add_payment(&txn.transaction_id, cash(-5.0));
    assert!(matches!(
        result,
        Err(CheckoutError::Pricing(
            crate::pricing::PricingError::InvalidAmount(_)
        ))
    ));
}

#[test]
fn test_payment_on_negative_total_rejected() {
    let (catalog, _, manager) = setup();
    let product_id = seed_product(&catalog, "A-1", 10.0, 0.0);
    let txn = manager.create(None).unwrap();
    manager
        .add_item(
            &txn.transaction_id,
            item(&product_id, 1, Discount::percentage(150.0)),
        )
        .unwrap();

    let result = manager.add_payment(&txn.transaction_id, cash(5.0));
    assert!(matches!(result, Err(CheckoutError::InvalidOperation(_))));
}

#[test]
fn test_edits_after_payment_rejected() {
    let (catalog, _, manager) = setup();
    let product_id = seed_product(&catalog, "A-1", 50.0, 0.0);
    let txn = manager.create(None).unwrap();
    let snapshot = manager
        .add_item(&txn.transaction_id, item(&product_id, 1, Discount::none()))
        .unwrap();
    let line_id = snapshot.lines[0].line_id.clone();
    manager.add_payment(&txn.transaction_id, cash(20.0)).unwrap();

    assert!(matches!(
        manager.add_item(&txn.transaction_id, item(&product_id, 1, Discount::none())),
        Err(CheckoutError::InvalidOperation(_))
    ));
    assert!(matches!(
        manager.modify_item(
            &txn.transaction_id,
            &line_id,
            ItemChanges {
                quantity: Some(3),
                ..Default::default()
            }
        ),
        Err(CheckoutError::InvalidOperation(_))
    ));
    assert!(matches!(
        manager.set_discount(&txn.transaction_id, Discount::fixed(1.0)),
        Err(CheckoutError::InvalidOperation(_))
    ));
    assert!(matches!(
        manager.set_shipping(&txn.transaction_id, 2.0),
        Err(CheckoutError::InvalidOperation(_))
    ));
}

// ==================== Completion Tests ====================

#[tokio::test]
async fn test_complete_happy_path() {
    let (catalog, submitter, manager) = setup();
    let product_id = seed_product(&catalog, "A-1", 25.0, 10.0);
    let txn = manager.create(None).unwrap();
    manager
        .add_item(&txn.transaction_id, item(&product_id, 2, Discount::none()))
        .unwrap();
    // grand total = 50 + 5 tax
    manager.add_payment(&txn.transaction_id, cash(55.0)).unwrap();

    let snapshot = manager.complete(&txn.transaction_id).await.unwrap();
    assert_eq!(snapshot.status, TransactionStatus::Completed);
    assert!(snapshot.completed_at.is_some());

    let receipt_id = snapshot.receipt_id.as_deref().unwrap();
    assert_eq!(submitter.accepted_count(), 1);
    assert!(submitter.accepted(receipt_id).is_some());
}

#[tokio::test]
async fn test_complete_empty_transaction_fails() {
    let (_, _, manager) = setup();
    let txn = manager.create(None).unwrap();

    let result = manager.complete(&txn.transaction_id).await;
    assert!(matches!(result, Err(CheckoutError::InvalidOperation(_))));
}

#[tokio::test]
async fn test_complete_unpaid_fails() {
    let (catalog, _, manager) = setup();
    let product_id = seed_product(&catalog, "A-1", 10.0, 0.0);
    let txn = manager.create(None).unwrap();
    manager
        .add_item(&txn.transaction_id, item(&product_id, 1, Discount::none()))
        .unwrap();

    let result = manager.complete(&txn.transaction_id).await;
    assert!(matches!(result, Err(CheckoutError::InvalidOperation(_))));
}

#[tokio::test]
async fn test_complete_negative_total_fails() {
    let (catalog, _, manager) = setup();
    let product_id = seed_product(&catalog, "A-1", 10.0, 0.0);
    let txn = manager.create(None).unwrap();
    manager
        .add_item(
            &txn.transaction_id,
            item(&product_id, 1, Discount::percentage(150.0)),
        )
        .unwrap();

    let result = manager.complete(&txn.transaction_id).await;
    assert!(matches!(result, Err(CheckoutError::InvalidOperation(_))));
}

#[tokio::test]
async fn test_completed_transaction_is_frozen() {
    let (catalog, _, manager) = setup();
    let product_id = seed_product(&catalog, "A-1", 10.0, 0.0);
    let txn = manager.create(None).unwrap();
    manager
        .add_item(&txn.transaction_id, item(&product_id, 1, Discount::none()))
        .unwrap();
    manager.add_payment(&txn.transaction_id, cash(10.0)).unwrap();
    manager.complete(&txn.transaction_id).await.unwrap();

    assert!(matches!(
        manager.complete(&txn.transaction_id).await,
        Err(CheckoutError::TransactionAlreadyCompleted(_))
    ));
    assert!(matches!(
        manager.add_payment(&txn.transaction_id, cash(1.0)),
        Err(CheckoutError::TransactionAlreadyCompleted(_))
    ));
    assert!(matches!(
        manager.add_item(&txn.transaction_id, item(&product_id, 1, Discount::none())),
        Err(CheckoutError::TransactionAlreadyCompleted(_))
    ));
}
