//! CheckoutManager - transaction command processing
//!
//! Handles:
//! - Transaction lifecycle (create, mutate, complete)
//! - Full recomputation of derived totals through the pricing engine on
//!   every edit
//! - Payment reconciliation and the Due -> Partial -> Paid state machine
//! - Submission of finalized transactions to the black-box endpoint
//!
//! # Command Flow
//!
//! ```text
//! command
//!     ├─ 1. Validate inputs (before touching any state)
//!     ├─ 2. Load snapshot, check status guards
//!     ├─ 3. Apply the change
//!     ├─ 4. Recompute totals (pure engine, full pass)
//!     └─ 5. Store and return the updated snapshot
//! ```
//!
//! Commands are serialized per transaction by the map's shard locks; the
//! engine itself holds no state between calls.

use std::sync::Arc;

use dashmap::DashMap;
use rust_decimal::Decimal;
use thiserror::Error;

use shared::transaction::{
    Discount, ItemChanges, LineItemInput, LinePricingInput, LineSnapshot, PaymentInput,
    PaymentRecord, PaymentState, TransactionSnapshot, TransactionStatus,
};

use crate::catalog::CatalogService;
use crate::payments::{advance_state, classify};
use crate::pricing::{self, money, PricingError};
use crate::submit::{SubmitError, TransactionSubmitter};

/// Checkout errors
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    #[error("Transaction already completed: {0}")]
    TransactionAlreadyCompleted(String),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Submission failed: {0}")]
    SubmitFailed(#[from] SubmitError),
}

pub type CheckoutResult<T> = Result<T, CheckoutError>;

/// CheckoutManager - in-memory transaction store and command processor
pub struct CheckoutManager {
    transactions: DashMap<String, TransactionSnapshot>,
    catalog: Arc<CatalogService>,
    submitter: Arc<dyn TransactionSubmitter>,
}

impl std::fmt::Debug for CheckoutManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutManager")
            .field("transactions", &self.transactions.len())
            .finish()
    }
}

impl CheckoutManager {
    pub fn new(catalog: Arc<CatalogService>, submitter: Arc<dyn TransactionSubmitter>) -> Self {
        Self {
            transactions: DashMap::new(),
            catalog,
            submitter,
        }
    }

    // ==================== Lifecycle ====================

    /// Open a new transaction, optionally linked to a customer
    pub fn create(&self, customer_id: Option<String>) -> CheckoutResult<TransactionSnapshot> {
        let mut snapshot = TransactionSnapshot::new(uuid::Uuid::new_v4().to_string());

        if let Some(customer_id) = customer_id {
            let customer = self
                .catalog
                .customer(&customer_id)
                .ok_or_else(|| CheckoutError::CustomerNotFound(customer_id.clone()))?;
            snapshot.customer_id = Some(customer_id);
            snapshot.customer_name = Some(customer.name);
        }

        tracing::info!(transaction_id = %snapshot.transaction_id, "Transaction opened");
        self.transactions
            .insert(snapshot.transaction_id.clone(), snapshot.clone());
        Ok(snapshot)
    }

    /// Fetch a transaction snapshot by ID
    pub fn get(&self, id: &str) -> CheckoutResult<TransactionSnapshot> {
        self.transactions
            .get(id)
            .map(|s| s.clone())
            .ok_or_else(|| CheckoutError::TransactionNotFound(id.to_string()))
    }

    // ==================== Item Commands ====================

    /// Add a line item; product price and tax rate are frozen at add time
    pub fn add_item(&self, id: &str, input: LineItemInput) -> CheckoutResult<TransactionSnapshot> {
        // 1. Validate input and resolve the product before touching state
        money::validate_quantity(input.quantity)?;
        money::validate_discount(&input.discount)?;

        let product = self
            .catalog
            .product(&input.product_id)
            .ok_or_else(|| CheckoutError::ProductNotFound(input.product_id.clone()))?;
        if !product.is_active {
            return Err(CheckoutError::InvalidOperation(format!(
                "Product is not active: {}",
                input.product_id
            )));
        }
        // Catalog data flows into the engine, so it gets the same checks
        money::validate_unit_price(product.unit_price)?;
        money::validate_tax_rate(product.tax_rate_percent)?;

        let mut entry = self
            .transactions
            .get_mut(id)
            .ok_or_else(|| CheckoutError::TransactionNotFound(id.to_string()))?;
        let snapshot = entry.value_mut();
        guard_editable(snapshot)?;

        // 2. Freeze product data into the line snapshot
        snapshot.lines.push(LineSnapshot {
            line_id: uuid::Uuid::new_v4().to_string(),
            product_id: input.product_id,
            sku: product.sku,
            name: product.name,
            unit_price: product.unit_price,
            tax_rate_percent: product.tax_rate_percent,
            quantity: input.quantity,
            discount: input.discount,
            base_amount: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            subtotal: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            note: input.note,
        });

        // 3. Recompute everything
        recompute(snapshot)?;
        Ok(snapshot.clone())
    }

    /// Apply changes to an existing line item
    pub fn modify_item(
        &self,
        id: &str,
        line_id: &str,
        changes: ItemChanges,
    ) -> CheckoutResult<TransactionSnapshot> {
        if let Some(quantity) = changes.quantity {
            money::validate_quantity(quantity)?;
        }
        if let Some(discount) = &changes.discount {
            money::validate_discount(discount)?;
        }

        let mut entry = self
            .transactions
            .get_mut(id)
            .ok_or_else(|| CheckoutError::TransactionNotFound(id.to_string()))?;
        let snapshot = entry.value_mut();
        guard_editable(snapshot)?;

        let line = snapshot
            .lines
            .iter_mut()
            .find(|l| l.line_id == line_id)
            .ok_or_else(|| CheckoutError::ItemNotFound(line_id.to_string()))?;

        if let Some(quantity) = changes.quantity {
            line.quantity = quantity;
        }
        if let Some(discount) = changes.discount {
            line.discount = discount;
        }
        if let Some(note) = changes.note {
            line.note = Some(note);
        }

        recompute(snapshot)?;
        Ok(snapshot.clone())
    }

    /// Remove a line item
    pub fn remove_item(&self, id: &str, line_id: &str) -> CheckoutResult<TransactionSnapshot> {
        let mut entry = self
            .transactions
            .get_mut(id)
            .ok_or_else(|| CheckoutError::TransactionNotFound(id.to_string()))?;
        let snapshot = entry.value_mut();
        guard_editable(snapshot)?;

        let before = snapshot.lines.len();
        snapshot.lines.retain(|l| l.line_id != line_id);
        if snapshot.lines.len() == before {
            return Err(CheckoutError::ItemNotFound(line_id.to_string()));
        }

        recompute(snapshot)?;
        Ok(snapshot.clone())
    }

    // ==================== Transaction-Level Commands ====================

    /// Set the transaction-level discount
    pub fn set_discount(&self, id: &str, discount: Discount) -> CheckoutResult<TransactionSnapshot> {
        money::validate_discount(&discount)?;

        let mut entry = self
            .transactions
            .get_mut(id)
            .ok_or_else(|| CheckoutError::TransactionNotFound(id.to_string()))?;
        let snapshot = entry.value_mut();
        guard_editable(snapshot)?;

        snapshot.discount = discount;
        recompute(snapshot)?;
        Ok(snapshot.clone())
    }

    /// Set the shipping charge
    pub fn set_shipping(&self, id: &str, shipping_charge: f64) -> CheckoutResult<TransactionSnapshot> {
        money::validate_shipping(shipping_charge)?;

        let mut entry = self
            .transactions
            .get_mut(id)
            .ok_or_else(|| CheckoutError::TransactionNotFound(id.to_string()))?;
        let snapshot = entry.value_mut();
        guard_editable(snapshot)?;

        snapshot.shipping_charge = shipping_charge;
        recompute(snapshot)?;
        Ok(snapshot.clone())
    }

    // ==================== Payment Commands ====================

    /// Record a payment and advance the payment state machine
    ///
    /// The cumulative tendered amount is reconciled against the grand
    /// total; change due is derived for the payment that crosses it.
    pub fn add_payment(&self, id: &str, payment: PaymentInput) -> CheckoutResult<TransactionSnapshot> {
        money::validate_payment(&payment)?;

        let mut entry = self
            .transactions
            .get_mut(id)
            .ok_or_else(|| CheckoutError::TransactionNotFound(id.to_string()))?;
        let snapshot = entry.value_mut();
        guard_open(snapshot)?;

        if snapshot.payment_state == PaymentState::Paid {
            return Err(CheckoutError::InvalidOperation(format!(
                "Transaction already paid in full: {}",
                id
            )));
        }
        if snapshot.has_negative_total() {
            return Err(CheckoutError::InvalidOperation(format!(
                "Grand total is negative ({}), resolve the discount before payment",
                snapshot.grand_total
            )));
        }

        let tendered = money::to_decimal(payment.tendered);
        let cumulative = snapshot.paid_amount + tendered;
        let outcome = classify(cumulative, snapshot.grand_total);

        snapshot.payments.push(PaymentRecord {
            payment_id: uuid::Uuid::new_v4().to_string(),
            method: payment.method,
            tendered,
            status: outcome.status,
            change_due: outcome.change_due,
            note: payment.note,
            timestamp: chrono::Utc::now().timestamp_millis(),
        });
        snapshot.paid_amount = cumulative;
        snapshot.payment_state =
            advance_state(snapshot.payment_state, outcome.status, cumulative);
        snapshot.updated_at = chrono::Utc::now().timestamp_millis();

        tracing::info!(
            transaction_id = %id,
            state = ?snapshot.payment_state,
            paid = %snapshot.paid_amount,
            "Payment recorded"
        );
        Ok(snapshot.clone())
    }

    /// Finalize a fully paid transaction and submit it
    ///
    /// Requires at least one line item, a non-negative grand total, and a
    /// Paid state. On success the snapshot is frozen with the submitter's
    /// opaque receipt ID.
    pub async fn complete(&self, id: &str) -> CheckoutResult<TransactionSnapshot> {
        // Validate against a copy; the map lock must not be held across await
        let snapshot = self.get(id)?;
        guard_open(&snapshot)?;

        if snapshot.lines.is_empty() {
            return Err(CheckoutError::InvalidOperation(
                "At least one item is required".to_string(),
            ));
        }
        if snapshot.has_negative_total() {
            return Err(CheckoutError::InvalidOperation(format!(
                "Grand total is negative: {}",
                snapshot.grand_total
            )));
        }
        if snapshot.payment_state != PaymentState::Paid {
            return Err(CheckoutError::InvalidOperation(format!(
                "Transaction is not fully paid, remaining: {}",
                snapshot.remaining_amount()
            )));
        }

        let receipt_id = self.submitter.submit(&snapshot).await?;

        let mut entry = self
            .transactions
            .get_mut(id)
            .ok_or_else(|| CheckoutError::TransactionNotFound(id.to_string()))?;
        let snapshot = entry.value_mut();
        // Re-check: the map was unlocked during submission
        guard_open(snapshot)?;

        let now = chrono::Utc::now().timestamp_millis();
        snapshot.status = TransactionStatus::Completed;
        snapshot.receipt_id = Some(receipt_id.clone());
        snapshot.completed_at = Some(now);
        snapshot.updated_at = now;

        tracing::info!(transaction_id = %id, receipt_id = %receipt_id, "Transaction completed");
        Ok(snapshot.clone())
    }
}

// ==================== Guards & Recompute ====================

fn guard_open(snapshot: &TransactionSnapshot) -> CheckoutResult<()> {
    if snapshot.is_completed() {
        return Err(CheckoutError::TransactionAlreadyCompleted(
            snapshot.transaction_id.clone(),
        ));
    }
    Ok(())
}

/// Items, discount, and shipping may only change before money moves
fn guard_editable(snapshot: &TransactionSnapshot) -> CheckoutResult<()> {
    guard_open(snapshot)?;
    if snapshot.has_payments() {
        return Err(CheckoutError::InvalidOperation(format!(
            "Cannot modify transaction after payments have been recorded: {}",
            snapshot.transaction_id
        )));
    }
    Ok(())
}

/// Recompute all derived figures from current inputs
///
/// A full pass through the pure engine; inputs were validated when they
/// entered the snapshot, so this only fails on a programming error.
fn recompute(snapshot: &mut TransactionSnapshot) -> CheckoutResult<()> {
    let inputs: Vec<LinePricingInput> = snapshot
        .lines
        .iter()
        .map(|line| LinePricingInput {
            unit_price: line.unit_price,
            quantity: line.quantity,
            tax_rate_percent: line.tax_rate_percent,
            discount: line.discount,
        })
        .collect();

    let (line_results, totals) =
        pricing::price_transaction(&inputs, &snapshot.discount, snapshot.shipping_charge)?;

    for (line, result) in snapshot.lines.iter_mut().zip(line_results) {
        line.base_amount = result.base_amount;
        line.discount_amount = result.discount_amount;
        line.subtotal = result.subtotal;
        line.tax_amount = result.tax_amount;
    }

    snapshot.subtotal = totals.subtotal;
    snapshot.tax_total = totals.tax_total;
    snapshot.discount_total = totals.discount_total;
    snapshot.grand_total = totals.grand_total;
    snapshot.updated_at = chrono::Utc::now().timestamp_millis();

    // The engine passes negative figures through; surface them here
    if totals.is_negative() {
        tracing::warn!(
            transaction_id = %snapshot.transaction_id,
            grand_total = %snapshot.grand_total,
            "Discount exceeds basis, total went negative"
        );
    }
    Ok(())
}
