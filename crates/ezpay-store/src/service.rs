//! # POS Service
//!
//! The orchestration layer between the operator's session and the store.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Checkout                                     │
//! │                                                                     │
//! │  Cart ──► preconditions ──► compute_totals ──► build Transaction    │
//! │             │ empty cart?        │                  │               │
//! │             │ cash short?        │ configured       ▼               │
//! │             ▼                    │ tax rate     validate + persist  │
//! │          rejected                │                  │               │
//! │                                  ▼                  ▼               │
//! │                            change due        thermal receipt       │
//! │                                                                     │
//! │  The persisted write is one atomic unit of work: once issued it     │
//! │  either succeeds or fails; there is no cancellation path.           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use ezpay_core::report::{aggregate, ReportOptions, ReportRange, SalesReport};
use ezpay_core::{
    compute_change, compute_totals, render_display, render_thermal, BillSettings, BillTotals,
    Cart, DisplayReceipt, Money, Operator, PaymentMethod, PreconditionError, Transaction,
    TransactionStatus,
};

use crate::error::{StoreError, StoreResult};
use crate::memory::MemoryStore;

/// Placeholder name stored on a customer record created from a checkout
/// that supplied a phone but no name.
const UNNAMED_CUSTOMER: &str = "Anonymous";

/// What the operator gets back from a successful checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutOutcome {
    pub transaction_id: String,
    pub totals: BillTotals,
    /// Change due; present only for cash payments.
    pub change: Option<Money>,
    /// The 48-column thermal receipt, ready to paste into the printer.
    pub bill_text: String,
}

/// One operator session's gateway to the POS.
///
/// Holds the tenant, the operator identity stamped onto new transactions,
/// and the bill settings handed in at construction time.
#[derive(Debug, Clone)]
pub struct PosService {
    store: MemoryStore,
    settings: BillSettings,
    operator: Operator,
    restaurant_id: String,
}

impl PosService {
    pub fn new(
        store: MemoryStore,
        settings: BillSettings,
        operator: Operator,
        restaurant_id: impl Into<String>,
    ) -> Self {
        PosService {
            store,
            settings,
            operator,
            restaurant_id: restaurant_id.into(),
        }
    }

    /// Finalizes the cart into a recorded transaction.
    ///
    /// Preconditions checked here, before anything is persisted:
    /// - the cart must not be empty
    /// - a cash payment must tender at least the bill total
    ///
    /// On success the cart is cleared and the thermal receipt returned.
    pub async fn checkout(
        &self,
        cart: &mut Cart,
        payment_method: PaymentMethod,
        cash_received: Option<Money>,
    ) -> StoreResult<CheckoutOutcome> {
        if cart.is_empty() {
            return Err(PreconditionError::EmptyCart.into());
        }

        let totals = compute_totals(&cart.items, self.settings.tax_rate());

        let change = if payment_method == PaymentMethod::Cash {
            let tendered = cash_received.unwrap_or_else(Money::zero);
            if tendered < totals.total {
                return Err(PreconditionError::InsufficientCash {
                    tendered_minor: tendered.minor(),
                    total_minor: totals.total.minor(),
                }
                .into());
            }
            Some(compute_change(tendered, totals.total))
        } else {
            None
        };

        let now = Utc::now();
        let tx = Transaction {
            id: Uuid::new_v4().to_string(),
            restaurant_id: self.restaurant_id.clone(),
            items: cart.items.clone(),
            subtotal_minor: totals.subtotal.minor(),
            tax_minor: totals.tax.minor(),
            total_minor: totals.total.minor(),
            payment_method,
            status: TransactionStatus::Completed,
            customer_name: cart.customer_name.clone(),
            customer_phone: cart.customer_phone.clone(),
            table_number: cart.table_number.clone(),
            employee_id: self.operator.id.clone(),
            employee_name: self.operator.name.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        };

        let bill_text = render_thermal(&self.settings, &tx);
        let transaction_id = self.store.insert_transaction(tx.clone()).await?;

        // a phone number on the bill keeps the customer book current
        if let Some(phone) = &tx.customer_phone {
            let name = tx.customer_name.as_deref().unwrap_or(UNNAMED_CUSTOMER);
            self.store
                .upsert_customer(&self.restaurant_id, name, phone)
                .await;
        }

        info!(
            transaction_id = %transaction_id,
            total = totals.total.minor(),
            method = %payment_method,
            items = cart.items.len(),
            "checkout recorded"
        );

        cart.clear();

        Ok(CheckoutOutcome {
            transaction_id,
            totals,
            change,
            bill_text,
        })
    }

    /// Changes a recorded transaction's status. Only allowed on the
    /// calendar day the transaction was created.
    pub async fn change_status(&self, id: &str, status: TransactionStatus) -> StoreResult<()> {
        debug!(id = %id, to = %status, "status change requested");
        let today = Local::now().date_naive();
        self.store
            .set_status(&self.restaurant_id, id, status, today)
            .await
    }

    /// Builds the sales report for the requested range from the current
    /// snapshot.
    pub async fn sales_report(&self, range: ReportRange) -> SalesReport {
        let snapshot = self.store.transactions(&self.restaurant_id).await;
        let sections = self.store.sections(&self.restaurant_id).await;
        let opts = ReportOptions {
            range,
            today: Local::now().date_naive(),
        };
        aggregate(&snapshot, &sections, &opts)
    }

    /// Re-renders the thermal receipt for a stored transaction.
    pub async fn thermal_receipt(&self, id: &str) -> StoreResult<String> {
        let tx = self
            .store
            .get_transaction(&self.restaurant_id, id)
            .await
            .ok_or_else(|| StoreError::not_found("transaction", id))?;
        Ok(render_thermal(&self.settings, &tx))
    }

    /// Builds the structured display receipt for a stored transaction.
    pub async fn display_receipt(&self, id: &str) -> StoreResult<DisplayReceipt> {
        let tx = self
            .store
            .get_transaction(&self.restaurant_id, id)
            .await
            .ok_or_else(|| StoreError::not_found("transaction", id))?;
        Ok(render_display(&self.settings, &tx))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
