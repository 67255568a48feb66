//! # In-Memory Store
//!
//! A tenant-scoped, in-memory stand-in for the hosted document backend.
//! Used by tests and local runs; the production deployment swaps this for
//! the real backend client with the same call shapes.
//!
//! ## Boundary Rules
//! - A transaction is validated BEFORE it is persisted; a record that
//!   fails validation never reaches a collection.
//! - Status changes go through the same-day business rule here, at the
//!   boundary, not inside the storage structures.
//! - Every transaction mutation publishes a fresh snapshot to the feed.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tokio::sync::{watch, RwLock};
use tracing::debug;
use uuid::Uuid;

use ezpay_core::validation::{validate_status_change, validate_transaction};
use ezpay_core::{Customer, MenuSection, Transaction, TransactionStatus};

use crate::error::{StoreError, StoreResult};
use crate::feed::{ChangeFeed, TransactionSnapshot};

#[derive(Debug, Default)]
struct Collections {
    transactions: Vec<Transaction>,
    sections: Vec<MenuSection>,
    customers: Vec<Customer>,
}

/// The in-memory document store.
///
/// Clones share the same collections, like handles to one backend.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
    feed_tx: watch::Sender<TransactionSnapshot>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        let (feed_tx, _) = watch::channel(Arc::new(Vec::new()));
        MemoryStore {
            inner: Arc::new(RwLock::new(Collections::default())),
            feed_tx,
        }
    }

    fn publish(&self, collections: &Collections) {
        let snapshot: TransactionSnapshot = Arc::new(collections.transactions.clone());
        // send_replace never fails; with no subscribers the value just waits
        self.feed_tx.send_replace(snapshot);
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    /// Persists a validated transaction. A record that fails validation is
    /// rejected here and never stored.
    pub async fn insert_transaction(&self, tx: Transaction) -> StoreResult<String> {
        validate_transaction(&tx)?;

        debug!(id = %tx.id, restaurant_id = %tx.restaurant_id, total = tx.total_minor, "inserting transaction");

        let mut collections = self.inner.write().await;
        collections.transactions.push(tx.clone());
        self.publish(&collections);
        Ok(tx.id)
    }

    /// Changes a transaction's status, subject to the same-day rule.
    ///
    /// `today` is the caller's local calendar date.
    pub async fn set_status(
        &self,
        restaurant_id: &str,
        id: &str,
        status: TransactionStatus,
        today: NaiveDate,
    ) -> StoreResult<()> {
        let mut collections = self.inner.write().await;
        let tx = collections
            .transactions
            .iter_mut()
            .find(|t| t.restaurant_id == restaurant_id && t.id == id)
            .ok_or_else(|| StoreError::not_found("transaction", id))?;

        validate_status_change(tx, today)?;

        debug!(id = %id, from = %tx.status, to = %status, "transaction status change");
        tx.status = status;
        tx.updated_at = Some(Utc::now());
        self.publish(&collections);
        Ok(())
    }

    /// Administrative override: removes a transaction outright. Normal
    /// operation never deletes.
    pub async fn delete_transaction(&self, restaurant_id: &str, id: &str) -> StoreResult<()> {
        let mut collections = self.inner.write().await;
        let before = collections.transactions.len();
        collections
            .transactions
            .retain(|t| !(t.restaurant_id == restaurant_id && t.id == id));

        if collections.transactions.len() == before {
            return Err(StoreError::not_found("transaction", id));
        }
        debug!(id = %id, "transaction deleted (administrative override)");
        self.publish(&collections);
        Ok(())
    }

    /// All transactions for one tenant, in insertion order.
    pub async fn transactions(&self, restaurant_id: &str) -> Vec<Transaction> {
        self.inner
            .read()
            .await
            .transactions
            .iter()
            .filter(|t| t.restaurant_id == restaurant_id)
            .cloned()
            .collect()
    }

    /// One transaction by id, scoped to the tenant.
    pub async fn get_transaction(&self, restaurant_id: &str, id: &str) -> Option<Transaction> {
        self.inner
            .read()
            .await
            .transactions
            .iter()
            .find(|t| t.restaurant_id == restaurant_id && t.id == id)
            .cloned()
    }

    /// Subscribes to transaction snapshots for one tenant.
    pub fn feed(&self, restaurant_id: &str) -> ChangeFeed {
        ChangeFeed::new(restaurant_id.to_string(), self.feed_tx.subscribe())
    }

    // =========================================================================
    // Sections
    // =========================================================================

    /// Replaces the tenant's menu sections.
    pub async fn set_sections(&self, restaurant_id: &str, sections: Vec<MenuSection>) {
        let mut collections = self.inner.write().await;
        collections
            .sections
            .retain(|s| s.restaurant_id != restaurant_id);
        collections.sections.extend(sections);
    }

    /// The tenant's menu sections.
    pub async fn sections(&self, restaurant_id: &str) -> Vec<MenuSection> {
        self.inner
            .read()
            .await
            .sections
            .iter()
            .filter(|s| s.restaurant_id == restaurant_id)
            .cloned()
            .collect()
    }

    // =========================================================================
    // Customers
    // =========================================================================

    /// Upserts a customer keyed by (tenant, phone): a known phone updates
    /// the stored name, a new one inserts a record.
    pub async fn upsert_customer(
        &self,
        restaurant_id: &str,
        name: &str,
        phone: &str,
    ) -> String {
        let mut collections = self.inner.write().await;
        let now = Utc::now();

        if let Some(customer) = collections
            .customers
            .iter_mut()
            .find(|c| c.restaurant_id == restaurant_id && c.phone == phone)
        {
            customer.name = name.to_string();
            customer.updated_at = now;
            return customer.id.clone();
        }

        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            restaurant_id: restaurant_id.to_string(),
            name: name.to_string(),
            phone: phone.to_string(),
            created_at: now,
            updated_at: now,
        };
        let id = customer.id.clone();
        debug!(customer_id = %id, "new customer record");
        collections.customers.push(customer);
        id
    }

    /// The tenant's customer records.
    pub async fn customers(&self, restaurant_id: &str) -> Vec<Customer> {
        self.inner
            .read()
            .await
            .customers
            .iter()
            .filter(|c| c.restaurant_id == restaurant_id)
            .cloned()
            .collect()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local};
    use ezpay_core::{CoreError, LineItem, PaymentMethod, ValidationError};

    fn tx(id: &str, restaurant_id: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            restaurant_id: restaurant_id.to_string(),
            items: vec![LineItem {
                product_id: "p1".to_string(),
                name: "Coffee".to_string(),
                unit_price_minor: 12900,
                quantity: 1,
                section_id: None,
            }],
            subtotal_minor: 12900,
            tax_minor: 0,
            total_minor: 12900,
            payment_method: PaymentMethod::Cash,
            status: TransactionStatus::Completed,
            customer_name: None,
            customer_phone: None,
            table_number: None,
            employee_id: "e1".to_string(),
            employee_name: "Asha".to_string(),
            created_at: Some(Utc::now()),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_read_back() {
        let store = MemoryStore::new();
        store.insert_transaction(tx("t1", "r1")).await.unwrap();
        store.insert_transaction(tx("t2", "r2")).await.unwrap();

        let r1 = store.transactions("r1").await;
        assert_eq!(r1.len(), 1);
        assert_eq!(r1[0].id, "t1");
        assert!(store.get_transaction("r1", "t2").await.is_none());
    }

    #[tokio::test]
    async fn test_invalid_transaction_never_persisted() {
        let store = MemoryStore::new();
        let mut bad = tx("t1", "r1");
        bad.items.clear();

        let err = store.insert_transaction(bad).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::Validation(ValidationError::EmptyItems))
        ));
        assert!(store.transactions("r1").await.is_empty());
    }

    #[tokio::test]
    async fn test_status_change_same_day() {
        let store = MemoryStore::new();
        store.insert_transaction(tx("t1", "r1")).await.unwrap();

        let today = Local::now().date_naive();
        store
            .set_status("r1", "t1", TransactionStatus::Refunded, today)
            .await
            .unwrap();

        let stored = store.get_transaction("r1", "t1").await.unwrap();
        assert_eq!(stored.status, TransactionStatus::Refunded);
        assert!(stored.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_status_change_yesterday_rejected() {
        let store = MemoryStore::new();
        let mut old = tx("t1", "r1");
        old.created_at = Some(Utc::now() - Duration::days(1));
        store.insert_transaction(old).await.unwrap();

        let today = Local::now().date_naive();
        let err = store
            .set_status("r1", "t1", TransactionStatus::Cancelled, today)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::BusinessRule(_))));

        // rejected: the stored status is untouched
        let stored = store.get_transaction("r1", "t1").await.unwrap();
        assert_eq!(stored.status, TransactionStatus::Completed);
    }

    #[tokio::test]
    async fn test_status_change_wrong_tenant_is_not_found() {
        let store = MemoryStore::new();
        store.insert_transaction(tx("t1", "r1")).await.unwrap();

        let err = store
            .set_status("r2", "t1", TransactionStatus::Refunded, Local::now().date_naive())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_transaction() {
        let store = MemoryStore::new();
        store.insert_transaction(tx("t1", "r1")).await.unwrap();

        store.delete_transaction("r1", "t1").await.unwrap();
        assert!(store.transactions("r1").await.is_empty());
        assert!(matches!(
            store.delete_transaction("r1", "t1").await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_feed_observes_inserts() {
        let store = MemoryStore::new();
        let mut feed = store.feed("r1");
        assert!(feed.snapshot().is_empty());

        store.insert_transaction(tx("t1", "r1")).await.unwrap();
        // another tenant's write is invisible through this feed
        store.insert_transaction(tx("t2", "r2")).await.unwrap();

        let snapshot = feed.next().await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, "t1");
    }

    #[tokio::test]
    async fn test_customer_upsert_by_phone() {
        let store = MemoryStore::new();
        let first = store.upsert_customer("r1", "Priya", "98765").await;
        let second = store.upsert_customer("r1", "Priya S", "98765").await;
        assert_eq!(first, second);

        let customers = store.customers("r1").await;
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].name, "Priya S");

        // same phone under a different tenant is a different record
        let other = store.upsert_customer("r2", "Priya", "98765").await;
        assert_ne!(other, first);
    }
}
