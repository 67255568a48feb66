//! # Change Feed
//!
//! A restartable sequence of full-collection snapshots, modelling the
//! hosted backend's push subscription without leaking stream semantics
//! into the core.
//!
//! ## Snapshot, Not Stream
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Backend push: doc-level deltas, ordering caveats, resume tokens    │
//! │                              │                                      │
//! │                              ▼                                      │
//! │  ChangeFeed: each observation is the WHOLE collection               │
//! │                              │                                      │
//! │                              ▼                                      │
//! │  aggregate(snapshot, ...)  ← pure function of one materialized view │
//! │                                                                     │
//! │  A new subscriber immediately sees the current snapshot; a slow     │
//! │  one only ever skips intermediate states, never individual edits.   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tokio::sync::watch;

use ezpay_core::Transaction;

/// A materialized, immutable view of the transaction collection.
pub type TransactionSnapshot = Arc<Vec<Transaction>>;

/// A tenant-scoped subscription to transaction snapshots.
///
/// Cheap to create and drop; the store keeps publishing whether or not
/// anyone is subscribed.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    restaurant_id: String,
    rx: watch::Receiver<TransactionSnapshot>,
}

impl ChangeFeed {
    pub(crate) fn new(restaurant_id: String, rx: watch::Receiver<TransactionSnapshot>) -> Self {
        ChangeFeed { restaurant_id, rx }
    }

    /// The current snapshot, scoped to this feed's tenant.
    pub fn snapshot(&self) -> Vec<Transaction> {
        self.rx
            .borrow()
            .iter()
            .filter(|tx| tx.restaurant_id == self.restaurant_id)
            .cloned()
            .collect()
    }

    /// Waits for the next change and returns the new snapshot.
    ///
    /// Returns `None` once the store has been dropped; the caller restarts
    /// by asking the store for a fresh feed.
    pub async fn next(&mut self) -> Option<Vec<Transaction>> {
        self.rx.changed().await.ok()?;
        Some(self.snapshot())
    }
}
