//! # ezpay-store: Persistence Boundary for ezPay POS
//!
//! Everything that crosses the line between the pure core and the hosted
//! document backend lives here.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       ezPay POS Data Flow                           │
//! │                                                                     │
//! │  Operator session (frontend)                                        │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                  ezpay-store (THIS CRATE)                   │   │
//! │  │                                                             │   │
//! │  │   ┌─────────────┐   ┌──────────────┐   ┌───────────────┐   │   │
//! │  │   │ PosService  │   │ MemoryStore  │   │  ChangeFeed   │   │   │
//! │  │   │ (service.rs)│──►│ (memory.rs)  │──►│  (feed.rs)    │   │   │
//! │  │   │             │   │              │   │               │   │   │
//! │  │   │ checkout,   │   │ validate-    │   │ full-snapshot │   │   │
//! │  │   │ status,     │   │ then-persist │   │ fan-out       │   │   │
//! │  │   │ reports     │   │ collections  │   │               │   │   │
//! │  │   └─────────────┘   └──────────────┘   └───────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Hosted document backend (persistence, auth, multi-client sync)     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`memory`] - Tenant-scoped in-memory stand-in for the backend
//! - [`feed`] - Restartable full-collection snapshot subscription
//! - [`service`] - Checkout, status change, reports, receipts
//! - [`error`] - Boundary error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ezpay_core::{BillSettings, Cart, Money, Operator, PaymentMethod};
//! use ezpay_store::{MemoryStore, PosService};
//!
//! # async fn run() -> Result<(), ezpay_store::StoreError> {
//! let store = MemoryStore::new();
//! let operator = Operator { id: "e1".into(), name: "Asha".into() };
//! let service = PosService::new(store, BillSettings::default(), operator, "r1");
//!
//! let mut cart = Cart::new();
//! // ... add items ...
//! let outcome = service
//!     .checkout(&mut cart, PaymentMethod::Cash, Some(Money::from_minor(70000)))
//!     .await?;
//! println!("{}", outcome.bill_text);
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod feed;
pub mod memory;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use feed::{ChangeFeed, TransactionSnapshot};
pub use memory::MemoryStore;
pub use service::{CheckoutOutcome, PosService};
