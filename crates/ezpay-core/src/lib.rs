//! # ezpay-core: Pure Business Logic for ezPay POS
//!
//! This crate is the **heart** of ezPay POS. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      ezPay POS Architecture                         │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                  Frontend (TypeScript)                      │   │
//! │  │   Terminal UI ──► Cart UI ──► Checkout ──► Reports UI       │   │
//! │  └────────────────────────────┬────────────────────────────────┘   │
//! │                               │                                     │
//! │  ┌────────────────────────────▼────────────────────────────────┐   │
//! │  │              ★ ezpay-core (THIS CRATE) ★                    │   │
//! │  │                                                             │   │
//! │  │  ┌────────┐ ┌───────┐ ┌────────────┐ ┌────────┐ ┌────────┐ │   │
//! │  │  │ money  │ │ cart  │ │ validation │ │ report │ │receipt │ │   │
//! │  │  │ totals │ │ lines │ │  tx rules  │ │rollups │ │thermal │ │   │
//! │  │  │ change │ │ merge │ │  same-day  │ │ top-5  │ │display │ │   │
//! │  │  └────────┘ └───────┘ └────────────┘ └────────┘ └────────┘ │   │
//! │  │                                                             │   │
//! │  │   NO I/O • NO BACKEND • NO CLOCK READS • PURE FUNCTIONS     │   │
//! │  └────────────────────────────┬────────────────────────────────┘   │
//! │                               │                                     │
//! │  ┌────────────────────────────▼────────────────────────────────┐   │
//! │  │               ezpay-store (Boundary Layer)                  │   │
//! │  │      snapshot store, change feed, checkout service          │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! │                               │                                     │
//! │                 Hosted document backend + auth                      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (MenuItem, LineItem, Transaction, ...)
//! - [`money`] - Integer minor-unit money, tax, totals, change
//! - [`cart`] - The operator's working cart with a derived total
//! - [`validation`] - Transaction validation and the same-day status rule
//! - [`report`] - The sales aggregation engine
//! - [`receipt`] - Thermal and display receipt renderers
//! - [`settings`] - The explicit bill/receipt configuration object
//! - [`error`] - Domain error taxonomy
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same inputs produce the same outputs, always
//! 2. **No I/O**: backend, network, and file access are FORBIDDEN here
//! 3. **Integer Money**: minor units (i64), display rounding at the edge
//! 4. **Explicit Errors**: typed errors, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod receipt;
pub mod report;
pub mod settings;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use error::{
    BusinessRuleViolation, CoreError, CoreResult, PreconditionError, ValidationError,
};
pub use money::{compute_change, compute_totals, format_amount, BillTotals, Money, TaxRate};
pub use receipt::{render_display, render_thermal, DisplayReceipt};
pub use report::{aggregate, ReportOptions, ReportRange, SalesReport};
pub use settings::BillSettings;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart.
///
/// Prevents runaway carts and keeps receipts printable on one roll.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line in the cart.
///
/// Prevents accidental over-ordering (typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;
