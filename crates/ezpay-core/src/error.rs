//! # Error Types
//!
//! Domain error types for ezpay-core.
//!
//! ## Error Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Error Types                                │
//! │                                                                     │
//! │  ezpay-core errors (this file)                                      │
//! │  ├── ValidationError      - malformed transaction input             │
//! │  ├── PreconditionError    - checkout attempted in an invalid state  │
//! │  ├── BusinessRuleViolation- status change outside the allowed day   │
//! │  └── CoreError            - umbrella over the above + cart limits   │
//! │                                                                     │
//! │  ezpay-store errors (separate crate)                                │
//! │  └── StoreError           - backend boundary failures               │
//! │                                                                     │
//! │  Data-integrity anomalies (missing timestamps, unknown categories)  │
//! │  are NOT errors: aggregation logs them and excludes the record.     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (ids, amounts, dates)
//! 3. Errors are enum variants, never String
//! 4. Each variant maps to an actionable user-facing message

use chrono::NaiveDate;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Umbrella error for core business logic.
///
/// The three failure categories (validation, precondition, business rule)
/// each convert into this via `#[from]`, so callers can `?` any of them.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Malformed transaction input. Surfaced before any persistence attempt.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Checkout attempted in a state the caller must reject first.
    #[error("precondition failed: {0}")]
    Precondition(#[from] PreconditionError),

    /// A business rule rejected the operation. Not a system fault.
    #[error("business rule violation: {0}")]
    BusinessRule(#[from] BusinessRuleViolation),

    /// Cart has exceeded the maximum number of distinct lines.
    #[error("cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds the maximum allowed.
    #[error("quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Cart mutation referenced a product that is not in the cart.
    #[error("product {product_id} not in cart")]
    ItemNotInCart { product_id: String },
}

// =============================================================================
// Validation Error
// =============================================================================

/// A candidate transaction failed validation.
///
/// These are raised at the boundary, before a record is handed to the
/// persistence collaborator. Nothing is silently corrected except the
/// trim/default normalization of optional free-text fields.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A transaction must carry at least one line item.
    #[error("transaction has no items")]
    EmptyItems,

    /// Line quantity below 1.
    #[error("item '{name}' has invalid quantity {quantity}")]
    InvalidQuantity { name: String, quantity: i64 },

    /// Negative unit price on a line item.
    #[error("item '{name}' has negative unit price")]
    NegativeUnitPrice { name: String },

    /// A monetary field on the bill is negative.
    #[error("{field} must not be negative")]
    NegativeAmount { field: &'static str },

    /// `subtotal + tax` drifted from `total` by more than one minor unit.
    #[error("total mismatch: subtotal {subtotal_minor} + tax {tax_minor} != total {total_minor}")]
    TotalMismatch {
        subtotal_minor: i64,
        tax_minor: i64,
        total_minor: i64,
    },

    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
}

// =============================================================================
// Precondition Error
// =============================================================================

/// The caller attempted checkout in a state it must reject itself.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PreconditionError {
    /// Checkout with an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// Cash tendered is less than the bill total.
    #[error("cash received {tendered_minor} is less than total {total_minor}")]
    InsufficientCash { tendered_minor: i64, total_minor: i64 },
}

// =============================================================================
// Business Rule Violation
// =============================================================================

/// A deliberate business rule rejected the operation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BusinessRuleViolation {
    /// Status changes are only allowed on the calendar day the transaction
    /// was created.
    #[error("transaction {id} was created on {created}, not {today}; status can only change same-day")]
    StaleStatusChange {
        id: String,
        created: NaiveDate,
        today: NaiveDate,
    },

    /// The record's server timestamp has not resolved, so same-day cannot
    /// be proven.
    #[error("transaction {id} has no resolved timestamp; status cannot change")]
    UnresolvedTimestamp { id: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
