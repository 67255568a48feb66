//! # Validation Module
//!
//! The gate between candidate transactions and the persistence boundary.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Validation Layers                             │
//! │                                                                     │
//! │  Layer 1: Frontend (TypeScript)                                     │
//! │  ├── Basic format checks, immediate feedback                        │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE                                               │
//! │  ├── Shape rules: non-empty items, non-negative amounts             │
//! │  ├── Bill invariant: |subtotal + tax − total| ≤ 1 minor unit        │
//! │  └── Business rule: status changes only on the creation day         │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Hosted backend (security rules)                           │
//! │  └── Tenant scoping, auth                                           │
//! │                                                                     │
//! │  A record that fails here is NEVER handed to the backend.           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Enum validity (payment method, status) is enforced by the type system:
//! malformed wire values fail at serde deserialization before any of these
//! functions run.

use chrono::NaiveDate;

use crate::error::{BusinessRuleViolation, ValidationError};
use crate::types::Transaction;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Largest drift between `subtotal + tax` and `total`, in minor units.
pub const TOTAL_TOLERANCE_MINOR: i64 = 1;

// =============================================================================
// Text Normalization
// =============================================================================

/// The one normalization rule for optional human-entered text:
/// trim whitespace, collapse empty to `None`.
///
/// ```rust
/// use ezpay_core::validation::normalize_optional_text;
///
/// assert_eq!(normalize_optional_text(Some("  Priya ")), Some("Priya".to_string()));
/// assert_eq!(normalize_optional_text(Some("   ")), None);
/// assert_eq!(normalize_optional_text(None), None);
/// ```
pub fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// =============================================================================
// Transaction Validation
// =============================================================================

/// Validates a candidate transaction before it is accepted for persistence.
///
/// ## Rules
/// - `items` must be non-empty
/// - every line: quantity ≥ 1, unit price ≥ 0
/// - `subtotal`, `tax`, `total` all non-negative
/// - `|subtotal + tax − total| ≤ 1` minor unit
///
/// Nothing is silently corrected here; normalization of optional text
/// happens earlier, at input capture.
pub fn validate_transaction(tx: &Transaction) -> ValidationResult<()> {
    if tx.items.is_empty() {
        return Err(ValidationError::EmptyItems);
    }

    for line in &tx.items {
        if line.quantity < 1 {
            return Err(ValidationError::InvalidQuantity {
                name: line.name.clone(),
                quantity: line.quantity,
            });
        }
        if line.unit_price_minor < 0 {
            return Err(ValidationError::NegativeUnitPrice {
                name: line.name.clone(),
            });
        }
    }

    if tx.subtotal_minor < 0 {
        return Err(ValidationError::NegativeAmount { field: "subtotal" });
    }
    if tx.tax_minor < 0 {
        return Err(ValidationError::NegativeAmount { field: "tax" });
    }
    if tx.total_minor < 0 {
        return Err(ValidationError::NegativeAmount { field: "total" });
    }

    let drift = (tx.subtotal_minor + tx.tax_minor - tx.total_minor).abs();
    if drift > TOTAL_TOLERANCE_MINOR {
        return Err(ValidationError::TotalMismatch {
            subtotal_minor: tx.subtotal_minor,
            tax_minor: tx.tax_minor,
            total_minor: tx.total_minor,
        });
    }

    Ok(())
}

// =============================================================================
// Status-Change Rule
// =============================================================================

/// Rejects a status update on a transaction not created today.
///
/// `today` is the caller's local calendar date; the transaction's own date
/// comes from [`Transaction::local_date`]. A record whose server timestamp
/// has not resolved is rejected too, since same-day cannot be proven.
///
/// This is a deliberate business rule enforced at the boundary, not a
/// storage-layer constraint.
pub fn validate_status_change(
    tx: &Transaction,
    today: NaiveDate,
) -> Result<(), BusinessRuleViolation> {
    match tx.local_date() {
        Some(created) if created == today => Ok(()),
        Some(created) => Err(BusinessRuleViolation::StaleStatusChange {
            id: tx.id.clone(),
            created,
            today,
        }),
        None => Err(BusinessRuleViolation::UnresolvedTimestamp { id: tx.id.clone() }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
