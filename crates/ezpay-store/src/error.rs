//! # Store Error Types
//!
//! Error types for the persistence boundary.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Error Propagation                              │
//! │                                                                     │
//! │  CoreError (validation / precondition / business rule)              │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  StoreError (this module) ← adds boundary context                   │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Frontend maps each category to an actionable message               │
//! │  (data-integrity anomalies never reach here; they are logged)       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use ezpay_core::{BusinessRuleViolation, CoreError, PreconditionError, ValidationError};

/// Persistence-boundary errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found in the tenant's collections.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A core rule rejected the operation before anything was persisted.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The hosted backend failed the request.
    #[error("backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// True when the failure is user input, not a system fault.
    pub fn is_rejection(&self) -> bool {
        matches!(self, StoreError::Core(_))
    }
}

// `?` on the specific core categories without an intermediate `.into()`
impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Core(err.into())
    }
}

impl From<PreconditionError> for StoreError {
    fn from(err: PreconditionError) -> Self {
        StoreError::Core(err.into())
    }
}

impl From<BusinessRuleViolation> for StoreError {
    fn from(err: BusinessRuleViolation) -> Self {
        StoreError::Core(err.into())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
