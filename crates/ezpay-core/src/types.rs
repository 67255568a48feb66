//! # Domain Types
//!
//! Core domain types for ezPay POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Domain Types                               │
//! │                                                                     │
//! │  ┌───────────────┐    ┌───────────────┐    ┌───────────────┐        │
//! │  │   MenuItem    │    │   LineItem    │    │  Transaction  │        │
//! │  │ ───────────── │    │ ───────────── │    │ ───────────── │        │
//! │  │ live catalog  │───►│ frozen name / │───►│ items + bill  │        │
//! │  │ entry         │    │ price at sale │    │ totals + meta │        │
//! │  └───────────────┘    └───────────────┘    └───────────────┘        │
//! │                                                                     │
//! │  ┌───────────────┐    ┌────────────────┐   ┌───────────────┐        │
//! │  │  MenuSection  │    │ PaymentMethod  │   │  Transaction  │        │
//! │  │  id → name    │    │ cash/card/other│   │  Status       │        │
//! │  │  lookup       │    └────────────────┘   │ completed/    │        │
//! │  └───────────────┘                         │ refunded/     │        │
//! │                                            │ cancelled     │        │
//! │                                            └───────────────┘        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `LineItem` freezes the product's name and price at the moment of sale.
//! Historical bills are unaffected by later menu edits.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Menu Catalog
// =============================================================================

/// A live menu entry. Catalog CRUD is owned by the surrounding application;
/// the core only snapshots from it when an item enters the cart.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MenuItem {
    /// Unique identifier assigned by the backend.
    pub id: String,

    /// Tenant this item belongs to.
    pub restaurant_id: String,

    /// Display name shown on the terminal and on receipts.
    pub name: String,

    /// Optional description shown on the menu screen.
    pub description: Option<String>,

    /// Price in minor units.
    pub price_minor: i64,

    /// Optional image reference.
    pub image: Option<String>,

    /// Whether the item can currently be sold.
    pub available: bool,

    /// Menu section (category) this item belongs to.
    pub section_id: Option<String>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl MenuItem {
    /// Returns the price as a Money value.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_minor(self.price_minor)
    }
}

/// A menu section. Only used as an id → name lookup when labelling
/// aggregation output.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MenuSection {
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    /// Display ordering on the terminal.
    pub order_index: i64,
}

// =============================================================================
// Line Item
// =============================================================================

/// An immutable snapshot of a sold product.
///
/// Decoupled from the live catalog so that historical bills are unaffected
/// by later price or name edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    /// Catalog id of the product this line was snapshotted from.
    pub product_id: String,

    /// Product name at time of sale (frozen).
    pub name: String,

    /// Unit price in minor units at time of sale (frozen).
    pub unit_price_minor: i64,

    /// Quantity sold.
    pub quantity: i64,

    /// Section at time of sale, if the product had one.
    pub section_id: Option<String>,
}

impl LineItem {
    /// Freezes a catalog item into a line snapshot.
    pub fn snapshot(item: &MenuItem, quantity: i64) -> Self {
        LineItem {
            product_id: item.id.clone(),
            name: item.name.clone(),
            unit_price_minor: item.price_minor,
            quantity,
            section_id: item.section_id.clone(),
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_minor(self.unit_price_minor)
    }

    /// Line total: `unit_price × quantity`.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_minor(self.unit_price_minor * self.quantity)
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum PaymentMethod {
    Cash,
    Card,
    Other,
}

impl PaymentMethod {
    /// All methods, in canonical display order. Rollups emit every method
    /// even when its revenue is zero.
    pub const ALL: [PaymentMethod; 3] =
        [PaymentMethod::Cash, PaymentMethod::Card, PaymentMethod::Other];

    /// Wire form, matching the serde representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Other => "other",
        }
    }

    /// Capitalised form for receipts: "Cash", "Card", "Other".
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::Other => "Other",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Transaction Status
// =============================================================================

/// Lifecycle status of a recorded transaction.
///
/// Status is the only field mutable after creation, and only on the same
/// calendar day the transaction was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum TransactionStatus {
    /// Paid and finalized. Counts toward revenue.
    Completed,
    /// Money returned to the customer. Subtracts from revenue.
    Refunded,
    /// Struck before settlement. Zero revenue, counted separately.
    Cancelled,
}

impl TransactionStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Completed => "completed",
            TransactionStatus::Refunded => "refunded",
            TransactionStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A recorded sale, owned by the restaurant (tenant) that created it.
///
/// ## Invariants
/// - `items` is non-empty
/// - `subtotal + tax == total` within one minor unit
/// - optional free-text fields are trimmed; empty collapses to `None`
///
/// `created_at` is `Option` because the hosted backend assigns server
/// timestamps asynchronously: a freshly observed record can arrive before
/// its timestamp resolves. Aggregation skips such records with a diagnostic.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Transaction {
    pub id: String,
    pub restaurant_id: String,
    pub items: Vec<LineItem>,
    pub subtotal_minor: i64,
    pub tax_minor: i64,
    pub total_minor: i64,
    pub payment_method: PaymentMethod,
    pub status: TransactionStatus,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub table_number: Option<String>,
    pub employee_id: String,
    pub employee_name: String,
    #[ts(as = "Option<String>")]
    pub created_at: Option<DateTime<Utc>>,
    #[ts(as = "Option<String>")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Transaction {
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_minor(self.subtotal_minor)
    }

    #[inline]
    pub fn tax(&self) -> Money {
        Money::from_minor(self.tax_minor)
    }

    #[inline]
    pub fn total(&self) -> Money {
        Money::from_minor(self.total_minor)
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.status == TransactionStatus::Completed
    }

    /// The local calendar date this transaction was created, if its server
    /// timestamp has resolved. Calendar bucketing and the same-day status
    /// rule both go through here.
    pub fn local_date(&self) -> Option<NaiveDate> {
        self.created_at
            .map(|ts| ts.with_timezone(&Local).date_naive())
    }
}

// =============================================================================
// Operator
// =============================================================================

/// The current operator identity, stamped onto new transactions.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Operator {
    pub id: String,
    pub name: String,
}

// =============================================================================
// Customer
// =============================================================================

/// A customer record, upserted at checkout when a phone number is supplied.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Customer {
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    pub phone: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
