//! # Sales Aggregation Engine
//!
//! Pure rollups over a transaction snapshot. One call produces the whole
//! report bundle the admin screens consume.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Sales Aggregation                               │
//! │                                                                     │
//! │  Transaction snapshot (read-only)                                   │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  aggregate(transactions, sections, options)   ← one pass            │
//! │       │                                                             │
//! │       ├──► daily series (7 or 30 slots)  + status counts            │
//! │       ├──► monthly series (12 slots)                                │
//! │       ├──► top items / sales by section  (whole history)            │
//! │       └──► method / employee / table     (window-scoped)            │
//! │                                                                     │
//! │  Same snapshot in → same report out. No clock reads, no I/O.        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Status Semantics
//! - `completed` adds its total to revenue buckets
//! - `refunded` subtracts its total (a day can go negative)
//! - `cancelled` contributes zero revenue but is counted in the status
//!   breakdown
//!
//! A record whose server timestamp has not resolved is excluded from every
//! bucket: counted in [`SalesReport::skipped`] and logged, never fatal.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{MenuSection, PaymentMethod, Transaction, TransactionStatus};

// =============================================================================
// Constants
// =============================================================================

/// How many entries the top-items / employee / table leaderboards keep.
pub const TOP_N: usize = 5;

/// Label used for line items that never had a section.
pub const NO_SECTION_LABEL: &str = "Other";

/// Label used when a section id cannot be resolved against the lookup.
pub const UNKNOWN_SECTION_LABEL: &str = "Unknown Category";

const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// =============================================================================
// Report Options
// =============================================================================

/// The trailing daily window: last 7 or last 30 calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ReportRange {
    #[serde(rename = "7days")]
    Seven,
    #[serde(rename = "30days")]
    Thirty,
}

impl ReportRange {
    /// Window length in days.
    pub const fn days(&self) -> i64 {
        match self {
            ReportRange::Seven => 7,
            ReportRange::Thirty => 30,
        }
    }
}

/// Inputs that pin the report to a point in time.
///
/// `today` is the caller's local calendar date. Passing it in (instead of
/// reading a clock here) keeps the engine a pure function of its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub range: ReportRange,
    pub today: NaiveDate,
}

// =============================================================================
// Report Rows
// =============================================================================

/// One slot of the daily revenue series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DayBucket {
    /// Weekday label: fixed Mon–Sun for the 7-day view, the slot date's
    /// weekday abbreviation for the 30-day view.
    pub label: String,
    pub revenue: Money,
}

/// Per-slot status counts, aligned to the daily series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StatusBucket {
    pub label: String,
    pub completed: u32,
    pub refunded: u32,
    pub cancelled: u32,
}

/// One slot of the 12-month revenue series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MonthBucket {
    /// Month abbreviation ("Jan"). Oldest first; the current month is last.
    pub label: String,
    pub revenue: Money,
}

/// A top-selling item row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ItemSales {
    pub name: String,
    pub quantity: i64,
    pub revenue: Money,
}

/// Revenue and units grouped by menu section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SectionSales {
    pub name: String,
    pub quantity: i64,
    pub revenue: Money,
}

/// Window revenue for one payment method. Every method is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MethodSales {
    pub method: PaymentMethod,
    pub revenue: Money,
}

/// Window revenue and order count for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct EmployeeSales {
    pub name: String,
    pub orders: u32,
    pub revenue: Money,
}

/// Window revenue for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TableSales {
    pub table: String,
    pub revenue: Money,
}

/// The full report bundle. Derived on demand; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SalesReport {
    pub daily: Vec<DayBucket>,
    pub status_by_day: Vec<StatusBucket>,
    pub monthly: Vec<MonthBucket>,
    pub top_items: Vec<ItemSales>,
    pub by_section: Vec<SectionSales>,
    pub by_payment_method: Vec<MethodSales>,
    pub by_employee: Vec<EmployeeSales>,
    pub by_table: Vec<TableSales>,
    /// Records excluded for a missing/unresolved timestamp.
    pub skipped: usize,
}

// =============================================================================
// Aggregation
// =============================================================================

/// Months since year zero; lets month distance be plain subtraction.
fn month_ordinal(date: NaiveDate) -> i64 {
    date.year() as i64 * 12 + date.month0() as i64
}

/// Computes every rollup in a single pass over the snapshot.
///
/// Window rule: a day `d` is in range iff `today − (days−1) ≤ d ≤ today`.
/// Leaderboard ties keep first-seen input order (stable sort).
pub fn aggregate(
    transactions: &[Transaction],
    sections: &[MenuSection],
    opts: &ReportOptions,
) -> SalesReport {
    let today = opts.today;
    let window_start = today - Duration::days(opts.range.days() - 1);
    let slot_count = opts.range.days() as usize;
    let current_month = month_ordinal(today);

    let section_names: HashMap<&str, &str> = sections
        .iter()
        .map(|s| (s.id.as_str(), s.name.as_str()))
        .collect();

    let mut daily = vec![Money::zero(); slot_count];
    let mut status = vec![(0u32, 0u32, 0u32); slot_count];
    let mut monthly = vec![Money::zero(); 12];

    // leaderboards keep first-seen order; the maps only index into the vecs
    let mut items: Vec<ItemSales> = Vec::new();
    let mut item_index: HashMap<String, usize> = HashMap::new();
    let mut section_rows: Vec<SectionSales> = Vec::new();
    let mut section_index: HashMap<String, usize> = HashMap::new();
    let mut employees: Vec<EmployeeSales> = Vec::new();
    let mut employee_index: HashMap<String, usize> = HashMap::new();
    let mut tables: Vec<TableSales> = Vec::new();
    let mut table_index: HashMap<String, usize> = HashMap::new();

    let mut method_revenue = [Money::zero(); 3];
    let mut skipped = 0usize;

    for tx in transactions {
        let Some(date) = tx.local_date() else {
            warn!(
                transaction_id = %tx.id,
                "skipping transaction with unresolved timestamp"
            );
            skipped += 1;
            continue;
        };

        let in_window = date >= window_start && date <= today;

        // ---- daily series + status breakdown ----
        if in_window {
            let slot = match opts.range {
                ReportRange::Seven => date.weekday().num_days_from_monday() as usize,
                ReportRange::Thirty => (date - window_start).num_days() as usize,
            };
            match tx.status {
                TransactionStatus::Completed => {
                    daily[slot] += tx.total();
                    status[slot].0 += 1;
                }
                TransactionStatus::Refunded => {
                    daily[slot] -= tx.total();
                    status[slot].1 += 1;
                }
                TransactionStatus::Cancelled => {
                    status[slot].2 += 1;
                }
            }
        }

        // ---- monthly series (independent of the daily range) ----
        let months_back = current_month - month_ordinal(date);
        if (0..12).contains(&months_back) {
            let slot = (11 - months_back) as usize;
            match tx.status {
                TransactionStatus::Completed => monthly[slot] += tx.total(),
                TransactionStatus::Refunded => monthly[slot] -= tx.total(),
                TransactionStatus::Cancelled => {}
            }
        }

        if !tx.is_completed() {
            continue;
        }

        // ---- whole-history item and section rollups ----
        for line in &tx.items {
            let revenue = line.line_total();

            let idx = *item_index.entry(line.name.clone()).or_insert_with(|| {
                items.push(ItemSales {
                    name: line.name.clone(),
                    quantity: 0,
                    revenue: Money::zero(),
                });
                items.len() - 1
            });
            items[idx].quantity += line.quantity;
            items[idx].revenue += revenue;

            let section_name = match line.section_id.as_deref() {
                None => NO_SECTION_LABEL,
                Some(id) => section_names
                    .get(id)
                    .copied()
                    .unwrap_or(UNKNOWN_SECTION_LABEL),
            };
            let idx = *section_index
                .entry(section_name.to_string())
                .or_insert_with(|| {
                    section_rows.push(SectionSales {
                        name: section_name.to_string(),
                        quantity: 0,
                        revenue: Money::zero(),
                    });
                    section_rows.len() - 1
                });
            section_rows[idx].quantity += line.quantity;
            section_rows[idx].revenue += revenue;
        }

        // ---- window-scoped method / employee / table rollups ----
        if !in_window {
            continue;
        }

        let method_slot = PaymentMethod::ALL
            .iter()
            .position(|m| *m == tx.payment_method)
            .unwrap_or(2);
        method_revenue[method_slot] += tx.total();

        let idx = *employee_index
            .entry(tx.employee_name.clone())
            .or_insert_with(|| {
                employees.push(EmployeeSales {
                    name: tx.employee_name.clone(),
                    orders: 0,
                    revenue: Money::zero(),
                });
                employees.len() - 1
            });
        employees[idx].orders += 1;
        employees[idx].revenue += tx.total();

        if let Some(table) = tx.table_number.as_deref().filter(|t| !t.is_empty()) {
            let idx = *table_index.entry(table.to_string()).or_insert_with(|| {
                tables.push(TableSales {
                    table: table.to_string(),
                    revenue: Money::zero(),
                });
                tables.len() - 1
            });
            tables[idx].revenue += tx.total();
        }
    }

    // canonical sort: revenue descending, ties keep first-seen order
    items.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    items.truncate(TOP_N);
    employees.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    employees.truncate(TOP_N);
    tables.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    tables.truncate(TOP_N);

    SalesReport {
        daily: day_labels(opts)
            .into_iter()
            .zip(daily)
            .map(|(label, revenue)| DayBucket { label, revenue })
            .collect(),
        status_by_day: day_labels(opts)
            .into_iter()
            .zip(status)
            .map(|(label, (completed, refunded, cancelled))| StatusBucket {
                label,
                completed,
                refunded,
                cancelled,
            })
            .collect(),
        monthly: (0..12i64)
            .map(|i| {
                let month0 = (today.month0() as i64 - (11 - i)).rem_euclid(12) as usize;
                MonthBucket {
                    label: MONTH_LABELS[month0].to_string(),
                    revenue: monthly[i as usize],
                }
            })
            .collect(),
        top_items: items,
        by_section: section_rows,
        by_payment_method: PaymentMethod::ALL
            .iter()
            .zip(method_revenue)
            .map(|(method, revenue)| MethodSales {
                method: *method,
                revenue,
            })
            .collect(),
        by_employee: employees,
        by_table: tables,
        skipped,
    }
}

/// Slot labels for the daily series.
///
/// 7-day view: the fixed Mon–Sun grid (each trailing-window day occupies
/// its weekday slot exactly once). 30-day view: one slot per calendar day,
/// oldest first, labelled with that day's weekday abbreviation.
fn day_labels(opts: &ReportOptions) -> Vec<String> {
    match opts.range {
        ReportRange::Seven => WEEKDAY_LABELS.iter().map(|l| l.to_string()).collect(),
        ReportRange::Thirty => (0..30)
            .map(|i| {
                let date = opts.today - Duration::days(29 - i);
                WEEKDAY_LABELS[date.weekday().num_days_from_monday() as usize].to_string()
            })
            .collect(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
