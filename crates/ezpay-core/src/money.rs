//! # Money Module
//!
//! Monetary values as integer minor units (paise for INR, cents for USD).
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In JavaScript/floating point:                                      │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                       │
//! │                                                                     │
//! │  OUR SOLUTION: Integer Minor Units                                  │
//! │    ₹527.00 is stored as 52700; 18% of it is exactly 9486.           │
//! │    The bill invariant `subtotal + tax == total` holds exactly,      │
//! │    and display rounding happens once, in `format_amount`.           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use ezpay_core::money::{Money, TaxRate};
//!
//! let price = Money::from_minor(19900); // ₹199.00
//! let tax = price.tax(TaxRate::from_bps(1800)); // 18% GST
//! assert_eq!(tax.minor(), 3582);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::LineItem;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: refunds subtract from rollups, so negatives are legal
/// - **Single-field tuple struct**: zero-cost abstraction over i64
/// - **No float constructor**: amounts enter the system as minor units only
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is −5.50, not −4.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the major-unit portion (rupees/dollars).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor-unit portion, always 0–99.
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Tax on this amount at the given rate, rounded half-up to the nearest
    /// minor unit.
    ///
    /// Integer math throughout: `(minor × bps + 5000) / 10000`, computed in
    /// i128 so large bills cannot overflow.
    ///
    /// ```rust
    /// use ezpay_core::money::{Money, TaxRate};
    ///
    /// // ₹527.00 at 18% GST = ₹94.86 exactly
    /// let subtotal = Money::from_minor(52700);
    /// assert_eq!(subtotal.tax(TaxRate::from_bps(1800)).minor(), 9486);
    /// ```
    pub fn tax(&self, rate: TaxRate) -> Money {
        let tax_minor = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_minor(tax_minor as i64)
    }

    /// Multiplies by a line quantity.
    #[inline]
    pub const fn times(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Display shows the bare amount with two decimals, no currency symbol.
///
/// The thermal receipt's item columns are symbol-free; anything that needs
/// a symbol goes through [`format_amount`].
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate in basis points (1 bps = 0.01%).
///
/// 1800 bps = 18% (standard GST); 825 bps = 8.25%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage.
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Percentage rendered without trailing zeros: "18", "8.25", "2.5".
    pub fn percent_label(&self) -> String {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            format!("{whole}")
        } else if frac % 10 == 0 {
            format!("{whole}.{}", frac / 10)
        } else {
            format!("{whole}.{frac:02}")
        }
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

// =============================================================================
// Bill Totals
// =============================================================================

/// Subtotal, tax, and grand total of a bill.
///
/// Invariant: `subtotal + tax == total` exactly (integer minor units).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BillTotals {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

/// Computes subtotal, tax, and total for a list of line items.
///
/// `subtotal = Σ unit_price × quantity`; tax is applied to the subtotal in
/// one step, not per line, so the rounding error is at most half a minor
/// unit for the whole bill.
pub fn compute_totals(items: &[LineItem], rate: TaxRate) -> BillTotals {
    let subtotal: Money = items.iter().map(|i| i.line_total()).sum();
    let tax = subtotal.tax(rate);
    BillTotals {
        subtotal,
        tax,
        total: subtotal + tax,
    }
}

/// Change due on a cash payment: `max(0, received − total)`.
///
/// Rejecting `received < total` is the caller's precondition, enforced in
/// the checkout path before this is consulted.
pub fn compute_change(cash_received: Money, total: Money) -> Money {
    if cash_received > total {
        cash_received - total
    } else {
        Money::zero()
    }
}

/// The one shared display formatter: two decimals, optional currency prefix.
///
/// Both receipt renderers go through this so the symbol and rounding cannot
/// drift between them.
pub fn format_amount(amount: Money, symbol: &str) -> String {
    let sign = if amount.is_negative() { "-" } else { "" };
    format!(
        "{sign}{symbol}{}.{:02}",
        amount.major().abs(),
        amount.minor_part()
    )
}

// =============================================================================
// Unit Tests
// =============================================================================
