//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    Rs.80.00 is stored as 8000 paise. Sums never accumulate rounding    │
//! │    error because there is nothing to round until a tax or display      │
//! │    boundary, and that rounding happens exactly once.                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use suvidha_core::money::Money;
//!
//! // Create from paise (preferred)
//! let price = Money::from_paise(4000); // Rs.40.00
//!
//! // Arithmetic operations
//! let doubled = price * 2;                        // Rs.80.00
//! let total = price + Money::from_paise(500);     // Rs.45.00
//!
//! // NEVER do this:
//! // let bad = Money::from_float(40.0); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in paise (the smallest rupee unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for corrections and deltas
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support; persisted as a plain integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use suvidha_core::money::Money;
    ///
    /// let price = Money::from_paise(4050); // Represents Rs.40.50
    /// assert_eq!(price.paise(), 4050);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// Menu prices are whole-rupee amounts, so this is the usual
    /// constructor for catalog data.
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates tax on this amount, rounding half-up to whole paise.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`. The +5000 provides
    /// the rounding (5000/10000 = 0.5). i128 intermediates prevent overflow
    /// on large amounts.
    ///
    /// ## Example
    /// ```rust
    /// use suvidha_core::money::Money;
    /// use suvidha_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_paise(8000); // Rs.80.00
    /// let rate = TaxRate::from_bps(500);      // 5% GST
    ///
    /// let tax = subtotal.calculate_tax(rate);
    /// assert_eq!(tax.paise(), 400); // Rs.4.00
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        let tax_paise = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_paise(tax_paise as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use suvidha_core::money::Money;
    ///
    /// let unit_price = Money::from_paise(4000); // Rs.40.00
    /// let line_total = unit_price.multiply_quantity(2);
    /// assert_eq!(line_total.paise(), 8000); // Rs.80.00
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Renders the value as a plain two-decimal string, e.g. `84.00`.
    ///
    /// Used wherever a bare decimal amount is required (UPI links, CSV
    /// export). `Display` adds the `Rs.` prefix for human-facing text.
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money the way receipts do: `Rs.84.00`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rs.{}", self.to_decimal_string())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Sum of an iterator of Money values.
impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
