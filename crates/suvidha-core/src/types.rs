//! # Domain Types
//!
//! Core domain types used throughout Suvidha POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌──────────────────┐     │
//! │  │    MenuItem     │   │    LineItem      │   │   CreditRecord   │     │
//! │  │  ─────────────  │   │  ──────────────  │   │  ──────────────  │     │
//! │  │  id (u32)       │──►│  menu_item_id    │──►│  items (frozen)  │     │
//! │  │  name           │   │  name (frozen)   │   │  customer_name   │     │
//! │  │  price_paise    │   │  unit_price      │   │  status          │     │
//! │  │  category       │   │  quantity        │   └──────────────────┘     │
//! │  └─────────────────┘   └──────────────────┘   ┌──────────────────┐     │
//! │                                               │SettledTransaction│     │
//! │  ┌─────────────────┐   ┌──────────────────┐   │  ──────────────  │     │
//! │  │    TaxRate      │   │  PaymentMethod   │──►│  items (frozen)  │     │
//! │  │  bps (u32)      │   │  Cash | Online   │   │  table, method   │     │
//! │  │  500 = 5%       │   └──────────────────┘   └──────────────────┘     │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Rule
//! `CreditRecord` and `SettledTransaction` ALWAYS store frozen copies of
//! their line items, taken at creation. The live, mutable cart lives only
//! in [`crate::order::Order`]. Reconciling a credit back into a table
//! merges a copy; the record's own items never change after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;
use crate::{DEFAULT_TAX_RATE_BPS, PARCEL_TABLE};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 500 bps = 5% (the flat GST rate on restaurant bills)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// The default rate is the restaurant's flat 5% GST, not zero: every
/// computed bill is taxed unless a caller explicitly opts out.
impl Default for TaxRate {
    fn default() -> Self {
        TaxRate(DEFAULT_TAX_RATE_BPS)
    }
}

// =============================================================================
// Menu Item
// =============================================================================

/// An entry in the menu catalog.
///
/// Reference data: loaded once, never mutated by the billing state machine.
/// Carts and historical records copy the fields they need (snapshot rule).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Catalog identifier.
    pub id: u32,

    /// Display name shown on the bill.
    pub name: String,

    /// Price in paise.
    pub price_paise: i64,

    /// Menu section, e.g. "Nashta (Breakfast)".
    pub category: String,
}

impl MenuItem {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_paise(self.price_paise)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One priced row in a cart or a historical snapshot.
///
/// Name and unit price are frozen at the moment the item is added, so a
/// later menu price change never rewrites an open cart or an old bill.
///
/// Invariant: `quantity >= 1` in any stored state. A quantity of zero or
/// less means "remove the row" and is handled by the mutation that would
/// have produced it; it is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Catalog id of the menu item this row was created from.
    pub menu_item_id: u32,

    /// Item name at time of adding (frozen).
    pub name: String,

    /// Unit price in paise at time of adding (frozen).
    pub unit_price_paise: i64,

    /// Quantity ordered.
    pub quantity: i64,
}

impl LineItem {
    /// Creates a line item from a catalog entry.
    pub fn from_menu_item(item: &MenuItem, quantity: i64) -> Self {
        LineItem {
            menu_item_id: item.id,
            name: item.name.clone(),
            unit_price_paise: item.price_paise,
            quantity,
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_paise(self.unit_price_paise)
    }

    /// Returns the line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a settled bill was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// UPI payment via the QR deep link.
    Online,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "Cash"),
            PaymentMethod::Online => write!(f, "Online"),
        }
    }
}

// =============================================================================
// Credit (Udhari) Record
// =============================================================================

/// Lifecycle state of a credit record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditStatus {
    /// Amount is still owed.
    Active,
    /// Paid off, either by reconciling into a new bill or manually.
    Settled,
}

/// A deferred-payment (Udhari) bill.
///
/// Created when an open order is deferred instead of settled. Never
/// deleted; settling flips `status` and the record stays as history.
/// `items` and `total_paise` are a point-in-time snapshot and are
/// immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditRecord {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Who owes the amount. Never blank.
    pub customer_name: String,

    /// Frozen line items from the deferred order.
    pub items: Vec<LineItem>,

    /// Taxed grand total owed, in paise.
    pub total_paise: i64,

    /// When the order was deferred.
    pub created_at: DateTime<Utc>,

    /// Free-text note, editable at any time.
    pub notes: Option<String>,

    /// Active until reconciled or manually settled.
    pub status: CreditStatus,
}

impl CreditRecord {
    /// Returns the owed total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_paise(self.total_paise)
    }

    /// Checks whether the amount is still owed.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == CreditStatus::Active
    }
}

// =============================================================================
// Settled Transaction
// =============================================================================

/// A finalized, paid bill.
///
/// Created exactly once per successful settlement; immutable and permanent
/// thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettledTransaction {
    /// Unique identifier (UUID v4). Doubles as the printed bill number.
    pub id: String,

    /// Frozen line items from the settled order.
    pub items: Vec<LineItem>,

    /// Taxed grand total collected, in paise.
    pub total_paise: i64,

    /// Table the order originated from ("1".."8" or "Parcel").
    pub table: String,

    /// How the bill was paid.
    pub payment_method: PaymentMethod,

    /// When the bill was settled.
    pub settled_at: DateTime<Utc>,
}

impl SettledTransaction {
    /// Returns the collected total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_paise(self.total_paise)
    }
}

// =============================================================================
// Note
// =============================================================================

/// A free-form scratchpad entry, decoupled from any bill.
///
/// Not part of the billing state machine; shares the persistence
/// lifecycle so the operator's notes survive restarts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Note body.
    pub content: String,

    /// When the note was created.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Bill Totals
// =============================================================================

/// Subtotal, tax, and grand total for a set of line items.
///
/// Produced only by [`crate::pricing::compute_totals`] so displayed and
/// persisted amounts can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BillTotals {
    pub subtotal_paise: i64,
    pub tax_paise: i64,
    pub total_paise: i64,
}

impl BillTotals {
    /// Returns the pre-tax subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_paise(self.subtotal_paise)
    }

    /// Returns the tax amount as Money.
    #[inline]
    pub fn tax(&self) -> Money {
        Money::from_paise(self.tax_paise)
    }

    /// Returns the grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_paise(self.total_paise)
    }
}

// =============================================================================
// Table Labels
// =============================================================================

/// Human-facing label for a table id: "Table 3", or "Parcel" for takeaway.
pub fn table_label(table: &str) -> String {
    if table == PARCEL_TABLE {
        PARCEL_TABLE.to_string()
    } else {
        format!("Table {}", table)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_menu_item() -> MenuItem {
        MenuItem {
            id: 5,
            name: "Sheera".to_string(),
            price_paise: 5000,
            category: "Nashta (Breakfast)".to_string(),
        }
    }

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(500);
        assert_eq!(rate.bps(), 500);
        assert!((rate.percentage() - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        assert_eq!(TaxRate::from_percentage(5.0).bps(), 500);
    }

    #[test]
    fn test_tax_rate_default_is_gst() {
        assert_eq!(TaxRate::default().bps(), 500);
        assert!(!TaxRate::default().is_zero());
    }

    #[test]
    fn test_line_item_freezes_menu_data() {
        let mut item = sample_menu_item();
        let line = LineItem::from_menu_item(&item, 2);

        // Later catalog changes must not affect the captured row.
        item.price_paise = 9999;
        assert_eq!(line.unit_price_paise, 5000);
        assert_eq!(line.line_total().paise(), 10000);
    }

    #[test]
    fn test_payment_method_display() {
        assert_eq!(PaymentMethod::Cash.to_string(), "Cash");
        assert_eq!(PaymentMethod::Online.to_string(), "Online");
    }

    #[test]
    fn test_credit_status_persisted_spelling() {
        // The stored collections use lowercase status strings.
        assert_eq!(
            serde_json::to_string(&CreditStatus::Active).unwrap(),
            "\"active\""
        );
        assert_eq!(
            serde_json::to_string(&CreditStatus::Settled).unwrap(),
            "\"settled\""
        );
    }

    #[test]
    fn test_table_label() {
        assert_eq!(table_label("3"), "Table 3");
        assert_eq!(table_label("Parcel"), "Parcel");
    }
}
