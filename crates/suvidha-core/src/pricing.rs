//! # Pricing Engine
//!
//! The single source of truth for subtotal, tax, and grand total.
//!
//! ## Why One Function?
//! The source system recomputed totals at several call sites (bill panel,
//! receipt, settlement path), which makes it possible for the displayed
//! total and the persisted total to drift. Here every caller - display,
//! settlement, deferral, export - goes through [`compute_totals`], and the
//! orchestrator calls it again at the moment of settlement so a stale
//! display value can never be persisted.
//!
//! ## Rounding
//! Line totals and the subtotal are exact integer paise, so there is no
//! mid-sum rounding at all. Tax is rounded half-up to whole paise exactly
//! once, on the subtotal.

use crate::money::Money;
use crate::types::{BillTotals, LineItem, TaxRate};

/// Computes subtotal, tax, and grand total for a set of line items.
///
/// An empty item list yields all-zero totals; that is a valid, displayable
/// state (an empty bill panel), not an error.
///
/// ## Example
/// ```rust
/// use suvidha_core::pricing::compute_totals;
/// use suvidha_core::types::{LineItem, MenuItem, TaxRate};
///
/// let pohe = MenuItem {
///     id: 5,
///     name: "Pohe".into(),
///     price_paise: 4000,
///     category: "Nashta (Breakfast)".into(),
/// };
/// let items = vec![LineItem::from_menu_item(&pohe, 2)];
///
/// let totals = compute_totals(&items, TaxRate::from_bps(500));
/// assert_eq!(totals.subtotal_paise, 8000); // Rs.80.00
/// assert_eq!(totals.tax_paise, 400);       // Rs.4.00
/// assert_eq!(totals.total_paise, 8400);    // Rs.84.00
/// ```
pub fn compute_totals(items: &[LineItem], rate: TaxRate) -> BillTotals {
    let subtotal: Money = items.iter().map(|i| i.line_total()).sum();
    let tax = subtotal.calculate_tax(rate);
    let total = subtotal + tax;

    BillTotals {
        subtotal_paise: subtotal.paise(),
        tax_paise: tax.paise(),
        total_paise: total.paise(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MenuItem;

    fn line(id: u32, price_paise: i64, qty: i64) -> LineItem {
        let item = MenuItem {
            id,
            name: format!("Item {}", id),
            price_paise,
            category: "Test".to_string(),
        };
        LineItem::from_menu_item(&item, qty)
    }

    #[test]
    fn test_empty_items_yield_zero_totals() {
        let totals = compute_totals(&[], TaxRate::from_bps(500));
        assert_eq!(totals, BillTotals::default());
    }

    #[test]
    fn test_two_pohe_at_five_percent() {
        // 2 x Rs.40.00 = Rs.80.00, GST Rs.4.00, total Rs.84.00
        let totals = compute_totals(&[line(5, 4000, 2)], TaxRate::from_bps(500));
        assert_eq!(totals.subtotal_paise, 8000);
        assert_eq!(totals.tax_paise, 400);
        assert_eq!(totals.total_paise, 8400);
    }

    #[test]
    fn test_tax_rounds_once_on_subtotal_not_per_line() {
        // Two rows of Rs.10.50: per-line tax would be 52.5 -> 53 paise
        // each (106 total); taxing the subtotal gives the correct 105.
        let items = [line(1, 1050, 1), line(2, 1050, 1)];
        let totals = compute_totals(&items, TaxRate::from_bps(500));
        assert_eq!(totals.subtotal_paise, 2100);
        assert_eq!(totals.tax_paise, 105);
        assert_eq!(totals.total_paise, 2205);
    }

    #[test]
    fn test_zero_rate() {
        let totals = compute_totals(&[line(1, 4000, 3)], TaxRate::zero());
        assert_eq!(totals.subtotal_paise, 12000);
        assert_eq!(totals.tax_paise, 0);
        assert_eq!(totals.total_paise, 12000);
    }

    #[test]
    fn test_totals_always_reconcile() {
        let items = [line(1, 3333, 3), line(2, 15, 7), line(3, 19999, 1)];
        let totals = compute_totals(&items, TaxRate::default());
        assert_eq!(
            totals.total_paise,
            totals.subtotal_paise + totals.tax_paise
        );
    }
}
