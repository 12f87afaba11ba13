//! # Order (Cart) Module
//!
//! The live, mutable cart for one table.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order Operations                                     │
//! │                                                                         │
//! │  Operator Action          Mutation                 Cart State Change    │
//! │  ───────────────          ────────                 ─────────────────    │
//! │                                                                         │
//! │  Tap menu item ──────────► add_menu_item() ──────► qty+1 or new row    │
//! │                                                                         │
//! │  +/- stepper ────────────► set_quantity() ───────► overwrite qty,      │
//! │                                                    <= 0 removes row    │
//! │                                                                         │
//! │  Reconcile credit ───────► merge_items() ────────► quantities summed   │
//! │                                                                         │
//! │  Clear button ───────────► (ledger removes the whole Order entry)      │
//! │                                                                         │
//! │  NOTE: The sparse-map rule (no Order entry for an empty cart) is       │
//! │        owned by the Order Ledger, which drops the table key whenever   │
//! │        a mutation leaves the cart empty.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{LineItem, MenuItem};

/// The open cart for one table.
///
/// ## Invariants
/// - Rows are unique by `menu_item_id` (adding the same item increments
///   quantity; merging sums quantities)
/// - Every stored row has `quantity >= 1`
/// - Row order is insertion order (the order items were first added)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Order {
    /// Rows in the cart.
    items: Vec<LineItem>,
}

impl Order {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Order { items: Vec::new() }
    }

    /// Creates a cart from existing rows, dropping any zero-or-negative
    /// quantity rows so the stored-state invariant holds.
    pub fn from_items(items: Vec<LineItem>) -> Self {
        Order {
            items: items.into_iter().filter(|i| i.quantity > 0).collect(),
        }
    }

    /// Adds one unit of a menu item.
    ///
    /// ## Behavior
    /// - If the item is already in the cart: increments its quantity by 1
    /// - Otherwise: appends a new row with quantity 1
    pub fn add_menu_item(&mut self, item: &MenuItem) {
        if let Some(row) = self.items.iter_mut().find(|i| i.menu_item_id == item.id) {
            row.quantity += 1;
            return;
        }

        self.items.push(LineItem::from_menu_item(item, 1));
    }

    /// Overwrites a row's quantity.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: removes the row entirely
    /// - Otherwise: overwrites the quantity
    /// - Unknown item id: no-op
    pub fn set_quantity(&mut self, menu_item_id: u32, quantity: i64) {
        if quantity <= 0 {
            self.items.retain(|i| i.menu_item_id != menu_item_id);
            return;
        }

        if let Some(row) = self
            .items
            .iter_mut()
            .find(|i| i.menu_item_id == menu_item_id)
        {
            row.quantity = quantity;
        }
    }

    /// Merges incoming rows into the cart.
    ///
    /// For each incoming row: if a row with the same item id exists,
    /// quantities are summed (never replaced); otherwise the row is
    /// appended. Incoming rows are copied, so the source collection is
    /// never aliased by the cart. Used when a credit record is reconciled
    /// back into a table.
    pub fn merge_items(&mut self, incoming: &[LineItem]) {
        for new_row in incoming {
            if new_row.quantity <= 0 {
                continue;
            }
            match self
                .items
                .iter_mut()
                .find(|i| i.menu_item_id == new_row.menu_item_id)
            {
                Some(row) => row.quantity += new_row.quantity,
                None => self.items.push(new_row.clone()),
            }
        }
    }

    /// Returns the rows for reading.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Returns a deep copy of the rows, for freezing into a
    /// `CreditRecord` or `SettledTransaction` snapshot.
    pub fn snapshot(&self) -> Vec<LineItem> {
        self.items.clone()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of distinct rows.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity across all rows.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Calculates the pre-tax subtotal.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(|i| i.line_total()).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
