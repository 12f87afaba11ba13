//! # Order Ledger
//!
//! The sparse mapping from table id to its open cart.
//!
//! ## Sparse-Map Invariant
//! A table key exists iff its cart is non-empty. Every mutation that can
//! empty a cart removes the key in the same call, so "has an entry" and
//! "has an open bill" are always the same question.

use std::collections::BTreeMap;

use suvidha_core::types::{LineItem, MenuItem};
use suvidha_core::Order;

/// All open carts, keyed by table id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderLedger {
    orders: BTreeMap<String, Order>,
}

impl OrderLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the ledger from a persisted map, dropping any empty carts
    /// so the sparse-map invariant holds even for hand-edited data.
    pub fn from_map(orders: BTreeMap<String, Order>) -> Self {
        OrderLedger {
            orders: orders.into_iter().filter(|(_, o)| !o.is_empty()).collect(),
        }
    }

    /// The raw map, for persistence.
    pub fn as_map(&self) -> &BTreeMap<String, Order> {
        &self.orders
    }

    /// Returns a defensive copy of one table's cart.
    pub fn order_for(&self, table: &str) -> Option<Order> {
        self.orders.get(table).cloned()
    }

    /// Checks whether a table has an open cart.
    pub fn has_order(&self, table: &str) -> bool {
        self.orders.contains_key(table)
    }

    /// Tables that currently have an open cart.
    pub fn active_tables(&self) -> Vec<String> {
        self.orders.keys().cloned().collect()
    }

    /// Adds one unit of a menu item, creating the cart entry if absent.
    pub fn add_item(&mut self, table: &str, item: &MenuItem) {
        self.orders
            .entry(table.to_string())
            .or_default()
            .add_menu_item(item);
    }

    /// Overwrites a row's quantity (`<= 0` removes the row). If the cart
    /// ends up empty, the table key is removed.
    pub fn set_quantity(&mut self, table: &str, menu_item_id: u32, quantity: i64) {
        let Some(order) = self.orders.get_mut(table) else {
            return;
        };
        order.set_quantity(menu_item_id, quantity);
        if order.is_empty() {
            self.orders.remove(table);
        }
    }

    /// Unconditionally removes the table's cart (no-op if absent).
    pub fn clear(&mut self, table: &str) {
        self.orders.remove(table);
    }

    /// Merges rows into the table's cart as one update, creating the
    /// entry if absent. Rows with non-positive quantities are skipped, and
    /// an all-skipped merge does not create an empty entry.
    pub fn merge_items(&mut self, table: &str, incoming: &[LineItem]) {
        if !incoming.iter().any(|i| i.quantity > 0) {
            return;
        }
        self.orders
            .entry(table.to_string())
            .or_default()
            .merge_items(incoming);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
