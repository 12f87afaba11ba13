//! # Billing Orchestrator
//!
//! The control component and SOLE mutator of all ledger state.
//!
//! ## Mutation Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              Every Mutation, Same Four Steps                            │
//! │                                                                         │
//! │  1. VALIDATE     reject bad input before touching anything             │
//! │  2. BUILD        clone the affected ledgers, mutate the clones         │
//! │  3. PERSIST      one store write; multi-ledger effects (settle,        │
//! │                  defer, reconcile) go through atomic_write             │
//! │  4. COMMIT       swap the clones in, broadcast change events           │
//! │                                                                         │
//! │  A failed persist returns at step 3: the in-memory ledgers were        │
//! │  never touched, so no partially-updated state is ever visible.         │
//! │  There are no optimistic updates and no retries; the operator          │
//! │  retries the action manually after a store error.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Totals are computed by the pricing engine at the moment of settlement
//! or deferral, never taken from a previously displayed value.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info};
use uuid::Uuid;

use suvidha_core::error::CoreError;
use suvidha_core::export;
use suvidha_core::money::Money;
use suvidha_core::pricing::compute_totals;
use suvidha_core::report::{self, ItemSales, TimeWindow, WindowTotals};
use suvidha_core::types::{
    BillTotals, CreditRecord, CreditStatus, MenuItem, Note, PaymentMethod, SettledTransaction,
    TaxRate,
};
use suvidha_core::upi::PayeeConfig;
use suvidha_core::validation;
use suvidha_store::{Collection, CollectionStore, CollectionWrite};

use crate::error::BillingResult;
use crate::events::{LedgerEvent, EVENT_CHANNEL_CAPACITY};
use crate::ledger::LedgerState;
use crate::receipt::Receipt;

// =============================================================================
// Configuration
// =============================================================================

/// Orchestrator configuration: the flat tax rate and the payee the UPI
/// QR collects into.
#[derive(Debug, Clone, Default)]
pub struct BillingConfig {
    /// Tax rate applied to every bill (default: 5% GST).
    pub tax_rate: TaxRate,
    /// UPI payee for payment links.
    pub payee: PayeeConfig,
}

// =============================================================================
// Orchestrator
// =============================================================================

/// The billing state machine.
///
/// Holds all ledger state behind one async mutex (the system targets a
/// single operator UI, so one logical writer at a time) and persists
/// through an injected [`CollectionStore`]; tests inject the in-memory
/// store instead of SQLite.
pub struct BillingOrchestrator {
    store: Arc<dyn CollectionStore>,
    state: Mutex<LedgerState>,
    events: broadcast::Sender<LedgerEvent>,
    config: BillingConfig,
}

impl BillingOrchestrator {
    /// Loads all collections from the store and builds the orchestrator.
    pub async fn load(
        store: Arc<dyn CollectionStore>,
        config: BillingConfig,
    ) -> BillingResult<Self> {
        let snapshot = store.load_all().await?;
        let state = LedgerState::from_snapshot(snapshot);
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        info!(
            open_tables = state.orders.active_tables().len(),
            credits = state.credits.records().len(),
            settled = state.settlements.transactions().len(),
            "Billing orchestrator loaded"
        );

        Ok(BillingOrchestrator {
            store,
            state: Mutex::new(state),
            events,
            config,
        })
    }

    /// Subscribes to ledger change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.events.subscribe()
    }

    /// The active configuration.
    pub fn config(&self) -> &BillingConfig {
        &self.config
    }

    fn emit(&self, event: LedgerEvent) {
        // No subscribers is fine; send only fails when there are none.
        let _ = self.events.send(event);
    }

    async fn persist_orders(&self, next: &crate::ledger::OrderLedger) -> BillingResult<()> {
        self.store
            .save_collection(CollectionWrite::new(Collection::Orders, next.as_map())?)
            .await?;
        Ok(())
    }

    // =========================================================================
    // Cart Operations
    // =========================================================================

    /// Adds one unit of a menu item to a table's cart, creating the cart
    /// if the table was empty (the EMPTY → OPEN transition).
    pub async fn add_item(&self, table: &str, item: &MenuItem) -> BillingResult<()> {
        validation::validate_table_id(table).map_err(CoreError::from)?;

        let mut state = self.state.lock().await;
        let mut next = state.orders.clone();
        next.add_item(table, item);

        self.persist_orders(&next).await?;
        state.orders = next;
        drop(state);

        self.emit(LedgerEvent::OrdersChanged);
        debug!(table = %table, item = %item.name, "Item added");
        Ok(())
    }

    /// Overwrites a row's quantity. `quantity <= 0` removes the row, and
    /// removing the last row removes the table's cart entirely.
    pub async fn set_quantity(
        &self,
        table: &str,
        menu_item_id: u32,
        quantity: i64,
    ) -> BillingResult<()> {
        validation::validate_table_id(table).map_err(CoreError::from)?;
        if quantity > 0 {
            validation::validate_quantity(quantity).map_err(CoreError::from)?;
        }

        let mut state = self.state.lock().await;
        let mut next = state.orders.clone();
        next.set_quantity(table, menu_item_id, quantity);

        if next == state.orders {
            return Ok(());
        }

        self.persist_orders(&next).await?;
        state.orders = next;
        drop(state);

        self.emit(LedgerEvent::OrdersChanged);
        Ok(())
    }

    /// Unconditionally clears a table's cart (the OPEN → EMPTY bail-out).
    pub async fn clear_table(&self, table: &str) -> BillingResult<()> {
        let mut state = self.state.lock().await;
        if !state.orders.has_order(table) {
            return Ok(());
        }

        let mut next = state.orders.clone();
        next.clear(table);

        self.persist_orders(&next).await?;
        state.orders = next;
        drop(state);

        self.emit(LedgerEvent::OrdersChanged);
        info!(table = %table, "Bill cleared");
        Ok(())
    }

    // =========================================================================
    // Terminal Transitions: Settle and Defer
    // =========================================================================

    /// Settles a table's bill as paid: computes totals from the cart as it
    /// is right now, records one immutable transaction, and clears the
    /// table - both persisted in one transaction.
    ///
    /// Rejected with an "empty bill" error when the table has no open
    /// order; nothing is mutated in that case.
    pub async fn settle(
        &self,
        table: &str,
        method: PaymentMethod,
    ) -> BillingResult<SettledTransaction> {
        validation::validate_table_id(table).map_err(CoreError::from)?;

        let mut state = self.state.lock().await;
        let order = state.orders.order_for(table).ok_or_else(|| CoreError::EmptyBill {
            table: table.to_string(),
        })?;

        let totals = compute_totals(order.items(), self.config.tax_rate);
        let transaction = SettledTransaction {
            id: Uuid::new_v4().to_string(),
            items: order.snapshot(),
            total_paise: totals.total_paise,
            table: table.to_string(),
            payment_method: method,
            settled_at: Utc::now(),
        };

        let mut next_orders = state.orders.clone();
        next_orders.clear(table);
        let mut next_settlements = state.settlements.clone();
        next_settlements.push(transaction.clone());

        self.store
            .atomic_write(vec![
                CollectionWrite::new(Collection::Orders, next_orders.as_map())?,
                CollectionWrite::new(
                    Collection::SettledTransactions,
                    &next_settlements.transactions(),
                )?,
            ])
            .await?;

        state.orders = next_orders;
        state.settlements = next_settlements;
        drop(state);

        self.emit(LedgerEvent::OrdersChanged);
        self.emit(LedgerEvent::SettlementsChanged);
        info!(
            table = %table,
            id = %transaction.id,
            total = %transaction.total(),
            method = %method,
            "Bill settled"
        );
        Ok(transaction)
    }

    /// Defers a table's bill to the Udhari ledger: creates one active
    /// credit record snapshotting the cart and clears the table - both
    /// persisted in one transaction.
    ///
    /// Rejected when the cart is empty ("empty bill") or the customer
    /// name is blank ("customer name required"); the table stays OPEN and
    /// nothing is mutated in either case.
    pub async fn defer(&self, table: &str, customer_name: &str) -> BillingResult<CreditRecord> {
        validation::validate_table_id(table).map_err(CoreError::from)?;

        let mut state = self.state.lock().await;
        let order = state.orders.order_for(table).ok_or_else(|| CoreError::EmptyBill {
            table: table.to_string(),
        })?;

        let customer = match validation::validate_customer_name(customer_name) {
            Ok(name) => name,
            Err(suvidha_core::ValidationError::Required { .. }) => {
                return Err(CoreError::CustomerNameRequired.into());
            }
            Err(e) => return Err(CoreError::from(e).into()),
        };

        let totals = compute_totals(order.items(), self.config.tax_rate);
        let record = CreditRecord {
            id: Uuid::new_v4().to_string(),
            customer_name: customer,
            items: order.snapshot(),
            total_paise: totals.total_paise,
            created_at: Utc::now(),
            notes: None,
            status: CreditStatus::Active,
        };

        let mut next_orders = state.orders.clone();
        next_orders.clear(table);
        let mut next_credits = state.credits.clone();
        next_credits.push(record.clone());

        self.store
            .atomic_write(vec![
                CollectionWrite::new(Collection::Orders, next_orders.as_map())?,
                CollectionWrite::new(Collection::CreditRecords, &next_credits.records())?,
            ])
            .await?;

        state.orders = next_orders;
        state.credits = next_credits;
        drop(state);

        self.emit(LedgerEvent::OrdersChanged);
        self.emit(LedgerEvent::CreditsChanged);
        info!(
            table = %table,
            id = %record.id,
            customer = %record.customer_name,
            total = %record.total(),
            "Bill deferred to Udhari"
        );
        Ok(record)
    }

    // =========================================================================
    // Credit Operations
    // =========================================================================

    /// Folds an active credit record into a table's cart (the customer may
    /// be sitting at a different table than where the credit originated):
    /// merges the record's frozen items into the target cart and flips the
    /// record to settled, persisted in one transaction so the two effects
    /// are observed together or not at all.
    ///
    /// Idempotent: a missing or already-settled record id is a silent
    /// no-op, which absorbs duplicate attempts like a rapid double-click.
    pub async fn reconcile_into_order(&self, record_id: &str, table: &str) -> BillingResult<()> {
        validation::validate_table_id(table).map_err(CoreError::from)?;

        let mut state = self.state.lock().await;
        let Some(record) = state.credits.get(record_id).filter(|r| r.is_active()).cloned() else {
            debug!(record_id = %record_id, "Reconcile skipped, record missing or settled");
            return Ok(());
        };

        let mut next_orders = state.orders.clone();
        next_orders.merge_items(table, &record.items);
        let mut next_credits = state.credits.clone();
        next_credits.mark_settled(record_id);

        self.store
            .atomic_write(vec![
                CollectionWrite::new(Collection::Orders, next_orders.as_map())?,
                CollectionWrite::new(Collection::CreditRecords, &next_credits.records())?,
            ])
            .await?;

        state.orders = next_orders;
        state.credits = next_credits;
        drop(state);

        self.emit(LedgerEvent::OrdersChanged);
        self.emit(LedgerEvent::CreditsChanged);
        info!(
            record_id = %record_id,
            table = %table,
            customer = %record.customer_name,
            "Udhari reconciled into bill"
        );
        Ok(())
    }

    /// Marks a credit record settled without merging it anywhere (the
    /// customer paid outside the app). Idempotent: missing or already
    /// settled ids are a silent no-op.
    pub async fn settle_credit(&self, record_id: &str) -> BillingResult<()> {
        let mut state = self.state.lock().await;

        let mut next = state.credits.clone();
        if !next.mark_settled(record_id) {
            debug!(record_id = %record_id, "Settle skipped, record missing or settled");
            return Ok(());
        }

        self.store
            .save_collection(CollectionWrite::new(
                Collection::CreditRecords,
                &next.records(),
            )?)
            .await?;
        state.credits = next;
        drop(state);

        self.emit(LedgerEvent::CreditsChanged);
        info!(record_id = %record_id, "Udhari settled manually");
        Ok(())
    }

    /// Overwrites the free-text notes on a credit record. Silent no-op
    /// when the record is absent.
    pub async fn update_credit_notes(&self, record_id: &str, notes: &str) -> BillingResult<()> {
        let mut state = self.state.lock().await;

        let mut next = state.credits.clone();
        if !next.update_notes(record_id, notes) {
            return Ok(());
        }

        self.store
            .save_collection(CollectionWrite::new(
                Collection::CreditRecords,
                &next.records(),
            )?)
            .await?;
        state.credits = next;
        drop(state);

        self.emit(LedgerEvent::CreditsChanged);
        Ok(())
    }

    // =========================================================================
    // Notes
    // =========================================================================

    /// Creates a scratchpad note.
    pub async fn add_note(&self, content: &str) -> BillingResult<Note> {
        validation::validate_note_content(content).map_err(CoreError::from)?;

        let note = Note {
            id: Uuid::new_v4().to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
        };

        let mut state = self.state.lock().await;
        let mut next = state.notes.clone();
        next.push(note.clone());

        self.store
            .save_collection(CollectionWrite::new(Collection::Notes, &next.notes())?)
            .await?;
        state.notes = next;
        drop(state);

        self.emit(LedgerEvent::NotesChanged);
        Ok(note)
    }

    /// Overwrites a note's content. Silent no-op when absent.
    pub async fn update_note(&self, id: &str, content: &str) -> BillingResult<()> {
        validation::validate_note_content(content).map_err(CoreError::from)?;

        let mut state = self.state.lock().await;
        let mut next = state.notes.clone();
        if !next.update(id, content) {
            return Ok(());
        }

        self.store
            .save_collection(CollectionWrite::new(Collection::Notes, &next.notes())?)
            .await?;
        state.notes = next;
        drop(state);

        self.emit(LedgerEvent::NotesChanged);
        Ok(())
    }

    /// Deletes a note. Silent no-op when absent.
    pub async fn delete_note(&self, id: &str) -> BillingResult<()> {
        let mut state = self.state.lock().await;
        let mut next = state.notes.clone();
        if !next.remove(id) {
            return Ok(());
        }

        self.store
            .save_collection(CollectionWrite::new(Collection::Notes, &next.notes())?)
            .await?;
        state.notes = next;
        drop(state);

        self.emit(LedgerEvent::NotesChanged);
        Ok(())
    }

    // =========================================================================
    // Read Views
    // =========================================================================
    // All reads return defensive copies of committed state.

    /// The open cart for one table, if any.
    pub async fn order_for(&self, table: &str) -> Option<suvidha_core::Order> {
        self.state.lock().await.orders.order_for(table)
    }

    /// Tables that currently have an open cart.
    pub async fn active_tables(&self) -> Vec<String> {
        self.state.lock().await.orders.active_tables()
    }

    /// Current totals for a table. An empty table prices to all zeros,
    /// which is a valid displayable state.
    pub async fn totals_for_table(&self, table: &str) -> BillTotals {
        let state = self.state.lock().await;
        match state.orders.order_for(table) {
            Some(order) => compute_totals(order.items(), self.config.tax_rate),
            None => BillTotals::default(),
        }
    }

    /// UPI deep link for a table's current bill, for QR rendering.
    /// Rejected for an empty table, matching the settle gating.
    pub async fn payment_link_for_table(&self, table: &str) -> BillingResult<String> {
        let state = self.state.lock().await;
        let order = state.orders.order_for(table).ok_or_else(|| CoreError::EmptyBill {
            table: table.to_string(),
        })?;

        let totals = compute_totals(order.items(), self.config.tax_rate);
        Ok(self.config.payee.payment_link(totals.total()))
    }

    /// Receipt view data for a table's current bill, for the print/PDF
    /// renderer. Rejected for an empty table.
    pub async fn receipt_preview(
        &self,
        table: &str,
        customer_name: Option<&str>,
    ) -> BillingResult<Receipt> {
        let state = self.state.lock().await;
        let order = state.orders.order_for(table).ok_or_else(|| CoreError::EmptyBill {
            table: table.to_string(),
        })?;

        let totals = compute_totals(order.items(), self.config.tax_rate);
        let link = self.config.payee.payment_link(totals.total());
        Ok(Receipt::build(
            table,
            customer_name,
            order.items(),
            totals,
            link,
            Utc::now(),
        ))
    }

    /// Active credit records, newest first.
    pub async fn active_credits(&self) -> Vec<CreditRecord> {
        self.state.lock().await.credits.list_active()
    }

    /// Settled credit records, newest first.
    pub async fn settled_credits(&self) -> Vec<CreditRecord> {
        self.state.lock().await.credits.list_settled()
    }

    /// Total still owed across all active credit records.
    pub async fn total_active_credit(&self) -> Money {
        self.state.lock().await.credits.total_active()
    }

    /// All notes, newest first.
    pub async fn notes_list(&self) -> Vec<Note> {
        self.state.lock().await.notes.list()
    }

    /// Full payment history, newest first.
    pub async fn payment_history(&self) -> Vec<SettledTransaction> {
        self.state.lock().await.settlements.list_all()
    }

    /// Payment history filtered by method, newest first.
    pub async fn history_by_method(&self, method: PaymentMethod) -> Vec<SettledTransaction> {
        self.state.lock().await.settlements.list_by_method(method)
    }

    /// Payment history for one exact local calendar day.
    pub async fn history_on_day<Tz: TimeZone>(
        &self,
        day: NaiveDate,
        tz: &Tz,
    ) -> Vec<SettledTransaction> {
        self.state.lock().await.settlements.list_on_day(day, tz)
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    /// Cash / online / udhari totals for one window anchored at `now`.
    pub async fn totals_for_window<Tz: TimeZone>(
        &self,
        window: TimeWindow,
        now: &DateTime<Tz>,
    ) -> WindowTotals {
        let state = self.state.lock().await;
        report::totals_for_window(
            state.settlements.transactions(),
            state.credits.records(),
            window,
            now,
        )
    }

    /// Item-level sales ranking across all settled transactions.
    pub async fn item_sales_report(&self) -> Vec<ItemSales> {
        let state = self.state.lock().await;
        report::item_sales_report(state.settlements.transactions())
    }

    /// The `n` best-selling items.
    pub async fn top_selling(&self, n: usize) -> Vec<ItemSales> {
        let state = self.state.lock().await;
        report::top_selling(state.settlements.transactions(), n)
    }

    /// CSV export of one report window (summary + transaction table).
    pub async fn export_csv<Tz: TimeZone>(
        &self,
        window: TimeWindow,
        now: &DateTime<Tz>,
    ) -> BillingResult<String> {
        let state = self.state.lock().await;
        Ok(export::render_report_csv(
            state.settlements.transactions(),
            state.credits.records(),
            window,
            now,
        )?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BillingError;
    use std::collections::{BTreeMap, HashSet};
    use suvidha_store::{LedgerSnapshot, MemoryStore, StoreError, StoreResult};

    fn menu_item(id: u32, price_paise: i64) -> MenuItem {
        MenuItem {
            id,
            name: format!("Item {}", id),
            price_paise,
            category: "Test".to_string(),
        }
    }

    async fn orchestrator() -> BillingOrchestrator {
        BillingOrchestrator::load(Arc::new(MemoryStore::new()), BillingConfig::default())
            .await
            .unwrap()
    }

    /// A store whose writes always fail, pre-seeded with ledger state.
    struct FailingStore {
        seed: LedgerSnapshot,
    }

    #[async_trait::async_trait]
    impl CollectionStore for FailingStore {
        async fn load_all(&self) -> StoreResult<LedgerSnapshot> {
            Ok(self.seed.clone())
        }

        async fn save_collection(&self, _write: CollectionWrite) -> StoreResult<()> {
            Err(StoreError::QueryFailed("disk unplugged".to_string()))
        }

        async fn atomic_write(&self, _writes: Vec<CollectionWrite>) -> StoreResult<()> {
            Err(StoreError::QueryFailed("disk unplugged".to_string()))
        }
    }

    async fn orchestrator_with_failing_store() -> BillingOrchestrator {
        let mut order = suvidha_core::Order::new();
        order.add_menu_item(&menu_item(5, 4000));
        order.add_menu_item(&menu_item(5, 4000));

        let mut orders = BTreeMap::new();
        orders.insert("1".to_string(), order);

        let seed = LedgerSnapshot {
            orders,
            ..Default::default()
        };
        BillingOrchestrator::load(Arc::new(FailingStore { seed }), BillingConfig::default())
            .await
            .unwrap()
    }

    // -------------------------------------------------------------------------
    // End-to-end scenarios
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_scenario_settle_cash() {
        let orch = orchestrator().await;
        let item = menu_item(5, 4000);

        orch.add_item("1", &item).await.unwrap();
        orch.add_item("1", &item).await.unwrap();

        let order = orch.order_for("1").await.unwrap();
        assert_eq!(order.items().len(), 1);
        assert_eq!(order.items()[0].quantity, 2);

        let txn = orch.settle("1", PaymentMethod::Cash).await.unwrap();
        assert_eq!(txn.total_paise, 8400); // 80.00 * 1.05
        assert_eq!(txn.payment_method, PaymentMethod::Cash);
        assert_eq!(txn.table, "1");

        assert!(orch.order_for("1").await.is_none());
        assert_eq!(orch.payment_history().await.len(), 1);
    }

    #[tokio::test]
    async fn test_scenario_defer_then_reconcile_into_other_table() {
        let orch = orchestrator().await;
        let item = menu_item(3, 10000);

        orch.add_item("2", &item).await.unwrap();
        let record = orch.defer("2", "Asha").await.unwrap();

        assert_eq!(record.total_paise, 10500); // 100.00 * 1.05
        assert_eq!(record.status, CreditStatus::Active);
        assert!(orch.order_for("2").await.is_none());

        // The customer later sits at table 5, which already has the same item.
        orch.add_item("5", &item).await.unwrap();
        orch.reconcile_into_order(&record.id, "5").await.unwrap();

        let order = orch.order_for("5").await.unwrap();
        assert_eq!(order.items().len(), 1);
        assert_eq!(order.items()[0].quantity, 2);

        let settled = orch.settled_credits().await;
        assert_eq!(settled.len(), 1);
        assert_eq!(settled[0].id, record.id);
        assert!(orch.active_credits().await.is_empty());
    }

    #[tokio::test]
    async fn test_scenario_settle_empty_table_rejected() {
        let orch = orchestrator().await;

        let err = orch.settle("1", PaymentMethod::Cash).await.unwrap_err();
        assert!(matches!(
            err,
            BillingError::Core(CoreError::EmptyBill { .. })
        ));

        assert!(orch.payment_history().await.is_empty());
        assert!(orch.active_tables().await.is_empty());
    }

    // -------------------------------------------------------------------------
    // Defer validation
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_defer_without_customer_name_rejected() {
        let orch = orchestrator().await;
        orch.add_item("2", &menu_item(3, 10000)).await.unwrap();

        let err = orch.defer("2", "   ").await.unwrap_err();
        assert!(matches!(
            err,
            BillingError::Core(CoreError::CustomerNameRequired)
        ));

        // Table stays OPEN, no credit record created.
        assert!(orch.order_for("2").await.is_some());
        assert!(orch.active_credits().await.is_empty());
    }

    #[tokio::test]
    async fn test_defer_empty_table_rejected() {
        let orch = orchestrator().await;

        let err = orch.defer("2", "Asha").await.unwrap_err();
        assert!(matches!(
            err,
            BillingError::Core(CoreError::EmptyBill { .. })
        ));
        assert!(orch.active_credits().await.is_empty());
    }

    #[tokio::test]
    async fn test_defer_trims_customer_name() {
        let orch = orchestrator().await;
        orch.add_item("2", &menu_item(3, 10000)).await.unwrap();

        let record = orch.defer("2", "  Asha  ").await.unwrap();
        assert_eq!(record.customer_name, "Asha");
    }

    // -------------------------------------------------------------------------
    // Idempotence and exclusivity
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_reconcile_twice_is_idempotent() {
        let orch = orchestrator().await;
        orch.add_item("2", &menu_item(3, 10000)).await.unwrap();
        let record = orch.defer("2", "Asha").await.unwrap();

        orch.reconcile_into_order(&record.id, "5").await.unwrap();
        // Double click: second call must not merge again.
        orch.reconcile_into_order(&record.id, "5").await.unwrap();

        let order = orch.order_for("5").await.unwrap();
        assert_eq!(order.items()[0].quantity, 1);
        assert_eq!(orch.settled_credits().await.len(), 1);
    }

    #[tokio::test]
    async fn test_reconcile_unknown_record_is_noop() {
        let orch = orchestrator().await;
        orch.reconcile_into_order("no-such-id", "5").await.unwrap();
        assert!(orch.order_for("5").await.is_none());
    }

    #[tokio::test]
    async fn test_settle_and_defer_are_exclusive() {
        let orch = orchestrator().await;
        orch.add_item("1", &menu_item(5, 4000)).await.unwrap();

        orch.settle("1", PaymentMethod::Online).await.unwrap();

        // The order is gone, so a defer of the same bill is impossible.
        assert!(orch.defer("1", "Asha").await.is_err());
        assert_eq!(orch.payment_history().await.len(), 1);
        assert!(orch.active_credits().await.is_empty());
    }

    #[tokio::test]
    async fn test_settle_credit_manually_is_idempotent() {
        let orch = orchestrator().await;
        orch.add_item("2", &menu_item(3, 10000)).await.unwrap();
        let record = orch.defer("2", "Asha").await.unwrap();

        orch.settle_credit(&record.id).await.unwrap();
        orch.settle_credit(&record.id).await.unwrap();

        assert!(orch.active_credits().await.is_empty());
        assert_eq!(orch.settled_credits().await.len(), 1);
        // Manual settlement never touches any cart.
        assert!(orch.active_tables().await.is_empty());
    }

    // -------------------------------------------------------------------------
    // Conservation and sparse-map invariants
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_settlement_prices_final_cart_state() {
        let orch = orchestrator().await;
        orch.add_item("1", &menu_item(5, 4000)).await.unwrap();
        orch.add_item("1", &menu_item(5, 4000)).await.unwrap();
        orch.add_item("1", &menu_item(8, 2000)).await.unwrap();
        // Quantity changes after the totals were last "displayed".
        orch.set_quantity("1", 8, 3).await.unwrap();

        let txn = orch.settle("1", PaymentMethod::Cash).await.unwrap();

        // subtotal = 2*4000 + 3*2000 = 14000; total = 14000 * 1.05
        let recomputed = compute_totals(&txn.items, TaxRate::default());
        assert_eq!(recomputed.subtotal_paise, 14000);
        assert_eq!(txn.total_paise, recomputed.total_paise);
        assert_eq!(txn.total_paise, 14700);
    }

    #[tokio::test]
    async fn test_sparse_map_invariant() {
        let orch = orchestrator().await;
        orch.add_item("1", &menu_item(5, 4000)).await.unwrap();

        orch.set_quantity("1", 5, 0).await.unwrap();

        assert!(orch.order_for("1").await.is_none());
        assert!(orch.active_tables().await.is_empty());
    }

    #[tokio::test]
    async fn test_ids_unique_under_rapid_settlement() {
        let orch = orchestrator().await;
        let mut ids = HashSet::new();

        for _ in 0..25 {
            orch.add_item("1", &menu_item(5, 4000)).await.unwrap();
            let txn = orch.settle("1", PaymentMethod::Cash).await.unwrap();
            ids.insert(txn.id);
        }

        assert_eq!(ids.len(), 25);
    }

    // -------------------------------------------------------------------------
    // Store failure semantics
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_failed_settle_leaves_state_unchanged() {
        let orch = orchestrator_with_failing_store().await;

        let err = orch.settle("1", PaymentMethod::Cash).await.unwrap_err();
        assert!(matches!(err, BillingError::Store(_)));
        assert!(!err.is_validation());

        // The order survived and no transaction was recorded.
        let order = orch.order_for("1").await.unwrap();
        assert_eq!(order.items()[0].quantity, 2);
        assert!(orch.payment_history().await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_cart_write_leaves_cart_unchanged() {
        let orch = orchestrator_with_failing_store().await;

        assert!(orch.add_item("1", &menu_item(5, 4000)).await.is_err());
        assert_eq!(orch.order_for("1").await.unwrap().items()[0].quantity, 2);
    }

    // -------------------------------------------------------------------------
    // Events and persistence round trip
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_events_follow_commits() {
        let orch = orchestrator().await;
        let mut rx = orch.subscribe();

        orch.add_item("1", &menu_item(5, 4000)).await.unwrap();
        assert_eq!(rx.try_recv().unwrap(), LedgerEvent::OrdersChanged);

        orch.settle("1", PaymentMethod::Cash).await.unwrap();
        assert_eq!(rx.try_recv().unwrap(), LedgerEvent::OrdersChanged);
        assert_eq!(rx.try_recv().unwrap(), LedgerEvent::SettlementsChanged);
    }

    #[tokio::test]
    async fn test_rejected_mutations_emit_nothing() {
        let orch = orchestrator().await;
        let mut rx = orch.subscribe();

        assert!(orch.settle("1", PaymentMethod::Cash).await.is_err());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_state_survives_reload() {
        let store = Arc::new(MemoryStore::new());

        {
            let orch =
                BillingOrchestrator::load(store.clone(), BillingConfig::default())
                    .await
                    .unwrap();
            orch.add_item("1", &menu_item(5, 4000)).await.unwrap();
            orch.settle("1", PaymentMethod::Online).await.unwrap();
            orch.add_item("2", &menu_item(3, 10000)).await.unwrap();
            orch.defer("2", "Asha").await.unwrap();
            orch.add_item("Parcel", &menu_item(8, 2000)).await.unwrap();
            orch.add_note("order more tea").await.unwrap();
        }

        let orch = BillingOrchestrator::load(store, BillingConfig::default())
            .await
            .unwrap();

        assert_eq!(orch.payment_history().await.len(), 1);
        assert_eq!(orch.active_credits().await.len(), 1);
        assert_eq!(orch.active_tables().await, vec!["Parcel".to_string()]);
        assert_eq!(orch.notes_list().await.len(), 1);
    }

    // -------------------------------------------------------------------------
    // Views, reporting, notes
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_totals_for_empty_table_are_zero() {
        let orch = orchestrator().await;
        assert_eq!(orch.totals_for_table("1").await, BillTotals::default());
    }

    #[tokio::test]
    async fn test_payment_link_for_table() {
        let orch = orchestrator().await;
        orch.add_item("1", &menu_item(5, 4000)).await.unwrap();
        orch.add_item("1", &menu_item(5, 4000)).await.unwrap();

        let link = orch.payment_link_for_table("1").await.unwrap();
        assert_eq!(
            link,
            "upi://pay?pa=8530378745@axl&pn=Hotel%20Sugaran&am=84.00&cu=INR"
        );

        assert!(orch.payment_link_for_table("3").await.is_err());
    }

    #[tokio::test]
    async fn test_receipt_preview() {
        let orch = orchestrator().await;
        orch.add_item("1", &menu_item(5, 4000)).await.unwrap();

        let receipt = orch.receipt_preview("1", Some("Asha")).await.unwrap();
        assert_eq!(receipt.table_label, "Table 1");
        assert_eq!(receipt.total_paise, 4200);
        assert_eq!(receipt.customer_name.as_deref(), Some("Asha"));

        assert!(orch.receipt_preview("9", None).await.is_err());
    }

    #[tokio::test]
    async fn test_window_totals_and_export() {
        let orch = orchestrator().await;
        orch.add_item("1", &menu_item(5, 4000)).await.unwrap();
        orch.settle("1", PaymentMethod::Cash).await.unwrap();
        orch.add_item("2", &menu_item(3, 10000)).await.unwrap();
        orch.defer("2", "Asha").await.unwrap();

        let now = Utc::now();
        let totals = orch.totals_for_window(TimeWindow::AllTime, &now).await;
        assert_eq!(totals.cash.paise(), 4200);
        assert_eq!(totals.online.paise(), 0);
        assert_eq!(totals.udhari.paise(), 10500);

        let csv = orch.export_csv(TimeWindow::AllTime, &now).await.unwrap();
        assert!(csv.contains("summary,cash,42.00"));
        assert!(csv.contains("Udhari (active)"));
    }

    #[tokio::test]
    async fn test_item_sales_through_orchestrator() {
        let orch = orchestrator().await;
        for _ in 0..3 {
            orch.add_item("1", &menu_item(5, 4000)).await.unwrap();
        }
        orch.settle("1", PaymentMethod::Cash).await.unwrap();

        let report = orch.item_sales_report().await;
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].quantity_sold, 3);

        assert_eq!(orch.top_selling(5).await.len(), 1);
    }

    #[tokio::test]
    async fn test_notes_crud() {
        let orch = orchestrator().await;

        let note = orch.add_note("order more tea").await.unwrap();
        orch.update_note(&note.id, "tea ordered").await.unwrap();
        assert_eq!(orch.notes_list().await[0].content, "tea ordered");

        orch.delete_note(&note.id).await.unwrap();
        assert!(orch.notes_list().await.is_empty());

        // Blank notes are rejected before any state changes.
        assert!(orch.add_note("   ").await.is_err());
    }

    #[tokio::test]
    async fn test_update_credit_notes() {
        let orch = orchestrator().await;
        orch.add_item("2", &menu_item(3, 10000)).await.unwrap();
        let record = orch.defer("2", "Asha").await.unwrap();

        orch.update_credit_notes(&record.id, "will pay Friday")
            .await
            .unwrap();
        let active = orch.active_credits().await;
        assert_eq!(active[0].notes.as_deref(), Some("will pay Friday"));

        // Missing record: silent no-op.
        orch.update_credit_notes("missing", "x").await.unwrap();
    }
}
