//! # Credit (Udhari) Ledger
//!
//! The collection of deferred-payment records. Records are never deleted:
//! settling one flips its status and it stays as permanent history. The
//! only other permitted mutation is the free-text notes field.

use suvidha_core::money::Money;
use suvidha_core::types::CreditRecord;

/// All credit records, active and settled.
#[derive(Debug, Clone, Default)]
pub struct CreditLedger {
    records: Vec<CreditRecord>,
}

impl CreditLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the ledger from persisted records.
    pub fn from_records(records: Vec<CreditRecord>) -> Self {
        CreditLedger { records }
    }

    /// The raw records, for persistence.
    pub fn records(&self) -> &[CreditRecord] {
        &self.records
    }

    /// Looks up one record by id.
    pub fn get(&self, id: &str) -> Option<&CreditRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Appends a freshly created record.
    pub fn push(&mut self, record: CreditRecord) {
        self.records.push(record);
    }

    /// Flips a record from active to settled.
    ///
    /// Returns `true` only when the record existed AND was active: the
    /// caller uses this to make reconciliation idempotent (a second call
    /// for the same id returns `false` and must change nothing else).
    pub fn mark_settled(&mut self, id: &str) -> bool {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) if record.is_active() => {
                record.status = suvidha_core::types::CreditStatus::Settled;
                true
            }
            _ => false,
        }
    }

    /// Overwrites the notes on a record. Returns `false` if absent.
    pub fn update_notes(&mut self, id: &str, notes: &str) -> bool {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.notes = Some(notes.to_string());
                true
            }
            None => false,
        }
    }

    /// Active records, newest first.
    pub fn list_active(&self) -> Vec<CreditRecord> {
        self.filtered(|r| r.is_active())
    }

    /// Settled records, newest first.
    pub fn list_settled(&self) -> Vec<CreditRecord> {
        self.filtered(|r| !r.is_active())
    }

    /// Total still owed across all active records.
    pub fn total_active(&self) -> Money {
        self.records
            .iter()
            .filter(|r| r.is_active())
            .map(|r| r.total())
            .sum()
    }

    fn filtered(&self, keep: impl Fn(&CreditRecord) -> bool) -> Vec<CreditRecord> {
        let mut records: Vec<CreditRecord> =
            self.records.iter().filter(|r| keep(r)).cloned().collect();
        records.sort_by_key(|r| std::cmp::Reverse(r.created_at));
        records
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use suvidha_core::types::{CreditStatus, LineItem};

    fn record(id: &str, total_paise: i64, created_day: u32) -> CreditRecord {
        CreditRecord {
            id: id.to_string(),
            customer_name: "Asha".to_string(),
            items: vec![LineItem {
                menu_item_id: 3,
                name: "Batata Pohe".to_string(),
                unit_price_paise: 4500,
                quantity: 1,
            }],
            total_paise,
            created_at: Utc.with_ymd_and_hms(2026, 8, created_day, 10, 0, 0).unwrap(),
            notes: None,
            status: CreditStatus::Active,
        }
    }

    #[test]
    fn test_mark_settled_flips_once() {
        let mut ledger = CreditLedger::from_records(vec![record("a", 10500, 1)]);

        assert!(ledger.mark_settled("a"));
        assert!(!ledger.get("a").unwrap().is_active());

        // Second call: record exists but is settled, so no flip.
        assert!(!ledger.mark_settled("a"));
        // Missing id: no flip.
        assert!(!ledger.mark_settled("nope"));
    }

    #[test]
    fn test_records_are_never_deleted() {
        let mut ledger = CreditLedger::from_records(vec![record("a", 10500, 1)]);
        ledger.mark_settled("a");

        assert_eq!(ledger.records().len(), 1);
        assert_eq!(ledger.list_active().len(), 0);
        assert_eq!(ledger.list_settled().len(), 1);
    }

    #[test]
    fn test_listings_are_newest_first() {
        let ledger = CreditLedger::from_records(vec![
            record("old", 1000, 1),
            record("new", 2000, 9),
            record("mid", 3000, 5),
        ]);

        let active = ledger.list_active();
        let ids: Vec<&str> = active.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_total_active_excludes_settled() {
        let mut ledger =
            CreditLedger::from_records(vec![record("a", 10500, 1), record("b", 2000, 2)]);
        ledger.mark_settled("b");

        assert_eq!(ledger.total_active().paise(), 10500);
    }

    #[test]
    fn test_update_notes() {
        let mut ledger = CreditLedger::from_records(vec![record("a", 10500, 1)]);

        assert!(ledger.update_notes("a", "will pay Friday"));
        assert_eq!(
            ledger.get("a").unwrap().notes.as_deref(),
            Some("will pay Friday")
        );

        assert!(!ledger.update_notes("missing", "x"));
    }
}
