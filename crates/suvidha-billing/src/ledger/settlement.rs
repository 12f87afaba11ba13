//! # Settlement Ledger
//!
//! The permanent history of finalized (paid) bills. Append-only: records
//! are immutable once pushed, and nothing here ever removes one. All
//! filter queries are pure reads over `settled_at` delegating to the
//! reporting engine.

use chrono::{DateTime, NaiveDate, TimeZone};

use suvidha_core::report::{self, TimeWindow};
use suvidha_core::types::{PaymentMethod, SettledTransaction};

/// All settled transactions.
#[derive(Debug, Clone, Default)]
pub struct SettlementLedger {
    transactions: Vec<SettledTransaction>,
}

impl SettlementLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the ledger from persisted transactions.
    pub fn from_transactions(transactions: Vec<SettledTransaction>) -> Self {
        SettlementLedger { transactions }
    }

    /// The raw transactions, for persistence and reporting.
    pub fn transactions(&self) -> &[SettledTransaction] {
        &self.transactions
    }

    /// Appends a freshly settled transaction.
    pub fn push(&mut self, transaction: SettledTransaction) {
        self.transactions.push(transaction);
    }

    /// All transactions, newest first (the payment history view).
    pub fn list_all(&self) -> Vec<SettledTransaction> {
        let mut all = self.transactions.clone();
        all.sort_by_key(|t| std::cmp::Reverse(t.settled_at));
        all
    }

    /// Transactions paid with the given method, newest first.
    pub fn list_by_method(&self, method: PaymentMethod) -> Vec<SettledTransaction> {
        let mut matching = report::settled_by_method(&self.transactions, method);
        matching.sort_by_key(|t| std::cmp::Reverse(t.settled_at));
        matching
    }

    /// Transactions settled on one exact local calendar day.
    pub fn list_on_day<Tz: TimeZone>(&self, day: NaiveDate, tz: &Tz) -> Vec<SettledTransaction> {
        report::settled_on_day(&self.transactions, day, tz)
    }

    /// Transactions inside a report window anchored at `now`.
    pub fn list_in_window<Tz: TimeZone>(
        &self,
        window: TimeWindow,
        now: &DateTime<Tz>,
    ) -> Vec<SettledTransaction> {
        report::settled_in_window(&self.transactions, window, now)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn txn(id: &str, method: PaymentMethod, day: u32) -> SettledTransaction {
        SettledTransaction {
            id: id.to_string(),
            items: vec![],
            total_paise: 8400,
            table: "1".to_string(),
            payment_method: method,
            settled_at: Utc.with_ymd_and_hms(2026, 8, day, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_list_all_newest_first() {
        let ledger = SettlementLedger::from_transactions(vec![
            txn("a", PaymentMethod::Cash, 1),
            txn("b", PaymentMethod::Cash, 9),
            txn("c", PaymentMethod::Online, 5),
        ]);

        let ids: Vec<String> = ledger.list_all().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_list_by_method() {
        let ledger = SettlementLedger::from_transactions(vec![
            txn("a", PaymentMethod::Cash, 1),
            txn("b", PaymentMethod::Online, 2),
        ]);

        let online = ledger.list_by_method(PaymentMethod::Online);
        assert_eq!(online.len(), 1);
        assert_eq!(online[0].id, "b");
    }

    #[test]
    fn test_list_on_day() {
        let ledger = SettlementLedger::from_transactions(vec![
            txn("a", PaymentMethod::Cash, 1),
            txn("b", PaymentMethod::Cash, 2),
        ]);

        let day = NaiveDate::from_ymd_opt(2026, 8, 2).unwrap();
        let on_day = ledger.list_on_day(day, &Utc);
        assert_eq!(on_day.len(), 1);
        assert_eq!(on_day[0].id, "b");
    }
}
