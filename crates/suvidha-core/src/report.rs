//! # Reporting Engine
//!
//! Pure aggregation over settlement and credit history. No mutation, no
//! clock access: "now" is always passed in by the caller, which keeps
//! window math deterministic under test.
//!
//! ## Windows
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Report Windows                                     │
//! │                                                                         │
//! │  Today     [local midnight ──────────► next local midnight)            │
//! │  ThisWeek  [Monday 00:00 ────────────► next Monday 00:00)              │
//! │  ThisMonth [1st 00:00 ───────────────► 1st of next month 00:00)        │
//! │  AllTime   no filter                                                   │
//! │                                                                         │
//! │  All bounds are half-open [start, end): a bill settled exactly at      │
//! │  midnight belongs to the day that starts there, never the day that     │
//! │  ends there.                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Calendar arithmetic happens in the caller's time zone (the zone of the
//! `now` argument); stored UTC timestamps are converted into that zone
//! before comparison. Tests use fixed offsets so they are not machine
//! time zone dependent.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::money::Money;
use crate::types::{CreditRecord, PaymentMethod, SettledTransaction};

// =============================================================================
// Time Windows
// =============================================================================

/// A reporting time window, anchored at the caller's "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeWindow {
    /// The current local calendar day.
    Today,
    /// The current ISO week, Monday-anchored.
    ThisWeek,
    /// The current calendar month.
    ThisMonth,
    /// No time filter.
    AllTime,
}

/// Returns the window's half-open `[start, end)` bounds as naive local
/// datetimes in the zone of `now`, or `None` for [`TimeWindow::AllTime`].
pub fn window_bounds<Tz: TimeZone>(
    window: TimeWindow,
    now: &DateTime<Tz>,
) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let today = now.naive_local().date();

    let (start, end) = match window {
        TimeWindow::Today => (today, today.checked_add_days(Days::new(1))?),
        TimeWindow::ThisWeek => {
            let monday =
                today.checked_sub_days(Days::new(today.weekday().num_days_from_monday() as u64))?;
            (monday, monday.checked_add_days(Days::new(7))?)
        }
        TimeWindow::ThisMonth => {
            let first = today.with_day(1)?;
            (first, first.checked_add_months(Months::new(1))?)
        }
        TimeWindow::AllTime => return None,
    };

    Some((start.and_time(NaiveTime::MIN), end.and_time(NaiveTime::MIN)))
}

/// Checks whether a stored UTC instant falls inside a window anchored at
/// `now`. The instant is converted into the zone of `now` first.
pub fn in_window<Tz: TimeZone>(at: &DateTime<Utc>, window: TimeWindow, now: &DateTime<Tz>) -> bool {
    match window_bounds(window, now) {
        None => true,
        Some((start, end)) => {
            let local = at.with_timezone(&now.timezone()).naive_local();
            start <= local && local < end
        }
    }
}

// =============================================================================
// Window Totals
// =============================================================================

/// Income summary for one window: collected cash, collected online
/// payments, and outstanding (still-active) credit created in the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct WindowTotals {
    pub cash: Money,
    pub online: Money,
    pub udhari: Money,
}

impl WindowTotals {
    /// Total actually collected (cash + online). Udhari is outstanding,
    /// not collected, so it is excluded here.
    pub fn collected(&self) -> Money {
        self.cash + self.online
    }
}

/// Sums settlement and credit history into a [`WindowTotals`].
pub fn totals_for_window<Tz: TimeZone>(
    settled: &[SettledTransaction],
    credits: &[CreditRecord],
    window: TimeWindow,
    now: &DateTime<Tz>,
) -> WindowTotals {
    let mut totals = WindowTotals::default();

    for txn in settled {
        if !in_window(&txn.settled_at, window, now) {
            continue;
        }
        match txn.payment_method {
            PaymentMethod::Cash => totals.cash += txn.total(),
            PaymentMethod::Online => totals.online += txn.total(),
        }
    }

    for record in credits {
        if record.is_active() && in_window(&record.created_at, window, now) {
            totals.udhari += record.total();
        }
    }

    totals
}

// =============================================================================
// History Filters
// =============================================================================

/// Settled transactions whose `settled_at` falls inside the window.
pub fn settled_in_window<Tz: TimeZone>(
    settled: &[SettledTransaction],
    window: TimeWindow,
    now: &DateTime<Tz>,
) -> Vec<SettledTransaction> {
    settled
        .iter()
        .filter(|t| in_window(&t.settled_at, window, now))
        .cloned()
        .collect()
}

/// Settled transactions that happened on one exact local calendar day.
pub fn settled_on_day<Tz: TimeZone>(
    settled: &[SettledTransaction],
    day: NaiveDate,
    tz: &Tz,
) -> Vec<SettledTransaction> {
    settled
        .iter()
        .filter(|t| t.settled_at.with_timezone(tz).naive_local().date() == day)
        .cloned()
        .collect()
}

/// Settled transactions paid with the given method.
pub fn settled_by_method(
    settled: &[SettledTransaction],
    method: PaymentMethod,
) -> Vec<SettledTransaction> {
    settled
        .iter()
        .filter(|t| t.payment_method == method)
        .cloned()
        .collect()
}

// =============================================================================
// Item Sales
// =============================================================================

/// Aggregate sales of one menu item across all settled transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemSales {
    /// Item name (the snapshot name on the sold rows).
    pub name: String,
    /// Units sold.
    pub quantity_sold: i64,
    /// Revenue in paise (pre-tax line totals).
    pub revenue_paise: i64,
}

impl ItemSales {
    /// Returns the revenue as Money.
    #[inline]
    pub fn revenue(&self) -> Money {
        Money::from_paise(self.revenue_paise)
    }
}

/// Item-level sales ranking across all settled transactions, aggregated by
/// item name, sorted by quantity sold descending.
///
/// Ties keep first-seen order: the sort is stable and rows are created in
/// the order item names first appear in history, so equal counts rank
/// deterministically.
pub fn item_sales_report(settled: &[SettledTransaction]) -> Vec<ItemSales> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<ItemSales> = Vec::new();

    for txn in settled {
        for item in &txn.items {
            match index.get(&item.name) {
                Some(&i) => {
                    rows[i].quantity_sold += item.quantity;
                    rows[i].revenue_paise += item.line_total().paise();
                }
                None => {
                    index.insert(item.name.clone(), rows.len());
                    rows.push(ItemSales {
                        name: item.name.clone(),
                        quantity_sold: item.quantity,
                        revenue_paise: item.line_total().paise(),
                    });
                }
            }
        }
    }

    rows.sort_by(|a, b| b.quantity_sold.cmp(&a.quantity_sold));
    rows
}

/// The first `n` rows of [`item_sales_report`].
pub fn top_selling(settled: &[SettledTransaction], n: usize) -> Vec<ItemSales> {
    let mut rows = item_sales_report(settled);
    rows.truncate(n);
    rows
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CreditStatus, LineItem};
    use chrono::FixedOffset;

    /// IST (+05:30), the restaurant's local zone.
    fn ist() -> FixedOffset {
        FixedOffset::east_opt(5 * 3600 + 1800).unwrap()
    }

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        ist()
            .with_ymd_and_hms(y, mo, d, h, mi, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn line(id: u32, name: &str, price_paise: i64, qty: i64) -> LineItem {
        LineItem {
            menu_item_id: id,
            name: name.to_string(),
            unit_price_paise: price_paise,
            quantity: qty,
        }
    }

    fn txn(
        id: &str,
        total_paise: i64,
        method: PaymentMethod,
        settled_at: DateTime<Utc>,
    ) -> SettledTransaction {
        SettledTransaction {
            id: id.to_string(),
            items: vec![line(1, "Pohe", 4000, 1)],
            total_paise,
            table: "1".to_string(),
            payment_method: method,
            settled_at,
        }
    }

    fn credit(
        id: &str,
        total_paise: i64,
        status: CreditStatus,
        created_at: DateTime<Utc>,
    ) -> CreditRecord {
        CreditRecord {
            id: id.to_string(),
            customer_name: "Asha".to_string(),
            items: vec![line(3, "Batata Pohe", 4500, 1)],
            total_paise,
            created_at,
            notes: None,
            status,
        }
    }

    #[test]
    fn test_today_includes_midnight_start_excludes_prior_day() {
        // Settled exactly at local midnight on Aug 5.
        let midnight = at(2026, 8, 5, 0, 0);

        let now_aug5 = ist().with_ymd_and_hms(2026, 8, 5, 12, 0, 0).unwrap();
        let now_aug4 = ist().with_ymd_and_hms(2026, 8, 4, 12, 0, 0).unwrap();

        assert!(in_window(&midnight, TimeWindow::Today, &now_aug5));
        assert!(!in_window(&midnight, TimeWindow::Today, &now_aug4));
    }

    #[test]
    fn test_week_is_monday_anchored() {
        // 2026-08-03 is a Monday; now is Wednesday the 5th.
        let now = ist().with_ymd_and_hms(2026, 8, 5, 12, 0, 0).unwrap();
        let (start, end) = window_bounds(TimeWindow::ThisWeek, &now).unwrap();

        assert_eq!(start.date(), NaiveDate::from_ymd_opt(2026, 8, 3).unwrap());
        assert_eq!(end.date(), NaiveDate::from_ymd_opt(2026, 8, 10).unwrap());

        assert!(in_window(&at(2026, 8, 3, 0, 0), TimeWindow::ThisWeek, &now));
        assert!(!in_window(&at(2026, 8, 2, 23, 59), TimeWindow::ThisWeek, &now));
        assert!(!in_window(&at(2026, 8, 10, 0, 0), TimeWindow::ThisWeek, &now));
    }

    #[test]
    fn test_month_bounds() {
        let now = ist().with_ymd_and_hms(2026, 8, 5, 12, 0, 0).unwrap();
        let (start, end) = window_bounds(TimeWindow::ThisMonth, &now).unwrap();

        assert_eq!(start.date(), NaiveDate::from_ymd_opt(2026, 8, 1).unwrap());
        assert_eq!(end.date(), NaiveDate::from_ymd_opt(2026, 9, 1).unwrap());
    }

    #[test]
    fn test_all_time_has_no_bounds() {
        let now = ist().with_ymd_and_hms(2026, 8, 5, 12, 0, 0).unwrap();
        assert!(window_bounds(TimeWindow::AllTime, &now).is_none());
        assert!(in_window(&at(1999, 1, 1, 0, 0), TimeWindow::AllTime, &now));
    }

    #[test]
    fn test_totals_for_window_splits_methods_and_udhari() {
        let now = ist().with_ymd_and_hms(2026, 8, 5, 20, 0, 0).unwrap();
        let settled = vec![
            txn("a", 8400, PaymentMethod::Cash, at(2026, 8, 5, 9, 0)),
            txn("b", 10500, PaymentMethod::Online, at(2026, 8, 5, 13, 0)),
            txn("c", 5000, PaymentMethod::Cash, at(2026, 8, 1, 9, 0)), // not today
        ];
        let credits = vec![
            credit("u1", 10500, CreditStatus::Active, at(2026, 8, 5, 10, 0)),
            credit("u2", 2000, CreditStatus::Settled, at(2026, 8, 5, 11, 0)), // settled: excluded
            credit("u3", 3000, CreditStatus::Active, at(2026, 7, 1, 11, 0)),  // old: excluded
        ];

        let today = totals_for_window(&settled, &credits, TimeWindow::Today, &now);
        assert_eq!(today.cash.paise(), 8400);
        assert_eq!(today.online.paise(), 10500);
        assert_eq!(today.udhari.paise(), 10500);
        assert_eq!(today.collected().paise(), 18900);

        let all = totals_for_window(&settled, &credits, TimeWindow::AllTime, &now);
        assert_eq!(all.cash.paise(), 13400);
        assert_eq!(all.udhari.paise(), 13500);
    }

    #[test]
    fn test_settled_on_day_and_by_method() {
        let settled = vec![
            txn("a", 8400, PaymentMethod::Cash, at(2026, 8, 5, 9, 0)),
            txn("b", 10500, PaymentMethod::Online, at(2026, 8, 4, 23, 59)),
        ];

        let day = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        let on_day = settled_on_day(&settled, day, &ist());
        assert_eq!(on_day.len(), 1);
        assert_eq!(on_day[0].id, "a");

        let online = settled_by_method(&settled, PaymentMethod::Online);
        assert_eq!(online.len(), 1);
        assert_eq!(online[0].id, "b");
    }

    #[test]
    fn test_item_sales_report_aggregates_and_ranks() {
        let mut t1 = txn("a", 0, PaymentMethod::Cash, at(2026, 8, 5, 9, 0));
        t1.items = vec![line(1, "Pohe", 4000, 2), line(8, "Vada Pav", 2000, 1)];
        let mut t2 = txn("b", 0, PaymentMethod::Cash, at(2026, 8, 5, 10, 0));
        t2.items = vec![line(1, "Pohe", 4000, 3)];

        let report = item_sales_report(&[t1, t2]);
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].name, "Pohe");
        assert_eq!(report[0].quantity_sold, 5);
        assert_eq!(report[0].revenue_paise, 20000);
        assert_eq!(report[1].name, "Vada Pav");
    }

    #[test]
    fn test_item_sales_ties_keep_first_seen_order() {
        let mut t1 = txn("a", 0, PaymentMethod::Cash, at(2026, 8, 5, 9, 0));
        t1.items = vec![
            line(43, "Chapati", 1500, 2),
            line(44, "Tandoor Roti", 2000, 2),
        ];

        let report = item_sales_report(&[t1]);
        assert_eq!(report[0].name, "Chapati");
        assert_eq!(report[1].name, "Tandoor Roti");
    }

    #[test]
    fn test_top_selling_truncates() {
        let mut t1 = txn("a", 0, PaymentMethod::Cash, at(2026, 8, 5, 9, 0));
        t1.items = vec![
            line(1, "Pohe", 4000, 5),
            line(8, "Vada Pav", 2000, 3),
            line(9, "Samosa", 2500, 1),
        ];

        let top = top_selling(&[t1], 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "Pohe");
        assert_eq!(top[1].name, "Vada Pav");
    }
}
