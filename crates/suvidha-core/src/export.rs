//! # Report Export
//!
//! Renders aggregated report data to CSV: a summary section followed by a
//! flat transaction table. External renderers (spreadsheets, the printable
//! report view) consume this output; nothing here mutates state.
//!
//! ## Output Shape
//! ```text
//! section,label,amount
//! summary,cash,84.00
//! summary,online,105.00
//! summary,udhari,105.00
//! summary,collected,189.00
//!
//! type,id,timestamp,table_or_customer,amount,method,items
//! settlement,<uuid>,2026-08-05T09:00:00+00:00,Table 1,84.00,Cash,Pohe x2
//! credit,<uuid>,2026-08-05T10:00:00+00:00,Asha,105.00,Udhari (active),Batata Pohe x1
//! ```

use chrono::{DateTime, TimeZone};
use csv::WriterBuilder;
use thiserror::Error;

use crate::report::{self, TimeWindow};
use crate::types::{table_label, CreditRecord, LineItem, SettledTransaction};

// =============================================================================
// Errors
// =============================================================================

/// CSV rendering failures.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Writing a record failed.
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    /// Flushing the in-memory buffer failed.
    #[error("CSV buffer flush failed: {0}")]
    Flush(String),

    /// The rendered buffer was not valid UTF-8.
    #[error("CSV output was not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

// =============================================================================
// Rendering
// =============================================================================

/// Renders the report for one window as CSV text.
///
/// The summary section repeats the window totals (cash, online, udhari,
/// collected); the transaction table lists every settled transaction and
/// every credit record created inside the window, newest data exactly as
/// stored - amounts are grand totals in rupees with two decimals.
pub fn render_report_csv<Tz: TimeZone>(
    settled: &[SettledTransaction],
    credits: &[CreditRecord],
    window: TimeWindow,
    now: &DateTime<Tz>,
) -> Result<String, ExportError> {
    let totals = report::totals_for_window(settled, credits, window, now);

    // Rows in the two sections have different widths.
    let mut wtr = WriterBuilder::new().flexible(true).from_writer(vec![]);

    wtr.write_record(["section", "label", "amount"])?;
    for (label, amount) in [
        ("cash", totals.cash),
        ("online", totals.online),
        ("udhari", totals.udhari),
        ("collected", totals.collected()),
    ] {
        wtr.write_record(["summary", label, amount.to_decimal_string().as_str()])?;
    }
    wtr.write_record([""])?;

    wtr.write_record([
        "type",
        "id",
        "timestamp",
        "table_or_customer",
        "amount",
        "method",
        "items",
    ])?;

    for txn in settled {
        if !report::in_window(&txn.settled_at, window, now) {
            continue;
        }
        let timestamp = txn.settled_at.to_rfc3339();
        let label = table_label(&txn.table);
        let amount = txn.total().to_decimal_string();
        let method = txn.payment_method.to_string();
        let items = items_label(&txn.items);
        wtr.write_record([
            "settlement",
            txn.id.as_str(),
            timestamp.as_str(),
            label.as_str(),
            amount.as_str(),
            method.as_str(),
            items.as_str(),
        ])?;
    }

    for record in credits {
        if !report::in_window(&record.created_at, window, now) {
            continue;
        }
        let timestamp = record.created_at.to_rfc3339();
        let amount = record.total().to_decimal_string();
        let method = if record.is_active() {
            "Udhari (active)"
        } else {
            "Udhari (settled)"
        };
        let items = items_label(&record.items);
        wtr.write_record([
            "credit",
            record.id.as_str(),
            timestamp.as_str(),
            record.customer_name.as_str(),
            amount.as_str(),
            method,
            items.as_str(),
        ])?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| ExportError::Flush(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Renders line items as a single cell: `Pohe x2; Sheera x1`.
fn items_label(items: &[LineItem]) -> String {
    items
        .iter()
        .map(|i| format!("{} x{}", i.name, i.quantity))
        .collect::<Vec<_>>()
        .join("; ")
}

// =============================================================================
// Unit Tests
// =============================================================================
