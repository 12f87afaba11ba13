//! # Receipt Data
//!
//! The view data an external renderer (print window, PDF generator)
//! consumes for one bill. Pure data: building a receipt reads the cart
//! and prices it, nothing more. Bill numbers are UUID-derived with a date
//! prefix, so two receipts generated in the same millisecond can never
//! collide.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use suvidha_core::types::{table_label, BillTotals, LineItem};

/// A renderable bill for one table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// Printed bill number, e.g. `HSB-20260805-3f9a1c`.
    pub bill_number: String,
    /// Raw table id ("1".."8" or "Parcel").
    pub table: String,
    /// Human label ("Table 1" or "Parcel").
    pub table_label: String,
    /// Customer name, when entered (required only for Udhari).
    pub customer_name: Option<String>,
    /// When the receipt was generated.
    pub issued_at: DateTime<Utc>,
    /// Priced rows.
    pub items: Vec<ReceiptItem>,
    pub subtotal_paise: i64,
    pub tax_paise: i64,
    pub total_paise: i64,
    /// UPI deep link for the QR code.
    pub upi_link: String,
}

/// One printed row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptItem {
    pub name: String,
    pub quantity: i64,
    pub unit_price_paise: i64,
    pub line_total_paise: i64,
}

impl Receipt {
    /// Assembles a receipt from an already-priced cart.
    pub fn build(
        table: &str,
        customer_name: Option<&str>,
        items: &[LineItem],
        totals: BillTotals,
        upi_link: String,
        issued_at: DateTime<Utc>,
    ) -> Self {
        Receipt {
            bill_number: generate_bill_number(issued_at),
            table: table.to_string(),
            table_label: table_label(table),
            customer_name: customer_name.map(|s| s.to_string()),
            issued_at,
            items: items
                .iter()
                .map(|i| ReceiptItem {
                    name: i.name.clone(),
                    quantity: i.quantity,
                    unit_price_paise: i.unit_price_paise,
                    line_total_paise: i.line_total().paise(),
                })
                .collect(),
            subtotal_paise: totals.subtotal_paise,
            tax_paise: totals.tax_paise,
            total_paise: totals.total_paise,
            upi_link,
        }
    }
}

/// Generates a bill number: `HSB-<yyyymmdd>-<uuid fragment>`.
fn generate_bill_number(issued_at: DateTime<Utc>) -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    format!("HSB-{}-{}", issued_at.format("%Y%m%d"), &uuid[..6])
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn line(id: u32, name: &str, price_paise: i64, qty: i64) -> LineItem {
        LineItem {
            menu_item_id: id,
            name: name.to_string(),
            unit_price_paise: price_paise,
            quantity: qty,
        }
    }

    #[test]
    fn test_receipt_build() {
        let items = [line(1, "Pohe", 4000, 2)];
        let totals = BillTotals {
            subtotal_paise: 8000,
            tax_paise: 400,
            total_paise: 8400,
        };

        let receipt = Receipt::build(
            "1",
            Some("Asha"),
            &items,
            totals,
            "upi://pay?pa=x&pn=y&am=84.00&cu=INR".to_string(),
            Utc::now(),
        );

        assert!(receipt.bill_number.starts_with("HSB-"));
        assert_eq!(receipt.table_label, "Table 1");
        assert_eq!(receipt.items.len(), 1);
        assert_eq!(receipt.items[0].line_total_paise, 8000);
        assert_eq!(receipt.total_paise, 8400);
    }

    #[test]
    fn test_bill_numbers_unique_under_rapid_generation() {
        let now = Utc::now();
        let numbers: HashSet<String> =
            (0..100).map(|_| generate_bill_number(now)).collect();
        assert_eq!(numbers.len(), 100);
    }
}
