//! # Billing Demo
//!
//! Walks one billing day end to end against a real SQLite store:
//! dine-in settle, Udhari defer + reconcile, and the daily report.
//!
//! ## Usage
//! ```bash
//! # Default database (./suvidha.db)
//! cargo run -p suvidha-billing --bin demo
//!
//! # Specify database path
//! cargo run -p suvidha-billing --bin demo -- --db ./data/suvidha.db
//! ```
//!
//! Run it twice to see the ledgers reload from disk.

use std::env;
use std::sync::Arc;

use chrono::Local;
use suvidha_billing::{BillingConfig, BillingOrchestrator};
use suvidha_core::report::TimeWindow;
use suvidha_core::types::{table_label, PaymentMethod};
use suvidha_core::{catalog, PAYMENT_WAIT_SECS};
use suvidha_store::{Store, StoreConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let db_path = parse_db_path().unwrap_or_else(|| "./suvidha.db".to_string());
    let store = Store::new(StoreConfig::new(&db_path)).await?;
    let orch = BillingOrchestrator::load(Arc::new(store), BillingConfig::default()).await?;

    let pohe = catalog::find_item(1).ok_or("menu item 1 missing")?;
    let sheera = catalog::find_item(5).ok_or("menu item 5 missing")?;
    let misal = catalog::find_item(6).ok_or("menu item 6 missing")?;

    // Table 1: breakfast order, paid in cash.
    orch.add_item("1", &pohe).await?;
    orch.add_item("1", &pohe).await?;
    orch.add_item("1", &sheera).await?;

    let receipt = orch.receipt_preview("1", None).await?;
    println!("== {} | bill {} ==", receipt.table_label, receipt.bill_number);
    for row in &receipt.items {
        println!(
            "  {} x{}  Rs.{}.{:02}",
            row.name,
            row.quantity,
            row.line_total_paise / 100,
            row.line_total_paise % 100
        );
    }
    println!(
        "  total Rs.{}.{:02}",
        receipt.total_paise / 100,
        receipt.total_paise % 100
    );
    println!(
        "  QR link (valid {}s): {}",
        PAYMENT_WAIT_SECS, receipt.upi_link
    );

    let txn = orch.settle("1", PaymentMethod::Cash).await?;
    println!("settled {} as {}", table_label(&txn.table), txn.payment_method);

    // Table 2: customer on credit.
    orch.add_item("2", &misal).await?;
    let record = orch.defer("2", "Asha").await?;
    println!(
        "deferred {} for {} ({})",
        record.total(),
        record.customer_name,
        record.id
    );

    // Asha returns, sits at table 5, old credit folds into the new bill.
    orch.add_item("5", &misal).await?;
    orch.reconcile_into_order(&record.id, "5").await?;
    let txn = orch.settle("5", PaymentMethod::Online).await?;
    println!(
        "reconciled credit into table 5, settled {} as {}",
        txn.total(),
        txn.payment_method
    );

    // The day's report.
    let now = Local::now();
    let totals = orch.totals_for_window(TimeWindow::Today, &now).await;
    println!(
        "today: cash {} | online {} | udhari {}",
        totals.cash, totals.online, totals.udhari
    );

    for row in orch.top_selling(3).await {
        println!("top seller: {} x{} ({})", row.name, row.quantity_sold, row.revenue());
    }

    println!("\n--- CSV export ---");
    println!("{}", orch.export_csv(TimeWindow::Today, &now).await?);

    Ok(())
}

fn parse_db_path() -> Option<String> {
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--db" {
            return args.next();
        }
    }
    None
}
