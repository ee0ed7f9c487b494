//! # Development Database Seeder
//!
//! Creates (or resets) a Depot store database with the fixed demo dataset.
//!
//! ## Usage
//! ```bash
//! # Seed ./depot_dev.db (no-op if already seeded)
//! cargo run -p depot-store --bin seed
//!
//! # Specify database path
//! cargo run -p depot-store --bin seed -- --db ./data/depot.db
//!
//! # Force a reset to the demo dataset (clears login, restores counters)
//! cargo run -p depot-store --bin seed -- --reset
//! ```
//!
//! ## Seeded Dataset
//! - 1 manager profile
//! - 7 products across Grains / Oils / Canned Goods / Frozen
//! - 4 outlets spanning Active / Warning / Blocked
//! - 5 invoices spanning Pending / Approved / Rejected

use std::env;

use depot_core::stats::compute_dashboard_stats;
use depot_store::{Store, StoreConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Structured logging; default INFO, override with RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./depot_dev.db");
    let mut reset = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--reset" | "-r" => {
                reset = true;
            }
            "--help" | "-h" => {
                println!("Depot Store Manager Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./depot_dev.db)");
                println!("  -r, --reset        Overwrite existing data with the demo dataset");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Depot Store Manager Seeder");
    println!("=============================");
    println!("Database: {db_path}");
    println!();

    let store = Store::new(StoreConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    if reset {
        store.reset().await?;
        println!("✓ Store reset to demo dataset");
    } else if store.seed().await? {
        println!("✓ Demo dataset written");
    } else {
        println!("⚠ Database already has data");
        println!("  Re-run with --reset to overwrite.");
        return Ok(());
    }

    // Summarize what's in the store
    let inventory = store.inventory().list().await?;
    let invoices = store.invoices().list().await?;
    let outlets = store.outlets().list().await?;
    let stats = compute_dashboard_stats(&inventory, &invoices, &outlets);

    println!();
    println!("Store contents:");
    println!("  Products:          {}", inventory.len());
    println!("  Outlets:           {}", outlets.len());
    println!("  Invoices:          {}", invoices.len());
    println!("  Stock value:       {}", stats.total_stock_value);
    println!("  Outstanding credit: {}", stats.total_credit);
    println!("  Approved sales:    {}", stats.total_sales);
    println!();
    println!("✓ Seed complete!");

    Ok(())
}
