//! # Seed Data Generator
//!
//! Populates the database with a development item catalog.
//!
//! ## Usage
//! ```bash
//! # Seed the default catalog
//! cargo run -p bazaar-db --bin seed
//!
//! # Specify database path
//! cargo run -p bazaar-db --bin seed -- --db ./data/bazaar.db
//!
//! # Cap the number of items
//! cargo run -p bazaar-db --bin seed -- --count 20
//! ```

use chrono::Utc;
use std::env;
use tracing::{info, warn};
use uuid::Uuid;

use bazaar_core::Item;
use bazaar_db::{Database, DbConfig};

/// Catalog of (name, price in paise, stock) for a small grocery bazaar.
const CATALOG: &[(&str, i64, i64)] = &[
    ("Basmati Rice 5kg", 45_000, 40),
    ("Toor Dal 1kg", 15_500, 60),
    ("Chana Dal 1kg", 12_000, 55),
    ("Masala Chai 250g", 9_900, 80),
    ("Amul Butter 500g", 27_500, 30),
    ("Amul Ghee 1L", 58_000, 25),
    ("Maggi Noodles 12-pack", 16_800, 100),
    ("Parle-G 800g", 9_000, 120),
    ("Tata Salt 1kg", 2_800, 150),
    ("Fortune Sunflower Oil 1L", 14_500, 70),
    ("Aashirvaad Atta 10kg", 48_500, 35),
    ("MDH Garam Masala 100g", 8_500, 90),
    ("Everest Turmeric 200g", 6_400, 85),
    ("Haldiram Bhujia 400g", 11_000, 65),
    ("Britannia Bread", 4_500, 45),
    ("Amul Milk 1L", 6_600, 95),
    ("Nescafe Classic 100g", 32_500, 40),
    ("Red Label Tea 500g", 26_000, 50),
    ("Dettol Soap 4-pack", 16_000, 75),
    ("Surf Excel 1kg", 13_500, 60),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = CATALOG.len();
    let mut db_path = String::from("./bazaar_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(CATALOG.len());
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Bazaar Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of items to seed (default: full catalog)");
                println!("  -d, --db <PATH>    Database file path (default: ./bazaar_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    info!(db = %db_path, count = count, "Seeding bazaar catalog");

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    // Check existing items
    let existing = db.items().count().await?;
    if existing > 0 {
        warn!(
            existing,
            "Database already has items; skipping seed to avoid duplicates. \
             Delete the database file to regenerate."
        );
        return Ok(());
    }

    let now = Utc::now();
    let mut generated = 0;

    for (name, price_paise, stock) in CATALOG.iter().take(count) {
        let item = Item {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            price_paise: *price_paise,
            available_qty: *stock,
            purchased_count: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        if let Err(e) = db.items().insert(&item).await {
            warn!(name = %item.name, error = %e, "Failed to insert item");
            continue;
        }

        generated += 1;
    }

    info!(generated, "Seed complete");

    Ok(())
}
