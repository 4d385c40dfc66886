//! # Development Database Seeder
//!
//! Creates a local SQLite database with the OrderDesk tables and sample
//! customers and products, so the web server can run without MySQL.
//!
//! ## Usage
//! ```bash
//! # Create ./orderdesk_dev.db (default)
//! cargo run -p orderdesk-db --bin seed
//!
//! # Specify database path
//! cargo run -p orderdesk-db --bin seed -- --db ./data/orders.db
//!
//! # Then point the web server at it
//! DATABASE_URL=sqlite://orderdesk_dev.db cargo run -p orderdesk-web
//! ```

use std::env;

use orderdesk_db::{schema, Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./orderdesk_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("OrderDesk Development Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./orderdesk_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 OrderDesk Development Seeder");
    println!("===============================");
    println!("Database: {}", db_path);
    println!();

    // mode=rwc creates the file if it does not exist
    let config = DbConfig::new(format!("sqlite://{}?mode=rwc", db_path)).max_connections(1);
    let db = Database::new(config).await?;
    println!("✓ Connected to database");

    schema::install_dev_schema(db.pool()).await?;
    println!("✓ Schema installed");

    schema::seed_sample_data(db.pool()).await?;
    println!(
        "✓ Seeded {} customers and {} products",
        schema::SAMPLE_CUSTOMERS.len(),
        schema::SAMPLE_PRODUCTS.len()
    );

    // Verify the catalog reads back
    let products = db.products().list_products().await?;
    println!("  Catalog now lists {} products", products.len());

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
