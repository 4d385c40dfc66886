//! # Development Schema
//!
//! SQLite rendition of the four tables OrderDesk reads and writes, plus a
//! small sample data set. Used by the test suites and the `seed` binary.
//!
//! ## Tables
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  customers (id)                    products (id, product_name,          │
//! │       ▲                                      list_price)                │
//! │       │ customer_id                          ▲                          │
//! │  orders (id AUTOINCREMENT,                   │ product_id               │
//! │          customer_id, order_date)            │                          │
//! │       ▲                                      │                          │
//! │       │ order_id                             │                          │
//! │  order_details (order_id, product_id, quantity)                        │
//! │                 PRIMARY KEY (order_id, product_id)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The production MySQL schema is owned by the database administrators and is
//! never created from here.

use tracing::info;

use crate::error::DbResult;
use crate::executor::{QueryExecutor, SqlArg};
use crate::pool::ConnectionPool;
use crate::statements::Statement;

const DEV_SCHEMA: &[Statement] = &[
    Statement {
        name: "create_customers",
        sql: "CREATE TABLE IF NOT EXISTS customers (
                  id         INTEGER PRIMARY KEY,
                  first_name TEXT NOT NULL,
                  last_name  TEXT NOT NULL
              )",
    },
    Statement {
        name: "create_products",
        sql: "CREATE TABLE IF NOT EXISTS products (
                  id           INTEGER PRIMARY KEY,
                  product_name TEXT NOT NULL,
                  list_price   DECIMAL(10, 2) NOT NULL
              )",
    },
    Statement {
        name: "create_orders",
        sql: "CREATE TABLE IF NOT EXISTS orders (
                  id          INTEGER PRIMARY KEY AUTOINCREMENT,
                  customer_id INTEGER NOT NULL REFERENCES customers (id),
                  order_date  DATE NOT NULL
              )",
    },
    Statement {
        name: "create_order_details",
        sql: "CREATE TABLE IF NOT EXISTS order_details (
                  order_id   INTEGER NOT NULL REFERENCES orders (id),
                  product_id INTEGER NOT NULL REFERENCES products (id),
                  quantity   INTEGER NOT NULL,
                  PRIMARY KEY (order_id, product_id)
              )",
    },
];

const INSERT_CUSTOMER: Statement = Statement {
    name: "seed_customer",
    sql: "INSERT OR IGNORE INTO customers (id, first_name, last_name) VALUES (?, ?, ?)",
};

const INSERT_PRODUCT: Statement = Statement {
    name: "seed_product",
    sql: "INSERT OR IGNORE INTO products (id, product_name, list_price) VALUES (?, ?, ?)",
};

/// Sample customers: (id, first name, last name).
pub const SAMPLE_CUSTOMERS: &[(i64, &str, &str)] = &[
    (1, "Debra", "Burks"),
    (2, "Kasha", "Todd"),
    (3, "Tameka", "Fisher"),
    (4, "Daryl", "Spence"),
    (5, "Charolette", "Rice"),
    (6, "Lyndsey", "Bean"),
    (7, "Latasha", "Hays"),
    (8, "Jacquline", "Duncan"),
    (9, "Genoveva", "Baldwin"),
    (10, "Pamelia", "Newman"),
];

/// Sample products: (id, name, list price).
pub const SAMPLE_PRODUCTS: &[(i64, &str, &str)] = &[
    (1, "Trek 820 - 2016", "379.99"),
    (2, "Ritchey Timberwolf Frameset - 2016", "749.99"),
    (3, "Surly Wednesday Frameset - 2016", "999.99"),
    (4, "Trek Fuel EX 8 29 - 2016", "2899.99"),
    (5, "Heller Shagamaw Frame - 2016", "1320.99"),
    (6, "Surly Ice Cream Truck Frameset - 2016", "469.99"),
    (7, "Electra Townie Original 7D - 2017", "489.99"),
    (8, "Sun Bicycles Cruz 3 - 2017", "449.99"),
];

/// Creates the development tables if they do not exist yet.
pub async fn install_dev_schema(pool: &ConnectionPool) -> DbResult<()> {
    let executor = QueryExecutor::new(pool.clone());
    for statement in DEV_SCHEMA {
        executor.execute(statement, &[]).await?;
    }
    info!(tables = DEV_SCHEMA.len(), "Development schema installed");
    Ok(())
}

/// Inserts the sample customers and products. Existing ids are left alone.
pub async fn seed_sample_data(pool: &ConnectionPool) -> DbResult<()> {
    let executor = QueryExecutor::new(pool.clone());

    for &(id, first_name, last_name) in SAMPLE_CUSTOMERS {
        let args = [SqlArg::from(id), first_name.into(), last_name.into()];
        executor.execute(&INSERT_CUSTOMER, &args).await?;
    }

    for &(id, name, price) in SAMPLE_PRODUCTS {
        let args = [SqlArg::from(id), name.into(), price.into()];
        executor.execute(&INSERT_PRODUCT, &args).await?;
    }

    info!(
        customers = SAMPLE_CUSTOMERS.len(),
        products = SAMPLE_PRODUCTS.len(),
        "Sample data seeded"
    );
    Ok(())
}
