//! # orderdesk-db: Database Layer for OrderDesk
//!
//! This crate provides database access for OrderDesk.
//! It talks to MySQL in production and SQLite in tests, through the sqlx
//! `Any` driver.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        OrderDesk Data Flow                              │
//! │                                                                         │
//! │  HTTP handler (GET / , POST /order)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  orderdesk-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Statements  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │              │  │   │
//! │  │   │               │    │ ProductRepo   │    │ LIST_PRODUCTS│  │   │
//! │  │   │ConnectionPool │◄───│ OrderRepo     │───►│ INSERT_ORDER │  │   │
//! │  │   │ QueryExecutor │    │               │    │ ...          │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   MySQL: customers, products, orders, order_details            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool, checkout guard and `Database` handle
//! - [`executor`] - Parameterized statement execution
//! - [`statements`] - Every SQL statement, by name
//! - [`repository`] - Catalog reads and the order transaction
//! - [`schema`] - SQLite development schema and sample data
//! - [`error`] - Database error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use orderdesk_db::{Database, DbConfig};
//!
//! let config = DbConfig::mysql("localhost", 3306, "orders", "secret", "bikestores");
//! let db = Database::new(config).await?;
//!
//! let products = db.products().list_products().await?;
//! let order_id = db.orders().submit(&request).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod executor;
pub mod pool;
pub mod repository;
pub mod schema;
pub mod statements;

#[cfg(test)]
mod test_support;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult, OrderError, OrderStep, QueryError};
pub use executor::{QueryExecutor, SqlArg};
pub use pool::{ConnectionPool, Database, DbConfig, PooledConnection};

// Repository re-exports for convenience
pub use repository::order::OrderRepository;
pub use repository::product::ProductRepository;
