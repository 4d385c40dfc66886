//! # Repository Module
//!
//! Database repository implementations for OrderDesk.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.products().list_products()                                 │
//! │       │  db.orders().submit(&request)                                  │
//! │       ▼                                                                 │
//! │  ProductRepository            OrderRepository                          │
//! │  └── list_products()          ├── submit(request)  (transaction)       │
//! │       │                       └── find(order_id)                       │
//! │       │                            │                                    │
//! │       ▼                            ▼                                    │
//! │  QueryExecutor                one dedicated PooledConnection           │
//! │       │                            │                                    │
//! │       ▼                            ▼                                    │
//! │  MySQL (production) / SQLite (tests)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Catalog reads
//! - [`OrderRepository`](order::OrderRepository) - Order submission and lookup

pub mod order;
pub mod product;
