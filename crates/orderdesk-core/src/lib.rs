//! # orderdesk-core: Pure Domain Logic for OrderDesk
//!
//! This crate holds the order-entry domain model with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        OrderDesk Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Browser (HTML forms)                         │   │
//! │  │        Product list ──► Order form ──► Result page              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/web (axum handlers)                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ orderdesk-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────────┐   ┌──────────────┐   ┌──────────────┐        │   │
//! │  │   │    types    │   │     form     │   │    error     │        │   │
//! │  │   │  Product    │   │ parse_order_ │   │  FormError   │        │   │
//! │  │   │  Order      │   │ form()       │   │  CoreError   │        │   │
//! │  │   │ OrderRequest│   │              │   │              │        │   │
//! │  │   └─────────────┘   └──────────────┘   └──────────────┘        │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                orderdesk-db (Database Layer)                    │   │
//! │  │        pool, query executor, catalog, order transaction         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Order, OrderDetail, OrderRequest)
//! - [`form`] - Order form parsing into a strongly-typed [`OrderRequest`]
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use orderdesk_core::form::parse_order_form;
//!
//! let pairs = vec![
//!     ("custId".to_string(), "7".to_string()),
//!     ("product".to_string(), "3".to_string()),
//!     ("qty3".to_string(), "2".to_string()),
//! ];
//!
//! let request = parse_order_form(&pairs).unwrap();
//! assert_eq!(request.customer_id.get(), 7);
//! assert_eq!(request.lines.len(), 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod form;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, FormError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// User-facing message for an unknown or malformed customer id.
///
/// Both the form parser and the order transaction report this exact text so
/// the result page reads the same regardless of where the id was rejected.
pub const INVALID_CUSTOMER_MESSAGE: &str = "Invalid customer id!";
