//! # Error Types
//!
//! Domain-specific error types for orderdesk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  orderdesk-core errors (this file)                                     │
//! │  ├── FormError   - Malformed order form input                          │
//! │  └── CoreError   - Business rule failures                              │
//! │                                                                         │
//! │  orderdesk-db errors (separate crate)                                  │
//! │  ├── DbError     - Connection / query failures                         │
//! │  └── OrderError  - Order transaction failures                          │
//! │                                                                         │
//! │  Flow: FormError ─┐                                                    │
//! │        OrderError ┴──► result page { hasError, error }                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Every `Display` string is safe to show an end user
//! 3. Errors are enum variants, never String

use thiserror::Error;

use crate::types::CustomerId;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// The customer id does not reference an existing customer.
    ///
    /// ## When This Occurs
    /// - The pre-insert customer lookup returns zero rows
    #[error("Invalid customer id!")]
    InvalidCustomer { customer_id: CustomerId },
}

// =============================================================================
// Form Error
// =============================================================================

/// Order form input that could not be turned into an `OrderRequest`.
///
/// Rejected at the HTTP boundary before any database work happens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    /// `custId` missing or not an integer.
    #[error("Invalid customer id!")]
    InvalidCustomerId { value: String },

    /// A `product` value is not an integer.
    #[error("Invalid product id: '{value}'")]
    InvalidProductId { value: String },

    /// No `qty<productId>` field for a selected product.
    #[error("Missing quantity for product {product_id}")]
    MissingQuantity { product_id: i64 },

    /// `qty<productId>` is present but not an integer.
    #[error("Invalid quantity for product {product_id}: '{value}'")]
    InvalidQuantity { product_id: i64, value: String },
}

// =============================================================================
// Unit Tests
// =============================================================================
