//! # Domain Types
//!
//! Core domain types used throughout OrderDesk.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Order      │   │  OrderDetail    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id (store)     │   │  order_id (FK)  │       │
//! │  │  name           │   │  customer_id    │   │  product_id (FK)│       │
//! │  │  list_price     │   │  order_date     │   │  quantity       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────┐                            │
//! │  │  OrderRequest (transient)               │                            │
//! │  │  customer_id + ordered Vec<OrderLine>   │                            │
//! │  └─────────────────────────────────────────┘                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identifiers are integer newtypes so a product id can never be passed
//! where a customer id is expected.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Identifiers
// =============================================================================

macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw identifier.
            #[inline]
            pub const fn new(id: i64) -> Self {
                $name(id)
            }

            /// Returns the raw identifier.
            #[inline]
            pub const fn get(&self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                $name(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

integer_id!(
    /// Identifier of a customer row.
    CustomerId
);

integer_id!(
    /// Identifier of a product row.
    ProductId
);

integer_id!(
    /// Identifier generated by the store when an order row is inserted.
    OrderId
);

// =============================================================================
// Catalog
// =============================================================================

/// A product available for ordering. Read-only from this system's side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// List price, exact decimal.
    pub list_price: Decimal,
}

// =============================================================================
// Orders
// =============================================================================

/// A persisted order header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Store-generated identifier.
    pub id: OrderId,

    /// Customer who placed the order.
    pub customer_id: CustomerId,

    /// Date of creation.
    pub order_date: NaiveDate,
}

/// One persisted order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetail {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: i64,
}

/// One (product, quantity) pair within a submission.
///
/// ## Quantity
/// Passed through without range checks: zero and negative values are
/// accepted as-is and left to the store's constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: i64,
}

impl OrderLine {
    /// Creates an order line.
    pub fn new(product_id: impl Into<ProductId>, quantity: i64) -> Self {
        OrderLine {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// A transient order submission built from form input.
///
/// ## Ordering
/// `lines` keeps the submitted order; detail rows are inserted in exactly
/// this sequence. An empty `lines` is a valid request and produces an order
/// without detail rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub customer_id: CustomerId,
    pub lines: Vec<OrderLine>,
}

impl OrderRequest {
    /// Creates a request for the given customer and lines.
    pub fn new(customer_id: impl Into<CustomerId>, lines: Vec<OrderLine>) -> Self {
        OrderRequest {
            customer_id: customer_id.into(),
            lines,
        }
    }

    /// Sum of all submitted quantities (for logging).
    ///
    /// Quantities are unchecked, so the sum saturates instead of overflowing.
    pub fn total_quantity(&self) -> i64 {
        self.lines
            .iter()
            .fold(0i64, |total, line| total.saturating_add(line.quantity))
    }
}

/// A committed order together with its detail rows, as read back from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedOrder {
    pub order: Order,
    pub details: Vec<OrderDetail>,
}

impl PlacedOrder {
    /// Lines of the order as (product, quantity) pairs.
    pub fn lines(&self) -> Vec<OrderLine> {
        self.details
            .iter()
            .map(|detail| OrderLine::new(detail.product_id, detail.quantity))
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_display_and_roundtrip() {
        let id = ProductId::new(42);
        assert_eq!(id.get(), 42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(ProductId::from(42), id);
    }

    #[test]
    fn test_request_keeps_line_order() {
        let request = OrderRequest::new(
            7,
            vec![OrderLine::new(5, 1), OrderLine::new(3, 2)],
        );

        let products: Vec<i64> = request.lines.iter().map(|l| l.product_id.get()).collect();
        assert_eq!(products, vec![5, 3]);
        assert_eq!(request.total_quantity(), 3);
    }

    #[test]
    fn test_empty_request_is_allowed() {
        let request = OrderRequest::new(7, Vec::new());
        assert!(request.lines.is_empty());
        assert_eq!(request.total_quantity(), 0);
    }

    #[test]
    fn test_total_quantity_saturates_on_extreme_values() {
        let request = OrderRequest::new(
            7,
            vec![OrderLine::new(3, i64::MAX), OrderLine::new(5, 1)],
        );
        assert_eq!(request.total_quantity(), i64::MAX);

        let request = OrderRequest::new(
            7,
            vec![OrderLine::new(3, i64::MIN), OrderLine::new(5, -1)],
        );
        assert_eq!(request.total_quantity(), i64::MIN);
    }
}
