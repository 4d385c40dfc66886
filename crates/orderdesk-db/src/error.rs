//! # Database Error Types
//!
//! Error types for database operations and the order transaction.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  MySQL / SQLite error (sqlx::Error)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  QueryError ← statement name + cause, Display is always generic        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ├──► OrderError ← which step of the order transaction failed     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppError (apps/web) ← logged, user sees a generic message             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Driver messages never reach a rendered page. They are logged where the
//! failure happens and travel further only as `#[source]`.

use std::fmt;

use orderdesk_core::{CoreError, ProductId};
use thiserror::Error;

// =============================================================================
// Query Error
// =============================================================================

/// A parameterized statement that the store rejected or could not decode.
///
/// The `Display` text is the same for every failure; the statement name and
/// driver cause are available for logging.
#[derive(Debug, Error)]
#[error("Error executing sql query")]
pub struct QueryError {
    statement: &'static str,
    #[source]
    cause: sqlx::Error,
}

impl QueryError {
    /// Wraps a driver error raised while running `statement`.
    pub fn new(statement: &'static str, cause: sqlx::Error) -> Self {
        QueryError { statement, cause }
    }

    /// Name of the statement that failed.
    pub fn statement(&self) -> &'static str {
        self.statement
    }

    /// The underlying driver error.
    pub fn cause(&self) -> &sqlx::Error {
        &self.cause
    }
}

// =============================================================================
// Database Error
// =============================================================================

/// Database operation errors.
///
/// These errors wrap sqlx errors and provide additional context
/// for debugging and user feedback.
#[derive(Debug, Error)]
pub enum DbError {
    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - MySQL server unreachable or refusing the credentials
    /// - Pool already closed during shutdown
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Pool exhausted (all connections in use until the acquire timeout).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// A statement failed. See [`QueryError`].
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Begin, commit or rollback failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Returns true when the failure means no connection could be obtained.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, DbError::ConnectionFailed(_) | DbError::PoolExhausted)
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::PoolTimedOut        → DbError::PoolExhausted
/// sqlx::Error::PoolClosed          → DbError::ConnectionFailed
/// sqlx::Error::Io / Tls / Protocol → DbError::ConnectionFailed
/// Other                            → DbError::Internal
/// ```
///
/// Statement failures do not go through this conversion; the executor wraps
/// them in [`QueryError`] together with the statement name.
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::Configuration(_) => DbError::ConnectionFailed(err.to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Order Transaction Error
// =============================================================================

/// The step of the order transaction that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStep {
    Begin,
    LookupCustomer,
    InsertOrder,
    /// `line` is 1-based, in submission order.
    InsertDetail { line: usize, product_id: ProductId },
    Commit,
}

impl fmt::Display for OrderStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStep::Begin => write!(f, "could not start transaction"),
            OrderStep::LookupCustomer => write!(f, "customer lookup failed"),
            OrderStep::InsertOrder => write!(f, "order could not be inserted"),
            OrderStep::InsertDetail { line, product_id } => {
                write!(f, "order line {line} (product {product_id}) could not be inserted")
            }
            OrderStep::Commit => write!(f, "commit failed"),
        }
    }
}

/// Why an order was not recorded.
///
/// Every variant means nothing was persisted.
#[derive(Debug, Error)]
pub enum OrderError {
    /// A business rule rejected the order (unknown customer).
    #[error(transparent)]
    Rejected(#[from] CoreError),

    /// A statement or transaction boundary failed; the work was rolled back.
    #[error("Failed to insert new order: {step}")]
    Step {
        step: OrderStep,
        #[source]
        source: DbError,
    },

    /// No connection could be checked out.
    #[error("Order service unavailable")]
    Unavailable(#[source] DbError),
}

impl OrderError {
    pub(crate) fn step(step: OrderStep, source: impl Into<DbError>) -> Self {
        OrderError::Step {
            step,
            source: source.into(),
        }
    }

    /// The failed step, when the failure happened inside the transaction.
    pub fn failed_step(&self) -> Option<OrderStep> {
        match self {
            OrderError::Step { step, .. } => Some(*step),
            _ => None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use orderdesk_core::{CustomerId, INVALID_CUSTOMER_MESSAGE};

    #[test]
    fn test_query_error_hides_driver_message() {
        let err = DbError::from(QueryError::new("insert_order", sqlx::Error::RowNotFound));

        assert_eq!(err.to_string(), "Error executing sql query");
        match err {
            DbError::Query(query) => assert_eq!(query.statement(), "insert_order"),
            other => panic!("expected query error, got {other:?}"),
        }
    }

    #[test]
    fn test_sqlx_error_mapping() {
        assert!(matches!(
            DbError::from(sqlx::Error::PoolTimedOut),
            DbError::PoolExhausted
        ));
        assert!(DbError::from(sqlx::Error::PoolClosed).is_unavailable());
        assert!(!DbError::from(sqlx::Error::RowNotFound).is_unavailable());
    }

    #[test]
    fn test_order_error_messages() {
        let rejected = OrderError::from(CoreError::InvalidCustomer {
            customer_id: CustomerId::new(999),
        });
        assert_eq!(rejected.to_string(), INVALID_CUSTOMER_MESSAGE);
        assert_eq!(rejected.failed_step(), None);

        let step = OrderStep::InsertDetail {
            line: 2,
            product_id: ProductId::new(5),
        };
        let failed = OrderError::step(step, QueryError::new("insert_order_detail", sqlx::Error::RowNotFound));
        assert_eq!(
            failed.to_string(),
            "Failed to insert new order: order line 2 (product 5) could not be inserted"
        );
        assert_eq!(failed.failed_step(), Some(step));
    }
}
