//! # Query Executor
//!
//! Runs one parameterized statement per connection checkout.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  fetch_all / fetch_as / execute (statement, args)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  pool.acquire() ──► bind args in order ──► run ──► pool.release()      │
//! │                                             │                           │
//! │                               on failure: log cause, DbError::Query     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The connection goes back to the pool whether the statement succeeds or
//! fails. Callers never see the driver message, only
//! `"Error executing sql query"`.

use chrono::NaiveDate;
use orderdesk_core::{CustomerId, OrderId, ProductId};
use sqlx::any::{AnyArguments, AnyRow};
use sqlx::query::Query;
use sqlx::{Any, AnyConnection, FromRow, Row};
use tracing::{debug, error};

use crate::error::{DbError, DbResult, QueryError};
use crate::pool::ConnectionPool;
use crate::statements::{last_insert_id_for, Statement};

// =============================================================================
// Arguments
// =============================================================================

/// A positional statement argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlArg {
    Int(i64),
    Text(String),
}

impl From<i64> for SqlArg {
    fn from(value: i64) -> Self {
        SqlArg::Int(value)
    }
}

impl From<&str> for SqlArg {
    fn from(value: &str) -> Self {
        SqlArg::Text(value.to_string())
    }
}

impl From<String> for SqlArg {
    fn from(value: String) -> Self {
        SqlArg::Text(value)
    }
}

impl From<CustomerId> for SqlArg {
    fn from(id: CustomerId) -> Self {
        SqlArg::Int(id.get())
    }
}

impl From<ProductId> for SqlArg {
    fn from(id: ProductId) -> Self {
        SqlArg::Int(id.get())
    }
}

impl From<OrderId> for SqlArg {
    fn from(id: OrderId) -> Self {
        SqlArg::Int(id.get())
    }
}

/// Dates are bound as ISO `YYYY-MM-DD` text, which both MySQL `DATE` and
/// SQLite accept.
impl From<NaiveDate> for SqlArg {
    fn from(date: NaiveDate) -> Self {
        SqlArg::Text(date.format("%Y-%m-%d").to_string())
    }
}

/// Binds `args` to `statement` in order.
pub(crate) fn bind<'q>(
    statement: &Statement,
    args: &'q [SqlArg],
) -> Query<'q, Any, AnyArguments<'q>> {
    debug_assert_eq!(
        statement.placeholder_count(),
        args.len(),
        "argument count for {}",
        statement.name
    );
    args.iter()
        .fold(sqlx::query(statement.sql), |query, arg| match arg {
            SqlArg::Int(value) => query.bind(*value),
            SqlArg::Text(value) => query.bind(value.as_str()),
        })
}

/// Logs a statement failure and wraps it for the caller.
pub(crate) fn statement_failed(statement: &Statement, cause: sqlx::Error) -> DbError {
    error!(statement = statement.name, error = %cause, "Error executing sql query");
    DbError::Query(QueryError::new(statement.name, cause))
}

/// Reads the id generated by the last insert on `conn`.
///
/// Must run on the connection (or transaction) that did the insert.
pub(crate) async fn last_insert_id(conn: &mut AnyConnection) -> DbResult<i64> {
    let backend = conn.backend_name().to_string();
    let statement = last_insert_id_for(&backend)
        .ok_or_else(|| DbError::Internal(format!("no generated id support for {backend}")))?;

    let row = bind(&statement, &[])
        .fetch_one(&mut *conn)
        .await
        .map_err(|cause| statement_failed(&statement, cause))?;

    row.try_get::<i64, _>("id")
        .map_err(|cause| statement_failed(&statement, cause))
}

// =============================================================================
// Executor
// =============================================================================

/// Executes standalone statements against the pool.
#[derive(Debug, Clone)]
pub struct QueryExecutor {
    pool: ConnectionPool,
}

impl QueryExecutor {
    /// Creates an executor over the given pool.
    pub fn new(pool: ConnectionPool) -> Self {
        QueryExecutor { pool }
    }

    /// Runs a read statement and returns its raw rows.
    pub async fn fetch_all(&self, statement: &Statement, args: &[SqlArg]) -> DbResult<Vec<AnyRow>> {
        debug!(statement = statement.name, args = args.len(), "Executing query");

        let mut conn = self.pool.acquire().await?;
        let result = bind(statement, args).fetch_all(conn.connection()).await;
        self.pool.release(conn);

        result.map_err(|cause| statement_failed(statement, cause))
    }

    /// Runs a read statement and maps each row with `FromRow`.
    pub async fn fetch_as<T>(&self, statement: &Statement, args: &[SqlArg]) -> DbResult<Vec<T>>
    where
        T: for<'r> FromRow<'r, AnyRow>,
    {
        let rows = self.fetch_all(statement, args).await?;

        rows.iter()
            .map(T::from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|cause| statement_failed(statement, cause))
    }

    /// Runs a write statement and returns the number of affected rows.
    pub async fn execute(&self, statement: &Statement, args: &[SqlArg]) -> DbResult<u64> {
        debug!(statement = statement.name, args = args.len(), "Executing statement");

        let mut conn = self.pool.acquire().await?;
        let result = bind(statement, args).execute(conn.connection()).await;
        self.pool.release(conn);

        let done = result.map_err(|cause| statement_failed(statement, cause))?;
        Ok(done.rows_affected())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
