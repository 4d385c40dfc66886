//! # Order Repository
//!
//! Records an order header and its detail lines as one atomic unit.
//!
//! ## Transaction Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    submit(OrderRequest)                                 │
//! │                                                                         │
//! │  1. pool.acquire()        one connection for the whole unit            │
//! │  2. BEGIN                                                              │
//! │  3. SELECT customer       zero rows ──► Invalid customer id!  ─┐      │
//! │  4. INSERT orders         generated id                          │      │
//! │  5. INSERT order_details  one per line, in order, stop on error ├─► ROLLBACK
//! │  6. COMMIT                                                      │      │
//! │  7. pool.release()        on every path                         │      │
//! │                                                                  │      │
//! │  Any failure in 3-5 ─────────────────────────────────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Either the header and every detail row are committed, or nothing is.
//! A failed rollback is logged and the original failure is still reported.

use chrono::NaiveDate;
use orderdesk_core::{
    CoreError, CustomerId, Order, OrderDetail, OrderId, OrderRequest, PlacedOrder, ProductId,
};
use sqlx::{Any, AnyConnection, Connection, FromRow, Transaction};
use tracing::{debug, error, info, warn};

use crate::error::{DbError, DbResult, OrderError, OrderStep};
use crate::executor::{bind, last_insert_id, statement_failed, QueryExecutor, SqlArg};
use crate::pool::ConnectionPool;
use crate::statements::{
    FIND_CUSTOMER, GET_ORDER, INSERT_ORDER, INSERT_ORDER_DETAIL, LIST_ORDER_DETAILS,
};

// =============================================================================
// Row Types
// =============================================================================

#[derive(Debug, FromRow)]
struct OrderRow {
    id: i64,
    customer_id: i64,
    order_date: String,
}

impl TryFrom<OrderRow> for Order {
    type Error = chrono::ParseError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        // MySQL may render DATETIME-ish text; only the date part matters.
        let date_part = row.order_date.get(..10).unwrap_or(&row.order_date);

        Ok(Order {
            id: OrderId::new(row.id),
            customer_id: CustomerId::new(row.customer_id),
            order_date: NaiveDate::parse_from_str(date_part, "%Y-%m-%d")?,
        })
    }
}

#[derive(Debug, FromRow)]
struct OrderDetailRow {
    order_id: i64,
    product_id: i64,
    quantity: i64,
}

impl From<OrderDetailRow> for OrderDetail {
    fn from(row: OrderDetailRow) -> Self {
        OrderDetail {
            order_id: OrderId::new(row.order_id),
            product_id: ProductId::new(row.product_id),
            quantity: row.quantity,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for order submission and lookup.
///
/// ## Usage
/// ```rust,ignore
/// let request = OrderRequest::new(7, vec![OrderLine::new(3, 2), OrderLine::new(5, 1)]);
/// let order_id = db.orders().submit(&request).await?;
///
/// let placed = db.orders().find(order_id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: ConnectionPool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: ConnectionPool) -> Self {
        OrderRepository { pool }
    }

    /// Records an order dated today (server local time).
    ///
    /// ## Returns
    /// * `Ok(OrderId)` - header and all lines committed
    /// * `Err(OrderError::Rejected)` - unknown customer, nothing written
    /// * `Err(OrderError::Step)` - a statement failed, rolled back
    /// * `Err(OrderError::Unavailable)` - no connection could be checked out
    pub async fn submit(&self, request: &OrderRequest) -> Result<OrderId, OrderError> {
        self.submit_dated(request, chrono::Local::now().date_naive())
            .await
    }

    /// Records an order with an explicit order date.
    pub async fn submit_dated(
        &self,
        request: &OrderRequest,
        order_date: NaiveDate,
    ) -> Result<OrderId, OrderError> {
        info!(
            customer_id = %request.customer_id,
            lines = request.lines.len(),
            total_quantity = request.total_quantity(),
            "Submitting order"
        );

        let mut conn = self.pool.acquire().await.map_err(OrderError::Unavailable)?;
        let result = run_transaction(conn.connection(), request, order_date).await;
        self.pool.release(conn);

        result
    }

    /// Reads back a committed order with its detail rows.
    ///
    /// Returns `None` when no order has that id.
    pub async fn find(&self, order_id: OrderId) -> DbResult<Option<PlacedOrder>> {
        let executor = QueryExecutor::new(self.pool.clone());
        let args = [SqlArg::from(order_id)];

        let rows: Vec<OrderRow> = executor.fetch_as(&GET_ORDER, &args).await?;
        let Some(row) = rows.into_iter().next() else {
            return Ok(None);
        };
        let order = Order::try_from(row)
            .map_err(|cause| statement_failed(&GET_ORDER, sqlx::Error::Decode(Box::new(cause))))?;

        let details: Vec<OrderDetailRow> = executor.fetch_as(&LIST_ORDER_DETAILS, &args).await?;

        Ok(Some(PlacedOrder {
            order,
            details: details.into_iter().map(OrderDetail::from).collect(),
        }))
    }
}

// =============================================================================
// Transaction
// =============================================================================

async fn run_transaction(
    conn: &mut AnyConnection,
    request: &OrderRequest,
    order_date: NaiveDate,
) -> Result<OrderId, OrderError> {
    let mut tx = conn.begin().await.map_err(|cause| {
        error!(error = %cause, "Failed to begin transaction");
        OrderError::step(OrderStep::Begin, DbError::TransactionFailed(cause.to_string()))
    })?;

    match insert_order(&mut tx, request, order_date).await {
        Ok(order_id) => {
            tx.commit().await.map_err(|cause| {
                error!(%order_id, error = %cause, "Failed to commit order");
                OrderError::step(OrderStep::Commit, DbError::TransactionFailed(cause.to_string()))
            })?;

            info!(%order_id, lines = request.lines.len(), "Order is inserted in database");
            Ok(order_id)
        }
        Err(err) => {
            warn!(error = %err, "Failed to insert new order in database");
            Err(after_rollback(err, tx.rollback().await))
        }
    }
}

/// The error reported once a rollback has been attempted.
///
/// A failed rollback is only logged; the caller still sees what broke the
/// transaction.
fn after_rollback(err: OrderError, rollback: Result<(), sqlx::Error>) -> OrderError {
    match rollback {
        Ok(()) => debug!("Transaction is rolled back"),
        Err(cause) => error!(error = %cause, "Rollback failed"),
    }
    err
}

async fn insert_order(
    tx: &mut Transaction<'_, Any>,
    request: &OrderRequest,
    order_date: NaiveDate,
) -> Result<OrderId, OrderError> {
    let customer_id = request.customer_id;

    let args = [SqlArg::from(customer_id)];
    let customer = bind(&FIND_CUSTOMER, &args)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|cause| OrderError::step(OrderStep::LookupCustomer, statement_failed(&FIND_CUSTOMER, cause)))?;

    if customer.is_none() {
        info!(%customer_id, "Customer id is not valid");
        return Err(CoreError::InvalidCustomer { customer_id }.into());
    }

    let args = [SqlArg::from(customer_id), SqlArg::from(order_date)];
    let done = bind(&INSERT_ORDER, &args)
        .execute(&mut **tx)
        .await
        .map_err(|cause| OrderError::step(OrderStep::InsertOrder, statement_failed(&INSERT_ORDER, cause)))?;

    // MySQL reports the id on the result; SQLite needs a read-back.
    let order_id = match done.last_insert_id() {
        Some(id) => OrderId::new(id),
        None => last_insert_id(&mut **tx)
            .await
            .map(OrderId::new)
            .map_err(|cause| OrderError::step(OrderStep::InsertOrder, cause))?,
    };
    debug!(%order_id, "Order header inserted");

    for (index, line) in request.lines.iter().enumerate() {
        let args = [
            SqlArg::from(order_id),
            SqlArg::from(line.product_id),
            SqlArg::from(line.quantity),
        ];
        bind(&INSERT_ORDER_DETAIL, &args)
            .execute(&mut **tx)
            .await
            .map_err(|cause| {
                let step = OrderStep::InsertDetail {
                    line: index + 1,
                    product_id: line.product_id,
                };
                OrderError::step(step, statement_failed(&INSERT_ORDER_DETAIL, cause))
            })?;
    }

    Ok(order_id)
}

// =============================================================================
// Unit Tests
// =============================================================================
