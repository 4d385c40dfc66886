//! Shared fixtures for the unit tests in this crate.

use sqlx::Row;

use crate::pool::{Database, DbConfig};
use crate::schema;
use crate::statements::Statement;

const COUNT_ORDERS: Statement = Statement {
    name: "count_orders",
    sql: "SELECT COUNT(*) AS n FROM orders",
};

const COUNT_ORDER_DETAILS: Statement = Statement {
    name: "count_order_details",
    sql: "SELECT COUNT(*) AS n FROM order_details",
};

/// In-memory database with the development schema and sample data.
pub(crate) async fn test_database() -> Database {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    schema::install_dev_schema(db.pool()).await.unwrap();
    schema::seed_sample_data(db.pool()).await.unwrap();
    db
}

/// Row count of `orders` or `order_details`.
pub(crate) async fn count_rows(db: &Database, table: &str) -> i64 {
    let statement = match table {
        "orders" => COUNT_ORDERS,
        "order_details" => COUNT_ORDER_DETAILS,
        other => panic!("no count statement for {other}"),
    };
    let rows = db.executor().fetch_all(&statement, &[]).await.unwrap();
    rows[0].get::<i64, _>("n")
}
