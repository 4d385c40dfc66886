//! # SQL Statements
//!
//! Every statement OrderDesk sends to the store, as named constants.
//!
//! Placeholders are positional (`?`). Values are always bound, never spliced
//! into the SQL text.
//!
//! ## Portability
//! Statements run unchanged on MySQL and SQLite. Decimal and date columns are
//! read through `CAST(.. AS CHAR)` because the `Any` driver only decodes
//! integers, floats and text.

/// A named, parameterized SQL statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statement {
    /// Short name used in logs.
    pub name: &'static str,
    /// SQL text with positional placeholders.
    pub sql: &'static str,
}

impl Statement {
    /// Number of `?` placeholders in the SQL text.
    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('?').count()
    }
}

// =============================================================================
// Catalog
// =============================================================================

pub const LIST_PRODUCTS: Statement = Statement {
    name: "list_products",
    sql: "SELECT id, product_name, CAST(list_price AS CHAR) AS list_price \
          FROM products ORDER BY id",
};

// =============================================================================
// Order Submission
// =============================================================================

pub const FIND_CUSTOMER: Statement = Statement {
    name: "find_customer",
    sql: "SELECT id FROM customers WHERE id = ?",
};

pub const INSERT_ORDER: Statement = Statement {
    name: "insert_order",
    sql: "INSERT INTO orders (customer_id, order_date) VALUES (?, ?)",
};

/// Generated id of the last insert on this connection, MySQL flavour.
pub const LAST_INSERT_ID_MYSQL: Statement = Statement {
    name: "last_insert_id",
    sql: "SELECT CAST(LAST_INSERT_ID() AS SIGNED) AS id",
};

/// Generated id of the last insert on this connection, SQLite flavour.
pub const LAST_INSERT_ID_SQLITE: Statement = Statement {
    name: "last_insert_id",
    sql: "SELECT last_insert_rowid() AS id",
};

/// The read-back statement for a backend, by its `backend_name()`.
///
/// The SQLite driver does not report generated ids through the `Any`
/// result, so the id is always read back on the inserting connection.
pub fn last_insert_id_for(backend: &str) -> Option<Statement> {
    if backend.eq_ignore_ascii_case("mysql") {
        Some(LAST_INSERT_ID_MYSQL)
    } else if backend.eq_ignore_ascii_case("sqlite") {
        Some(LAST_INSERT_ID_SQLITE)
    } else {
        None
    }
}

pub const INSERT_ORDER_DETAIL: Statement = Statement {
    name: "insert_order_detail",
    sql: "INSERT INTO order_details (order_id, product_id, quantity) VALUES (?, ?, ?)",
};

// =============================================================================
// Order Lookup
// =============================================================================

pub const GET_ORDER: Statement = Statement {
    name: "get_order",
    sql: "SELECT id, customer_id, CAST(order_date AS CHAR) AS order_date \
          FROM orders WHERE id = ?",
};

pub const LIST_ORDER_DETAILS: Statement = Statement {
    name: "list_order_details",
    sql: "SELECT order_id, product_id, quantity FROM order_details \
          WHERE order_id = ? ORDER BY product_id",
};
