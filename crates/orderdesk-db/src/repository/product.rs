//! # Product Repository
//!
//! Catalog reads. The product table is maintained elsewhere; OrderDesk only
//! lists it.

use std::str::FromStr;

use orderdesk_core::{Product, ProductId};
use rust_decimal::Decimal;
use sqlx::FromRow;
use tracing::debug;

use crate::error::DbResult;
use crate::executor::{statement_failed, QueryExecutor};
use crate::statements::LIST_PRODUCTS;

/// Row shape of [`LIST_PRODUCTS`]. The price arrives as text.
#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    product_name: String,
    list_price: String,
}

impl TryFrom<ProductRow> for Product {
    type Error = rust_decimal::Error;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let raw = row.list_price.trim();
        let list_price = Decimal::from_str(raw).or_else(|_| Decimal::from_scientific(raw))?;

        Ok(Product {
            id: ProductId::new(row.id),
            name: row.product_name,
            list_price,
        })
    }
}

/// Repository for catalog reads.
///
/// ## Usage
/// ```rust,ignore
/// let products = db.products().list_products().await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    executor: QueryExecutor,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(executor: QueryExecutor) -> Self {
        ProductRepository { executor }
    }

    /// Lists every product with id, name and list price, ordered by id.
    ///
    /// An empty table yields an empty list. A price that cannot be read as a
    /// decimal fails the whole listing.
    pub async fn list_products(&self) -> DbResult<Vec<Product>> {
        let rows: Vec<ProductRow> = self.executor.fetch_as(&LIST_PRODUCTS, &[]).await?;

        let products = rows
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|cause| statement_failed(&LIST_PRODUCTS, sqlx::Error::Decode(Box::new(cause))))?;

        debug!(count = products.len(), "Products listed");
        Ok(products)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::schema;
    use crate::test_support::test_database;

    #[tokio::test]
    async fn test_list_products_returns_catalog_in_id_order() {
        let db = test_database().await;

        let products = db.products().list_products().await.unwrap();

        assert_eq!(products.len(), schema::SAMPLE_PRODUCTS.len());
        assert_eq!(products[0].id, ProductId::new(1));
        assert_eq!(products[0].name, "Trek 820 - 2016");
        assert_eq!(products[0].list_price, Decimal::from_str("379.99").unwrap());
        assert!(products.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[tokio::test]
    async fn test_list_products_is_repeatable_and_balanced() {
        let db = test_database().await;

        let first = db.products().list_products().await.unwrap();
        let second = db.products().list_products().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(db.pool().outstanding(), 0);
    }

    #[tokio::test]
    async fn test_empty_catalog() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        schema::install_dev_schema(db.pool()).await.unwrap();

        let products = db.products().list_products().await.unwrap();
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_missing_table_is_query_error() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db.products().list_products().await.unwrap_err();
        assert_eq!(err.to_string(), "Error executing sql query");
        assert_eq!(db.pool().outstanding(), 0);
    }

    #[test]
    fn test_price_parsing() {
        let row = ProductRow {
            id: 9,
            product_name: "Whole".to_string(),
            list_price: "10".to_string(),
        };
        assert_eq!(Product::try_from(row).unwrap().list_price, Decimal::from(10));

        let row = ProductRow {
            id: 9,
            product_name: "Bad".to_string(),
            list_price: "n/a".to_string(),
        };
        assert!(Product::try_from(row).is_err());
    }
}
