//! # Order Form Parsing
//!
//! Turns the raw `application/x-www-form-urlencoded` pairs of the order form
//! into a strongly-typed [`OrderRequest`].
//!
//! ## Form Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  custId=7 & product=3 & product=5 & qty3=2 & qty5=1                    │
//! │       │          │           │          │        │                      │
//! │       │          └─────┬─────┘          └────┬───┘                      │
//! │       ▼                ▼                     ▼                          │
//! │  CustomerId(7)   [3, 5] (order kept)   qty<productId> lookup            │
//! │                                                                         │
//! │  OrderRequest { customer_id: 7, lines: [(3, 2), (5, 1)] }              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `product` may appear zero, one or many times (`product[]` is accepted as
//! well). Zero selected products yields a request with no lines.

use crate::error::FormError;
use crate::types::{CustomerId, OrderLine, OrderRequest, ProductId};

/// Form field carrying the customer id.
pub const CUSTOMER_FIELD: &str = "custId";

/// Form field repeated once per selected product.
pub const PRODUCT_FIELD: &str = "product";

/// Prefix of the per-product quantity field (`qty<productId>`).
pub const QUANTITY_PREFIX: &str = "qty";

/// Name of the quantity field for a product as rendered in the form.
pub fn quantity_field(product_id: ProductId) -> String {
    format!("{QUANTITY_PREFIX}{product_id}")
}

/// Parses decoded form pairs into an [`OrderRequest`].
///
/// ## Rules
/// - `custId` must be an integer
/// - every `product` value must be an integer
/// - every selected product needs an integer `qty<productId>`
/// - quantities are not range-checked (zero and negatives pass through)
///
/// ## Example
/// ```rust
/// use orderdesk_core::form::parse_order_form;
///
/// let pairs = vec![
///     ("custId".to_string(), "7".to_string()),
///     ("product".to_string(), "5".to_string()),
///     ("qty5".to_string(), "1".to_string()),
/// ];
/// let request = parse_order_form(&pairs).unwrap();
/// assert_eq!(request.lines[0].quantity, 1);
/// ```
pub fn parse_order_form(pairs: &[(String, String)]) -> Result<OrderRequest, FormError> {
    let customer_id = parse_customer_id(field(pairs, CUSTOMER_FIELD))?;

    let lines = pairs
        .iter()
        .filter(|(key, _)| is_product_key(key))
        .map(|(_, raw)| parse_line(pairs, raw))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(OrderRequest { customer_id, lines })
}

/// Parses the `custId` value.
pub fn parse_customer_id(raw: Option<&str>) -> Result<CustomerId, FormError> {
    let raw = raw.unwrap_or_default();
    raw.trim()
        .parse::<i64>()
        .map(CustomerId::new)
        .map_err(|_| FormError::InvalidCustomerId {
            value: raw.to_string(),
        })
}

fn parse_line(pairs: &[(String, String)], raw_product: &str) -> Result<OrderLine, FormError> {
    let product_id = raw_product
        .trim()
        .parse::<i64>()
        .map(ProductId::new)
        .map_err(|_| FormError::InvalidProductId {
            value: raw_product.to_string(),
        })?;

    // The form names the field after the product value exactly as rendered.
    let qty_key = format!("{QUANTITY_PREFIX}{}", raw_product.trim());
    let raw_qty = field(pairs, &qty_key).ok_or(FormError::MissingQuantity {
        product_id: product_id.get(),
    })?;

    let quantity = raw_qty
        .trim()
        .parse::<i64>()
        .map_err(|_| FormError::InvalidQuantity {
            product_id: product_id.get(),
            value: raw_qty.to_string(),
        })?;

    Ok(OrderLine {
        product_id,
        quantity,
    })
}

fn is_product_key(key: &str) -> bool {
    key == PRODUCT_FIELD || key.strip_suffix("[]") == Some(PRODUCT_FIELD)
}

/// First value submitted for `name`.
fn field<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

// =============================================================================
// Unit Tests
// =============================================================================
