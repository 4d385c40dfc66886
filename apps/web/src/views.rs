//! # Views
//!
//! HTML pages rendered by the handlers: the product list with the order
//! form, the order result, and a bare error page.
//!
//! Every dynamic value goes through [`escape`] before it is written.

use std::fmt::Write;

use orderdesk_core::form::{quantity_field, CUSTOMER_FIELD, PRODUCT_FIELD};
use orderdesk_core::{OrderId, Product};

// =============================================================================
// View Models
// =============================================================================

/// What the result page shows after an order submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderResult {
    /// The `custId` exactly as submitted.
    pub cust_id: String,
    pub outcome: Result<OrderId, String>,
}

impl OrderResult {
    pub fn placed(cust_id: impl Into<String>, order_id: OrderId) -> Self {
        OrderResult {
            cust_id: cust_id.into(),
            outcome: Ok(order_id),
        }
    }

    pub fn failed(cust_id: impl Into<String>, error: impl Into<String>) -> Self {
        OrderResult {
            cust_id: cust_id.into(),
            outcome: Err(error.into()),
        }
    }

    pub fn has_error(&self) -> bool {
        self.outcome.is_err()
    }

    /// The error message, empty on success.
    pub fn error(&self) -> &str {
        match &self.outcome {
            Ok(_) => "",
            Err(message) => message,
        }
    }
}

// =============================================================================
// Pages
// =============================================================================

/// Product list with the order form.
pub fn product_list(products: &[Product]) -> String {
    let mut body = String::new();

    body.push_str("<h1>Products</h1>\n");
    body.push_str("<form method=\"post\" action=\"/order\">\n");
    let _ = writeln!(
        body,
        "<p><label>Customer id <input type=\"text\" name=\"{CUSTOMER_FIELD}\" required></label></p>"
    );

    if products.is_empty() {
        body.push_str("<p>No products available.</p>\n");
    } else {
        body.push_str("<table>\n<thead><tr><th></th><th>Product</th><th>List price</th><th>Quantity</th></tr></thead>\n<tbody>\n");
        for product in products {
            let _ = writeln!(
                body,
                "<tr><td><input type=\"checkbox\" name=\"{PRODUCT_FIELD}\" value=\"{id}\"></td>\
                 <td>{name}</td><td class=\"price\">{price}</td>\
                 <td><input type=\"number\" name=\"{qty}\" value=\"1\"></td></tr>",
                id = product.id,
                name = escape(&product.name),
                price = product.list_price.round_dp(2),
                qty = quantity_field(product.id),
            );
        }
        body.push_str("</tbody>\n</table>\n");
    }

    body.push_str("<button type=\"submit\">Place order</button>\n</form>\n");
    layout("Products", &body)
}

/// Result page for an order submission.
pub fn order_result(result: &OrderResult) -> String {
    let mut body = String::new();

    match &result.outcome {
        Ok(order_id) => {
            let _ = writeln!(
                body,
                "<div class=\"result ok\" data-has-error=\"false\">\
                 <h1>Order placed</h1>\
                 <p>Order <strong>#{order_id}</strong> recorded for customer {cust}.</p></div>",
                cust = escape(&result.cust_id),
            );
        }
        Err(message) => {
            let _ = writeln!(
                body,
                "<div class=\"result error\" data-has-error=\"true\">\
                 <h1>Order not placed</h1>\
                 <p class=\"message\">{message}</p>\
                 <p>Customer id: {cust}</p></div>",
                message = escape(message),
                cust = escape(&result.cust_id),
            );
        }
    }

    body.push_str("<p><a href=\"/\">Back to products</a></p>\n");
    layout("Order result", &body)
}

/// Minimal page for read-path failures.
pub fn error_page(message: &str) -> String {
    let body = format!(
        "<h1>Something went wrong</h1>\n<p>{}</p>\n<p><a href=\"/\">Try again</a></p>\n",
        escape(message)
    );
    layout("Error", &body)
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} - OrderDesk</title>\n\
         <link rel=\"stylesheet\" href=\"/css/style.css\">\n</head>\n<body>\n{body}</body>\n</html>\n",
        title = escape(title),
    )
}

/// Escapes text for use in HTML content and attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderdesk_core::ProductId;
    use rust_decimal::Decimal;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<b>"Tom & Jerry's"</b>"#),
            "&lt;b&gt;&quot;Tom &amp; Jerry&#39;s&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_product_list_renders_form_fields() {
        let products = vec![Product {
            id: ProductId::new(3),
            name: "Surly <Wednesday>".to_string(),
            list_price: Decimal::new(99999, 2),
        }];

        let html = product_list(&products);

        assert!(html.contains("name=\"custId\""));
        assert!(html.contains("name=\"product\" value=\"3\""));
        assert!(html.contains("name=\"qty3\""));
        assert!(html.contains("Surly &lt;Wednesday&gt;"));
        assert!(html.contains("999.99"));
    }

    #[test]
    fn test_order_result_pages() {
        let ok = OrderResult::placed("7", OrderId::new(42));
        assert!(!ok.has_error());
        assert_eq!(ok.error(), "");
        assert!(order_result(&ok).contains("#42"));

        let failed = OrderResult::failed("<999>", "Invalid customer id!");
        assert!(failed.has_error());
        let html = order_result(&failed);
        assert!(html.contains("Invalid customer id!"));
        assert!(html.contains("&lt;999&gt;"));
    }
}
