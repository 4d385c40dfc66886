use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, Redirect},
    Form,
};
use orderdesk_core::form::{parse_order_form, CUSTOMER_FIELD};
use tracing::{info, warn};

use crate::error::AppError;
use crate::views::{self, OrderResult};
use crate::AppState;

/// # GET / (also /index.html)
/// Lists every product with the order form.
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let products = state.db.products().list_products().await?;
    Ok(Html(views::product_list(&products)))
}

/// # POST /order
/// Records the submitted order. Always answers 200; success or failure is
/// carried by the rendered result.
pub async fn submit_order(
    State(state): State<Arc<AppState>>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Html<String> {
    let cust_id = pairs
        .iter()
        .find(|(key, _)| key == CUSTOMER_FIELD)
        .map(|(_, value)| value.clone())
        .unwrap_or_default();

    let result = match parse_order_form(&pairs) {
        Ok(request) => match state.db.orders().submit(&request).await {
            Ok(order_id) => {
                info!(%order_id, customer_id = %request.customer_id, "Order placed");
                OrderResult::placed(cust_id, order_id)
            }
            Err(err) => OrderResult::failed(cust_id, err.to_string()),
        },
        Err(err) => {
            warn!(error = %err, "Rejected order form");
            OrderResult::failed(cust_id, err.to_string())
        }
    };

    Html(views::order_result(&result))
}

/// Anything that is neither a route nor a static file.
pub async fn redirect_home() -> Redirect {
    Redirect::to("/")
}
