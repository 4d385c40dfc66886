//! Error types for the web server.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use orderdesk_db::DbError;
use thiserror::Error;

use crate::views;

/// Errors that end a page request with a non-200 response.
///
/// The order form never produces one of these; its failures render inside
/// the result page.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

/// Converts an `AppError` into an HTTP response.
///
/// The cause is logged; the page only shows a generic message.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Database(db_err) if db_err.is_unavailable() => {
                tracing::error!(error = ?db_err, "Database unavailable.");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "The product catalog is temporarily unavailable.",
                )
            }
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal database error occurred.",
                )
            }
        };

        (status, Html(views::error_page(message))).into_response()
    }
}
