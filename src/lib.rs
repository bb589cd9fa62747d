//! Salesboard is the backend for a product sales dashboard.
//!
//! This library provides a REST API that serves the dashboard's data as JSON:
//! a paginated transaction listing with text search, summary statistics, and
//! chart data, all filtered by calendar month. The data set is loaded from a
//! third party seed API.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod aggregation;
mod db;
mod endpoints;
mod models;
mod month;
mod pagination;
mod routes;
mod routing;
mod seed;
mod state;
mod stores;

pub use models::{DatabaseID, NewTransaction, Transaction};
pub use pagination::PaginationConfig;
pub use routing::build_router;
pub use seed::{DEFAULT_SEED_URL, SeedClient};
pub use state::AppState;
pub use stores::{
    TransactionPage, TransactionQuery, TransactionStore,
    sqlite::{SQLAppState, SQLiteTransactionStore, create_app_state},
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The month query parameter was not provided.
    #[error("the month query parameter is required")]
    MissingMonth,

    /// The month query parameter did not name a calendar month.
    ///
    /// Callers should pass in the string that was rejected.
    #[error("\"{0}\" is not a valid month")]
    InvalidMonth(String),

    /// A negative or non-finite number was used as a price.
    #[error("{0} is not a valid price, prices must be non-negative numbers")]
    InvalidPrice(f64),

    /// There was an error parsing or formatting a sale date.
    ///
    /// Callers should pass in the original error as a string and the date
    /// string that caused the error.
    #[error("could not parse sale date-time string \"{1}\": {0}")]
    InvalidDateFormat(String, String),

    /// The seed data could not be downloaded or decoded.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("could not fetch the seed data: {0}")]
    SeedFetch(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::MissingMonth | Error::InvalidMonth(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            Error::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an unexpected error occurred, check the server logs for more details"
                        .to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
