//! The route handler that loads the seed data into the transaction store.

use axum::extract::State;

use crate::{Error, state::AppState, stores::TransactionStore};

/// The response body sent after the store has been seeded.
const SEED_CONFIRMATION: &str = "Database initialized with seed data";

/// A route handler that downloads the seed data and replaces the contents of
/// the transaction store with it.
///
/// Repeating the request replaces the records again, so the store always ends
/// up with exactly one copy of the seed data. If the download or the
/// replacement fails the store keeps its previous contents.
///
/// # Errors
/// This function will return a:
/// - [Error::SeedFetch] if the seed data could not be downloaded or decoded,
/// - [Error::InvalidDateFormat] or [Error::InvalidPrice] if the seed data
///   contains an invalid record,
/// - or [Error::SqlError] if there is an unexpected SQL error.
pub async fn get_initialize<T>(State(state): State<AppState<T>>) -> Result<&'static str, Error>
where
    T: TransactionStore + Send + Sync,
{
    let transactions = state.seed_client.fetch().await?;

    let mut transaction_store = state.transaction_store;
    let inserted = transaction_store.replace_all(transactions)?;

    tracing::info!("seeded the transaction store with {} records", inserted.len());

    Ok(SEED_CONFIRMATION)
}
