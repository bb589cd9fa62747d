//! Implements a struct that holds the state of the REST server.

use std::marker::{Send, Sync};

use crate::{pagination::PaginationConfig, seed::SeedClient, stores::TransactionStore};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState<T>
where
    T: TransactionStore + Send + Sync,
{
    /// The client for fetching seed data from the third party API.
    pub seed_client: SeedClient,
    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,
    /// The store for managing product [transactions](crate::models::Transaction).
    pub transaction_store: T,
}

impl<T> AppState<T>
where
    T: TransactionStore + Send + Sync,
{
    /// Create a new [AppState].
    pub fn new(
        seed_client: SeedClient,
        pagination_config: PaginationConfig,
        transaction_store: T,
    ) -> Self {
        Self {
            seed_client,
            pagination_config,
            transaction_store,
        }
    }
}
