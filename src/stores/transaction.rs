//! Defines the transaction store trait.

use serde::{Deserialize, Serialize};
use time::Month;

use crate::{
    Error,
    models::{NewTransaction, Transaction},
};

/// Handles the storage and retrieval of product sale transactions.
pub trait TransactionStore {
    /// Replace the contents of the store with `transactions`.
    ///
    /// The replacement is applied atomically, either every transaction is
    /// inserted or the store keeps its previous contents. IDs restart from one
    /// so repeated seeding produces identical records.
    fn replace_all(
        &mut self,
        transactions: Vec<NewTransaction>,
    ) -> Result<Vec<Transaction>, Error>;

    /// Retrieve every transaction whose sale date falls in `month`, regardless
    /// of year.
    fn get_by_month(&self, month: Month) -> Result<Vec<Transaction>, Error>;

    /// Retrieve one page of transactions in the way defined by `query`.
    fn get_page(&self, query: TransactionQuery) -> Result<TransactionPage, Error>;

    /// Get the total number of transactions in the store.
    fn count(&self) -> Result<u32, Error>;
}

/// Defines how transactions should be fetched from [TransactionStore::get_page].
#[derive(Debug)]
pub struct TransactionQuery {
    /// Include transactions whose sale date falls in this month, regardless of
    /// year.
    pub month: Month,
    /// Keep transactions whose title, description, or price contains this
    /// text, ignoring case. An empty string keeps everything.
    pub search: String,
    /// Selects up to the first N (`limit`) matching transactions.
    pub limit: u64,
    /// Skip this many matching transactions before taking the page.
    pub offset: u64,
}

/// One page of transactions plus the total count the pagination controls need.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionPage {
    /// The transactions within the requested page.
    pub transactions: Vec<Transaction>,
    /// How many transactions match the query across all pages.
    pub total: u64,
}
