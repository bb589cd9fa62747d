//! This file defines the type `Transaction`, the core type of the application.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, models::DatabaseID};

/// A product sale record.
///
/// Records are created in bulk by the seeding operation and are immutable once
/// stored. Field names serialize in the camelCase form the dashboard expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: DatabaseID,
    /// The name of the product that was listed for sale.
    pub title: String,
    /// A text description of the product.
    pub description: String,
    /// The listed price of the product.
    pub price: f64,
    /// When the sale was recorded. Only the month component is used for
    /// filtering.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
    /// Whether the product actually sold.
    #[serde(rename = "soldStatus")]
    pub sold: bool,
    /// The product category label.
    pub category: String,
}

/// A transaction that has been validated but not yet inserted into the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) price: f64,
    pub(crate) date_of_sale: OffsetDateTime,
    pub(crate) sold: bool,
    pub(crate) category: String,
}

impl NewTransaction {
    /// Create a transaction ready for insertion into the store.
    ///
    /// # Errors
    /// This function will return an [Error::InvalidPrice] if `price` is
    /// negative or not a finite number.
    pub fn new(
        title: String,
        description: String,
        price: f64,
        date_of_sale: OffsetDateTime,
        sold: bool,
        category: String,
    ) -> Result<Self, Error> {
        if !price.is_finite() || price < 0.0 {
            return Err(Error::InvalidPrice(price));
        }

        Ok(Self {
            title,
            description,
            price,
            date_of_sale,
            sold,
            category,
        })
    }
}
