//! Fetches seed data for the transaction store from the third party API.

use serde::Deserialize;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{Error, models::NewTransaction};

/// The URL of the third party API that provides the product transaction seed
/// data.
pub const DEFAULT_SEED_URL: &str =
    "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

/// Downloads product transaction records from the seed data API.
#[derive(Debug, Clone)]
pub struct SeedClient {
    http_client: reqwest::Client,
    source_url: String,
}

impl SeedClient {
    /// Create a client that fetches seed data from `source_url`.
    pub fn new(source_url: &str) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            source_url: source_url.to_string(),
        }
    }

    /// Download and decode the seed data.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::SeedFetch] if the request fails, the server responds with an
    ///   error status, or the body is not valid JSON,
    /// - [Error::InvalidDateFormat] if a record's sale date is not a valid
    ///   RFC 3339 date-time,
    /// - or [Error::InvalidPrice] if a record has a negative price.
    pub async fn fetch(&self) -> Result<Vec<NewTransaction>, Error> {
        let response = self
            .http_client
            .get(&self.source_url)
            .send()
            .await
            .map_err(|error| Error::SeedFetch(error.to_string()))?
            .error_for_status()
            .map_err(|error| Error::SeedFetch(error.to_string()))?;

        let records = response
            .json::<Vec<SeedRecord>>()
            .await
            .map_err(|error| Error::SeedFetch(error.to_string()))?;

        records.into_iter().map(NewTransaction::try_from).collect()
    }
}

/// A raw record from the seed data API.
///
/// The upstream data set spells some field names differently across revisions,
/// so the aliases accept both forms. Fields this application does not use,
/// such as the record ID and product image URL, are ignored.
#[derive(Debug, Deserialize)]
struct SeedRecord {
    #[serde(alias = "product_title")]
    title: String,
    description: String,
    price: f64,
    #[serde(rename = "dateOfSale", alias = "date_of_sale")]
    date_of_sale: String,
    #[serde(alias = "soldStatus", alias = "sold_status")]
    sold: bool,
    category: String,
}

impl TryFrom<SeedRecord> for NewTransaction {
    type Error = Error;

    fn try_from(record: SeedRecord) -> Result<Self, Self::Error> {
        let date_of_sale = OffsetDateTime::parse(&record.date_of_sale, &Rfc3339).map_err(|error| {
            Error::InvalidDateFormat(error.to_string(), record.date_of_sale.clone())
        })?;

        NewTransaction::new(
            record.title,
            record.description,
            record.price,
            date_of_sale,
            record.sold,
            record.category,
        )
    }
}

#[cfg(test)]
mod seed_client_tests {
    use time::Month;

    use crate::Error;

    use super::SeedClient;

    #[tokio::test]
    async fn fetch_decodes_seed_records() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/seed.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[
                    {
                        "id": 1,
                        "title": "Wool Jumper",
                        "price": 329.85,
                        "description": "A warm jumper",
                        "category": "clothing",
                        "image": "https://example.com/jumper.jpg",
                        "sold": true,
                        "dateOfSale": "2021-11-27T20:29:54+05:30"
                    }
                ]"#,
            )
            .create_async()
            .await;

        let client = SeedClient::new(&format!("{}/seed.json", server.url()));
        let transactions = client.fetch().await.expect("Could not fetch seed data");

        mock.assert_async().await;
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].title, "Wool Jumper");
        assert_eq!(transactions[0].price, 329.85);
        assert_eq!(transactions[0].date_of_sale.month(), Month::November);
        assert!(transactions[0].sold);
        assert_eq!(transactions[0].category, "clothing");
    }

    #[tokio::test]
    async fn fetch_accepts_alternate_field_spellings() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/seed.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[
                    {
                        "product_title": "Toaster",
                        "price": 49.99,
                        "description": "Two slots",
                        "category": "appliances",
                        "sold_status": false,
                        "date_of_sale": "2022-06-01T00:00:00Z"
                    }
                ]"#,
            )
            .create_async()
            .await;

        let client = SeedClient::new(&format!("{}/seed.json", server.url()));
        let transactions = client.fetch().await.expect("Could not fetch seed data");

        assert_eq!(transactions[0].title, "Toaster");
        assert!(!transactions[0].sold);
        assert_eq!(transactions[0].date_of_sale.month(), Month::June);
    }

    #[tokio::test]
    async fn fetch_fails_on_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/seed.json")
            .with_status(500)
            .create_async()
            .await;

        let client = SeedClient::new(&format!("{}/seed.json", server.url()));
        let result = client.fetch().await;

        assert!(matches!(result, Err(Error::SeedFetch(_))));
    }

    #[tokio::test]
    async fn fetch_fails_on_invalid_date() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/seed.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[
                    {
                        "title": "Wool Jumper",
                        "price": 329.85,
                        "description": "A warm jumper",
                        "category": "clothing",
                        "sold": true,
                        "dateOfSale": "27/11/2021"
                    }
                ]"#,
            )
            .create_async()
            .await;

        let client = SeedClient::new(&format!("{}/seed.json", server.url()));
        let result = client.fetch().await;

        assert!(matches!(result, Err(Error::InvalidDateFormat(_, _))));
    }

    #[tokio::test]
    async fn fetch_fails_on_negative_price() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/seed.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[
                    {
                        "title": "Wool Jumper",
                        "price": -1.0,
                        "description": "A warm jumper",
                        "category": "clothing",
                        "sold": true,
                        "dateOfSale": "2021-11-27T20:29:54+05:30"
                    }
                ]"#,
            )
            .create_async()
            .await;

        let client = SeedClient::new(&format!("{}/seed.json", server.url()));
        let result = client.fetch().await;

        assert_eq!(result, Err(Error::InvalidPrice(-1.0)));
    }
}
