//! The route handler for listing a month's transactions.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{
    Error,
    month::parse_month_param,
    state::AppState,
    stores::{TransactionPage, TransactionQuery, TransactionStore},
};

/// The query parameters accepted by the transaction listing route.
///
/// Everything is taken as an optional string so that a malformed value cannot
/// reject the request before the handler gets to apply its defaults.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    month: Option<String>,
    search: Option<String>,
    page: Option<String>,
    per_page: Option<String>,
}

/// A route handler for listing the transactions of a month.
///
/// Applies the search filter and pagination from `params`, and reports the
/// total number of matching records alongside the page.
///
/// # Errors
/// This function will return a:
/// - [Error::MissingMonth] or [Error::InvalidMonth] if the month parameter is
///   absent or does not name a month,
/// - or [Error::SqlError] if there is an unexpected SQL error.
pub async fn get_transactions<T>(
    State(state): State<AppState<T>>,
    Query(params): Query<ListParams>,
) -> Result<Json<TransactionPage>, Error>
where
    T: TransactionStore + Send + Sync,
{
    let month = parse_month_param(params.month.as_deref())?;
    let (page, per_page) = state
        .pagination_config
        .resolve(params.page.as_deref(), params.per_page.as_deref());

    let transaction_page = state.transaction_store.get_page(TransactionQuery {
        month,
        search: params.search.unwrap_or_default(),
        limit: per_page,
        offset: page.saturating_sub(1).saturating_mul(per_page),
    })?;

    Ok(Json(transaction_page))
}

#[cfg(test)]
mod get_transactions_tests {
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::Value;
    use time::{Date, Month, OffsetDateTime, Time};

    use crate::{
        endpoints,
        models::NewTransaction,
        routing::build_router,
        stores::{TransactionPage, TransactionStore, sqlite::create_app_state},
    };

    fn new_transaction(
        title: &str,
        description: &str,
        price: f64,
        month: Month,
        sold: bool,
        category: &str,
    ) -> NewTransaction {
        NewTransaction::new(
            title.to_string(),
            description.to_string(),
            price,
            OffsetDateTime::new_utc(
                Date::from_calendar_date(2022, month, 10).unwrap(),
                Time::MIDNIGHT,
            ),
            sold,
            category.to_string(),
        )
        .unwrap()
    }

    fn create_test_server(transactions: Vec<NewTransaction>) -> TestServer {
        let db_connection =
            Connection::open_in_memory().expect("Could not open database in memory.");
        let mut state =
            create_app_state(db_connection, "http://localhost/seed.json", Default::default())
                .expect("Could not create app state.");

        state
            .transaction_store
            .replace_all(transactions)
            .expect("Could not seed the transaction store.");

        TestServer::new(build_router(state))
    }

    fn default_seed() -> Vec<NewTransaction> {
        vec![
            new_transaction("Wool Jumper", "A warm jumper", 329.85, Month::March, true, "clothing"),
            new_transaction("Wool Socks", "Thick socks", 12.5, Month::March, true, "clothing"),
            new_transaction("Toaster", "Two slots", 49.99, Month::March, false, "appliances"),
            new_transaction("Desk Lamp", "Adjustable arm", 25.0, Month::April, true, "lighting"),
        ]
    }

    #[tokio::test]
    async fn lists_month_with_default_pagination() {
        let server = create_test_server(default_seed());

        let response = server
            .get(endpoints::TRANSACTIONS)
            .add_query_param("month", "March")
            .await;

        response.assert_status_ok();
        let page = response.json::<TransactionPage>();
        assert_eq!(page.total, 3);
        assert_eq!(page.transactions.len(), 3);
        assert!(
            page.transactions
                .iter()
                .all(|transaction| transaction.date_of_sale.month() == Month::March)
        );
    }

    #[tokio::test]
    async fn serializes_transactions_in_camel_case() {
        let server = create_test_server(default_seed());

        let response = server
            .get(endpoints::TRANSACTIONS)
            .add_query_param("month", "March")
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        let first = &body["transactions"][0];
        assert!(first["dateOfSale"].is_string());
        assert!(first["soldStatus"].is_boolean());
        assert!(body["total"].is_number());
    }

    #[tokio::test]
    async fn search_filters_page_and_total() {
        let server = create_test_server(default_seed());

        let response = server
            .get(endpoints::TRANSACTIONS)
            .add_query_param("month", "March")
            .add_query_param("search", "wool")
            .await;

        response.assert_status_ok();
        let page = response.json::<TransactionPage>();
        assert_eq!(page.total, 2);
        assert!(
            page.transactions
                .iter()
                .all(|transaction| transaction.title.starts_with("Wool"))
        );
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty_with_same_total() {
        let server = create_test_server(default_seed());

        let response = server
            .get(endpoints::TRANSACTIONS)
            .add_query_param("month", "March")
            .add_query_param("page", "5")
            .add_query_param("perPage", "2")
            .await;

        response.assert_status_ok();
        let page = response.json::<TransactionPage>();
        assert!(page.transactions.is_empty());
        assert_eq!(page.total, 3);
    }

    #[tokio::test]
    async fn huge_page_number_returns_empty_page() {
        let server = create_test_server(default_seed());

        let response = server
            .get(endpoints::TRANSACTIONS)
            .add_query_param("month", "March")
            .add_query_param("page", "18446744073709551615")
            .add_query_param("perPage", "10")
            .await;

        response.assert_status_ok();
        let page = response.json::<TransactionPage>();
        assert!(page.transactions.is_empty());
        assert_eq!(page.total, 3);
    }

    #[tokio::test]
    async fn second_page_continues_where_first_left_off() {
        let server = create_test_server(default_seed());

        let response = server
            .get(endpoints::TRANSACTIONS)
            .add_query_param("month", "March")
            .add_query_param("page", "2")
            .add_query_param("perPage", "2")
            .await;

        response.assert_status_ok();
        let page = response.json::<TransactionPage>();
        assert_eq!(page.transactions.len(), 1);
        assert_eq!(page.total, 3);
        assert_eq!(page.transactions[0].title, "Toaster");
    }

    #[tokio::test]
    async fn malformed_pagination_falls_back_to_defaults() {
        let server = create_test_server(default_seed());

        let response = server
            .get(endpoints::TRANSACTIONS)
            .add_query_param("month", "March")
            .add_query_param("page", "abc")
            .add_query_param("perPage", "-3")
            .await;

        response.assert_status_ok();
        let page = response.json::<TransactionPage>();
        assert_eq!(page.transactions.len(), 3);
        assert_eq!(page.total, 3);
    }

    #[tokio::test]
    async fn numeric_month_is_accepted() {
        let server = create_test_server(default_seed());

        let response = server
            .get(endpoints::TRANSACTIONS)
            .add_query_param("month", "3")
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<TransactionPage>().total, 3);
    }

    #[tokio::test]
    async fn missing_month_is_rejected() {
        let server = create_test_server(default_seed());

        let response = server.get(endpoints::TRANSACTIONS).await;

        response.assert_status_bad_request();
        let body = response.json::<Value>();
        assert_eq!(body["error"], "the month query parameter is required");
    }

    #[tokio::test]
    async fn invalid_month_is_rejected() {
        let server = create_test_server(default_seed());

        let response = server
            .get(endpoints::TRANSACTIONS)
            .add_query_param("month", "Marchember")
            .await;

        response.assert_status_bad_request();
        let body = response.json::<Value>();
        assert_eq!(body["error"], "\"Marchember\" is not a valid month");
    }
}
