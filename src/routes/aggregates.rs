//! The route handlers for the dashboard's summary cards and charts.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    aggregation::{MonthlyStatistics, category_breakdown, monthly_statistics, price_histogram},
    models::Transaction,
    month::parse_month_param,
    state::AppState,
    stores::TransactionStore,
};

/// The query parameters accepted by the aggregate routes.
#[derive(Debug, Deserialize)]
pub struct MonthParam {
    month: Option<String>,
}

/// The statistics and both chart projections for one month.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedAggregates {
    /// The summary card totals.
    pub statistics: MonthlyStatistics,
    /// The number of transactions per price range.
    pub bar_chart: BTreeMap<String, u64>,
    /// The number of transactions per category.
    pub pie_chart: BTreeMap<String, u64>,
}

/// Fetch the transactions of the month named in `params`, across all years.
fn month_transactions<T>(
    state: &AppState<T>,
    params: &MonthParam,
) -> Result<Vec<Transaction>, Error>
where
    T: TransactionStore + Send + Sync,
{
    let month = parse_month_param(params.month.as_deref())?;

    state.transaction_store.get_by_month(month)
}

/// A route handler for the sales summary of a month.
///
/// # Errors
/// This function will return a:
/// - [Error::MissingMonth] or [Error::InvalidMonth] if the month parameter is
///   absent or does not name a month,
/// - or [Error::SqlError] if there is an unexpected SQL error.
pub async fn get_statistics<T>(
    State(state): State<AppState<T>>,
    Query(params): Query<MonthParam>,
) -> Result<Json<MonthlyStatistics>, Error>
where
    T: TransactionStore + Send + Sync,
{
    let transactions = month_transactions(&state, &params)?;

    Ok(Json(monthly_statistics(&transactions)))
}

/// A route handler for the price range chart of a month.
///
/// Every price range appears in the response, including ranges with no
/// transactions.
///
/// # Errors
/// This function will return a:
/// - [Error::MissingMonth] or [Error::InvalidMonth] if the month parameter is
///   absent or does not name a month,
/// - or [Error::SqlError] if there is an unexpected SQL error.
pub async fn get_bar_chart<T>(
    State(state): State<AppState<T>>,
    Query(params): Query<MonthParam>,
) -> Result<Json<BTreeMap<String, u64>>, Error>
where
    T: TransactionStore + Send + Sync,
{
    let transactions = month_transactions(&state, &params)?;

    Ok(Json(price_histogram(&transactions)))
}

/// A route handler for the category chart of a month.
///
/// # Errors
/// This function will return a:
/// - [Error::MissingMonth] or [Error::InvalidMonth] if the month parameter is
///   absent or does not name a month,
/// - or [Error::SqlError] if there is an unexpected SQL error.
pub async fn get_pie_chart<T>(
    State(state): State<AppState<T>>,
    Query(params): Query<MonthParam>,
) -> Result<Json<BTreeMap<String, u64>>, Error>
where
    T: TransactionStore + Send + Sync,
{
    let transactions = month_transactions(&state, &params)?;

    Ok(Json(category_breakdown(&transactions)))
}

/// A route handler that returns the statistics and both charts in one
/// response.
///
/// All three projections are computed from a single snapshot of the month's
/// transactions, so the charts cannot disagree with the summary cards.
///
/// # Errors
/// This function will return a:
/// - [Error::MissingMonth] or [Error::InvalidMonth] if the month parameter is
///   absent or does not name a month,
/// - or [Error::SqlError] if there is an unexpected SQL error.
pub async fn get_combined<T>(
    State(state): State<AppState<T>>,
    Query(params): Query<MonthParam>,
) -> Result<Json<CombinedAggregates>, Error>
where
    T: TransactionStore + Send + Sync,
{
    let transactions = month_transactions(&state, &params)?;

    Ok(Json(CombinedAggregates {
        statistics: monthly_statistics(&transactions),
        bar_chart: price_histogram(&transactions),
        pie_chart: category_breakdown(&transactions),
    }))
}
