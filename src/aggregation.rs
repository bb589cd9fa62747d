//! Aggregate projections over one month of transactions.
//!
//! Provides the functions behind the dashboard's summary cards and charts:
//! sale statistics, a price-range histogram, and a category breakdown. All
//! three are pure functions over the same month-filtered transaction slice.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::Transaction;

/// The bounded price bands of the bar chart, as (label, upper bound) pairs.
///
/// The first band covers prices from zero to its bound, every other band
/// covers prices above the previous bound up to and including its own. Prices
/// above the last bound fall into [TOP_PRICE_BAND].
const PRICE_BANDS: [(&str, f64); 9] = [
    ("0-100", 100.0),
    ("101-200", 200.0),
    ("201-300", 300.0),
    ("301-400", 400.0),
    ("401-500", 500.0),
    ("501-600", 600.0),
    ("601-700", 700.0),
    ("701-800", 800.0),
    ("801-900", 900.0),
];

/// The label of the unbounded price band.
const TOP_PRICE_BAND: &str = "901-above";

/// The summary statistics for one month of sales.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStatistics {
    /// The summed price of the products that sold.
    pub total_sale_amount: f64,
    /// How many products sold.
    pub total_sold_items: u64,
    /// How many products did not sell.
    pub total_not_sold_items: u64,
}

/// Calculates the sale statistics for `transactions`.
///
/// Only sold items count towards the total sale amount. Returns zeros for an
/// empty slice.
pub fn monthly_statistics(transactions: &[Transaction]) -> MonthlyStatistics {
    let mut statistics = MonthlyStatistics {
        total_sale_amount: 0.0,
        total_sold_items: 0,
        total_not_sold_items: 0,
    };

    for transaction in transactions {
        if transaction.sold {
            statistics.total_sale_amount += transaction.price;
            statistics.total_sold_items += 1;
        } else {
            statistics.total_not_sold_items += 1;
        }
    }

    statistics
}

/// Counts `transactions` into the fixed price bands used by the bar chart.
///
/// Every band label is present in the result, including bands that counted
/// nothing, so the chart always renders the same x-axis.
pub fn price_histogram(transactions: &[Transaction]) -> BTreeMap<String, u64> {
    let mut bands: BTreeMap<String, u64> = PRICE_BANDS
        .iter()
        .map(|(label, _)| (label.to_string(), 0))
        .chain([(TOP_PRICE_BAND.to_string(), 0)])
        .collect();

    for transaction in transactions {
        *bands
            .entry(price_band_label(transaction.price).to_string())
            .or_insert(0) += 1;
    }

    bands
}

/// The histogram band that `price` falls into.
fn price_band_label(price: f64) -> &'static str {
    for (label, upper_bound) in PRICE_BANDS {
        if price <= upper_bound {
            return label;
        }
    }

    TOP_PRICE_BAND
}

/// Counts `transactions` by category for the pie chart.
///
/// Unlike the price bands this is an open label set, a category only appears
/// when at least one transaction has it.
pub fn category_breakdown(transactions: &[Transaction]) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();

    for transaction in transactions {
        *counts.entry(transaction.category.clone()).or_insert(0) += 1;
    }

    counts
}
