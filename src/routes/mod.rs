//! This module defines the REST API's route handlers.

mod aggregates;
mod initialize;
mod transactions;

pub use aggregates::{get_bar_chart, get_combined, get_pie_chart, get_statistics};
pub use initialize::get_initialize;
pub use transactions::get_transactions;
