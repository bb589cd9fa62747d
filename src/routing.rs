//! Application router configuration.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;

use crate::{
    AppState, endpoints,
    routes::{
        get_bar_chart, get_combined, get_initialize, get_pie_chart, get_statistics,
        get_transactions,
    },
    stores::TransactionStore,
};

/// Return a router with all the app's routes.
pub fn build_router<T>(state: AppState<T>) -> Router
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(endpoints::INITIALIZE, get(get_initialize::<T>))
        .route(endpoints::TRANSACTIONS, get(get_transactions::<T>))
        .route(endpoints::STATISTICS, get(get_statistics::<T>))
        .route(endpoints::BAR_CHART, get(get_bar_chart::<T>))
        .route(endpoints::PIE_CHART, get(get_pie_chart::<T>))
        .route(endpoints::COMBINED, get(get_combined::<T>))
        .fallback(get_404_not_found)
        .with_state(state)
}

async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"error": "the requested resource could not be found"})),
    )
        .into_response()
}
