//! The API endpoints URIs.

/// The route that reloads the seed data into the transaction store.
pub const INITIALIZE: &str = "/initialize";
/// The route that lists transactions for a month with search and pagination.
pub const TRANSACTIONS: &str = "/transactions";
/// The route for the sales summary cards for a month.
pub const STATISTICS: &str = "/transactions/statistics";
/// The route for the price range chart data for a month.
pub const BAR_CHART: &str = "/transactions/bar-chart";
/// The route for the category chart data for a month.
pub const PIE_CHART: &str = "/transactions/pie-chart";
/// The route that returns the statistics and both charts in one response.
pub const COMBINED: &str = "/transactions/combined";
