//! This modules defines the common functionality for paging data.

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of transactions per page when not specified in a request.
    pub default_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
        }
    }
}

impl PaginationConfig {
    /// Resolve the raw `page` and `perPage` query values into concrete numbers.
    ///
    /// Missing, malformed, zero, or negative values fall back to the defaults
    /// so that junk paging input never fails a request.
    pub fn resolve(&self, page: Option<&str>, per_page: Option<&str>) -> (u64, u64) {
        (
            parse_positive(page).unwrap_or(self.default_page),
            parse_positive(per_page).unwrap_or(self.default_page_size),
        )
    }
}

fn parse_positive(value: Option<&str>) -> Option<u64> {
    value?.trim().parse::<u64>().ok().filter(|&number| number > 0)
}
