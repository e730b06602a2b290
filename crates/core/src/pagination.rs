//! List pagination defaults and clamping helpers.
//!
//! Lives in `core` (zero internal deps) so both the repository and API
//! layers share one definition of page bounds.

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum number of rows per page.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Clamp a user-provided page size to valid bounds.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_PAGE_SIZE).max(1).min(MAX_PAGE_SIZE)
}

/// Clamp a user-provided 1-based page number.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Row offset for a 1-based page number and page size.
pub fn page_offset(page: i64, limit: i64) -> i64 {
    (page - 1) * limit
}

/// Total page count for a row count and page size.
pub fn page_count(total: i64, limit: i64) -> i64 {
    if total == 0 { 0 } else { (total + limit - 1) / limit }
}
