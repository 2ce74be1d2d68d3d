//! Client Constants
//!
//! Centralized defaults shared by the table engines, the HTTP client and the poller.

/// Default API base URL (overridden by config or `LOGIDASH_API_URL`)
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "LOGIDASH_API_URL";

/// HTTP request timeout
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Rows per page for server-paginated tables
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Quiet interval before a typed search term is committed
pub const SEARCH_DEBOUNCE_MS: u64 = 1000;

/// System status polling interval while a calculation is running
pub const STATUS_POLL_INTERVAL_SECS: u64 = 60;

/// Default number of top performing routes
pub const TOP_ROUTES_LIMIT: u32 = 10;

/// Date format used on the wire (`start`, `end`)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Application identifiers for platform directories
pub const APP_QUALIFIER: &str = "com";
pub const APP_ORGANIZATION: &str = "logidash";
pub const APP_NAME: &str = "logidash";
