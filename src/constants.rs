//! Application constants for the Crunchyroll exporter
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain.

use std::time::Duration;

/// Environment variable names
pub mod env {
    /// Environment variable holding the Crunchyroll bearer token
    pub const TOKEN: &str = "CRUNCHYROLL_TOKEN";
}

/// Authentication-related constants
pub mod auth {
    /// Scheme prefix expected in the `Authorization` header
    pub const BEARER_PREFIX: &str = "Bearer ";
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Browser user agent; the web API rejects unknown agents
    pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

    /// Default HTTP request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
}

/// Rate limiting, retry and pagination limits
pub mod limits {
    use super::Duration;

    /// Default request rate (requests per second)
    pub const DEFAULT_RATE_LIMIT_RPS: u32 = 5;

    /// Maximum retry attempts for transient failures
    pub const MAX_RETRIES: u32 = 3;

    /// Base delay for exponential backoff
    pub const RETRY_BASE_DELAY: Duration = Duration::from_millis(500);

    /// Items requested per page
    pub const DEFAULT_PAGE_SIZE: u32 = 1000;

    /// Upper bound on pages followed for a single listing
    pub const MAX_PAGES: usize = 500;
}

/// Crunchyroll service URLs and endpoint paths
pub mod api {
    /// Web API base URL
    pub const BASE_URL: &str = "https://www.crunchyroll.com";

    /// Public site base used for catalog links
    pub const SITE_URL: &str = "https://www.crunchyroll.com";

    /// Account information endpoint
    pub const ACCOUNT_PATH: &str = "/accounts/v1/me";

    /// Catalog browse endpoint
    pub const BROWSE_PATH: &str = "/content/v2/discover/browse";

    /// Watchlist endpoint for an account
    pub fn watchlist_path(account_id: &str) -> String {
        format!("/content/v2/discover/{}/watchlist", account_id)
    }

    /// Watch history endpoint for an account
    pub fn history_path(account_id: &str) -> String {
        format!("/content/v2/{}/watch-history", account_id)
    }

    /// Custom lists endpoint for an account
    pub fn custom_lists_path(account_id: &str) -> String {
        format!("/content/v2/{}/custom-lists", account_id)
    }

    /// Items of a single custom list
    pub fn custom_list_items_path(account_id: &str, list_id: &str) -> String {
        format!("/content/v2/{}/custom-lists/{}", account_id, list_id)
    }
}

/// Response body keys
pub mod keys {
    /// Key holding the item array
    pub const DATA: &str = "data";

    /// Key holding the next-page cursor
    pub const NEXT_PAGE: &str = "next_page";

    /// Envelope that may carry the cursor
    pub const META: &str = "meta";

    /// Account id in the account response
    pub const ACCOUNT_ID: &str = "account_id";
}

/// File operation constants
pub mod files {
    /// Default location of the catalog reference file
    pub const DEFAULT_CATALOG_FILE: &str = "anime_code.csv";

    /// Project-local configuration file name
    pub const LOCAL_CONFIG_FILE: &str = "crunchyroll-exporter.toml";

    /// Directory name under the user config dir
    pub const CONFIG_DIR_NAME: &str = "crunchyroll-exporter";

    /// Mode given to newly created export files on unix
    pub const OUTPUT_FILE_MODE: u32 = 0o644;

    /// UTF-8 byte-order mark written ahead of CSV output
    pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
}

/// Logging constants
pub mod logging {
    /// Default log level
    pub const DEFAULT_LOG_LEVEL: &str = "warn";
}

/// Locale code to display name mapping used by the catalog export
pub const LANGUAGES: &[(&str, &str)] = &[
    ("ja-JP", "Japanese"),
    ("en-US", "English"),
    ("en-IN", "English (India)"),
    ("id-ID", "Bahasa Indonesia"),
    ("ms-MY", "Bahasa Melayu"),
    ("ca-ES", "Català"),
    ("de-DE", "Deutsch"),
    ("es-419", "Español (América Latina)"),
    ("es-ES", "Español (España)"),
    ("fr-FR", "Français"),
    ("it-IT", "Italiano"),
    ("pl-PL", "Polski"),
    ("pt-BR", "Português (Brasil)"),
    ("pt-PT", "Português (Portugal)"),
    ("vi-VN", "Tiếng Việt"),
    ("tr-TR", "Türkçe"),
    ("ru-RU", "Русский"),
    ("ar-SA", "العربية"),
    ("hi-IN", "हिंदी"),
    ("ta-IN", "தமிழ்"),
    ("te-IN", "తెలుగు"),
    ("zh-CN", "中文 (普通话)"),
    ("zh-HK", "中文 (粵語)"),
    ("zh-TW", "中文 (國語)"),
    ("ko-KR", "한국어"),
    ("th-TH", "ไทย"),
];

// Re-export commonly used constants for convenience
pub use api::BASE_URL as API_BASE_URL;
pub use env::TOKEN as ENV_TOKEN;
pub use http::USER_AGENT;
pub use limits::{DEFAULT_RATE_LIMIT_RPS, MAX_RETRIES};
