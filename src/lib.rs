//! Crunchyroll Exporter Library
//!
//! A Rust library for exporting a Crunchyroll account's watchlist, watch
//! history and crunchylists to CSV, with user-selected columns and series
//! titles filled in from a locally cached catalog.

pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod prelude;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};

#[cfg(test)]
mod tests {
    use super::*;
    use constants::*;

    #[test]
    fn test_constants_accessible() {
        assert_eq!(ENV_TOKEN, "CRUNCHYROLL_TOKEN");
        assert!(API_BASE_URL.starts_with("https://"));
        assert!(USER_AGENT.contains("Mozilla"));
        assert!(MAX_RETRIES > 0);
    }

    #[test]
    fn test_error_types() {
        let auth_error = errors::AuthError::Rejected {
            endpoint: "/accounts/v1/me".to_string(),
            status: 401,
        };
        let app_error = AppError::Auth(auth_error);

        assert_eq!(app_error.category(), "authentication");
        assert_ne!(app_error.exit_code(), 0);
    }
}
