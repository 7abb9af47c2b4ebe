//! HTTP client configuration and building logic
//!
//! This module handles the configuration and construction of the reqwest
//! client used against the Crunchyroll web API.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::auth::BearerToken;
use crate::constants::{api, http, limits};
use crate::errors::{AppError, AuthError, ConfigError, Result};

/// Configuration for the API client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API base URL
    pub base_url: String,
    /// Request timeout
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Connect timeout
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
    /// Retries after the first attempt for transient failures
    pub max_retries: u32,
    /// Base delay for exponential backoff
    #[serde(with = "humantime_serde")]
    pub retry_base_delay: Duration,
    /// Rate limit (requests per second)
    pub rate_limit_rps: u32,
    /// Items requested per page
    pub page_size: u32,
    /// Maximum pages followed for one listing
    pub max_pages: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: api::BASE_URL.to_string(),
            request_timeout: http::DEFAULT_TIMEOUT,
            connect_timeout: http::CONNECT_TIMEOUT,
            max_retries: limits::MAX_RETRIES,
            retry_base_delay: limits::RETRY_BASE_DELAY,
            rate_limit_rps: limits::DEFAULT_RATE_LIMIT_RPS,
            page_size: limits::DEFAULT_PAGE_SIZE,
            max_pages: limits::MAX_PAGES,
        }
    }
}

impl ClientConfig {
    /// Check values that would otherwise fail deep inside the client
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first bad field.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if url::Url::parse(&self.base_url).is_err() {
            return Err(invalid("base_url", &self.base_url, "Must be an absolute URL"));
        }
        if self.rate_limit_rps == 0 {
            return Err(invalid("rate_limit_rps", "0", "Rate limit must be non-zero"));
        }
        if self.page_size == 0 {
            return Err(invalid("page_size", "0", "Page size must be non-zero"));
        }
        if self.max_pages == 0 {
            return Err(invalid("max_pages", "0", "At least one page must be allowed"));
        }
        Ok(())
    }

    /// Builds the HTTP client carrying the token on every request
    pub fn build_http_client(&self, token: &BearerToken) -> Result<Client> {
        let mut authorization = HeaderValue::from_str(token.header_value()).map_err(|_| {
            ConfigError::MalformedToken {
                reason: "the token is not a valid header value".to_string(),
            }
        })?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));

        Client::builder()
            .default_headers(headers)
            .user_agent(http::USER_AGENT)
            .timeout(self.request_timeout)
            .connect_timeout(self.connect_timeout)
            .build()
            .map_err(|e| AppError::Auth(AuthError::Client(e)))
    }
}

fn invalid(field: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, api::BASE_URL);
        assert_eq!(config.max_retries, limits::MAX_RETRIES);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_values() {
        let config = ClientConfig {
            rate_limit_rps: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "rate_limit_rps"
        ));

        let config = ClientConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_http_client_creation() {
        let token = BearerToken::parse("Bearer abc").unwrap();
        let result = ClientConfig::default().build_http_client(&token);
        assert!(result.is_ok());
    }

    #[test]
    fn test_durations_deserialize_from_humantime() {
        let config: ClientConfig =
            toml::from_str("request_timeout = \"45s\"\nretry_base_delay = \"250ms\"").unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(45));
        assert_eq!(config.retry_base_delay, Duration::from_millis(250));
        assert_eq!(config.page_size, limits::DEFAULT_PAGE_SIZE);
    }
}
