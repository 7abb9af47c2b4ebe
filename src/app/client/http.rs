//! Core HTTP operations with rate limiting and retry logic
//!
//! GET requests are idempotent, so network failures (including a body cut
//! short mid-read), HTTP 429 and 5xx responses are retried with exponential
//! backoff. 401/403 abort immediately as authentication failures; other
//! error statuses are surfaced without retrying.

use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use governor::{clock::DefaultClock, state::InMemoryState, state::NotKeyed, Quota, RateLimiter};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use url::Url;

use crate::errors::{AuthError, ConfigError, FetchError, ParseError, Result};

/// HTTP operations handler with resilience patterns
#[derive(Debug)]
pub struct HttpHandler {
    client: Client,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    max_retries: u32,
    retry_base_delay: Duration,
    requests_sent: AtomicU64,
}

impl HttpHandler {
    /// Creates a new HttpHandler with the given client and policy
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the rate limit is zero
    pub fn new(
        client: Client,
        rate_limit_rps: u32,
        max_retries: u32,
        retry_base_delay: Duration,
    ) -> Result<Self> {
        let rate_limiter = Self::build_rate_limiter(rate_limit_rps)?;
        Ok(Self {
            client,
            rate_limiter,
            max_retries,
            retry_base_delay,
            requests_sent: AtomicU64::new(0),
        })
    }

    /// Builds the rate limiter with the specified rate limit
    fn build_rate_limiter(
        rate_limit_rps: u32,
    ) -> std::result::Result<RateLimiter<NotKeyed, InMemoryState, DefaultClock>, ConfigError> {
        let rps = NonZeroU32::new(rate_limit_rps).ok_or_else(|| ConfigError::InvalidValue {
            field: "rate_limit_rps".to_string(),
            value: rate_limit_rps.to_string(),
            reason: "Rate limit must be non-zero".to_string(),
        })?;
        Ok(RateLimiter::direct(Quota::per_second(rps)))
    }

    /// Backoff before retry number `retry` (1-based)
    fn backoff_delay(&self, retry: u32) -> Duration {
        self.retry_base_delay
            .saturating_mul(2_u32.saturating_pow(retry.saturating_sub(1)))
    }

    /// GET `url` and parse the body as JSON
    ///
    /// # Errors
    ///
    /// - `AuthError::Rejected` on 401/403
    /// - `FetchError::RetriesExhausted` when transient failures outlast the
    ///   retry budget
    /// - `FetchError::Status` for other non-2xx statuses
    /// - `ParseError::Json` when the body is not JSON
    pub async fn get_json(&self, url: &Url) -> Result<Value> {
        let endpoint = url.path().to_string();
        let mut retries = 0;
        let mut last_status: Option<u16> = None;

        loop {
            self.rate_limiter.until_ready().await;
            self.requests_sent.fetch_add(1, Ordering::Relaxed);
            tracing::debug!("GET {}", url);

            let failure = match self.client.get(url.as_str()).send().await {
                Ok(response) => {
                    let status = response.status();

                    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                        tracing::error!("Token rejected by {} (HTTP {})", endpoint, status);
                        return Err(AuthError::Rejected {
                            endpoint,
                            status: status.as_u16(),
                        }
                        .into());
                    }

                    if !status.is_success() && !is_transient(status) {
                        return Err(FetchError::Status {
                            endpoint,
                            status: status.as_u16(),
                        }
                        .into());
                    }

                    last_status = Some(status.as_u16());
                    if status.is_success() {
                        // Body read failures count as network failures
                        match response.text().await {
                            Ok(text) => {
                                return serde_json::from_str(&text).map_err(|source| {
                                    ParseError::Json {
                                        endpoint: endpoint.clone(),
                                        source,
                                    }
                                    .into()
                                });
                            }
                            Err(e) => format!("reading body failed: {}", e),
                        }
                    } else {
                        format!("HTTP {}", status)
                    }
                }
                Err(e) => e.to_string(),
            };

            if retries >= self.max_retries {
                tracing::error!(
                    "Request to {} failed after {} retries: {}",
                    endpoint,
                    self.max_retries,
                    failure
                );
                return Err(FetchError::RetriesExhausted {
                    endpoint,
                    attempts: retries + 1,
                    last_status,
                }
                .into());
            }

            retries += 1;
            let delay = self.backoff_delay(retries);
            tracing::warn!(
                "Request to {} failed (attempt {}/{}): {}. Retrying in {}ms",
                endpoint,
                retries,
                self.max_retries,
                failure,
                delay.as_millis()
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// Number of requests issued so far, retries included
    pub fn requests_sent(&self) -> u64 {
        self.requests_sent.load(Ordering::Relaxed)
    }
}

fn is_transient(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler(base_delay_ms: u64) -> HttpHandler {
        HttpHandler::new(Client::new(), 5, 3, Duration::from_millis(base_delay_ms)).unwrap()
    }

    #[tokio::test]
    async fn test_rate_limiter_creation() {
        let rate_limiter = HttpHandler::build_rate_limiter(5).unwrap();
        rate_limiter.until_ready().await;
    }

    #[test]
    fn test_rate_limiter_zero_fails() {
        assert!(HttpHandler::build_rate_limiter(0).is_err());
    }

    #[test]
    fn test_exponential_backoff_calculation() {
        let handler = handler(500);
        assert_eq!(handler.backoff_delay(1).as_millis(), 500);
        assert_eq!(handler.backoff_delay(2).as_millis(), 1000);
        assert_eq!(handler.backoff_delay(3).as_millis(), 2000);
    }

    #[test]
    fn test_transient_statuses() {
        assert!(is_transient(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_transient(StatusCode::SERVICE_UNAVAILABLE));
        assert!(is_transient(StatusCode::BAD_GATEWAY));
        assert!(!is_transient(StatusCode::NOT_FOUND));
        assert!(!is_transient(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn test_counter_starts_at_zero() {
        assert_eq!(handler(1).requests_sent(), 0);
    }
}
