//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::path::Path;
use std::time::Duration;

use httpmock::prelude::*;
use serde_json::{json, Value};

use crunchyroll_exporter::app::{ClientConfig, CrunchyrollClient};
use crunchyroll_exporter::auth::BearerToken;
use crunchyroll_exporter::config::AppConfig;

pub const ACCOUNT_ID: &str = "acc-1";
pub const TOKEN: &str = "Bearer test-token";

/// Client settings pointed at the mock server, with near-zero backoff
pub fn test_client_config(server: &MockServer) -> ClientConfig {
    fast_client_config(server.base_url())
}

/// Same settings against an arbitrary base URL
pub fn fast_client_config(base_url: String) -> ClientConfig {
    ClientConfig {
        base_url,
        max_retries: 2,
        retry_base_delay: Duration::from_millis(1),
        rate_limit_rps: 1000,
        page_size: 2,
        ..ClientConfig::default()
    }
}

pub fn test_app_config(server: &MockServer) -> AppConfig {
    AppConfig {
        client: test_client_config(server),
        ..AppConfig::default()
    }
}

pub fn test_client(server: &MockServer) -> CrunchyrollClient {
    client_with(test_client_config(server))
}

pub fn client_with(config: ClientConfig) -> CrunchyrollClient {
    let token = BearerToken::parse(TOKEN).unwrap();
    CrunchyrollClient::new(&token, &config).unwrap()
}

/// Mock the account endpoint returning [`ACCOUNT_ID`]
pub fn mock_account(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(GET)
            .path("/accounts/v1/me")
            .header("authorization", TOKEN);
        then.status(200)
            .json_body(json!({ "account_id": ACCOUNT_ID, "email": "someone@example.com" }));
    })
}

/// A watchlist/history item in the episode shape
pub fn episode_item(id: &str, title: &str, series_id: &str, episode: i64) -> Value {
    json!({
        "id": id,
        "panel": {
            "id": id,
            "title": title,
            "type": "episode",
            "description": format!("{} description", title),
            "episode_metadata": {
                "series_id": series_id,
                "episode_number": episode,
                "duration_ms": 1_420_000
            },
            "images": {
                "thumbnail": [[{ "source": format!("https://img.example/{}.jpg", id) }]]
            }
        },
        "date_played": "2024-05-01T20:15:00Z"
    })
}

/// Read a CSV written by the exporter, skipping the byte-order mark
pub fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let bytes = std::fs::read(path).unwrap();
    assert!(bytes.starts_with(b"\xEF\xBB\xBF"), "missing UTF-8 BOM");
    let mut reader = csv::Reader::from_reader(&bytes[3..]);
    let header = reader
        .headers()
        .unwrap()
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect();
    (header, rows)
}
