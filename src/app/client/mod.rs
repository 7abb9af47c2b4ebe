//! HTTP client for the Crunchyroll web API
//!
//! The module is organized into specialized components:
//! - `config`: client configuration and building
//! - `http`: GET requests with rate limiting and retries
//!
//! [`CrunchyrollClient`] adds the endpoint catalogue and pagination on top.
//! All requests are issued one after another; each page is fetched only
//! once the previous page's cursor is known.

use std::collections::HashSet;

use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::app::extract::Page;
use crate::app::models::{CatalogItem, ContentRecord, CustomList};
use crate::auth::BearerToken;
use crate::constants::{api, keys};
use crate::errors::{FetchError, ParseError, Result};

pub mod config;
pub mod http;

pub use config::ClientConfig;

use http::HttpHandler;

/// Authenticated client for the Crunchyroll content API
#[derive(Debug)]
pub struct CrunchyrollClient {
    http_handler: HttpHandler,
    base_url: Url,
    page_size: u32,
    max_pages: usize,
}

impl CrunchyrollClient {
    /// Creates a client that sends `token` on every request
    ///
    /// No request is made here; a bad token surfaces on the first call.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for invalid configuration values and
    /// `AuthError::Client` if the HTTP client cannot be built.
    pub fn new(token: &BearerToken, config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let client = config.build_http_client(token)?;
        let http_handler = HttpHandler::new(
            client,
            config.rate_limit_rps,
            config.max_retries,
            config.retry_base_delay,
        )?;
        let base_url = Url::parse(&config.base_url).map_err(|e| FetchError::InvalidUrl {
            url: config.base_url.clone(),
            error: e.to_string(),
        })?;

        debug!("Created Crunchyroll client for {}", base_url);

        Ok(Self {
            http_handler,
            base_url,
            page_size: config.page_size,
            max_pages: config.max_pages,
        })
    }

    /// Build an absolute endpoint URL with query parameters
    pub fn endpoint_url(&self, path: &str, params: &[(&str, String)]) -> Result<Url> {
        let mut url = self.base_url.join(path).map_err(|e| FetchError::InvalidUrl {
            url: path.to_string(),
            error: e.to_string(),
        })?;
        if !params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// GET one endpoint and return the parsed body
    pub async fn fetch(&self, path: &str, params: &[(&str, String)]) -> Result<Value> {
        let url = self.endpoint_url(path, params)?;
        self.http_handler.get_json(&url).await
    }

    /// GET a listing and follow `next_page` cursors until none is left
    ///
    /// Items are concatenated in server order. Cursors are URL references
    /// resolved against the page that returned them.
    ///
    /// # Errors
    ///
    /// Besides request errors, returns `ParseError` when a page lacks
    /// `data`, a cursor repeats or leaves the API origin, or the page limit
    /// is exceeded.
    pub async fn fetch_all(&self, path: &str, params: &[(&str, String)]) -> Result<Vec<Value>> {
        let mut url = self.endpoint_url(path, params)?;
        let endpoint = url.path().to_string();
        let mut seen = HashSet::new();
        let mut items = Vec::new();

        for page_number in 1..=self.max_pages {
            let body = self.http_handler.get_json(&url).await?;
            let page = Page::from_body(body, &endpoint)?;
            debug!(
                "Page {} of {}: {} items",
                page_number,
                endpoint,
                page.items.len()
            );
            items.extend(page.items);

            let Some(cursor) = page.next_cursor else {
                return Ok(items);
            };
            if !seen.insert(cursor.clone()) {
                return Err(ParseError::RepeatedCursor { endpoint, cursor }.into());
            }
            let next = url.join(&cursor).map_err(|e| FetchError::InvalidUrl {
                url: cursor.clone(),
                error: e.to_string(),
            })?;
            // The token header must never reach another host
            if next.origin() != self.base_url.origin() {
                return Err(ParseError::ForeignCursor { endpoint, cursor }.into());
            }
            url = next;
        }

        Err(ParseError::TooManyPages {
            endpoint,
            max_pages: self.max_pages,
        }
        .into())
    }

    /// Account id of the token's owner
    pub async fn account_id(&self) -> Result<String> {
        let body = self.fetch(api::ACCOUNT_PATH, &[]).await?;
        let account_id = body
            .get(keys::ACCOUNT_ID)
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ParseError::MissingKey {
                endpoint: api::ACCOUNT_PATH.to_string(),
                key: keys::ACCOUNT_ID.to_string(),
            })?;
        info!("Resolved account id");
        Ok(account_id.to_string())
    }

    /// The account's watchlist, newest first
    pub async fn watchlist(&self, account_id: &str) -> Result<Vec<ContentRecord>> {
        let params = [
            ("order", "desc".to_string()),
            ("n", self.page_size.to_string()),
        ];
        let items = self
            .fetch_all(&api::watchlist_path(account_id), &params)
            .await?;
        info!("Fetched {} items from watchlist", items.len());
        Ok(items.iter().map(ContentRecord::from_item).collect())
    }

    /// The account's watch history
    pub async fn watch_history(&self, account_id: &str) -> Result<Vec<ContentRecord>> {
        let params = [("page_size", self.page_size.to_string())];
        let items = self
            .fetch_all(&api::history_path(account_id), &params)
            .await?;
        info!("Fetched {} items from history", items.len());
        Ok(items.iter().map(ContentRecord::from_item).collect())
    }

    /// Headers of the account's custom lists
    pub async fn custom_lists(&self, account_id: &str) -> Result<Vec<CustomList>> {
        let items = self
            .fetch_all(&api::custom_lists_path(account_id), &[])
            .await?;
        let lists: Vec<CustomList> = items.iter().filter_map(CustomList::from_item).collect();
        if lists.len() < items.len() {
            tracing::warn!(
                "Skipped {} custom lists without a list_id",
                items.len() - lists.len()
            );
        }
        info!("Fetched {} crunchylists", lists.len());
        Ok(lists)
    }

    /// Entries of one custom list, tagged with the list's name
    pub async fn custom_list_items(
        &self,
        account_id: &str,
        list: &CustomList,
    ) -> Result<Vec<ContentRecord>> {
        let items = self
            .fetch_all(&api::custom_list_items_path(account_id, &list.list_id), &[])
            .await?;
        debug!("Fetched {} items from list '{}'", items.len(), list.title);
        Ok(items
            .iter()
            .map(|item| ContentRecord::from_list_item(item, &list.title))
            .collect())
    }

    /// Entries of every custom list, list by list
    pub async fn crunchylist_records(&self, account_id: &str) -> Result<Vec<ContentRecord>> {
        let mut records = Vec::new();
        for list in self.custom_lists(account_id).await? {
            records.extend(self.custom_list_items(account_id, &list).await?);
        }
        info!("Fetched {} items across all crunchylists", records.len());
        Ok(records)
    }

    /// The full browse catalog, alphabetical
    pub async fn browse_catalog(&self) -> Result<Vec<CatalogItem>> {
        let params = [
            ("start", "0".to_string()),
            ("n", self.page_size.to_string()),
            ("sort_by", "alphabetical".to_string()),
        ];
        let items = self.fetch_all(api::BROWSE_PATH, &params).await?;
        info!("Fetched {} anime from catalog", items.len());
        Ok(items.iter().map(CatalogItem::from_item).collect())
    }

    /// Number of HTTP requests issued by this client
    pub fn requests_sent(&self) -> u64 {
        self.http_handler.requests_sent()
    }

    /// Get the API base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> CrunchyrollClient {
        let token = BearerToken::parse("Bearer test").unwrap();
        CrunchyrollClient::new(&token, &ClientConfig::default()).unwrap()
    }

    #[test]
    fn test_client_creation_makes_no_requests() {
        let client = client();
        assert_eq!(client.requests_sent(), 0);
        assert_eq!(client.base_url().host_str(), Some("www.crunchyroll.com"));
    }

    #[test]
    fn test_endpoint_url_with_params() {
        let client = client();
        let url = client
            .endpoint_url(
                &api::watchlist_path("acc-1"),
                &[("order", "desc".to_string()), ("n", "10".to_string())],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.crunchyroll.com/content/v2/discover/acc-1/watchlist?order=desc&n=10"
        );
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let token = BearerToken::parse("Bearer test").unwrap();
        let config = ClientConfig {
            page_size: 0,
            ..Default::default()
        };
        assert!(CrunchyrollClient::new(&token, &config).is_err());
    }
}
