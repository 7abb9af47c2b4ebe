//! Response extraction for the Crunchyroll content API
//!
//! Every listing endpoint wraps its items in a `data` array. Paginated
//! endpoints add a `next_page` cursor, either at the top level or inside a
//! `meta` envelope. A missing cursor is the only end-of-listing signal.

use serde_json::Value;

use crate::constants::keys;
use crate::errors::ParseError;

/// One page of a listing
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub items: Vec<Value>,
    pub next_cursor: Option<String>,
}

impl Page {
    /// Split a response body into items and cursor
    ///
    /// # Errors
    ///
    /// Returns `ParseError` when the body has no `data` array.
    pub fn from_body(body: Value, endpoint: &str) -> Result<Self, ParseError> {
        let next_cursor = extract_cursor(&body);
        let items = extract_items(body, endpoint)?;
        Ok(Self { items, next_cursor })
    }
}

/// Take the item array out of a response body
///
/// # Errors
///
/// Returns `ParseError::MissingKey` if `data` is absent, and
/// `ParseError::UnexpectedType` if it is not an array.
pub fn extract_items(body: Value, endpoint: &str) -> Result<Vec<Value>, ParseError> {
    let Value::Object(mut map) = body else {
        return Err(ParseError::UnexpectedType {
            endpoint: endpoint.to_string(),
            key: "<body>".to_string(),
            expected: "an object",
        });
    };

    match map.remove(keys::DATA) {
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(ParseError::UnexpectedType {
            endpoint: endpoint.to_string(),
            key: keys::DATA.to_string(),
            expected: "an array",
        }),
        None => Err(ParseError::MissingKey {
            endpoint: endpoint.to_string(),
            key: keys::DATA.to_string(),
        }),
    }
}

/// Next-page cursor, if the body has one
///
/// `null` and empty strings count as absent.
pub fn extract_cursor(body: &Value) -> Option<String> {
    body.get(keys::NEXT_PAGE)
        .or_else(|| body.get(keys::META).and_then(|m| m.get(keys::NEXT_PAGE)))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|cursor| !cursor.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_data_array() {
        let body = json!({"total": 2, "data": [{"id": "a"}, {"id": "b"}]});
        let page = Page::from_body(body, "/watchlist").unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.next_cursor, None);
    }

    #[test]
    fn test_cursor_locations() {
        let top = json!({"data": [], "next_page": "/content/v2/x/watch-history?page=2"});
        assert_eq!(
            extract_cursor(&top).as_deref(),
            Some("/content/v2/x/watch-history?page=2")
        );

        let nested = json!({"data": [], "meta": {"next_page": "?start=50"}});
        assert_eq!(extract_cursor(&nested).as_deref(), Some("?start=50"));

        let null = json!({"data": [], "next_page": null});
        assert_eq!(extract_cursor(&null), None);

        let empty = json!({"data": [], "meta": {"next_page": ""}});
        assert_eq!(extract_cursor(&empty), None);
    }

    #[test]
    fn test_missing_data_key() {
        let err = extract_items(json!({"items": []}), "/content/v2/x/custom-lists").unwrap_err();
        match err {
            ParseError::MissingKey { endpoint, key } => {
                assert_eq!(endpoint, "/content/v2/x/custom-lists");
                assert_eq!(key, "data");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_wrong_shapes() {
        assert!(matches!(
            extract_items(json!({"data": {"id": 1}}), "/x"),
            Err(ParseError::UnexpectedType { .. })
        ));
        assert!(matches!(
            extract_items(json!([1, 2]), "/x"),
            Err(ParseError::UnexpectedType { .. })
        ));
    }

    #[test]
    fn test_item_order_is_kept() {
        let body = json!({"data": [{"id": 3}, {"id": 1}, {"id": 2}]});
        let ids: Vec<i64> = extract_items(body, "/x")
            .unwrap()
            .iter()
            .filter_map(|v| v["id"].as_i64())
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
