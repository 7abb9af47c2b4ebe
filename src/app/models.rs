//! Typed records built from Crunchyroll API items
//!
//! Items arrive as loosely-shaped JSON. Episodes carry their series data under
//! `panel.episode_metadata` while movies use `panel.movie_listing_metadata`
//! and name the parent `movie_id` instead of `series_id`; both shapes are
//! folded into the same [`ContentRecord`].

use std::fmt;

use serde_json::Value;

/// Kind of content a record points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentType {
    Episode,
    Movie,
    Series,
    MovieListing,
    Season,
    /// Unrecognized type, raw value preserved
    Other(String),
}

impl ContentType {
    /// Parse the `type` string used by the API
    pub fn from_api(value: &str) -> Self {
        match value {
            "episode" => ContentType::Episode,
            "movie" => ContentType::Movie,
            "series" => ContentType::Series,
            "movie_listing" => ContentType::MovieListing,
            "season" => ContentType::Season,
            other => ContentType::Other(other.to_string()),
        }
    }

    /// The API spelling of this type
    pub fn as_str(&self) -> &str {
        match self {
            ContentType::Episode => "episode",
            ContentType::Movie => "movie",
            ContentType::Series => "series",
            ContentType::MovieListing => "movie_listing",
            ContentType::Season => "season",
            ContentType::Other(raw) => raw,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One watchlist, history or crunchylist entry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentRecord {
    pub anime_code: String,
    pub title: String,
    pub content_type: Option<ContentType>,
    pub series_id: Option<String>,
    pub episode_number: Option<i64>,
    pub duration_ms: Option<u64>,
    /// Rating rendered as text; the API sends either a scalar or an object
    pub rating: Option<String>,
    pub description: String,
    pub images: Vec<String>,
    /// History only
    pub last_watched: Option<String>,
    /// Crunchylists only
    pub list_name: Option<String>,
}

impl ContentRecord {
    /// Build a record from a raw API item
    ///
    /// Missing fields become empty values; the record never fails to build,
    /// the response-level shape is validated by the extractor instead.
    pub fn from_item(item: &Value) -> Self {
        let panel = item.get("panel").unwrap_or(&Value::Null);
        let metadata = panel
            .get("episode_metadata")
            .or_else(|| panel.get("movie_listing_metadata"))
            .unwrap_or(&Value::Null);

        let series_id = first_string(metadata, &["series_id", "movie_id", "movie_listing_id"]);

        Self {
            anime_code: string_at(item, "id")
                .or_else(|| string_at(panel, "id"))
                .unwrap_or_default(),
            title: string_at(panel, "title").unwrap_or_default(),
            content_type: string_at(panel, "type").map(|t| ContentType::from_api(&t)),
            series_id,
            episode_number: metadata.get("episode_number").and_then(as_integer),
            duration_ms: panel
                .get("duration_ms")
                .or_else(|| metadata.get("duration_ms"))
                .and_then(Value::as_u64),
            rating: panel.get("rating").and_then(render_scalar_or_json),
            description: string_at(panel, "description").unwrap_or_default(),
            images: panel.get("images").map(collect_image_urls).unwrap_or_default(),
            last_watched: first_string(item, &["last_watch_date", "date_played"]),
            list_name: None,
        }
    }

    /// Build a record for an item of the named custom list
    pub fn from_list_item(item: &Value, list_name: &str) -> Self {
        Self {
            list_name: Some(list_name.to_string()),
            ..Self::from_item(item)
        }
    }
}

/// A custom list ("crunchylist") header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomList {
    pub list_id: String,
    pub title: String,
}

impl CustomList {
    /// Build from a custom-lists item; `None` when the item has no id
    pub fn from_item(item: &Value) -> Option<Self> {
        let list_id = string_at(item, "list_id")?;
        Some(Self {
            list_id,
            title: string_at(item, "title").unwrap_or_default(),
        })
    }
}

/// One entry of the browse catalog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogItem {
    pub id: String,
    pub title: String,
    pub content_type: Option<ContentType>,
    pub audio_locales: Vec<String>,
    pub subtitle_locales: Vec<String>,
}

impl CatalogItem {
    /// Build from a browse item
    ///
    /// Series carry locales under `series_metadata`; movie listings keep
    /// subtitles under `movie_listing_metadata`.
    pub fn from_item(item: &Value) -> Self {
        let content_type = string_at(item, "type").map(|t| ContentType::from_api(&t));
        let series_metadata = item.get("series_metadata").unwrap_or(&Value::Null);
        let subtitle_source = match content_type {
            Some(ContentType::Series) => series_metadata,
            _ => item.get("movie_listing_metadata").unwrap_or(&Value::Null),
        };

        Self {
            id: string_at(item, "id").unwrap_or_default(),
            title: string_at(item, "title").unwrap_or_default(),
            content_type,
            audio_locales: string_list(series_metadata.get("audio_locales")),
            subtitle_locales: string_list(subtitle_source.get("subtitle_locales")),
        }
    }
}

fn string_at(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn first_string(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| string_at(value, key))
        .filter(|s| !s.is_empty())
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn render_scalar_or_json(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Collect every image URL under `panel.images`
///
/// The API nests images as `{"thumbnail": [[{"source": ...}, ...]]}`; plain
/// string arrays are accepted as well.
fn collect_image_urls(value: &Value) -> Vec<String> {
    let mut urls = Vec::new();
    collect_into(value, &mut urls);
    urls
}

fn collect_into(value: &Value, urls: &mut Vec<String>) {
    match value {
        Value::String(s) => urls.push(s.clone()),
        Value::Array(items) => items.iter().for_each(|v| collect_into(v, urls)),
        Value::Object(map) => {
            if let Some(Value::String(source)) = map.get("source") {
                urls.push(source.clone());
            } else {
                map.values().for_each(|v| collect_into(v, urls));
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_episode_record() {
        let item = json!({
            "id": "GRDV0019R",
            "panel": {
                "title": "I'm Used to It",
                "type": "episode",
                "duration_ms": 1420000,
                "description": "E-rank hunter",
                "rating": {"average": "4.9"},
                "episode_metadata": {
                    "series_id": "GDKHZEJ0K",
                    "episode_number": 1
                },
                "images": {
                    "thumbnail": [[
                        {"source": "https://img/a.jpg", "width": 320},
                        {"source": "https://img/b.jpg", "width": 640}
                    ]]
                }
            }
        });

        let record = ContentRecord::from_item(&item);
        assert_eq!(record.anime_code, "GRDV0019R");
        assert_eq!(record.content_type, Some(ContentType::Episode));
        assert_eq!(record.series_id.as_deref(), Some("GDKHZEJ0K"));
        assert_eq!(record.episode_number, Some(1));
        assert_eq!(record.duration_ms, Some(1_420_000));
        assert_eq!(record.rating.as_deref(), Some(r#"{"average":"4.9"}"#));
        assert_eq!(record.images, vec!["https://img/a.jpg", "https://img/b.jpg"]);
        assert!(record.list_name.is_none());
    }

    #[test]
    fn test_movie_record_uses_movie_keys() {
        let item = json!({
            "id": "G25FVD45Q",
            "panel": {
                "title": "Jujutsu Kaisen 0",
                "type": "movie",
                "movie_listing_metadata": {"movie_id": "G9VHN9QWQ"}
            }
        });

        let record = ContentRecord::from_item(&item);
        assert_eq!(record.series_id.as_deref(), Some("G9VHN9QWQ"));
        assert_eq!(record.content_type, Some(ContentType::Movie));
        assert_eq!(record.episode_number, None);
    }

    #[test]
    fn test_missing_fields_are_empty() {
        let record = ContentRecord::from_item(&json!({}));
        assert_eq!(record, ContentRecord::default());
    }

    #[test]
    fn test_history_timestamp_and_list_name() {
        let item = json!({"id": "X", "last_watch_date": "2024-05-01T10:00:00Z", "panel": {}});
        let record = ContentRecord::from_list_item(&item, "Favourites");
        assert_eq!(record.last_watched.as_deref(), Some("2024-05-01T10:00:00Z"));
        assert_eq!(record.list_name.as_deref(), Some("Favourites"));
    }

    #[test]
    fn test_unknown_type_is_preserved() {
        assert_eq!(
            ContentType::from_api("music_video").as_str(),
            "music_video"
        );
    }

    #[test]
    fn test_catalog_item_locales() {
        let series = json!({
            "id": "GDKHZEJ0K",
            "title": "Solo Leveling",
            "type": "series",
            "series_metadata": {
                "audio_locales": ["ja-JP", "en-US"],
                "subtitle_locales": ["en-US", "fr-FR"]
            }
        });
        let item = CatalogItem::from_item(&series);
        assert_eq!(item.audio_locales, vec!["ja-JP", "en-US"]);
        assert_eq!(item.subtitle_locales, vec!["en-US", "fr-FR"]);

        let movie = json!({
            "id": "G9VHN9QWQ",
            "title": "Jujutsu Kaisen 0",
            "type": "movie_listing",
            "movie_listing_metadata": {"subtitle_locales": ["de-DE"]}
        });
        let item = CatalogItem::from_item(&movie);
        assert!(item.audio_locales.is_empty());
        assert_eq!(item.subtitle_locales, vec!["de-DE"]);
    }

    #[test]
    fn test_custom_list_requires_id() {
        assert!(CustomList::from_item(&json!({"title": "No id"})).is_none());
        let list = CustomList::from_item(&json!({"list_id": "abc", "title": "Later"})).unwrap();
        assert_eq!(list.title, "Later");
    }
}
