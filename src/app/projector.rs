//! Column projection: records in, ordered CSV rows out
//!
//! The projector validates the requested columns for the export kind, then
//! renders each record in that order. "Anime Title" is filled from the
//! catalog cache only when "Series ID" is part of the selection; every other
//! case leaves it blank.

use crate::app::catalog::{catalog_link, map_languages, CatalogCache};
use crate::app::columns::{Column, ExportKind};
use crate::app::models::{CatalogItem, ContentRecord};
use crate::constants::LANGUAGES;
use crate::errors::ValidationError;

/// Something that can supply a cell for a column
pub trait ColumnSource {
    /// Rendered value for `column`; empty when the record has none
    fn value(&self, column: Column) -> String;

    /// Series id used for enrichment
    fn series_id(&self) -> Option<&str> {
        None
    }
}

impl ColumnSource for ContentRecord {
    fn value(&self, column: Column) -> String {
        match column {
            Column::AnimeCode | Column::Code => self.anime_code.clone(),
            Column::Title => self.title.clone(),
            Column::Type => self
                .content_type
                .as_ref()
                .map(|t| t.as_str().to_string())
                .unwrap_or_default(),
            Column::SeriesId => self.series_id.clone().unwrap_or_default(),
            Column::EpisodeNumber => opt_to_string(self.episode_number),
            Column::Duration => opt_to_string(self.duration_ms),
            Column::Rating => self.rating.clone().unwrap_or_default(),
            Column::Description => self.description.clone(),
            Column::Images => self.images.join(", "),
            Column::LastWatched => self.last_watched.clone().unwrap_or_default(),
            Column::ListName => self.list_name.clone().unwrap_or_default(),
            Column::AnimeTitle
            | Column::Link
            | Column::AudioLanguages
            | Column::SubtitleLanguages => String::new(),
        }
    }

    fn series_id(&self) -> Option<&str> {
        self.series_id.as_deref()
    }
}

impl ColumnSource for CatalogItem {
    fn value(&self, column: Column) -> String {
        match column {
            Column::Title => self.title.clone(),
            Column::Link => catalog_link(self),
            Column::Code | Column::AnimeCode => self.id.clone(),
            Column::Type => self
                .content_type
                .as_ref()
                .map(|t| t.as_str().to_string())
                .unwrap_or_default(),
            Column::AudioLanguages => map_languages(&self.audio_locales, LANGUAGES).join(","),
            Column::SubtitleLanguages => {
                map_languages(&self.subtitle_locales, LANGUAGES).join(",")
            }
            _ => String::new(),
        }
    }
}

fn opt_to_string<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Header plus rows, ready for the CSV writer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Resolve columns and render every record
///
/// # Errors
///
/// Returns `ValidationError` when a requested column is not recognized for
/// `kind`; no record is rendered in that case.
pub fn project<R: ColumnSource>(
    records: &[R],
    kind: ExportKind,
    requested: Option<&[String]>,
    catalog: &CatalogCache,
) -> Result<Projection, ValidationError> {
    let columns = kind.select_columns(requested)?;
    Ok(project_columns(records, &columns, catalog))
}

/// Render records for an already validated column list
pub fn project_columns<R: ColumnSource>(
    records: &[R],
    columns: &[Column],
    catalog: &CatalogCache,
) -> Projection {
    let enrich = columns.contains(&Column::SeriesId);
    let header = columns.iter().map(|c| c.name().to_string()).collect();

    let rows = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|&column| match column {
                    Column::AnimeTitle if enrich => record
                        .series_id()
                        .and_then(|id| catalog.lookup(id))
                        .unwrap_or_default()
                        .to_string(),
                    other => record.value(other),
                })
                .collect()
        })
        .collect();

    Projection { header, rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: &str, series_id: Option<&str>) -> ContentRecord {
        ContentRecord {
            anime_code: code.to_string(),
            title: format!("Episode {}", code),
            series_id: series_id.map(str::to_string),
            ..Default::default()
        }
    }

    fn catalog() -> CatalogCache {
        vec![("GDKHZEJ0K".to_string(), "Solo Leveling".to_string())]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_default_columns_enrich_known_ids() {
        let records = vec![
            record("A", Some("GDKHZEJ0K")),
            record("B", Some("UNKNOWN")),
            record("C", None),
        ];
        let projection = project(&records, ExportKind::Watchlist, None, &catalog()).unwrap();

        let title_idx = projection
            .header
            .iter()
            .position(|h| h == "Anime Title")
            .unwrap();
        assert_eq!(projection.header.len(), ExportKind::Watchlist.columns().len());
        assert_eq!(projection.rows[0][title_idx], "Solo Leveling");
        assert_eq!(projection.rows[1][title_idx], "");
        assert_eq!(projection.rows[2][title_idx], "");
    }

    #[test]
    fn test_anime_title_without_series_id_is_blank() {
        let records = vec![record("A", Some("GDKHZEJ0K"))];
        let requested = vec!["Anime Title".to_string(), "Title".to_string()];
        let projection =
            project(&records, ExportKind::History, Some(&requested), &catalog()).unwrap();
        assert_eq!(projection.header, vec!["Anime Title", "Title"]);
        assert_eq!(projection.rows[0], vec!["", "Episode A"]);
    }

    #[test]
    fn test_anime_title_omitted_when_not_selected() {
        let records = vec![record("A", Some("GDKHZEJ0K"))];
        let requested = vec!["Title".to_string()];
        let projection =
            project(&records, ExportKind::Watchlist, Some(&requested), &catalog()).unwrap();
        assert_eq!(projection.header, vec!["Title"]);
        assert_eq!(projection.rows[0].len(), 1);
    }

    #[test]
    fn test_invalid_column_renders_nothing() {
        let records = vec![record("A", None)];
        let requested = vec!["Bogus Column".to_string()];
        let err = project(&records, ExportKind::Crunchylists, Some(&requested), &catalog())
            .unwrap_err();
        assert!(err.to_string().contains("Bogus Column"));
    }

    #[test]
    fn test_catalog_item_projection() {
        let item = CatalogItem {
            id: "GDKHZEJ0K".to_string(),
            title: "Solo Leveling".to_string(),
            content_type: Some(crate::app::models::ContentType::Series),
            audio_locales: vec!["ja-JP".to_string(), "en-US".to_string()],
            subtitle_locales: vec!["fr-FR".to_string()],
        };
        let projection = project(
            &[item],
            ExportKind::Catalog,
            None,
            &CatalogCache::empty(),
        )
        .unwrap();
        assert_eq!(
            projection.rows[0],
            vec![
                "Solo Leveling",
                "https://www.crunchyroll.com/series/GDKHZEJ0K",
                "GDKHZEJ0K",
                "English,Japanese",
                "Français",
            ]
        );
    }

    #[test]
    fn test_numeric_fields_render() {
        let rec = ContentRecord {
            episode_number: Some(12),
            duration_ms: Some(1_440_000),
            images: vec!["a".to_string(), "b".to_string()],
            ..Default::default()
        };
        assert_eq!(rec.value(Column::EpisodeNumber), "12");
        assert_eq!(rec.value(Column::Duration), "1440000");
        assert_eq!(rec.value(Column::Images), "a, b");
    }
}
