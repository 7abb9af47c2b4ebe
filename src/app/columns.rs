//! Recognized output columns per export kind
//!
//! Column names typed by the user are validated eagerly against these
//! compile-time sets, so a typo fails before any request is made.

use std::fmt;

use crate::errors::ValidationError;

/// Every column the exporter knows how to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    AnimeCode,
    Title,
    Type,
    SeriesId,
    EpisodeNumber,
    Duration,
    Rating,
    Description,
    Images,
    LastWatched,
    ListName,
    AnimeTitle,
    Link,
    Code,
    AudioLanguages,
    SubtitleLanguages,
}

impl Column {
    /// Header text, which is also the name accepted by `--columns`
    pub fn name(self) -> &'static str {
        match self {
            Column::AnimeCode => "Anime Code",
            Column::Title => "Title",
            Column::Type => "Type",
            Column::SeriesId => "Series ID",
            Column::EpisodeNumber => "Episode Number",
            Column::Duration => "Duration",
            Column::Rating => "Rating",
            Column::Description => "Description",
            Column::Images => "Images",
            Column::LastWatched => "Last Watched",
            Column::ListName => "List Name",
            Column::AnimeTitle => "Anime Title",
            Column::Link => "Link",
            Column::Code => "Code",
            Column::AudioLanguages => "Audio Languages",
            Column::SubtitleLanguages => "Subtitle Languages",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const WATCHLIST_COLUMNS: &[Column] = &[
    Column::AnimeCode,
    Column::Title,
    Column::Type,
    Column::SeriesId,
    Column::EpisodeNumber,
    Column::Duration,
    Column::Rating,
    Column::Description,
    Column::Images,
    Column::AnimeTitle,
];

const HISTORY_COLUMNS: &[Column] = &[
    Column::AnimeCode,
    Column::Title,
    Column::Type,
    Column::SeriesId,
    Column::EpisodeNumber,
    Column::LastWatched,
    Column::Duration,
    Column::Description,
    Column::AnimeTitle,
];

const CRUNCHYLIST_COLUMNS: &[Column] = &[
    Column::ListName,
    Column::AnimeCode,
    Column::Title,
    Column::Type,
    Column::Description,
];

const CATALOG_COLUMNS: &[Column] = &[
    Column::Title,
    Column::Link,
    Column::Code,
    Column::AudioLanguages,
    Column::SubtitleLanguages,
];

/// What is being exported; selects the endpoint and the column set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportKind {
    Watchlist,
    History,
    Crunchylists,
    Catalog,
}

impl ExportKind {
    /// All kinds, in the order `show-columns` lists them
    pub const ALL: [ExportKind; 4] = [
        ExportKind::Watchlist,
        ExportKind::History,
        ExportKind::Crunchylists,
        ExportKind::Catalog,
    ];

    /// Recognized columns in canonical order
    pub fn columns(self) -> &'static [Column] {
        match self {
            ExportKind::Watchlist => WATCHLIST_COLUMNS,
            ExportKind::History => HISTORY_COLUMNS,
            ExportKind::Crunchylists => CRUNCHYLIST_COLUMNS,
            ExportKind::Catalog => CATALOG_COLUMNS,
        }
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            ExportKind::Watchlist => "Watchlist",
            ExportKind::History => "History",
            ExportKind::Crunchylists => "Crunchylist",
            ExportKind::Catalog => "Anime Catalog",
        }
    }

    /// Whether `column` is recognized for this kind
    pub fn recognizes(self, column: Column) -> bool {
        self.columns().contains(&column)
    }

    /// Look up a column of this kind by its header name
    pub fn column_named(self, name: &str) -> Option<Column> {
        self.columns().iter().copied().find(|c| c.name() == name)
    }

    /// Resolve the user's column request into an ordered selection
    ///
    /// `None` selects every recognized column in canonical order. Explicit
    /// names are matched exactly, deduplicated keeping the first occurrence,
    /// and when "Series ID" is selected without "Anime Title" the enrichment
    /// column is appended.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` listing every unrecognized name, or when
    /// the request names no columns at all.
    pub fn select_columns(
        self,
        requested: Option<&[String]>,
    ) -> Result<Vec<Column>, ValidationError> {
        let Some(requested) = requested else {
            return Ok(self.columns().to_vec());
        };

        if requested.is_empty() {
            return Err(ValidationError::EmptySelection {
                kind: self.label().to_string(),
            });
        }

        let mut selected = Vec::with_capacity(requested.len() + 1);
        let mut invalid = Vec::new();
        for name in requested {
            match self.column_named(name) {
                Some(column) if !selected.contains(&column) => selected.push(column),
                Some(_) => tracing::debug!("Ignoring duplicate column '{}'", name),
                None => invalid.push(name.clone()),
            }
        }

        if !invalid.is_empty() {
            return Err(ValidationError::InvalidColumns {
                kind: self.label().to_string(),
                invalid,
                recognized: self.columns().iter().map(|c| c.name().to_string()).collect(),
            });
        }

        if selected.contains(&Column::SeriesId)
            && !selected.contains(&Column::AnimeTitle)
            && self.recognizes(Column::AnimeTitle)
        {
            selected.push(Column::AnimeTitle);
        }

        Ok(selected)
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Split a `--columns "A,B,C"` argument into trimmed, non-empty names
pub fn parse_column_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
