//! Series title cache backed by the catalog reference CSV
//!
//! The cache is the file `get-anime-list` writes. Loading it is best effort:
//! a missing or unreadable file yields an empty cache and enrichment is
//! silently skipped.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::app::models::{CatalogItem, ContentType};
use crate::constants::{api, files};

/// Header names accepted for the id column, in order of preference
const ID_HEADERS: [&str; 2] = ["Code", "Anime Code"];
const TITLE_HEADER: &str = "Title";

/// Read-only mapping from series id to series title
#[derive(Debug, Clone, Default)]
pub struct CatalogCache {
    titles: HashMap<String, String>,
}

impl CatalogCache {
    /// An empty cache; every lookup misses
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the cache from a catalog CSV
    ///
    /// Never fails: a missing file, unknown headers or an unreadable header
    /// row produce an empty cache with a warning. Unreadable data rows are
    /// skipped and the remaining rows kept.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            warn!(
                "Catalog file not found: {}. Anime titles will be left blank",
                path.display()
            );
            return Self::empty();
        }

        let loaded = File::open(path)
            .map_err(csv::Error::from)
            .and_then(|file| Self::from_reader(BufReader::new(file)));

        match loaded {
            Ok(cache) => {
                info!(
                    "Loaded {} anime titles from {}",
                    cache.len(),
                    path.display()
                );
                cache
            }
            Err(e) => {
                warn!("Failed to load catalog file {}: {}", path.display(), e);
                Self::empty()
            }
        }
    }

    /// Parse catalog CSV content; a leading UTF-8 BOM is tolerated
    ///
    /// Only an unreadable header row is an error.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = reader.headers()?.clone();

        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
        };
        let id_index = ID_HEADERS.iter().find_map(|name| position(name));
        let title_index = position(TITLE_HEADER);

        let (Some(id_index), Some(title_index)) = (id_index, title_index) else {
            warn!(
                "Catalog file has no '{}'/'{}' and '{}' columns",
                ID_HEADERS[0], ID_HEADERS[1], TITLE_HEADER
            );
            return Ok(Self::empty());
        };

        let mut titles = HashMap::new();
        for record in reader.records() {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    warn!("Skipping unreadable catalog row: {}", e);
                    continue;
                }
            };
            let code = record.get(id_index).unwrap_or("").trim();
            if code.is_empty() {
                continue;
            }
            let title = record.get(title_index).unwrap_or("").trim();
            titles.insert(code.to_string(), title.to_string());
        }

        debug!("Parsed {} catalog entries", titles.len());
        Ok(Self { titles })
    }

    /// Title for a series id, if cached
    pub fn lookup(&self, series_id: &str) -> Option<&str> {
        if series_id.is_empty() {
            return None;
        }
        self.titles.get(series_id).map(String::as_str)
    }

    /// Number of cached titles
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// Whether the cache holds no titles
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

impl FromIterator<(String, String)> for CatalogCache {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            titles: iter.into_iter().collect(),
        }
    }
}

/// Default catalog location: next to the working directory
pub fn default_catalog_path() -> &'static Path {
    Path::new(files::DEFAULT_CATALOG_FILE)
}

/// Public page for a catalog item; blank for types without a page
pub fn catalog_link(item: &CatalogItem) -> String {
    match item.content_type {
        Some(ContentType::Series) => format!("{}/series/{}", api::SITE_URL, item.id),
        Some(ContentType::MovieListing) => format!("{}/watch/{}", api::SITE_URL, item.id),
        _ => String::new(),
    }
}

/// Map locale codes to display names, dropping unknown codes, sorted
pub fn map_languages(codes: &[String], languages: &[(&str, &'static str)]) -> Vec<&'static str> {
    let mut names: Vec<&'static str> = codes
        .iter()
        .filter_map(|code| {
            languages
                .iter()
                .find(|(known, _)| *known == code.as_str())
                .map(|(_, name)| *name)
        })
        .collect();
    names.sort_unstable();
    names
}
