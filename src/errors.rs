//! Error types for the Crunchyroll exporter
//!
//! Every failure category is fatal except a missing catalog file, which the
//! catalog loader handles itself. Errors carry enough context (endpoint,
//! status, offending column names) to be actionable from the terminal.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration and argument errors, raised before any network call
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No token on the command line or in the environment
    #[error(
        "Missing Crunchyroll token. Pass --token \"Bearer <token>\" or set the CRUNCHYROLL_TOKEN environment variable"
    )]
    MissingToken,

    /// Token present but unusable
    #[error("Malformed token: {reason}")]
    MalformedToken { reason: String },

    /// Explicitly requested configuration file does not exist
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Configuration file could not be read
    #[error("Failed to read configuration file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration format
    #[error("Invalid configuration format")]
    InvalidFormat(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Authentication errors reported by the remote API
#[derive(Error, Debug)]
pub enum AuthError {
    /// The server refused the token
    #[error(
        "Crunchyroll rejected the token (HTTP {status}) at {endpoint}. Copy a fresh token from your browser and try again"
    )]
    Rejected { endpoint: String, status: u16 },

    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client")]
    Client(#[source] reqwest::Error),
}

/// Request failures after the retry policy gave up
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transient failures persisted past the retry budget
    #[error(
        "Request to {endpoint} failed after {attempts} attempts (last status: {})",
        display_status(.last_status)
    )]
    RetriesExhausted {
        endpoint: String,
        attempts: u32,
        last_status: Option<u16>,
    },

    /// Non-retryable error status
    #[error("Request to {endpoint} failed with HTTP {status}")]
    Status { endpoint: String, status: u16 },

    /// Endpoint URL could not be built
    #[error("Invalid URL: {url} - {error}")]
    InvalidUrl { url: String, error: String },
}

fn display_status(status: &Option<u16>) -> String {
    status.map_or_else(|| "none".to_string(), |s| s.to_string())
}

/// Response shape errors, usually an upstream API change
#[derive(Error, Debug)]
pub enum ParseError {
    /// Body is not JSON
    #[error("Response from {endpoint} is not valid JSON")]
    Json {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// Expected key missing from the body
    #[error("Response from {endpoint} has no '{key}' field. The Crunchyroll API may have changed")]
    MissingKey { endpoint: String, key: String },

    /// Key present but of the wrong JSON type
    #[error("Field '{key}' in response from {endpoint} is not {expected}")]
    UnexpectedType {
        endpoint: String,
        key: String,
        expected: &'static str,
    },

    /// Server returned a cursor we already followed
    #[error("Pagination for {endpoint} returned a repeated cursor: {cursor}")]
    RepeatedCursor { endpoint: String, cursor: String },

    /// Cursor points at a different origin than the API base URL
    #[error("Pagination for {endpoint} returned a cursor outside the API: {cursor}")]
    ForeignCursor { endpoint: String, cursor: String },

    /// Page limit exceeded
    #[error("Pagination for {endpoint} exceeded {max_pages} pages")]
    TooManyPages { endpoint: String, max_pages: usize },
}

/// Column selection errors
#[derive(Error, Debug)]
pub enum ValidationError {
    /// One or more requested columns are not recognized
    #[error(
        "[{kind}] Invalid column(s): {}. Recognized columns: {}",
        .invalid.join(", "),
        .recognized.join(", ")
    )]
    InvalidColumns {
        kind: String,
        invalid: Vec<String>,
        recognized: Vec<String>,
    },

    /// The column list was given but names nothing
    #[error("[{kind}] Column list is empty")]
    EmptySelection { kind: String },
}

/// Top-level application error
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Authentication error
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Fetch error
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Parse error
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Validation error
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Output file error
    #[error("Failed to write {path}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV serialization error
    #[error("CSV error")]
    Csv(#[from] csv::Error),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Wrap an I/O error with the output path it concerns
    pub fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Output {
            path: path.into(),
            source,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config",
            AppError::Auth(_) => "authentication",
            AppError::Fetch(_) => "fetch",
            AppError::Parse(_) => "parse",
            AppError::Validation(_) => "validation",
            AppError::Output { .. } | AppError::Csv(_) | AppError::Io(_) => "io",
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Config(_) => 2,
            AppError::Auth(_) => 3,
            AppError::Fetch(_) => 4,
            AppError::Parse(_) => 5,
            AppError::Validation(_) => 6,
            AppError::Output { .. } | AppError::Csv(_) | AppError::Io(_) => 7,
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
