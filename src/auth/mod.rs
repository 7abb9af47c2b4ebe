//! Bearer token handling for the Crunchyroll web API
//!
//! The exporter never acquires or refreshes tokens. It only resolves the one
//! the user copied from a browser session and validates its shape.
//!
//! # Examples
//!
//! ```rust
//! use crunchyroll_exporter::auth::{resolve_token, TokenSource};
//!
//! let (token, source) = resolve_token(Some("Bearer abc"), None).unwrap();
//! assert_eq!(token.header_value(), "Bearer abc");
//! assert_eq!(source, TokenSource::Flag);
//! ```

pub mod token;

// Re-export main public API
pub use token::{resolve_token, token_from_env, BearerToken, TokenSource};
