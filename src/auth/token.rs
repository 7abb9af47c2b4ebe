//! Bearer token resolution and handling
//!
//! The token is resolved exactly once by the command dispatcher, from the
//! `--token` flag first and the `CRUNCHYROLL_TOKEN` environment variable
//! second, then handed to the HTTP client constructor.

use std::fmt;

use crate::constants::{auth, env as env_constants};
use crate::errors::{ConfigError, ConfigResult};

/// Where a resolved token came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// `--token` command-line flag
    Flag,
    /// `CRUNCHYROLL_TOKEN` environment variable (or `.env`)
    Environment,
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenSource::Flag => write!(f, "--token flag"),
            TokenSource::Environment => write!(f, "{} environment variable", env_constants::TOKEN),
        }
    }
}

/// A validated `Authorization` header value of the form `Bearer <token>`
///
/// `Debug` output is redacted so the credential never reaches the logs.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken {
    header_value: String,
}

impl BearerToken {
    /// Parse a user-supplied token, adding the `Bearer ` scheme if missing
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the token is empty or contains characters
    /// that cannot appear in an HTTP header.
    pub fn parse(raw: &str) -> ConfigResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::MissingToken);
        }

        let credential = match strip_scheme(trimmed) {
            Some(rest) => rest.trim(),
            None if trimmed.eq_ignore_ascii_case(auth::BEARER_PREFIX.trim_end()) => "",
            None => trimmed,
        };

        if credential.is_empty() {
            return Err(ConfigError::MalformedToken {
                reason: "the Bearer scheme is present but the token is empty".to_string(),
            });
        }

        if credential
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(ConfigError::MalformedToken {
                reason: "the token must not contain whitespace or control characters".to_string(),
            });
        }

        Ok(Self {
            header_value: format!("{}{}", auth::BEARER_PREFIX, credential),
        })
    }

    /// Value for the `Authorization` header
    pub fn header_value(&self) -> &str {
        &self.header_value
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

fn strip_scheme(value: &str) -> Option<&str> {
    let prefix_len = auth::BEARER_PREFIX.len();
    if value.len() >= prefix_len
        && value.is_char_boundary(prefix_len)
        && value[..prefix_len].eq_ignore_ascii_case(auth::BEARER_PREFIX)
    {
        Some(&value[prefix_len..])
    } else {
        None
    }
}

/// Resolve the bearer token from the flag, falling back to the environment
///
/// Empty values are treated as absent so an empty `--token ""` still falls
/// through to the environment variable.
///
/// # Errors
///
/// Returns `ConfigError::MissingToken` when neither source yields a value,
/// or `ConfigError::MalformedToken` when the chosen value is unusable.
pub fn resolve_token(
    flag: Option<&str>,
    env_value: Option<&str>,
) -> ConfigResult<(BearerToken, TokenSource)> {
    let candidate = flag
        .filter(|v| !v.trim().is_empty())
        .map(|v| (v, TokenSource::Flag))
        .or_else(|| {
            env_value
                .filter(|v| !v.trim().is_empty())
                .map(|v| (v, TokenSource::Environment))
        });

    let (raw, source) = candidate.ok_or(ConfigError::MissingToken)?;
    let token = BearerToken::parse(raw)?;
    tracing::debug!("Using token from {}", source);
    Ok((token, source))
}

/// Read the token environment variable, if set
pub fn token_from_env() -> Option<String> {
    std::env::var(env_constants::TOKEN).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_takes_precedence() {
        let (token, source) = resolve_token(Some("Bearer flag"), Some("Bearer env")).unwrap();
        assert_eq!(token.header_value(), "Bearer flag");
        assert_eq!(source, TokenSource::Flag);
    }

    #[test]
    fn test_env_fallback() {
        let (token, source) = resolve_token(None, Some("Bearer env")).unwrap();
        assert_eq!(token.header_value(), "Bearer env");
        assert_eq!(source, TokenSource::Environment);

        let (_, source) = resolve_token(Some("  "), Some("Bearer env")).unwrap();
        assert_eq!(source, TokenSource::Environment);
    }

    #[test]
    fn test_missing_token() {
        assert!(matches!(
            resolve_token(None, None),
            Err(ConfigError::MissingToken)
        ));
        assert!(matches!(
            resolve_token(Some(""), Some("")),
            Err(ConfigError::MissingToken)
        ));
    }

    #[test]
    fn test_bare_token_gets_scheme() {
        let token = BearerToken::parse("eyJhbGciOi.abc").unwrap();
        assert_eq!(token.header_value(), "Bearer eyJhbGciOi.abc");

        let token = BearerToken::parse("bearer eyJ").unwrap();
        assert_eq!(token.header_value(), "Bearer eyJ");
    }

    #[test]
    fn test_malformed_tokens() {
        assert!(matches!(
            BearerToken::parse("Bearer "),
            Err(ConfigError::MissingToken) | Err(ConfigError::MalformedToken { .. })
        ));
        assert!(matches!(
            BearerToken::parse("Bearer abc def"),
            Err(ConfigError::MalformedToken { .. })
        ));
    }

    #[test]
    fn test_debug_is_redacted() {
        let token = BearerToken::parse("Bearer secret-value").unwrap();
        let debug = format!("{:?}", token);
        assert!(!debug.contains("secret-value"));
    }
}
