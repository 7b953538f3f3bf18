//! Credential resolution.
//!
//! A token is taken from the first non-empty source, in this order:
//! 1. the explicit `--token` argument
//! 2. the `GITHUB_TOKEN` environment variable
//! 3. the `~/.github-token` file (surrounding whitespace trimmed)

use std::fs;
use std::path::PathBuf;

use crate::error::{ReportError, Result};

/// Environment variable consulted after the explicit argument.
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Name of the token file in the user's home directory.
pub const TOKEN_DOTFILE: &str = ".github-token";

/// An opaque API token. The value is never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for building the `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Where a resolved token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Argument,
    Environment,
    Dotfile,
}

/// The candidate token sources, captured once at startup.
#[derive(Debug, Clone, Default)]
pub struct TokenSources {
    pub explicit: Option<String>,
    pub env: Option<String>,
    pub dotfile: Option<PathBuf>,
}

impl TokenSources {
    /// Capture the explicit argument and `GITHUB_TOKEN`, with the dotfile at `dotfile`.
    pub fn from_env(explicit: Option<String>, dotfile: Option<PathBuf>) -> Self {
        Self {
            explicit,
            env: std::env::var(GITHUB_TOKEN_ENV).ok(),
            dotfile,
        }
    }

    /// Resolve the first non-empty token.
    pub fn resolve(&self) -> Result<(Credential, TokenSource)> {
        if let Some(token) = non_empty(self.explicit.as_deref()) {
            return Ok((Credential::new(token), TokenSource::Argument));
        }
        if let Some(token) = non_empty(self.env.as_deref()) {
            return Ok((Credential::new(token), TokenSource::Environment));
        }
        if let Some(path) = &self.dotfile {
            match fs::read_to_string(path) {
                Ok(contents) => {
                    if let Some(token) = non_empty(Some(contents.trim())) {
                        return Ok((Credential::new(token), TokenSource::Dotfile));
                    }
                }
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "Token file not readable");
                }
            }
        }
        Err(ReportError::MissingCredential)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
