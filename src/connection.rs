//! Connection descriptor for a Dokploy instance.
//!
//! Users paste either the dashboard URL or the API URL, with or without a
//! trailing slash. Everything is reduced to a single base URL; the API base
//! is always derived as `{base}/api`.

use thiserror::Error;

/// Path suffix of the Dokploy API under the dashboard URL.
pub const API_SUFFIX: &str = "/api";

/// Health endpoint, relative to the API base.
pub const HEALTH_PATH: &str = "settings.health";

/// Project listing endpoint (tRPC), relative to the API base.
pub const PROJECTS_PATH: &str = "trpc/project.all";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("URL is required.")]
    MissingUrl,

    #[error("API key is required.")]
    MissingKey,
}

/// Normalize a user-supplied Dokploy URL to its base (no trailing slash, no `/api`).
///
/// Applied until stable, so normalizing an already-normalized URL is a no-op.
pub fn normalize_base_url(url: &str) -> String {
    let mut base = url;
    loop {
        let trimmed = base.trim().trim_end_matches('/');
        let trimmed = trimmed.strip_suffix(API_SUFFIX).unwrap_or(trimmed);
        if trimmed == base {
            break;
        }
        base = trimmed;
    }
    base.to_string()
}

/// Normalized base URL plus API key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    base_url: String,
    api_key: String,
}

impl Connection {
    /// Build a connection, rejecting values that are empty after normalization.
    pub fn new(url: &str, api_key: &str) -> Result<Self, InputError> {
        let base_url = normalize_base_url(url);
        if base_url.is_empty() {
            return Err(InputError::MissingUrl);
        }
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(InputError::MissingKey);
        }
        Ok(Self {
            base_url,
            api_key: api_key.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// `{base}/api`, the value handed to the MCP server as `DOKPLOY_URL`.
    pub fn api_base(&self) -> String {
        format!("{}{}", self.base_url, API_SUFFIX)
    }

    pub fn health_url(&self) -> String {
        format!("{}/{}", self.api_base(), HEALTH_PATH)
    }

    pub fn projects_url(&self) -> String {
        format!("{}/{}", self.api_base(), PROJECTS_PATH)
    }
}
