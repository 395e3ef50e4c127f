//! Minimal Dokploy API client: health check and project listing.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::connection::Connection;

/// Header carrying the Dokploy API key.
pub const API_KEY_HEADER: &str = "x-api-key";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP {status}: {reason}")]
    Http { status: u16, reason: String },

    #[error("{0}")]
    Transport(String),

    #[error("Invalid response body: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Transport(format!("Request timeout: {}", e))
        } else if e.is_connect() {
            ApiError::Transport(format!("Connection failed: {}", e))
        } else {
            ApiError::Transport(format!("Request failed: {}", e))
        }
    }
}

/// A project as shown in the post-validation summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    pub name: String,
    pub id: String,
}

#[derive(Debug, Deserialize)]
struct TrpcEnvelope {
    result: TrpcResult,
}

#[derive(Debug, Deserialize)]
struct TrpcResult {
    data: TrpcData,
}

#[derive(Debug, Deserialize)]
struct TrpcData {
    json: Vec<Value>,
}

/// Client options.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub timeout: Duration,
    /// Accept self-signed and otherwise invalid certificates. Dokploy is
    /// commonly self-hosted behind a self-signed certificate, so setup
    /// defaults to this; `--strict-tls` turns it off.
    pub accept_invalid_certs: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            accept_invalid_certs: true,
        }
    }
}

pub struct DokployClient {
    client: Client,
    connection: Connection,
}

impl DokployClient {
    pub fn new(connection: Connection, options: &ClientOptions) -> Result<Self, ApiError> {
        let mut builder = Client::builder().timeout(options.timeout);
        if options.accept_invalid_certs {
            tracing::warn!("TLS certificate verification disabled for {}", connection.base_url());
            builder = builder.danger_accept_invalid_certs(true);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, connection })
    }

    async fn get_json(&self, url: &str) -> Result<Value, ApiError> {
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, self.connection.api_key())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                reason: reason_phrase(&response),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Call `settings.health`, returning its JSON body on success.
    pub async fn health(&self) -> Result<Value, ApiError> {
        self.get_json(&self.connection.health_url()).await
    }

    /// List projects. Best-effort: any failure yields an empty list.
    pub async fn projects(&self) -> Vec<ProjectSummary> {
        match self.try_projects().await {
            Ok(projects) => projects,
            Err(e) => {
                tracing::debug!("Project listing failed, skipping: {}", e);
                Vec::new()
            }
        }
    }

    async fn try_projects(&self) -> Result<Vec<ProjectSummary>, ApiError> {
        let value = self.get_json(&self.connection.projects_url()).await?;
        parse_projects(value)
    }
}

/// Reason phrase as sent by the server, falling back to the canonical one.
///
/// hyper only records the phrase when it differs from the canonical text,
/// which covers non-standard codes such as Cloudflare's 52x.
fn reason_phrase(response: &reqwest::Response) -> String {
    response
        .extensions()
        .get::<hyper::ext::ReasonPhrase>()
        .map(|r| String::from_utf8_lossy(r.as_bytes()).into_owned())
        .or_else(|| response.status().canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "Unknown Status".to_string())
}

/// Extract projects from a tRPC `project.all` response (`result.data.json`).
pub fn parse_projects(value: Value) -> Result<Vec<ProjectSummary>, ApiError> {
    let envelope: TrpcEnvelope =
        serde_json::from_value(value).map_err(|e| ApiError::Parse(e.to_string()))?;

    Ok(envelope
        .result
        .data
        .json
        .iter()
        .map(|p| ProjectSummary {
            name: string_field(p, "name"),
            id: string_field(p, "projectId"),
        })
        .collect())
}

fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(|v| v.as_str())
        .unwrap_or("?")
        .to_string()
}
