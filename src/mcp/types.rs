//! MCP server entry types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::connection::Connection;

/// Key of our entry under `mcpServers`.
pub const SERVER_NAME: &str = "dokploy";

/// npm package providing the Dokploy MCP server.
pub const SERVER_PACKAGE: &str = "@ahdev/dokploy-mcp";

/// Tools exposed by `SERVER_PACKAGE`, shown in the setup summary.
pub const SERVER_TOOL_COUNT: usize = 67;

pub const ENV_URL: &str = "DOKPLOY_URL";
pub const ENV_API_KEY: &str = "DOKPLOY_API_KEY";

/// Platform family the launch command is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPlatform {
    /// `npx` is a `.cmd` shim on Windows and must go through `cmd /c`.
    Windows,
    Unix,
}

impl HostPlatform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Unix
        }
    }
}

/// Stdio launch descriptor as stored under `mcpServers.<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpServerEntry {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

impl McpServerEntry {
    /// Entry launching the Dokploy MCP server via `npx` for `connection`.
    pub fn dokploy(connection: &Connection, platform: HostPlatform) -> Self {
        let npx_args = ["-y", SERVER_PACKAGE];
        let (command, args): (&str, Vec<&str>) = match platform {
            HostPlatform::Windows => ("cmd", ["/c", "npx"].into_iter().chain(npx_args).collect()),
            HostPlatform::Unix => ("npx", npx_args.to_vec()),
        };

        let mut env = BTreeMap::new();
        env.insert(ENV_URL.to_string(), connection.api_base());
        env.insert(ENV_API_KEY.to_string(), connection.api_key().to_string());

        Self {
            command: command.to_string(),
            args: args.into_iter().map(String::from).collect(),
            env,
        }
    }
}

/// Result of upserting an entry into the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Added,
    Updated,
}

impl UpsertOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "Added",
            Self::Updated => "Updated",
        }
    }
}
