//! Settings for a single setup run.
//!
//! Values come from the command line; environment variables only supply
//! defaults shown in the interactive prompts:
//! - `DOKPLOY_URL` - default for the URL prompt
//! - `DOKPLOY_API_KEY` - default for the API key prompt

use std::path::PathBuf;

use crate::client::ClientOptions;
use crate::mcp::{default_config_path, HostPlatform, ENV_API_KEY, ENV_URL};

#[derive(Debug, Clone)]
pub struct SetupSettings {
    /// URL given on the command line. Prompted for when `None`.
    pub url: Option<String>,
    /// API key given on the command line. Prompted for when `None`.
    pub api_key: Option<String>,
    pub url_default: Option<String>,
    pub api_key_default: Option<String>,
    /// Manifest to update (`~/.claude/mcp.json` unless overridden).
    pub config_path: PathBuf,
    pub client: ClientOptions,
    pub platform: HostPlatform,
}

impl Default for SetupSettings {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            url_default: None,
            api_key_default: None,
            config_path: default_config_path(),
            client: ClientOptions::default(),
            platform: HostPlatform::current(),
        }
    }
}

impl SetupSettings {
    /// Defaults with prompt defaults taken from the environment.
    pub fn from_env() -> Self {
        Self {
            url_default: non_empty_var(ENV_URL),
            api_key_default: non_empty_var(ENV_API_KEY),
            ..Self::default()
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
