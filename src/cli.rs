//! Command-line arguments.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::settings::SetupSettings;

#[derive(Parser, Debug, Clone)]
#[command(name = "dokploy-setup")]
#[command(about = "Configure the Dokploy MCP server in ~/.claude/mcp.json", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Dokploy dashboard URL (prompted for when omitted)
    #[arg(long)]
    pub url: Option<String>,

    /// Dokploy API key (prompted for when omitted)
    #[arg(long)]
    pub key: Option<String>,

    /// MCP manifest to update
    #[arg(long, value_name = "PATH", env = "DOKPLOY_SETUP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verify TLS certificates. By default self-signed certificates are
    /// accepted, since Dokploy is usually self-hosted.
    #[arg(long)]
    pub strict_tls: bool,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 10)]
    pub timeout: u64,
}

impl Cli {
    /// Resolve into run settings on top of `base` (normally `SetupSettings::from_env()`).
    pub fn into_settings(self, base: SetupSettings) -> SetupSettings {
        let mut settings = base;
        // An empty flag value counts as absent, as with an empty prompt answer.
        settings.url = self.url.filter(|u| !u.trim().is_empty());
        settings.api_key = self.key.filter(|k| !k.trim().is_empty());
        if let Some(path) = self.config {
            settings.config_path = path;
        }
        settings.client.timeout = Duration::from_secs(self.timeout);
        settings.client.accept_invalid_certs = !self.strict_tls;
        settings
    }
}
