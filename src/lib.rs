//! # dokploy-setup
//!
//! Interactive setup for the Dokploy MCP server.
//!
//! ## Flow
//! 1. Collect the Dokploy URL and API key (flags or prompts)
//! 2. Validate the key against `settings.health`
//! 3. List a few projects so the user can confirm the right instance
//! 4. Upsert the `dokploy` entry into `~/.claude/mcp.json`
//!
//! ## Modules
//! - `connection`: URL normalization and endpoint derivation
//! - `client`: health check and project listing
//! - `mcp`: manifest read/merge/write
//! - `setup`: the end-to-end flow

pub mod cli;
pub mod client;
pub mod connection;
pub mod mcp;
pub mod prompt;
pub mod settings;
pub mod setup;

pub use connection::Connection;
pub use settings::SetupSettings;
pub use setup::SetupOutcome;
