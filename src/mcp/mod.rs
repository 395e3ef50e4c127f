//! MCP manifest handling.
//!
//! Reads the host tool's `mcp.json`, upserts the `dokploy` server entry and
//! writes the document back. Everything else in the file is left untouched.

mod config;
mod types;

pub use config::{default_config_path, McpDocument};
pub use types::*;
