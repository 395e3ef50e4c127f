//! `mcp.json` document: load, upsert, write.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use directories::BaseDirs;
use serde_json::{Map, Value};

use super::types::{McpServerEntry, UpsertOutcome};

/// Top-level key holding the server map.
pub const SERVERS_KEY: &str = "mcpServers";

/// `~/.claude/mcp.json`.
pub fn default_config_path() -> PathBuf {
    let home = BaseDirs::new()
        .map(|d| d.home_dir().to_path_buf())
        .or_else(|| std::env::var_os("HOME").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));
    home.join(".claude").join("mcp.json")
}

/// In-memory manifest. Keys keep their on-disk order and numbers keep their
/// on-disk text.
#[derive(Debug, Clone, PartialEq)]
pub struct McpDocument {
    root: Map<String, Value>,
}

impl Default for McpDocument {
    fn default() -> Self {
        let mut root = Map::new();
        root.insert(SERVERS_KEY.to_string(), Value::Object(Map::new()));
        Self { root }
    }
}

impl McpDocument {
    /// Load from `path`.
    ///
    /// A missing file or content that is not a JSON object yields an empty
    /// document. Any other read failure is returned, so a file we cannot read
    /// is never overwritten with a fresh document.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No MCP config at {}, starting fresh", path.display());
                return Ok(Self::default());
            }
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                tracing::warn!(
                    "MCP config at {} is not UTF-8, starting fresh",
                    path.display()
                );
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()));
            }
        };

        Ok(Self::parse(&contents).unwrap_or_else(|| {
            tracing::warn!(
                "Ignoring malformed MCP config at {}, starting fresh",
                path.display()
            );
            Self::default()
        }))
    }

    /// Parse a document. Returns `None` unless the top level is a JSON object.
    pub fn parse(contents: &str) -> Option<Self> {
        match serde_json::from_str::<Value>(contents).ok()? {
            Value::Object(mut root) => {
                if !root.get(SERVERS_KEY).map_or(false, Value::is_object) {
                    if root.contains_key(SERVERS_KEY) {
                        tracing::warn!("`{}` is not an object, replacing it", SERVERS_KEY);
                    }
                    root.insert(SERVERS_KEY.to_string(), Value::Object(Map::new()));
                }
                Some(Self { root })
            }
            _ => None,
        }
    }

    /// Insert or replace the entry `name`, leaving every other key untouched.
    pub fn upsert(&mut self, name: &str, entry: &McpServerEntry) -> anyhow::Result<UpsertOutcome> {
        let value = serde_json::to_value(entry).context("Failed to serialize MCP entry")?;
        let servers = self
            .root
            .entry(SERVERS_KEY.to_string())
            .or_insert_with(|| Value::Object(Map::new()));

        let previous = match servers {
            Value::Object(map) => map.insert(name.to_string(), value),
            other => {
                let mut map = Map::new();
                map.insert(name.to_string(), value);
                *other = Value::Object(map);
                None
            }
        };

        Ok(if previous.is_some() {
            UpsertOutcome::Updated
        } else {
            UpsertOutcome::Added
        })
    }

    /// Pretty-printed JSON with a trailing newline.
    pub fn to_pretty_string(&self) -> anyhow::Result<String> {
        let mut contents = serde_json::to_string_pretty(&self.root)?;
        contents.push('\n');
        Ok(contents)
    }

    /// Write to `path`, creating the parent directory.
    ///
    /// Symlinks are followed so the link target is what gets updated. The
    /// content goes to a sibling temp file carrying the existing file's
    /// permissions and is then renamed over the target.
    pub fn write_to(&self, path: &Path) -> anyhow::Result<()> {
        let target = match std::fs::canonicalize(path) {
            Ok(resolved) => resolved,
            Err(e) if e.kind() == io::ErrorKind::NotFound => path.to_path_buf(),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to resolve {}", path.display()));
            }
        };

        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let permissions = std::fs::metadata(&target).ok().map(|m| m.permissions());
        let contents = self.to_pretty_string()?;
        let tmp_path = target.with_extension("json.tmp");
        {
            let mut file = std::fs::File::create(&tmp_path)
                .with_context(|| format!("Failed to create {}", tmp_path.display()))?;
            if let Some(permissions) = permissions {
                file.set_permissions(permissions)
                    .with_context(|| format!("Failed to set permissions on {}", tmp_path.display()))?;
            }
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        }
        std::fs::rename(&tmp_path, &target)
            .with_context(|| format!("Failed to replace {}", target.display()))?;

        tracing::info!("Saved MCP config to {}", target.display());
        Ok(())
    }
}
