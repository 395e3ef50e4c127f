//! The setup flow: collect inputs, validate, list projects, write the manifest.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;

use crate::client::{DokployClient, ProjectSummary};
use crate::connection::{normalize_base_url, Connection, InputError};
use crate::mcp::{
    McpDocument, McpServerEntry, UpsertOutcome, SERVER_NAME, SERVER_PACKAGE, SERVER_TOOL_COUNT,
};
use crate::prompt::Prompt;
use crate::settings::SetupSettings;

const RULE: &str = "==================================================";

/// Projects listed before collapsing the rest into "... and N more".
const MAX_LISTED_PROJECTS: usize = 5;

/// Characters of a project id shown in the listing.
const PROJECT_ID_PREVIEW: usize = 20;

/// How a run ended.
#[derive(Debug)]
pub enum SetupOutcome {
    Configured {
        upsert: UpsertOutcome,
        config_path: PathBuf,
    },
    MissingInput(InputError),
    /// Connectivity check failed and the user chose not to save anyway.
    Declined,
}

impl SetupOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Configured { .. })
    }
}

/// Run the whole setup, writing progress to `out` and asking through `prompt`.
///
/// I/O failures on the handles or the manifest are returned as errors;
/// user-facing failures come back as a `SetupOutcome`.
pub async fn run<W: Write, P: Prompt>(
    settings: &SetupSettings,
    out: &mut W,
    prompt: &mut P,
) -> anyhow::Result<SetupOutcome> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "  Dokploy Deploy Skill — Setup")?;
    writeln!(out, "{}", RULE)?;
    writeln!(out)?;

    let url = match &settings.url {
        Some(url) => Some(url.clone()),
        None => {
            writeln!(out, "Step 1/3: Dokploy URL")?;
            writeln!(out, "  Enter your Dokploy dashboard URL.")?;
            writeln!(out, "  Example: https://dokploy.example.com")?;
            writeln!(out)?;
            out.flush()?;
            prompt.ask("  Dokploy URL", settings.url_default.as_deref())?
        }
    };
    let url = normalize_base_url(url.as_deref().unwrap_or_default());
    if url.is_empty() {
        return missing(out, InputError::MissingUrl);
    }
    writeln!(out)?;

    let api_key = match &settings.api_key {
        Some(key) => Some(key.clone()),
        None => {
            writeln!(out, "Step 2/3: API Key")?;
            writeln!(
                out,
                "  Generate at: Dashboard -> Settings -> Profile -> API/CLI -> Generate"
            )?;
            writeln!(out)?;
            out.flush()?;
            prompt.ask("  API Key", settings.api_key_default.as_deref())?
        }
    };
    let connection = match Connection::new(&url, api_key.as_deref().unwrap_or_default()) {
        Ok(connection) => connection,
        Err(e) => return missing(out, e),
    };
    writeln!(out)?;

    writeln!(out, "Step 3/3: Validating connection...")?;
    let client = DokployClient::new(connection.clone(), &settings.client)
        .context("Failed to create HTTP client")?;

    match client.health().await {
        Ok(_) => {
            writeln!(out, "  OK — Dokploy is reachable")?;
            let projects = client.projects().await;
            print_projects(out, &projects)?;
        }
        Err(e) => {
            tracing::debug!("Health check failed: {:?}", e);
            writeln!(out)?;
            writeln!(out, "  ERROR: Cannot connect to Dokploy: {}", e)?;
            writeln!(out, "  URL tried: {}", connection.health_url())?;
            writeln!(out)?;
            out.flush()?;
            if !prompt.confirm("  Save config anyway?")? {
                return Ok(SetupOutcome::Declined);
            }
        }
    }
    writeln!(out)?;

    let config_path = settings.config_path.clone();
    let mut document = McpDocument::load(&config_path)?;
    let entry = McpServerEntry::dokploy(&connection, settings.platform);
    let upsert = document.upsert(SERVER_NAME, &entry)?;
    document.write_to(&config_path)?;
    writeln!(
        out,
        "  {} '{}' MCP server in {}",
        upsert.as_str(),
        SERVER_NAME,
        config_path.display()
    )?;

    writeln!(out)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "  Setup complete!")?;
    writeln!(out)?;
    writeln!(
        out,
        "  MCP server: {} ({} tools)",
        SERVER_PACKAGE, SERVER_TOOL_COUNT
    )?;
    writeln!(out, "  Dokploy:    {}", connection.base_url())?;
    writeln!(out, "  Config:     {}", config_path.display())?;
    writeln!(out)?;
    writeln!(out, "  Restart your MCP host to activate the server.")?;
    writeln!(out, "  Then use /dokploy-deploy to deploy your apps.")?;
    writeln!(out, "{}", RULE)?;

    Ok(SetupOutcome::Configured {
        upsert,
        config_path,
    })
}

fn missing<W: Write>(out: &mut W, error: InputError) -> anyhow::Result<SetupOutcome> {
    writeln!(out)?;
    writeln!(out, "  ERROR: {}", error)?;
    Ok(SetupOutcome::MissingInput(error))
}

fn print_projects<W: Write>(out: &mut W, projects: &[ProjectSummary]) -> anyhow::Result<()> {
    if projects.is_empty() {
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "  Found {} project(s):", projects.len())?;
    for project in projects.iter().take(MAX_LISTED_PROJECTS) {
        let short_id: String = project.id.chars().take(PROJECT_ID_PREVIEW).collect();
        writeln!(out, "    - {} (id: {}...)", project.name, short_id)?;
    }
    if projects.len() > MAX_LISTED_PROJECTS {
        writeln!(
            out,
            "    ... and {} more",
            projects.len() - MAX_LISTED_PROJECTS
        )?;
    }
    Ok(())
}
