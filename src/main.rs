use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use dokploy_setup::cli::Cli;
use dokploy_setup::prompt::{LinePrompt, TerminalPrompt};
use dokploy_setup::{setup, SetupSettings};

fn main() -> anyhow::Result<ExitCode> {
    // Console output is the user-facing text; logs go to stderr and stay
    // quiet unless RUST_LOG asks for more.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("dokploy_setup=warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let settings = Cli::parse().into_settings(SetupSettings::from_env());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start tokio runtime")?;

    let mut out = std::io::stdout();
    let stdin = std::io::stdin();
    // dialoguer needs a terminal; piped input is read line by line.
    let outcome = if stdin.is_terminal() && std::io::stderr().is_terminal() {
        runtime.block_on(setup::run(&settings, &mut out, &mut TerminalPrompt))?
    } else {
        let mut prompt = LinePrompt::new(stdin.lock(), std::io::stdout());
        runtime.block_on(setup::run(&settings, &mut out, &mut prompt))?
    };
    tracing::debug!("Setup finished: {:?}", outcome);

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
