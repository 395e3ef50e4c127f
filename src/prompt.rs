//! Interactive prompts.
//!
//! `TerminalPrompt` drives a real terminal through `dialoguer`. `LinePrompt`
//! reads plain lines, for piped stdin and for driving the setup flow from
//! in-memory buffers.

use std::io::{BufRead, Write};

use dialoguer::{Confirm, Input};

pub trait Prompt {
    /// Ask for a value. An empty answer yields `default`.
    fn ask(&mut self, label: &str, default: Option<&str>) -> anyhow::Result<Option<String>>;

    /// Yes/no question defaulting to "no".
    fn confirm(&mut self, label: &str) -> anyhow::Result<bool>;
}

/// Prompts rendered by `dialoguer` on the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn ask(&mut self, label: &str, default: Option<&str>) -> anyhow::Result<Option<String>> {
        let mut input = Input::<String>::new().with_prompt(label).allow_empty(true);
        if let Some(d) = default.filter(|d| !d.is_empty()) {
            input = input.default(d.to_string());
        }
        let value = input.interact_text()?;
        let value = value.trim();
        Ok((!value.is_empty()).then(|| value.to_string()))
    }

    fn confirm(&mut self, label: &str) -> anyhow::Result<bool> {
        Ok(Confirm::new().with_prompt(label).default(false).interact()?)
    }
}

/// Line-based prompts over any reader/writer pair.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writer the prompt labels went to.
    pub fn output(&self) -> &W {
        &self.output
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    /// Renders as `label [default]: ` when a non-empty default is given,
    /// `label: ` otherwise. EOF counts as an empty answer.
    fn ask(&mut self, label: &str, default: Option<&str>) -> anyhow::Result<Option<String>> {
        let default = default.filter(|d| !d.is_empty());
        match default {
            Some(d) => write!(self.output, "{} [{}]: ", label, d)?,
            None => write!(self.output, "{}: ", label)?,
        }
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;
        let value = line.trim();

        if value.is_empty() {
            Ok(default.map(str::to_string))
        } else {
            Ok(Some(value.to_string()))
        }
    }

    fn confirm(&mut self, label: &str) -> anyhow::Result<bool> {
        let answer = self
            .ask(&format!("{} (y/N)", label), Some("N"))?
            .unwrap_or_default();
        Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
    }
}
