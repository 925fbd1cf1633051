// SPDX-License-Identifier: Apache-2.0

//! Output rendering for CLI commands.
//!
//! Command handlers return data; this module handles presentation.

use std::io::{self, Write};

use anyhow::{Context, Result};
use console::style;
use issuelens_core::{IssueAnalysis, IssueType};
use serde::Serialize;

use crate::cli::{OutputContext, OutputFormat};

/// Trait for types that can be rendered in multiple output formats.
pub trait Renderable: Serialize {
    /// Render as human-readable text to the given writer.
    fn render_text(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()>;
}

/// Generic render function - handles JSON via serde, delegates text to the trait.
pub fn render<T: Renderable>(result: &T, ctx: &OutputContext) -> Result<()> {
    match ctx.format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(result).context("Failed to serialize to JSON")?;
            println!("{json}");
        }
        OutputFormat::Text => {
            result
                .render_text(&mut io::stdout(), ctx)
                .context("Failed to render text")?;
        }
    }
    Ok(())
}

/// Result of `issuelens analyze`.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct AnalyzeResult {
    /// The normalized analysis.
    pub analysis: IssueAnalysis,
    /// `owner/repo#number`, shown in text output only.
    #[serde(skip)]
    pub reference: String,
}

/// Result of `issuelens prompt`.
#[derive(Debug, Serialize)]
pub struct PromptResult {
    /// Model name the prompt would be sent to.
    pub model: String,
    /// System instruction.
    pub system: &'static str,
    /// Rendered user prompt.
    pub prompt: String,
}

fn styled_type(issue_type: IssueType, ctx: &OutputContext) -> String {
    let label = issue_type.as_str();
    if !ctx.is_interactive() {
        return label.to_string();
    }
    match issue_type {
        IssueType::Bug => style(label).red().bold().to_string(),
        IssueType::FeatureRequest => style(label).green().bold().to_string(),
        IssueType::Documentation => style(label).blue().bold().to_string(),
        IssueType::Question => style(label).yellow().bold().to_string(),
        IssueType::Other => style(label).dim().to_string(),
    }
}

fn heading(text: &str, ctx: &OutputContext) -> String {
    if ctx.is_interactive() {
        style(text).cyan().bold().to_string()
    } else {
        text.to_string()
    }
}

fn or_none(text: &str) -> &str {
    if text.is_empty() { "(none)" } else { text }
}

impl Renderable for AnalyzeResult {
    fn render_text(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()> {
        let a = &self.analysis;

        writeln!(w, "{}", heading(&self.reference, ctx))?;
        writeln!(w)?;
        writeln!(w, "{} {}", heading("Summary:", ctx), or_none(&a.summary))?;
        writeln!(w, "{} {}", heading("Type:", ctx), styled_type(a.issue_type, ctx))?;
        writeln!(w, "{} {}", heading("Priority:", ctx), or_none(&a.priority_score))?;

        writeln!(w, "{}", heading("Suggested labels:", ctx))?;
        if a.suggested_labels.is_empty() {
            writeln!(w, "  (none)")?;
        } else {
            for label in &a.suggested_labels {
                writeln!(w, "  - {label}")?;
            }
        }

        writeln!(w, "{} {}", heading("Potential impact:", ctx), or_none(&a.potential_impact))?;
        Ok(())
    }
}

impl Renderable for PromptResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w, "{}", self.prompt)
    }
}
