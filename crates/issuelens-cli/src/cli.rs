// SPDX-License-Identifier: Apache-2.0

//! Command-line interface definition for issuelens.
//!
//! Uses clap's derive API for declarative CLI parsing.

use std::io::IsTerminal;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Extended help text for the completion subcommand with shell-specific examples.
const COMPLETION_HELP: &str = r#"EXAMPLES

  bash
    Add to ~/.bashrc or ~/.bash_profile:
      eval "$(issuelens completion bash)"

  zsh
    Generate completion file:
      mkdir -p ~/.zsh/completions
      issuelens completion zsh > ~/.zsh/completions/_issuelens

  fish
    Generate completion file:
      issuelens completion fish > ~/.config/fish/completions/issuelens.fish
"#;

/// Output format for CLI results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with colors (default)
    #[default]
    Text,
    /// JSON output for programmatic consumption
    Json,
}

/// Global output configuration passed to commands.
#[derive(Clone, Debug)]
pub struct OutputContext {
    /// Output format (text, json)
    pub format: OutputFormat,
    /// Suppress non-essential output (spinners)
    pub quiet: bool,
    /// Whether stdout is a terminal (TTY)
    pub is_tty: bool,
}

impl OutputContext {
    /// Creates an `OutputContext` from CLI arguments.
    pub fn from_cli(format: OutputFormat, quiet: bool) -> Self {
        Self {
            format,
            quiet,
            is_tty: std::io::stdout().is_terminal(),
        }
    }

    /// Returns true if interactive elements (spinners, colors) should be shown.
    pub fn is_interactive(&self) -> bool {
        self.is_tty && !self.quiet && matches!(self.format, OutputFormat::Text)
    }
}

/// issuelens - Analyze GitHub issues with a local Ollama model.
///
/// Fetches an issue with its comments, asks the model for a structured
/// triage record and prints it.
#[derive(Debug, Parser)]
#[command(name = "issuelens")]
#[command(version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Output format (text, json)
    #[arg(long, short = 'o', global = true, default_value = "text", value_enum)]
    pub output: OutputFormat,

    /// Suppress non-essential output (spinners)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Override configured Ollama model (e.g., llama3, mistral)
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Override configured Ollama base URL
    #[arg(long, global = true, value_name = "URL")]
    pub ollama_url: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Analyze a GitHub issue with the configured model
    Analyze {
        /// Repository URL (e.g., <https://github.com/owner/repo>)
        repo_url: String,

        /// Issue number
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        number: u64,
    },

    /// Fetch an issue and print the prompt without calling the model
    Prompt {
        /// Repository URL (e.g., <https://github.com/owner/repo>)
        repo_url: String,

        /// Issue number
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        number: u64,
    },

    /// Print the JSON Schema of the analysis record
    Schema,

    /// Generate shell completion scripts
    #[command(after_long_help = COMPLETION_HELP)]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
