// SPDX-License-Identifier: Apache-2.0

//! Prints the JSON Schema of the analysis record.

use anyhow::{Context, Result};
use issuelens_core::IssueAnalysis;

/// Renders the schema as pretty JSON.
pub fn schema_json() -> Result<String> {
    let schema = schemars::schema_for!(IssueAnalysis);
    serde_json::to_string_pretty(&schema).context("Failed to serialize schema")
}

pub fn run() -> Result<()> {
    println!("{}", schema_json()?);
    Ok(())
}
