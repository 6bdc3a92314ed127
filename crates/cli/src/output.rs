// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::job::JobOutcome;
use clap::ValueEnum;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One line per outcome; failed runs are followed by the tool's stderr,
/// indented.
pub fn format_text(outcome: &JobOutcome) -> String {
    let head = format!("{} {}", outcome.kind, outcome.stem);
    match &outcome.result {
        Ok(result) => match result.output_path() {
            Some(path) => format!("{head}: wrote {}", path.display()),
            None => {
                let mut text = format!(
                    "{head}: failed: {}",
                    result.detail().unwrap_or("unknown error")
                );
                for line in result.stderr().lines().filter(|l| !l.trim().is_empty()) {
                    text.push_str("\n    ");
                    text.push_str(line);
                }
                text
            }
        },
        Err(e) => format!("{head}: rejected: {e}"),
    }
}

/// Print a single export. JSON is one metadata object.
pub fn print_outcome(outcome: &JobOutcome, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => println!("{}", format_text(outcome)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome.to_json())?),
    }
    Ok(())
}

/// Print batch outcomes in manifest order. JSON is an array.
pub fn print_outcomes(outcomes: &[JobOutcome], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for outcome in outcomes {
                println!("{}", format_text(outcome));
            }
        }
        OutputFormat::Json => {
            let records: Vec<_> = outcomes.iter().map(JobOutcome::to_json).collect();
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
