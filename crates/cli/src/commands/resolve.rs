// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `xm resolve <tool>` - Show which executable an export would run

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use xm_adapters::{BinaryResolver, ToolSpec, GRAPHVIZ_DOT, MERMAID_CLI, WKHTMLTOPDF};

use crate::exit_error::ExitError;
use crate::output::OutputFormat;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Tool {
    Wkhtmltopdf,
    Dot,
    Mmdc,
}

impl Tool {
    pub fn spec(self) -> &'static ToolSpec {
        match self {
            Tool::Wkhtmltopdf => &WKHTMLTOPDF,
            Tool::Dot => &GRAPHVIZ_DOT,
            Tool::Mmdc => &MERMAID_CLI,
        }
    }
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    #[arg(value_enum)]
    pub tool: Tool,

    /// Explicit path to check first
    #[arg(long = "bin", value_name = "PATH")]
    pub binary: Option<PathBuf>,
}

pub fn handle(args: ResolveArgs, resolver: &BinaryResolver, format: OutputFormat) -> Result<()> {
    let spec = args.tool.spec();
    let path = locate(spec, args.binary.as_deref(), resolver)?;
    match format {
        OutputFormat::Text => println!("{}", path.display()),
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({
                "tool": spec.name,
                "path": path.display().to_string(),
            })
        ),
    }
    Ok(())
}

pub(crate) fn locate(
    spec: &ToolSpec,
    explicit: Option<&std::path::Path>,
    resolver: &BinaryResolver,
) -> Result<PathBuf, ExitError> {
    resolver.resolve(spec, explicit).ok_or_else(|| {
        let hint = match spec.env_var {
            Some(var) => format!("; install it or set {var}"),
            None => String::new(),
        };
        ExitError::new(1, format!("{} not found{hint}", spec.name))
    })
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
