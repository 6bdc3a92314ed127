// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `xm export <kind> <input>` - Export one source file

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

use crate::exit_error::ExitError;
use crate::job::{ExportContext, ExportJob, SourceKind};
use crate::output::{self, OutputFormat};

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Source format
    #[arg(value_enum)]
    pub kind: SourceKind,

    /// Source file, or `-` to read standard input
    pub input: PathBuf,

    /// Directory receiving the artifact and intermediate sources
    #[arg(short = 'd', long = "out-dir")]
    pub out_dir: PathBuf,

    /// Base name for generated files (default: the input's file stem)
    #[arg(long)]
    pub stem: Option<String>,

    /// Tool executable to use instead of searching for one
    #[arg(long = "bin", value_name = "PATH")]
    pub binary: Option<PathBuf>,

    /// Extra argument passed verbatim to the tool (repeatable)
    #[arg(long = "arg", value_name = "ARG", allow_hyphen_values = true)]
    pub args: Vec<String>,

    /// Delete the intermediate HTML/DOT file after a successful render
    #[arg(long)]
    pub discard_intermediate: bool,
}

pub async fn handle(args: ExportArgs, ctx: ExportContext, format: OutputFormat) -> Result<()> {
    let stem = stem_for(&args.input, args.stem.as_deref())?;
    let source = read_source(&args.input)?;
    let job = ExportJob {
        kind: args.kind,
        source,
        out_dir: args.out_dir,
        stem,
        binary: args.binary,
        args: args.args,
        keep_intermediate: !args.discard_intermediate,
    };

    let outcome = tokio::task::spawn_blocking(move || job.run(&ctx)).await?;
    if let Err(e) = &outcome.result {
        bail!("{e}");
    }
    output::print_outcome(&outcome, format)?;
    if !outcome.succeeded() {
        // Already reported on stdout
        return Err(ExitError::new(1, String::new()).into());
    }
    Ok(())
}

fn is_stdin(input: &Path) -> bool {
    input.as_os_str() == "-"
}

/// Pick the stem: explicit wins, otherwise the input's file stem.
pub(crate) fn stem_for(input: &Path, explicit: Option<&str>) -> Result<String> {
    if let Some(stem) = explicit {
        return Ok(stem.to_string());
    }
    if is_stdin(input) {
        bail!("--stem is required when reading from stdin");
    }
    input
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .with_context(|| format!("cannot derive a stem from {}; pass --stem", input.display()))
}

fn read_source(input: &Path) -> Result<String> {
    if is_stdin(input) {
        return std::io::read_to_string(std::io::stdin()).context("failed to read stdin");
    }
    std::fs::read_to_string(input).with_context(|| format!("failed to read {}", input.display()))
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
