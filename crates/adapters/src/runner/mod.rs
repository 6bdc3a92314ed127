// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command execution adapters
//!
//! A [`CommandRunner`] executes an argument vector and captures its output.
//! Arguments are never passed through a shell.

mod system;

pub use system::SystemRunner;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeArtifact, FakeResponse, FakeRunner};

use std::io::{self, Write};
use thiserror::Error;

/// Captured outcome of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if the process was terminated by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Errors from [`run_command`]
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("empty command")]
    EmptyCommand,
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error(
        "command {} failed with exit code {}: {}",
        render_command(.argv),
        render_code(.code),
        failure_text(.stdout, .stderr)
    )]
    Failed {
        argv: Vec<String>,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },
}

fn render_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "none".to_string(), |c| c.to_string())
}

fn failure_text<'a>(stdout: &'a str, stderr: &'a str) -> &'a str {
    if stderr.is_empty() {
        stdout
    } else {
        stderr
    }
}

/// Strategy for executing external processes.
///
/// Implementations must treat `argv[0]` as the program and the rest as
/// literal arguments. The slice is never empty when called via
/// [`run_command`].
pub trait CommandRunner: Send + Sync {
    fn run(&self, argv: &[String]) -> io::Result<CommandOutput>;
}

/// Run `argv` through `runner`.
///
/// With `check` set, a non-zero exit becomes [`CommandError::Failed`] carrying
/// the argument vector and both streams. Without it, the output is returned
/// regardless of exit status.
///
/// In test mode (`X_MAKE_TEST_MODE`) the command line is echoed to stderr
/// before it runs; stdout is left to the caller.
pub fn run_command(
    runner: &dyn CommandRunner,
    argv: &[String],
    check: bool,
) -> Result<CommandOutput, CommandError> {
    run_echoing(runner, argv, check, &mut io::stderr())
}

fn run_echoing(
    runner: &dyn CommandRunner,
    argv: &[String],
    check: bool,
    echo: &mut dyn Write,
) -> Result<CommandOutput, CommandError> {
    let program = argv.first().ok_or(CommandError::EmptyCommand)?;
    let rendered = render_command(argv);
    tracing::debug!(command = %rendered, "running command");
    if crate::env::test_mode() {
        tracing::info!(command = %rendered, "[test-mode] automation command");
        if let Err(e) = writeln!(echo, "[test-mode] $ {rendered}") {
            tracing::debug!(error = %e, "test-mode echo not written");
        }
    }

    let output = runner.run(argv).map_err(|source| CommandError::Spawn {
        program: program.clone(),
        source,
    })?;

    if check && !output.success() {
        return Err(CommandError::Failed {
            argv: argv.to_vec(),
            code: output.status,
            stdout: output.stdout,
            stderr: output.stderr,
        });
    }
    Ok(output)
}

/// Render an argument vector for display.
///
/// Arguments containing whitespace or quotes are double-quoted. The result
/// is for logs only and is never handed to a shell.
pub fn render_command(argv: &[String]) -> String {
    if argv.is_empty() {
        return "<empty command>".to_string();
    }
    argv.iter()
        .map(|arg| quote_arg(arg))
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote_arg(arg: &str) -> String {
    if arg.is_empty() {
        return "\"\"".to_string();
    }
    if !arg.chars().any(|c| c.is_whitespace() || c == '"') {
        return arg.to_string();
    }
    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    for c in arg.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
