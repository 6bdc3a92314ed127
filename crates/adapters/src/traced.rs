// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced runner wrapper for consistent observability

use crate::runner::{render_command, CommandOutput, CommandRunner};
use std::io;

/// Wrapper that adds tracing to any CommandRunner
#[derive(Clone)]
pub struct TracedRunner<R> {
    inner: R,
}

impl<R> TracedRunner<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: CommandRunner> CommandRunner for TracedRunner<R> {
    fn run(&self, argv: &[String]) -> io::Result<CommandOutput> {
        let program = argv.first().map(String::as_str).unwrap_or_default();
        let span = tracing::info_span!("runner.run", program);
        let _guard = span.enter();

        tracing::info!(command = %render_command(argv), "starting");
        let start = std::time::Instant::now();
        let result = self.inner.run(argv);
        let elapsed_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(output) if output.success() => tracing::info!(
                elapsed_ms,
                stdout_len = output.stdout.len(),
                "command finished"
            ),
            Ok(output) => tracing::warn!(
                elapsed_ms,
                exit_code = ?output.status,
                stderr = %output.stderr.trim(),
                "command failed"
            ),
            Err(e) => tracing::error!(elapsed_ms, error = %e, "spawn failed"),
        }
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
