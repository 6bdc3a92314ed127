// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared resolve → write → run → verify → clean up sequence.

use crate::request::ExportRequest;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use xm_adapters::{run_command, ToolSpec};
use xm_core::{ExportResult, ExporterKind, RunCapture};

/// One render step: the tool, its inputs, and the artifact it must produce.
pub(crate) struct Invocation<'a> {
    pub kind: ExporterKind,
    pub tool: &'a ToolSpec,
    pub request: &'a ExportRequest,
    pub inputs: IndexMap<String, PathBuf>,
    pub output: PathBuf,
    /// Removed after a successful render unless kept
    pub discard: Option<PathBuf>,
}

impl Invocation<'_> {
    /// Locate the tool's binary.
    ///
    /// A missing binary comes back as a failed result. Callers return it
    /// before writing anything to disk.
    pub fn resolve(&self) -> Result<PathBuf, ExportResult> {
        let explicit = self.request.binary.as_deref();
        let found = if self.request.trusts_explicit_binary() {
            self.request.resolver.resolve_trusted(self.tool, explicit)
        } else {
            self.request.resolver.resolve(self.tool, explicit)
        };
        found.ok_or_else(|| {
            let detail = missing_binary_detail(self.tool);
            tracing::warn!(exporter = %self.kind, "{detail}");
            ExportResult::not_run(self.kind, self.inputs.clone(), detail)
        })
    }

    /// Write one of the tool's input files.
    pub fn write_source(&self, path: &Path, content: &str) -> Result<(), ExportResult> {
        write_source(self.kind, path, content, &self.inputs)
    }

    /// Run the resolved binary and describe the outcome.
    ///
    /// `build_argv` receives the binary and returns the complete argument
    /// vector. Any artifact left by an earlier run is removed first, so
    /// success always means this run produced the output.
    pub fn run(
        self,
        binary: PathBuf,
        build_argv: impl FnOnce(&Path) -> Vec<String>,
    ) -> ExportResult {
        if let Err(failed) = self.clear_previous_output() {
            return failed;
        }

        let argv = build_argv(&binary);
        let runner = self.request.runner();
        let capture = match run_command(runner.as_ref(), &argv, false) {
            Ok(output) => RunCapture {
                exit_code: output.status,
                stdout: output.stdout,
                stderr: output.stderr,
            },
            Err(e) => RunCapture {
                exit_code: None,
                stdout: String::new(),
                stderr: e.to_string(),
            },
        };

        let result = ExportResult::finished(
            self.kind,
            binary,
            argv,
            self.inputs,
            capture,
            &self.output,
        );

        if let Some(intermediate) = self.discard.as_ref().filter(|_| result.succeeded()) {
            if let Err(e) = std::fs::remove_file(intermediate) {
                tracing::debug!(path = %intermediate.display(), error = %e, "intermediate not removed");
            }
        }

        log_result(&result);
        result
    }

    fn clear_previous_output(&self) -> Result<(), ExportResult> {
        match std::fs::remove_file(&self.output) {
            Ok(()) => {
                tracing::debug!(path = %self.output.display(), "removed previous output");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                let detail = format!(
                    "failed to remove previous output {}: {}",
                    self.output.display(),
                    e
                );
                tracing::warn!(exporter = %self.kind, "{detail}");
                Err(ExportResult::not_run(self.kind, self.inputs.clone(), detail))
            }
        }
    }
}

fn missing_binary_detail(tool: &ToolSpec) -> String {
    let hint = match tool.env_var {
        Some(var) => format!(" or set {var}"),
        None => String::new(),
    };
    match tool.name {
        "wkhtmltopdf" => format!("wkhtmltopdf binary not found; install it{hint}"),
        "dot" => format!("graphviz 'dot' binary not found; install Graphviz{hint}"),
        "mmdc" => format!("mermaid-cli 'mmdc' not found; install mermaid-cli{hint}"),
        other => format!("{other} binary not found{hint}"),
    }
}

fn log_result(result: &ExportResult) {
    match result.output_path() {
        Some(path) => tracing::info!(
            exporter = %result.exporter(),
            output = %path.display(),
            "export succeeded"
        ),
        None => tracing::warn!(
            exporter = %result.exporter(),
            detail = result.detail().unwrap_or_default(),
            stderr = %result.stderr().trim(),
            "export failed"
        ),
    }
}

/// Write a source file, creating parent directories.
///
/// Failures come back as a finished, failed result so the caller can return
/// it unchanged.
pub(crate) fn write_source(
    kind: ExporterKind,
    path: &Path,
    content: &str,
    inputs: &IndexMap<String, PathBuf>,
) -> Result<(), ExportResult> {
    let written = path
        .parent()
        .map_or(Ok(()), std::fs::create_dir_all)
        .and_then(|()| std::fs::write(path, content));
    written.map_err(|e| {
        let detail = format!("failed to write {}: {}", path.display(), e);
        tracing::warn!(exporter = %kind, "{detail}");
        ExportResult::not_run(kind, inputs.clone(), detail)
    })
}

/// Build an input map from `(role, path)` pairs.
pub(crate) fn input_map<const N: usize>(pairs: [(&str, &Path); N]) -> IndexMap<String, PathBuf> {
    pairs
        .into_iter()
        .map(|(role, path)| (role.to_string(), path.to_path_buf()))
        .collect()
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
