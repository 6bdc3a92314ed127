// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Export outcome records.
//!
//! An [`ExportResult`] is built exactly once per export attempt, after the
//! attempt has concluded. Fields are private so a result can't be edited after
//! the fact; callers read them through accessors or flatten the whole record
//! into [`ExportMetadata`] for audit logs.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Which conversion produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExporterKind {
    #[serde(rename = "markdown->pdf")]
    MarkdownToPdf,
    #[serde(rename = "html->pdf")]
    HtmlToPdf,
    #[serde(rename = "graphviz->svg")]
    GraphvizToSvg,
    #[serde(rename = "mermaid->svg")]
    MermaidToSvg,
}

impl ExporterKind {
    /// Stable identifier used in metadata records.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExporterKind::MarkdownToPdf => "markdown->pdf",
            ExporterKind::HtmlToPdf => "html->pdf",
            ExporterKind::GraphvizToSvg => "graphviz->svg",
            ExporterKind::MermaidToSvg => "mermaid->svg",
        }
    }

    /// Display name of the external tool that performs the render.
    pub fn tool(&self) -> &'static str {
        match self {
            ExporterKind::MarkdownToPdf | ExporterKind::HtmlToPdf => "wkhtmltopdf",
            ExporterKind::GraphvizToSvg => "dot",
            ExporterKind::MermaidToSvg => "mmdc",
        }
    }

    /// File extension of the produced artifact.
    pub fn output_extension(&self) -> &'static str {
        match self {
            ExporterKind::MarkdownToPdf | ExporterKind::HtmlToPdf => "pdf",
            ExporterKind::GraphvizToSvg | ExporterKind::MermaidToSvg => "svg",
        }
    }
}

impl fmt::Display for ExporterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Captured outcome of the render process.
///
/// `exit_code` is `None` when the process could not be started or was killed
/// by a signal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunCapture {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Outcome details for one rendering attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "export results carry the failure context and should be inspected"]
pub struct ExportResult {
    exporter: ExporterKind,
    succeeded: bool,
    output_path: Option<PathBuf>,
    command: Vec<String>,
    stdout: String,
    stderr: String,
    inputs: IndexMap<String, PathBuf>,
    binary_path: Option<PathBuf>,
    detail: Option<String>,
}

impl ExportResult {
    /// Result for an attempt that ended before any process was spawned.
    ///
    /// Used when the binary can't be resolved or a source file couldn't be
    /// written. `command` is left empty and `binary_path` absent.
    pub fn not_run(
        exporter: ExporterKind,
        inputs: IndexMap<String, PathBuf>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            exporter,
            succeeded: false,
            output_path: None,
            command: Vec::new(),
            stdout: String::new(),
            stderr: String::new(),
            inputs,
            binary_path: None,
            detail: Some(detail.into()),
        }
    }

    /// Result for an attempt that invoked the render binary.
    ///
    /// Success requires both a zero exit code and `expected_output` existing
    /// on disk once the process has returned.
    pub fn finished(
        exporter: ExporterKind,
        binary_path: PathBuf,
        command: Vec<String>,
        inputs: IndexMap<String, PathBuf>,
        run: RunCapture,
        expected_output: &Path,
    ) -> Self {
        let artifact_present = expected_output.is_file();
        let detail = match run.exit_code {
            Some(0) if artifact_present => None,
            Some(0) => Some(format!(
                "{} exited successfully but produced no {}",
                exporter.tool(),
                expected_output.display()
            )),
            Some(_) => Some(format!("{} execution failed", exporter.tool())),
            None => Some(format!("{} did not run to completion", exporter.tool())),
        };
        let succeeded = detail.is_none();
        Self {
            exporter,
            succeeded,
            output_path: succeeded.then(|| expected_output.to_path_buf()),
            command,
            stdout: run.stdout,
            stderr: run.stderr,
            inputs,
            binary_path: Some(binary_path),
            detail,
        }
    }

    pub fn exporter(&self) -> ExporterKind {
        self.exporter
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    /// Argument vector that ran, binary first. Empty when nothing ran.
    pub fn command(&self) -> &[String] {
        &self.command
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    /// Source files by role (`markdown`, `html`, `dot`, `mermaid`).
    pub fn inputs(&self) -> &IndexMap<String, PathBuf> {
        &self.inputs
    }

    pub fn input(&self, role: &str) -> Option<&Path> {
        self.inputs.get(role).map(PathBuf::as_path)
    }

    pub fn binary_path(&self) -> Option<&Path> {
        self.binary_path.as_deref()
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Flatten into a JSON-friendly record.
    pub fn to_metadata(&self) -> ExportMetadata {
        ExportMetadata {
            exporter: self.exporter,
            succeeded: self.succeeded,
            output_path: self.output_path.as_deref().map(path_string),
            command: self.command.clone(),
            stdout: self.stdout.clone(),
            stderr: self.stderr.clone(),
            inputs: self
                .inputs
                .iter()
                .map(|(role, path)| (role.clone(), path_string(path)))
                .collect(),
            binary_path: self.binary_path.as_deref().map(path_string),
            detail: self.detail.clone(),
        }
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Serialisable view of an [`ExportResult`] with paths rendered as strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub exporter: ExporterKind,
    pub succeeded: bool,
    pub output_path: Option<String>,
    pub command: Vec<String>,
    pub stdout: String,
    pub stderr: String,
    pub inputs: IndexMap<String, String>,
    pub binary_path: Option<String>,
    pub detail: Option<String>,
}

impl ExportMetadata {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
