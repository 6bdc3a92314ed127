// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Graphviz DOT to SVG via `dot`

use crate::error::ExportError;
use crate::pipeline::{input_map, Invocation};
use crate::request::{request_builder_methods, ExportRequest};
use std::path::PathBuf;
use xm_adapters::GRAPHVIZ_DOT;
use xm_core::{ExportResult, ExporterKind};

/// Render DOT source to `{stem}.svg`.
///
/// The source is written to `{stem}.dot` (or [`GraphvizToSvg::dot_path`])
/// and kept unless [`GraphvizToSvg::keep_dot`] is turned off. Extra
/// arguments go right after the binary, ahead of `-Tsvg`.
#[derive(Clone)]
pub struct GraphvizToSvg {
    request: ExportRequest,
    dot_path: Option<PathBuf>,
    keep_dot: bool,
}

impl GraphvizToSvg {
    pub fn new(output_dir: impl Into<PathBuf>, stem: impl Into<String>) -> Self {
        Self {
            request: ExportRequest::new(output_dir, stem),
            dot_path: None,
            keep_dot: true,
        }
    }

    /// Write the DOT source here instead of `{output_dir}/{stem}.dot`.
    pub fn dot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dot_path = Some(path.into());
        self
    }

    pub fn keep_dot(mut self, keep: bool) -> Self {
        self.keep_dot = keep;
        self
    }

    pub fn export(&self, dot_source: &str) -> Result<ExportResult, ExportError> {
        self.request.validate()?;
        let kind = ExporterKind::GraphvizToSvg;
        let output_dir = self.request.absolute_output_dir();
        let svg_path = self.request.artifact_path(&output_dir, "svg");
        let dot_path = match &self.dot_path {
            Some(path) if path.is_relative() => output_dir.join(path),
            Some(path) => path.clone(),
            None => self.request.artifact_path(&output_dir, "dot"),
        };
        if dot_path == svg_path {
            return Err(ExportError::PathCollision(dot_path));
        }
        let inputs = input_map([("dot", dot_path.as_path())]);

        let invocation = Invocation {
            kind,
            tool: &GRAPHVIZ_DOT,
            request: &self.request,
            inputs,
            output: svg_path.clone(),
            discard: (!self.keep_dot).then(|| dot_path.clone()),
        };
        let binary = match invocation.resolve() {
            Ok(binary) => binary,
            Err(failed) => return Ok(failed),
        };
        if let Err(failed) = invocation.write_source(&dot_path, dot_source) {
            return Ok(failed);
        }

        Ok(invocation.run(binary, |binary| {
            let mut argv = vec![binary.display().to_string()];
            argv.extend(self.request.extra_args.iter().cloned());
            argv.extend([
                "-Tsvg".to_string(),
                dot_path.display().to_string(),
                "-o".to_string(),
                svg_path.display().to_string(),
            ]);
            argv
        }))
    }
}

request_builder_methods!(GraphvizToSvg);

#[cfg(test)]
#[path = "graphviz_tests.rs"]
mod tests;
