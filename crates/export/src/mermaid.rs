// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mermaid to SVG via mermaid-cli (`mmdc`)

use crate::error::ExportError;
use crate::pipeline::{input_map, Invocation};
use crate::request::{request_builder_methods, ExportRequest};
use std::path::PathBuf;
use xm_adapters::MERMAID_CLI;
use xm_core::{ExportResult, ExporterKind};

/// Render Mermaid source to `{stem}.svg`.
///
/// The source is written to `{stem}.mmd` and always left in place. Extra
/// arguments are appended after the output path.
#[derive(Clone)]
pub struct MermaidToSvg {
    request: ExportRequest,
}

impl MermaidToSvg {
    pub fn new(output_dir: impl Into<PathBuf>, stem: impl Into<String>) -> Self {
        Self {
            request: ExportRequest::new(output_dir, stem),
        }
    }

    pub fn export(&self, mermaid_source: &str) -> Result<ExportResult, ExportError> {
        self.request.validate()?;
        let kind = ExporterKind::MermaidToSvg;
        let output_dir = self.request.absolute_output_dir();
        let mmd_path = self.request.artifact_path(&output_dir, "mmd");
        let svg_path = self.request.artifact_path(&output_dir, "svg");
        let inputs = input_map([("mermaid", mmd_path.as_path())]);

        let invocation = Invocation {
            kind,
            tool: &MERMAID_CLI,
            request: &self.request,
            inputs,
            output: svg_path.clone(),
            discard: None,
        };
        let binary = match invocation.resolve() {
            Ok(binary) => binary,
            Err(failed) => return Ok(failed),
        };
        if let Err(failed) = invocation.write_source(&mmd_path, mermaid_source) {
            return Ok(failed);
        }

        Ok(invocation.run(binary, |binary| {
            let mut argv = vec![
                binary.display().to_string(),
                "-i".to_string(),
                mmd_path.display().to_string(),
                "-o".to_string(),
                svg_path.display().to_string(),
            ];
            argv.extend(self.request.extra_args.iter().cloned());
            argv
        }))
    }
}

request_builder_methods!(MermaidToSvg);

#[cfg(test)]
#[path = "mermaid_tests.rs"]
mod tests;
