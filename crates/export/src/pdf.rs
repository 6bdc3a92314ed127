// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Markdown and HTML to PDF via wkhtmltopdf

use crate::error::ExportError;
use crate::markdown::{default_renderer, MarkdownRenderer};
use crate::pipeline::{input_map, Invocation};
use crate::request::{request_builder_methods, ExportRequest};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use xm_adapters::WKHTMLTOPDF;
use xm_core::{ExportResult, ExporterKind};

/// Render Markdown to PDF.
///
/// Writes `{stem}.md`, renders it to `{stem}.html`, then prints that page to
/// `{stem}.pdf`. The HTML page is kept unless [`MarkdownToPdf::keep_html`]
/// is turned off.
#[derive(Clone)]
pub struct MarkdownToPdf {
    request: ExportRequest,
    renderer: Option<Arc<dyn MarkdownRenderer>>,
    keep_html: bool,
}

impl MarkdownToPdf {
    pub fn new(output_dir: impl Into<PathBuf>, stem: impl Into<String>) -> Self {
        Self {
            request: ExportRequest::new(output_dir, stem),
            renderer: None,
            keep_html: true,
        }
    }

    /// Replace the default CommonMark renderer.
    pub fn renderer(mut self, renderer: Arc<dyn MarkdownRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn keep_html(mut self, keep: bool) -> Self {
        self.keep_html = keep;
        self
    }

    pub fn export(&self, markdown: &str) -> Result<ExportResult, ExportError> {
        self.request.validate()?;
        let kind = ExporterKind::MarkdownToPdf;
        let output_dir = self.request.absolute_output_dir();
        let markdown_path = self.request.artifact_path(&output_dir, "md");
        let html_path = self.request.artifact_path(&output_dir, "html");
        let inputs = input_map([
            ("markdown", markdown_path.as_path()),
            ("html", html_path.as_path()),
        ]);

        let invocation =
            wkhtmltopdf(kind, &self.request, &output_dir, inputs, &html_path, self.keep_html);
        let binary = match invocation.resolve() {
            Ok(binary) => binary,
            Err(failed) => return Ok(failed),
        };

        if let Err(failed) = invocation.write_source(&markdown_path, markdown) {
            return Ok(failed);
        }
        let html = match &self.renderer {
            Some(renderer) => renderer.render(markdown),
            None => default_renderer().render(markdown),
        };
        if let Err(failed) = invocation.write_source(&html_path, &html) {
            return Ok(failed);
        }

        let pdf_path = invocation.output.clone();
        Ok(invocation.run(binary, |binary| {
            wkhtmltopdf_argv(binary, &self.request, &html_path, &pdf_path)
        }))
    }
}

/// Render raw HTML to PDF.
///
/// Writes `{stem}.html` and prints it to `{stem}.pdf`.
#[derive(Clone)]
pub struct HtmlToPdf {
    request: ExportRequest,
    keep_html: bool,
}

impl HtmlToPdf {
    pub fn new(output_dir: impl Into<PathBuf>, stem: impl Into<String>) -> Self {
        Self {
            request: ExportRequest::new(output_dir, stem),
            keep_html: true,
        }
    }

    pub fn keep_html(mut self, keep: bool) -> Self {
        self.keep_html = keep;
        self
    }

    pub fn export(&self, html: &str) -> Result<ExportResult, ExportError> {
        self.request.validate()?;
        let kind = ExporterKind::HtmlToPdf;
        let output_dir = self.request.absolute_output_dir();
        let html_path = self.request.artifact_path(&output_dir, "html");
        let inputs = input_map([("html", html_path.as_path())]);

        let invocation =
            wkhtmltopdf(kind, &self.request, &output_dir, inputs, &html_path, self.keep_html);
        let binary = match invocation.resolve() {
            Ok(binary) => binary,
            Err(failed) => return Ok(failed),
        };

        if let Err(failed) = invocation.write_source(&html_path, html) {
            return Ok(failed);
        }

        let pdf_path = invocation.output.clone();
        Ok(invocation.run(binary, |binary| {
            wkhtmltopdf_argv(binary, &self.request, &html_path, &pdf_path)
        }))
    }
}

request_builder_methods!(MarkdownToPdf, HtmlToPdf);

fn wkhtmltopdf<'a>(
    kind: ExporterKind,
    request: &'a ExportRequest,
    output_dir: &Path,
    inputs: IndexMap<String, PathBuf>,
    html_path: &Path,
    keep_html: bool,
) -> Invocation<'a> {
    Invocation {
        kind,
        tool: &WKHTMLTOPDF,
        request,
        inputs,
        output: request.artifact_path(output_dir, "pdf"),
        discard: (!keep_html).then(|| html_path.to_path_buf()),
    }
}

/// `wkhtmltopdf [extra...] page.html out.pdf`
fn wkhtmltopdf_argv(
    binary: &Path,
    request: &ExportRequest,
    html_path: &Path,
    pdf_path: &Path,
) -> Vec<String> {
    let mut argv = vec![binary.display().to_string()];
    argv.extend(request.extra_args.iter().cloned());
    argv.push(html_path.display().to_string());
    argv.push(pdf_path.display().to_string());
    argv
}

#[cfg(test)]
#[path = "pdf_tests.rs"]
mod tests;
