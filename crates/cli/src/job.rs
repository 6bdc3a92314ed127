// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One export, as requested on the command line or by a manifest entry.

use crate::manifest::{ManifestError, PlannedExport};
use clap::ValueEnum;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use xm_adapters::{BinaryResolver, CommandRunner};
use xm_core::{EventStatus, TelemetryEvent};
use xm_export::{
    ExportError, ExportResult, ExporterKind, GraphvizToSvg, HtmlToPdf, MarkdownToPdf,
    MermaidToSvg,
};

/// Source format accepted by `xm export` and manifest entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Markdown,
    Html,
    Graphviz,
    Mermaid,
}

impl SourceKind {
    pub fn exporter(self) -> ExporterKind {
        match self {
            SourceKind::Markdown => ExporterKind::MarkdownToPdf,
            SourceKind::Html => ExporterKind::HtmlToPdf,
            SourceKind::Graphviz => ExporterKind::GraphvizToSvg,
            SourceKind::Mermaid => ExporterKind::MermaidToSvg,
        }
    }
}

/// Resolver and runner shared by every job in one invocation.
#[derive(Clone, Default)]
pub struct ExportContext {
    pub resolver: BinaryResolver,
    /// `None` spawns real processes
    pub runner: Option<Arc<dyn CommandRunner>>,
}

#[derive(Debug, Clone)]
pub struct ExportJob {
    pub kind: SourceKind,
    pub source: String,
    pub out_dir: PathBuf,
    pub stem: String,
    pub binary: Option<PathBuf>,
    pub args: Vec<String>,
    pub keep_intermediate: bool,
}

/// Why a job never reached its tool.
#[derive(Debug, Error)]
pub enum JobError {
    #[error(transparent)]
    Rejected(#[from] ExportError),
    #[error(transparent)]
    Unreadable(#[from] ManifestError),
}

/// What happened to one job.
#[derive(Debug)]
pub struct JobOutcome {
    pub stem: String,
    pub kind: ExporterKind,
    pub result: Result<ExportResult, JobError>,
}

impl JobOutcome {
    /// A manifest entry whose source could not be read.
    pub fn unreadable(planned: &PlannedExport, error: ManifestError) -> Self {
        tracing::warn!(index = planned.index, error = %error, "skipping export");
        Self {
            stem: planned.stem.clone(),
            kind: planned.kind.exporter(),
            result: Err(error.into()),
        }
    }

    pub fn succeeded(&self) -> bool {
        matches!(&self.result, Ok(result) if result.succeeded())
    }

    /// Metadata record with the stem added; rejected jobs carry `error`.
    pub fn to_json(&self) -> serde_json::Value {
        let mut json = match &self.result {
            Ok(result) => result.to_metadata().to_json(),
            Err(e) => serde_json::json!({
                "exporter": self.kind.as_str(),
                "succeeded": false,
                "error": e.to_string(),
            }),
        };
        if let serde_json::Value::Object(map) = &mut json {
            map.insert("stem".to_string(), self.stem.clone().into());
        }
        json
    }
}

/// Apply the settings every exporter builder shares.
macro_rules! configured {
    ($exporter:expr, $job:expr, $ctx:expr) => {{
        let mut exporter = $exporter
            .args($job.args.iter().cloned())
            .resolver($ctx.resolver.clone());
        if let Some(binary) = &$job.binary {
            exporter = exporter.binary(binary.clone());
        }
        if let Some(runner) = &$ctx.runner {
            exporter = exporter.runner(Arc::clone(runner));
        }
        exporter
    }};
}

impl ExportJob {
    /// Run the export, bracketed by `started` and `succeeded`/`failed`
    /// telemetry events.
    pub fn run(&self, ctx: &ExportContext) -> JobOutcome {
        let kind = self.kind.exporter();
        emit(&self.event(EventStatus::Started).build());

        let started = Instant::now();
        let result = self.export(ctx).map_err(JobError::from);
        let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let outcome = JobOutcome {
            stem: self.stem.clone(),
            kind,
            result,
        };
        let status = if outcome.succeeded() {
            EventStatus::Succeeded
        } else {
            EventStatus::Failed
        };
        let mut event = self.event(status).duration_ms(elapsed);
        match &outcome.result {
            Ok(result) => {
                if let Some(path) = result.output_path() {
                    event = event.detail("output_path", path.display().to_string());
                }
                if let Some(detail) = result.detail() {
                    event = event.detail("detail", detail);
                }
            }
            Err(e) => event = event.detail("detail", e.to_string()),
        }
        emit(&event.build());

        outcome
    }

    fn export(&self, ctx: &ExportContext) -> Result<ExportResult, ExportError> {
        match self.kind {
            SourceKind::Markdown => {
                configured!(MarkdownToPdf::new(&self.out_dir, &self.stem), self, ctx)
                    .keep_html(self.keep_intermediate)
                    .export(&self.source)
            }
            SourceKind::Html => configured!(HtmlToPdf::new(&self.out_dir, &self.stem), self, ctx)
                .keep_html(self.keep_intermediate)
                .export(&self.source),
            SourceKind::Graphviz => {
                configured!(GraphvizToSvg::new(&self.out_dir, &self.stem), self, ctx)
                    .keep_dot(self.keep_intermediate)
                    .export(&self.source)
            }
            SourceKind::Mermaid => {
                configured!(MermaidToSvg::new(&self.out_dir, &self.stem), self, ctx)
                    .export(&self.source)
            }
        }
    }

    fn event(&self, status: EventStatus) -> xm_core::TelemetryEventBuilder {
        let kind = self.kind.exporter();
        TelemetryEvent::builder("xm", "export", status)
            .tool(kind.tool())
            .detail("exporter", kind.as_str())
            .detail("stem", self.stem.as_str())
    }
}

fn emit(event: &TelemetryEvent) {
    tracing::info!(
        target: "xm::telemetry",
        status = %event.status,
        event = %event.to_line(),
        "telemetry"
    );
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
