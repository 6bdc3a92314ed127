// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! xm-export: render Markdown, HTML, Graphviz and Mermaid sources through
//! external tools.
//!
//! Every exporter follows the same sequence: write the source next to the
//! target, resolve the tool binary, run it without a shell, then report an
//! [`ExportResult`]. Tool problems (missing binary, non-zero exit, missing
//! artifact, unwritable source) come back as a failed result; only invalid
//! requests return [`ExportError`].

mod error;
pub mod graphviz;
pub mod markdown;
pub mod mermaid;
pub mod pdf;
mod pipeline;
mod request;

pub use error::ExportError;
pub use graphviz::GraphvizToSvg;
#[cfg(feature = "commonmark")]
pub use markdown::CommonMarkRenderer;
pub use markdown::{default_renderer, MarkdownRenderer, PreformattedRenderer};
pub use mermaid::MermaidToSvg;
pub use pdf::{HtmlToPdf, MarkdownToPdf};
pub use request::ExportRequest;
pub use xm_core::{ExportMetadata, ExportResult, ExporterKind};
