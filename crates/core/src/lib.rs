// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! xm-core: shared value types for the xm exporters

pub mod report;
pub mod result;
pub mod telemetry;

pub use report::{ReportError, RunReport, REPORTS_DIR_NAME};
pub use result::{ExportMetadata, ExportResult, ExporterKind, RunCapture};
pub use telemetry::{
    EventStatus, TelemetryError, TelemetryEvent, TelemetryEventBuilder, KNOWN_SOURCES,
    SCHEMA_VERSION,
};
