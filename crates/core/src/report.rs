// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timestamped JSON run reports.
//!
//! A report lands at `{base}/reports/{tool}_run_{YYYYmmdd_HHMMSS}.json`.
//! `tool` and `generated_at` are filled in unless the payload sets them.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const REPORTS_DIR_NAME: &str = "reports";

const FILE_STAMP: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to create reports directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write run report {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode run report: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct RunReport {
    tool: String,
    payload: Map<String, Value>,
    generated_at: DateTime<Utc>,
    reports_name: String,
}

impl RunReport {
    pub fn new(tool: impl Into<String>, payload: Map<String, Value>) -> Self {
        Self {
            tool: tool.into(),
            payload,
            generated_at: Utc::now(),
            reports_name: REPORTS_DIR_NAME.to_string(),
        }
    }

    pub fn generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = at;
        self
    }

    /// Directory name under the base directory (default `reports`).
    pub fn reports_name(mut self, name: impl Into<String>) -> Self {
        self.reports_name = name.into();
        self
    }

    pub fn file_name(&self) -> String {
        format!(
            "{}_run_{}.json",
            self.tool,
            self.generated_at.format(FILE_STAMP)
        )
    }

    /// Payload with the defaulted `tool` and `generated_at` fields.
    pub fn to_json(&self) -> Value {
        let mut data = self.payload.clone();
        let generated_at = self.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true);
        data.entry("tool")
            .or_insert_with(|| Value::from(self.tool.as_str()));
        data.entry("generated_at")
            .or_insert_with(|| Value::from(generated_at));
        Value::Object(data)
    }

    /// Write the report under `base_dir`, creating the reports directory.
    pub fn write(&self, base_dir: &Path) -> Result<PathBuf, ReportError> {
        let dir = base_dir.join(&self.reports_name);
        std::fs::create_dir_all(&dir).map_err(|source| ReportError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        let path = dir.join(self.file_name());
        let text = serde_json::to_string_pretty(&self.to_json())?;
        std::fs::write(&path, text).map_err(|source| ReportError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), "wrote run report");
        Ok(path)
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
