// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Telemetry event envelope.
//!
//! Exporters never emit events themselves; callers wrap each export in a
//! `started` / `succeeded` / `failed` pair built from these types. Events
//! travel as one compact JSON object per line ([`TelemetryEvent::to_line`],
//! [`TelemetryEvent::from_line`]).

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Envelope version stamped on every event.
pub const SCHEMA_VERSION: &str = "1.0";

/// Emitters allowed to appear in `source`.
pub const KNOWN_SOURCES: &[&str] = &["xm", "visitor"];

/// Why an event was rejected.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid telemetry event: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unsupported telemetry schema version {0:?}")]
    Version(String),
    #[error("unknown telemetry source {0:?}")]
    UnknownSource(String),
    #[error("telemetry phase is empty")]
    EmptyPhase,
    #[error("telemetry attempt must be at least 1, got {0}")]
    Attempt(u32),
    #[error("telemetry timestamp {0:?} is not RFC 3339")]
    Timestamp(String),
}

/// Lifecycle status reported by an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Started,
    Succeeded,
    Failed,
    Retried,
    Quarantined,
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventStatus::Started => write!(f, "started"),
            EventStatus::Succeeded => write!(f, "succeeded"),
            EventStatus::Failed => write!(f, "failed"),
            EventStatus::Retried => write!(f, "retried"),
            EventStatus::Quarantined => write!(f, "quarantined"),
        }
    }
}

/// Structured telemetry envelope with a JSON payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelemetryEvent {
    pub version: String,
    /// RFC 3339 UTC, whole seconds, `Z` suffix
    pub timestamp: String,
    pub source: String,
    pub phase: String,
    pub status: EventStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempt: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Map<String, serde_json::Value>>,
}

impl TelemetryEvent {
    /// Start building an event stamped with the current time.
    pub fn builder(
        source: impl Into<String>,
        phase: impl Into<String>,
        status: EventStatus,
    ) -> TelemetryEventBuilder {
        TelemetryEventBuilder {
            event: TelemetryEvent {
                version: SCHEMA_VERSION.to_string(),
                timestamp: format_timestamp(Utc::now()),
                source: source.into(),
                phase: phase.into(),
                status,
                repository: None,
                tool: None,
                attempt: None,
                duration_ms: None,
                details: None,
            },
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Parse and validate an event from its JSON form.
    ///
    /// Unknown fields and unknown statuses fail to deserialize; the rest of
    /// the envelope rules are checked by [`TelemetryEvent::validate`].
    pub fn from_json(value: serde_json::Value) -> Result<Self, TelemetryError> {
        let event: TelemetryEvent = serde_json::from_value(value)?;
        event.validate()?;
        Ok(event)
    }

    /// Compact single-line JSON.
    pub fn to_line(&self) -> String {
        self.to_json().to_string()
    }

    pub fn from_line(line: &str) -> Result<Self, TelemetryError> {
        Self::from_json(serde_json::from_str(line)?)
    }

    pub fn validate(&self) -> Result<(), TelemetryError> {
        if self.version != SCHEMA_VERSION {
            return Err(TelemetryError::Version(self.version.clone()));
        }
        if !KNOWN_SOURCES.contains(&self.source.as_str()) {
            return Err(TelemetryError::UnknownSource(self.source.clone()));
        }
        if self.phase.trim().is_empty() {
            return Err(TelemetryError::EmptyPhase);
        }
        if let Some(attempt) = self.attempt.filter(|&a| a < 1) {
            return Err(TelemetryError::Attempt(attempt));
        }
        if DateTime::parse_from_rfc3339(&self.timestamp).is_err() {
            return Err(TelemetryError::Timestamp(self.timestamp.clone()));
        }
        Ok(())
    }
}

pub struct TelemetryEventBuilder {
    event: TelemetryEvent,
}

impl TelemetryEventBuilder {
    pub fn timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.event.timestamp = format_timestamp(at);
        self
    }

    pub fn repository(mut self, repository: impl Into<String>) -> Self {
        self.event.repository = Some(repository.into());
        self
    }

    pub fn tool(mut self, tool: impl Into<String>) -> Self {
        self.event.tool = Some(tool.into());
        self
    }

    pub fn attempt(mut self, attempt: u32) -> Self {
        self.event.attempt = Some(attempt);
        self
    }

    pub fn duration_ms(mut self, duration_ms: u64) -> Self {
        self.event.duration_ms = Some(duration_ms);
        self
    }

    /// Add one entry to the details payload.
    pub fn detail(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.event
            .details
            .get_or_insert_with(serde_json::Map::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> TelemetryEvent {
        self.event
    }
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
#[path = "telemetry_tests.rs"]
mod tests;
