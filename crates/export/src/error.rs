// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for export requests

use std::path::PathBuf;
use thiserror::Error;

/// Caller mistakes detected before anything is written or spawned.
///
/// Tool failures are never reported here; they come back as a failed
/// [`xm_core::ExportResult`].
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("invalid stem {stem:?}: {reason}")]
    InvalidStem { stem: String, reason: &'static str },
    #[error("source path {} would be overwritten by the output", .0.display())]
    PathCollision(PathBuf),
}
