// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Batch manifest parsing.
//!
//! ```toml
//! [[export]]
//! kind = "graphviz"
//! source = "diagrams/flow.dot"
//! out_dir = "build"            # default: the manifest's directory
//! stem = "flow"                # default: the source file stem
//! args = ["-Gdpi=150"]
//! keep_intermediate = false    # default: true
//! bin = "/opt/graphviz/bin/dot"
//! ```
//!
//! Relative `source`, `out_dir` and `bin` paths resolve against the
//! directory holding the manifest.

use crate::job::{ExportJob, SourceKind};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid manifest {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("manifest {} has no [[export]] entries", .0.display())]
    Empty(PathBuf),
    #[error("export #{index}: cannot derive a stem from {}; set `stem`", .source_path.display())]
    NoStem { index: usize, source_path: PathBuf },
    #[error("export #{index}: {} is already written by export #{first}", .target.display())]
    DuplicateTarget {
        index: usize,
        first: usize,
        target: PathBuf,
    },
    #[error("export #{index}: failed to read source {}: {source}", .path.display())]
    Source {
        index: usize,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    #[serde(default, rename = "export")]
    exports: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Entry {
    kind: SourceKind,
    source: PathBuf,
    stem: Option<String>,
    out_dir: Option<PathBuf>,
    #[serde(default)]
    args: Vec<String>,
    #[serde(default = "default_keep")]
    keep_intermediate: bool,
    bin: Option<PathBuf>,
}

fn default_keep() -> bool {
    true
}

/// A manifest entry with every path made absolute. Sources are not read yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedExport {
    /// 1-based position in the manifest
    pub index: usize,
    pub kind: SourceKind,
    pub source: PathBuf,
    pub stem: String,
    pub out_dir: PathBuf,
    pub args: Vec<String>,
    pub keep_intermediate: bool,
    pub binary: Option<PathBuf>,
}

impl PlannedExport {
    /// Read the source file into a runnable job.
    pub fn into_job(self) -> Result<ExportJob, ManifestError> {
        let source = std::fs::read_to_string(&self.source).map_err(|source| {
            ManifestError::Source {
                index: self.index,
                path: self.source.clone(),
                source,
            }
        })?;
        Ok(ExportJob {
            kind: self.kind,
            source,
            out_dir: self.out_dir,
            stem: self.stem,
            binary: self.binary,
            args: self.args,
            keep_intermediate: self.keep_intermediate,
        })
    }

    fn target(&self) -> PathBuf {
        let ext = self.kind.exporter().output_extension();
        self.out_dir.join(format!("{}.{}", self.stem, ext))
    }
}

/// Load and validate a manifest file.
pub fn load(path: &Path) -> Result<Vec<PlannedExport>, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let base = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    parse(&content, path, &absolute(&base))
}

/// Parse manifest text; `base` anchors relative paths.
pub fn parse(
    content: &str,
    manifest_path: &Path,
    base: &Path,
) -> Result<Vec<PlannedExport>, ManifestError> {
    let manifest: Manifest = toml::from_str(content).map_err(|source| ManifestError::Parse {
        path: manifest_path.to_path_buf(),
        source,
    })?;
    if manifest.exports.is_empty() {
        return Err(ManifestError::Empty(manifest_path.to_path_buf()));
    }

    let mut planned = Vec::with_capacity(manifest.exports.len());
    let mut targets: HashMap<PathBuf, usize> = HashMap::new();
    for (i, entry) in manifest.exports.into_iter().enumerate() {
        let export = plan(i + 1, entry, base)?;
        let target = export.target();
        if let Some(&first) = targets.get(&target) {
            return Err(ManifestError::DuplicateTarget {
                index: export.index,
                first,
                target,
            });
        }
        targets.insert(target, export.index);
        planned.push(export);
    }
    tracing::debug!(count = planned.len(), "loaded manifest");
    Ok(planned)
}

fn plan(index: usize, entry: Entry, base: &Path) -> Result<PlannedExport, ManifestError> {
    let source = base.join(&entry.source);
    let stem = match entry.stem {
        Some(stem) => stem,
        None => source
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .ok_or_else(|| ManifestError::NoStem {
                index,
                source_path: entry.source.clone(),
            })?,
    };
    Ok(PlannedExport {
        index,
        kind: entry.kind,
        source,
        stem,
        out_dir: entry
            .out_dir
            .map_or_else(|| base.to_path_buf(), |dir| base.join(dir)),
        args: entry.args,
        keep_intermediate: entry.keep_intermediate,
        binary: entry.bin.map(|bin| base.join(bin)),
    })
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
