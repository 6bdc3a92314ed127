// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Settings shared by every exporter.

use crate::error::ExportError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use xm_adapters::{BinaryResolver, CommandRunner, SystemRunner, TracedRunner};

/// Where to write, what to run, and how to run it.
///
/// Built through the exporter builders (`GraphvizToSvg::new(..).binary(..)`).
#[derive(Clone)]
pub struct ExportRequest {
    pub(crate) output_dir: PathBuf,
    pub(crate) stem: String,
    pub(crate) binary: Option<PathBuf>,
    pub(crate) extra_args: Vec<String>,
    pub(crate) runner: Option<Arc<dyn CommandRunner>>,
    pub(crate) resolver: BinaryResolver,
}

impl ExportRequest {
    pub(crate) fn new(output_dir: impl Into<PathBuf>, stem: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            stem: stem.into(),
            binary: None,
            extra_args: Vec::new(),
            runner: None,
            resolver: BinaryResolver::default(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Reject stems that aren't a single plain file name.
    pub(crate) fn validate(&self) -> Result<(), ExportError> {
        validate_stem(&self.stem)
    }

    pub(crate) fn absolute_output_dir(&self) -> PathBuf {
        if self.output_dir.is_absolute() {
            return self.output_dir.clone();
        }
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(&self.output_dir),
            Err(_) => self.output_dir.clone(),
        }
    }

    /// `{output_dir}/{stem}.{ext}`
    pub(crate) fn artifact_path(&self, output_dir: &Path, ext: &str) -> PathBuf {
        output_dir.join(format!("{}.{}", self.stem, ext))
    }

    pub(crate) fn runner(&self) -> Arc<dyn CommandRunner> {
        match &self.runner {
            Some(runner) => Arc::clone(runner),
            None => Arc::new(TracedRunner::new(SystemRunner::new())),
        }
    }

    /// Caller-supplied runners get the explicit binary path as given.
    pub(crate) fn trusts_explicit_binary(&self) -> bool {
        self.runner.is_some()
    }
}

fn validate_stem(stem: &str) -> Result<(), ExportError> {
    let reason = if stem.trim().is_empty() {
        Some("stem is empty")
    } else if stem == "." || stem == ".." {
        Some("stem must name a file")
    } else if stem.contains(['/', '\\']) {
        Some("stem must not contain path separators")
    } else if stem.contains('\0') {
        Some("stem must not contain NUL")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(ExportError::InvalidStem {
            stem: stem.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Builder methods shared by every exporter type.
macro_rules! request_builder_methods {
    ($($exporter:ty),+ $(,)?) => {
        $(
            impl $exporter {
                /// Use this executable instead of searching for one.
                pub fn binary(mut self, path: impl Into<std::path::PathBuf>) -> Self {
                    self.request.binary = Some(path.into());
                    self
                }

                /// Append one argument verbatim to the tool's flags.
                pub fn arg(mut self, arg: impl Into<String>) -> Self {
                    self.request.extra_args.push(arg.into());
                    self
                }

                pub fn args<I, S>(mut self, args: I) -> Self
                where
                    I: IntoIterator<Item = S>,
                    S: Into<String>,
                {
                    self.request.extra_args.extend(args.into_iter().map(Into::into));
                    self
                }

                /// Execute commands through `runner` instead of spawning processes.
                pub fn runner(mut self, runner: std::sync::Arc<dyn xm_adapters::CommandRunner>) -> Self {
                    self.request.runner = Some(runner);
                    self
                }

                pub fn resolver(mut self, resolver: xm_adapters::BinaryResolver) -> Self {
                    self.request.resolver = resolver;
                    self
                }

                pub fn request(&self) -> &$crate::request::ExportRequest {
                    &self.request
                }
            }
        )+
    };
}

pub(crate) use request_builder_methods;

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
