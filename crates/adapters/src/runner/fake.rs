// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake command runner for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{CommandOutput, CommandRunner};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::io;
use std::path::Path;
use std::sync::Arc;

/// Where a fake invocation writes its artifact, located within the argv.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeArtifact {
    /// Write nothing
    None,
    /// Write to the path given as the final argument
    LastArg,
    /// Write to the path that follows the given flag (e.g. `-o`)
    AfterFlag(String),
}

/// Scripted outcome for one fake invocation.
#[derive(Debug, Clone)]
pub struct FakeResponse {
    status: Option<i32>,
    stdout: String,
    stderr: String,
    artifact: FakeArtifact,
    spawn_error: Option<String>,
}

impl FakeResponse {
    /// Exit 0 with empty output.
    pub fn success() -> Self {
        Self::exit(0)
    }

    pub fn exit(code: i32) -> Self {
        Self {
            status: Some(code),
            stdout: String::new(),
            stderr: String::new(),
            artifact: FakeArtifact::None,
            spawn_error: None,
        }
    }

    /// Fail as if the program could not be started.
    pub fn spawn_error(message: impl Into<String>) -> Self {
        Self {
            spawn_error: Some(message.into()),
            ..Self::exit(0)
        }
    }

    pub fn stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = stdout.into();
        self
    }

    pub fn stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = stderr.into();
        self
    }

    pub fn writes(mut self, artifact: FakeArtifact) -> Self {
        self.artifact = artifact;
        self
    }
}

struct FakeRunnerState {
    calls: Vec<Vec<String>>,
    scripted: VecDeque<FakeResponse>,
    fallback: FakeResponse,
}

/// Fake runner that records calls and replays scripted responses.
///
/// Scripted responses are consumed in order; once exhausted, every call gets
/// the fallback response (exit 0, no artifact, unless replaced).
#[derive(Clone)]
pub struct FakeRunner {
    inner: Arc<Mutex<FakeRunnerState>>,
}

impl Default for FakeRunner {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeRunnerState {
                calls: Vec::new(),
                scripted: VecDeque::new(),
                fallback: FakeResponse::success(),
            })),
        }
    }
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner whose every call returns `response`.
    pub fn always(response: FakeResponse) -> Self {
        let runner = Self::new();
        runner.inner.lock().fallback = response;
        runner
    }

    /// Queue a response for the next unscripted call.
    pub fn push(&self, response: FakeResponse) {
        self.inner.lock().scripted.push_back(response);
    }

    /// Get all recorded argument vectors
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.inner.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.inner.lock().calls.len()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, argv: &[String]) -> io::Result<CommandOutput> {
        let response = {
            let mut state = self.inner.lock();
            state.calls.push(argv.to_vec());
            match state.scripted.pop_front() {
                Some(response) => response,
                None => state.fallback.clone(),
            }
        };

        if let Some(message) = response.spawn_error {
            return Err(io::Error::new(io::ErrorKind::NotFound, message));
        }

        if let Some(target) = artifact_target(argv, &response.artifact) {
            write_artifact(Path::new(target))?;
        }

        Ok(CommandOutput {
            status: response.status,
            stdout: response.stdout,
            stderr: response.stderr,
        })
    }
}

fn artifact_target<'a>(argv: &'a [String], artifact: &FakeArtifact) -> Option<&'a str> {
    match artifact {
        FakeArtifact::None => None,
        FakeArtifact::LastArg => argv.last().map(String::as_str),
        FakeArtifact::AfterFlag(flag) => argv
            .iter()
            .position(|arg| arg == flag)
            .and_then(|idx| argv.get(idx + 1))
            .map(String::as_str),
    }
}

fn write_artifact(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, "artifact")
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
