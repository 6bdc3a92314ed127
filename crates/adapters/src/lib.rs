// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external processes and tool lookup

mod env;
pub mod resolve;
pub mod runner;
pub mod traced;

pub use resolve::{BinaryResolver, SearchEnv, ToolSpec, GRAPHVIZ_DOT, MERMAID_CLI, WKHTMLTOPDF};
pub use runner::{
    render_command, run_command, CommandError, CommandOutput, CommandRunner, SystemRunner,
};
pub use traced::TracedRunner;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use runner::{FakeArtifact, FakeResponse, FakeRunner};
