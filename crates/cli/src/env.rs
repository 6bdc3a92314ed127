// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.
//!
//! Tool locations (`X_WKHTMLTOPDF_PATH`, `GRAPHVIZ_DOT`, `MMDC`) are read by
//! the resolver in `xm-adapters`; logging honours `RUST_LOG`.

/// Default batch concurrency from `XM_JOBS`. Zero and garbage are ignored.
pub fn batch_jobs() -> Option<usize> {
    std::env::var("XM_JOBS")
        .ok()
        .and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
