// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the adapters crate.

use std::ffi::OsString;
use std::path::PathBuf;

/// Interpret a flag value. Unrecognised values yield `None`.
pub(crate) fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Echo every command before it runs (`X_MAKE_TEST_MODE`, default: off).
pub fn test_mode() -> bool {
    std::env::var("X_MAKE_TEST_MODE")
        .ok()
        .and_then(|v| parse_flag(&v))
        .unwrap_or(false)
}

/// Read a variable holding a filesystem path. Blank values count as unset.
pub fn path_var(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|v| !v.to_string_lossy().trim().is_empty())
        .map(PathBuf::from)
}

/// Executable search path (`PATH`).
pub fn search_path() -> Option<OsString> {
    std::env::var_os("PATH")
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
