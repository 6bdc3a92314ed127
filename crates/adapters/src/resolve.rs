// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! External binary resolution.
//!
//! Lookup order: explicit path, environment override, search path by each
//! fallback name, then platform default install locations. A missing binary
//! is reported as `None`, never as an error.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Description of an external tool and where to look for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolSpec {
    /// Logical tool name used in logs and messages
    pub name: &'static str,
    /// Environment variable that may point at the executable
    pub env_var: Option<&'static str>,
    /// Executable names tried against the search path, in order
    pub search_names: &'static [&'static str],
    /// Well-known install locations checked last
    pub default_locations: &'static [&'static str],
}

pub const WKHTMLTOPDF: ToolSpec = ToolSpec {
    name: "wkhtmltopdf",
    env_var: Some("X_WKHTMLTOPDF_PATH"),
    search_names: &["wkhtmltopdf", "wkhtmltopdf.exe"],
    default_locations: &[
        r"C:\Program Files\wkhtmltopdf\bin\wkhtmltopdf.exe",
        r"C:\Program Files (x86)\wkhtmltopdf\bin\wkhtmltopdf.exe",
        "/usr/local/bin/wkhtmltopdf",
        "/usr/bin/wkhtmltopdf",
    ],
};

pub const GRAPHVIZ_DOT: ToolSpec = ToolSpec {
    name: "dot",
    env_var: Some("GRAPHVIZ_DOT"),
    search_names: &["dot", "dot.exe"],
    default_locations: &[],
};

pub const MERMAID_CLI: ToolSpec = ToolSpec {
    name: "mmdc",
    env_var: Some("MMDC"),
    search_names: &["mmdc", "mmdc.cmd", "mmdc.ps1"],
    default_locations: &[],
};

/// Environment consulted during resolution.
///
/// [`SearchEnv::from_process`] reads the live process environment;
/// [`SearchEnv::isolated`] starts empty so tests control every input.
#[derive(Debug, Clone)]
pub struct SearchEnv {
    inherit_vars: bool,
    vars: HashMap<String, PathBuf>,
    search_path: Option<OsString>,
    default_locations: bool,
}

impl SearchEnv {
    pub fn from_process() -> Self {
        Self {
            inherit_vars: true,
            vars: HashMap::new(),
            search_path: crate::env::search_path(),
            default_locations: true,
        }
    }

    /// No variables, no search path, no default locations.
    pub fn isolated() -> Self {
        Self {
            inherit_vars: false,
            vars: HashMap::new(),
            search_path: None,
            default_locations: false,
        }
    }

    /// Override a variable; takes precedence over the process environment.
    pub fn var(mut self, name: impl Into<String>, value: impl Into<PathBuf>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn search_path(mut self, path: impl Into<OsString>) -> Self {
        self.search_path = Some(path.into());
        self
    }

    pub fn default_locations(mut self, enabled: bool) -> Self {
        self.default_locations = enabled;
        self
    }

    fn lookup_var(&self, name: &str) -> Option<PathBuf> {
        if let Some(value) = self.vars.get(name) {
            return Some(value.clone());
        }
        if self.inherit_vars {
            return crate::env::path_var(name);
        }
        None
    }
}

impl Default for SearchEnv {
    fn default() -> Self {
        Self::from_process()
    }
}

/// Locates external tool executables.
#[derive(Debug, Clone, Default)]
pub struct BinaryResolver {
    env: SearchEnv,
}

impl BinaryResolver {
    pub fn new(env: SearchEnv) -> Self {
        Self { env }
    }

    /// Resolve `spec`, accepting an explicit path only if it is a file.
    pub fn resolve(&self, spec: &ToolSpec, explicit: Option<&Path>) -> Option<PathBuf> {
        self.resolve_inner(spec, explicit, false)
    }

    /// Resolve `spec`, trusting an explicit path as given.
    ///
    /// Used when a caller-supplied runner will receive the command, so the
    /// path never has to exist on this machine.
    pub fn resolve_trusted(&self, spec: &ToolSpec, explicit: Option<&Path>) -> Option<PathBuf> {
        self.resolve_inner(spec, explicit, true)
    }

    fn resolve_inner(
        &self,
        spec: &ToolSpec,
        explicit: Option<&Path>,
        trust_explicit: bool,
    ) -> Option<PathBuf> {
        let found = self.locate(spec, explicit, trust_explicit);
        match &found {
            Some((path, source)) => tracing::debug!(
                tool = spec.name,
                path = %path.display(),
                source,
                "resolved binary"
            ),
            None => tracing::debug!(tool = spec.name, "binary not found"),
        }
        found.map(|(path, _)| path)
    }

    fn locate(
        &self,
        spec: &ToolSpec,
        explicit: Option<&Path>,
        trust_explicit: bool,
    ) -> Option<(PathBuf, &'static str)> {
        if let Some(path) = explicit.filter(|p| !p.as_os_str().is_empty()) {
            if trust_explicit || path.is_file() {
                return Some((path.to_path_buf(), "explicit"));
            }
            tracing::warn!(
                tool = spec.name,
                path = %path.display(),
                "explicit binary path is not a file, falling back to lookup"
            );
        }

        if let Some(var) = spec.env_var {
            if let Some(path) = self.env.lookup_var(var).filter(|p| p.is_file()) {
                return Some((path, "env"));
            }
        }

        if let Some(search_path) = &self.env.search_path {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            for name in spec.search_names {
                if let Ok(path) = which::which_in(name, Some(search_path), &cwd) {
                    return Some((path, "search path"));
                }
            }
        }

        if self.env.default_locations {
            for location in spec.default_locations {
                let path = Path::new(location);
                if path.is_file() {
                    return Some((path.to_path_buf(), "default location"));
                }
            }
        }

        None
    }
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
