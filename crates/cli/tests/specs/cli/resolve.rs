//! `xm resolve` specs

use crate::prelude::*;

#[test]
fn resolve_finds_tool_on_path() {
    let project = Project::empty();
    let dot = project.tool("dot", FAKE_SVG_TOOL);

    project
        .xm()
        .args(&["resolve", "dot"])
        .passes()
        .stdout_eq(&format!("{}\n", dot.display()));
}

#[test]
fn resolve_prefers_env_override() {
    let project = Project::empty();
    project.tool("mmdc", FAKE_SVG_TOOL);
    let pinned = project.tool("mmdc-pinned", FAKE_SVG_TOOL);

    let json = project
        .xm()
        .env("MMDC", &pinned)
        .args(&["resolve", "mmdc", "-o", "json"])
        .passes()
        .json();

    assert_eq!(json["tool"], "mmdc");
    assert_eq!(json["path"], pinned.display().to_string());
}

#[test]
fn resolve_missing_tool_fails() {
    let project = Project::empty();

    project
        .xm()
        .args(&["resolve", "dot"])
        .fails()
        .exit_code(1)
        .stderr_has("Error: dot not found; install it or set GRAPHVIZ_DOT");
}
