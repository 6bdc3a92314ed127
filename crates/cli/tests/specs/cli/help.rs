//! CLI help output specs

use crate::prelude::*;

#[test]
fn xm_no_args_shows_usage_and_exits_zero() {
    cli().passes().stdout_has("Usage:");
}

#[test]
fn xm_help_lists_commands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("export")
        .stdout_has("batch")
        .stdout_has("resolve");
}

#[test]
fn xm_export_help_lists_kinds() {
    cli()
        .args(&["export", "--help"])
        .passes()
        .stdout_has("markdown")
        .stdout_has("graphviz")
        .stdout_has("--out-dir");
}

#[test]
fn xm_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.1");
}

#[test]
fn unknown_kind_is_a_usage_error() {
    cli()
        .args(&["export", "latex", "a.tex", "--out-dir", "out"])
        .fails()
        .exit_code(2)
        .stderr_has("invalid value");
}
