//! `xm export` specs

use crate::prelude::*;

#[test]
fn graphviz_export_with_tool_on_path() {
    let project = Project::empty();
    project.tool("dot", FAKE_SVG_TOOL);
    project.file("flow.dot", "digraph { a -> b }");

    let run = project
        .xm()
        .args(&["export", "graphviz", "flow.dot", "--out-dir", "out"])
        .passes()
        .stdout_has("graphviz->svg flow: wrote ");

    assert!(run.stdout().trim_end().ends_with("out/flow.svg"));
    assert_eq!(project.read("out/flow.svg"), "<svg/>");
    assert_eq!(project.read("out/flow.dot"), "digraph { a -> b }");
}

#[test]
fn graphviz_export_via_env_override() {
    let project = Project::empty();
    let dot = project.tool("custom-dot", FAKE_SVG_TOOL);
    project.file("g.dot", "digraph {}");

    project
        .xm()
        .env("GRAPHVIZ_DOT", &dot)
        .args(&["export", "graphviz", "g.dot", "-d", "out"])
        .passes();

    assert!(project.exists("out/g.svg"));
}

#[test]
fn missing_tool_fails_with_install_hint() {
    let project = Project::empty();
    project.file("g.dot", "digraph {}");

    project
        .xm()
        .args(&["export", "graphviz", "g.dot", "-d", "out"])
        .fails()
        .exit_code(1)
        .stdout_has("graphviz 'dot' binary not found; install Graphviz or set GRAPHVIZ_DOT");

    assert!(!project.exists("out"));
}

#[test]
fn tool_failure_reports_stderr() {
    let project = Project::empty();
    project.tool("dot", FAILING_TOOL);
    project.file("g.dot", "digraph {");

    project
        .xm()
        .args(&["export", "graphviz", "g.dot", "-d", "out"])
        .fails()
        .exit_code(1)
        .stdout_has("g: failed: dot execution failed")
        .stdout_has("syntax error in line 1");
}

#[test]
fn zero_exit_without_artifact_fails() {
    let project = Project::empty();
    project.tool("mmdc", SILENT_TOOL);
    project.file("seq.mmd", "sequenceDiagram\n A->>B: hi");

    project
        .xm()
        .args(&["export", "mermaid", "seq.mmd", "-d", "out"])
        .fails()
        .stdout_has("mmdc exited successfully but produced no");
}

#[test]
fn explicit_bin_and_extra_args() {
    let project = Project::empty();
    let mmdc = project.tool("mermaid-cli", FAKE_SVG_TOOL);
    project.file("seq.mmd", "graph TD; A-->B;");

    let json = project
        .xm()
        .args(&["-o", "json", "export", "mermaid", "seq.mmd", "-d", "out"])
        .args(&["--bin", mmdc.to_str().unwrap(), "--arg", "-t", "--arg", "dark"])
        .passes()
        .json();

    assert_eq!(json["succeeded"], true);
    assert_eq!(json["exporter"], "mermaid->svg");
    assert_eq!(json["stem"], "seq");
    assert_eq!(json["binary_path"], mmdc.display().to_string());
    let command: Vec<_> = json["command"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    assert_eq!(&command[command.len() - 2..], ["-t", "dark"]);
}

#[test]
fn markdown_to_pdf_keeps_html_unless_discarded() {
    let project = Project::empty();
    project.tool("wkhtmltopdf", FAKE_PDF_TOOL);
    project.file("notes.md", "# Title\n\nBody");

    project
        .xm()
        .args(&["export", "markdown", "notes.md", "-d", "pdf"])
        .passes();
    assert!(project.read("pdf/notes.pdf").starts_with("%PDF"));
    assert!(project.read("pdf/notes.html").contains("<h1>Title</h1>"));

    project
        .xm()
        .args(&["export", "markdown", "notes.md", "-d", "lean", "--discard-intermediate"])
        .passes();
    assert!(project.exists("lean/notes.pdf"));
    assert!(!project.exists("lean/notes.html"));
    assert!(project.exists("lean/notes.md"));
}

#[test]
fn stdin_source_needs_stem() {
    let project = Project::empty();
    project.tool("dot", FAKE_SVG_TOOL);

    project
        .xm()
        .args(&["export", "graphviz", "-", "-d", "out"])
        .stdin("digraph {}")
        .fails()
        .stderr_has("Error: --stem is required when reading from stdin");

    project
        .xm()
        .args(&["export", "graphviz", "-", "-d", "out", "--stem", "piped"])
        .stdin("digraph { x }")
        .passes();
    assert_eq!(project.read("out/piped.dot"), "digraph { x }");
    assert!(project.exists("out/piped.svg"));
}

#[test]
fn invalid_stem_is_an_error() {
    let project = Project::empty();
    project.tool("dot", FAKE_SVG_TOOL);
    project.file("g.dot", "digraph {}");

    project
        .xm()
        .args(&["export", "graphviz", "g.dot", "-d", "out", "--stem", "../up"])
        .fails()
        .stderr_has("Error: invalid stem \"../up\"");

    assert!(!project.exists("up.svg"));
}

#[test]
fn unreadable_input_is_an_error() {
    let project = Project::empty();

    project
        .xm()
        .args(&["export", "html", "missing.html", "-d", "out"])
        .fails()
        .stderr_has("failed to read missing.html");
}

#[test]
fn test_mode_echo_keeps_json_stdout_clean() {
    let project = Project::empty();
    project.tool("dot", FAKE_SVG_TOOL);
    project.file("flow.dot", "digraph {}");

    let run = project
        .xm()
        .env("X_MAKE_TEST_MODE", "1")
        .args(&["-o", "json", "export", "graphviz", "flow.dot"])
        .passes()
        .stderr_has("[test-mode] $ ");

    assert_eq!(run.json()["succeeded"], true);
}
