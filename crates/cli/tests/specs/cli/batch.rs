//! `xm batch` specs

use crate::prelude::*;

const MANIFEST: &str = r#"
[[export]]
kind = "graphviz"
source = "src/flow.dot"
out_dir = "build"

[[export]]
kind = "mermaid"
source = "src/seq.mmd"
out_dir = "build"
stem = "sequence"

[[export]]
kind = "html"
source = "src/page.html"
out_dir = "build"
keep_intermediate = false
"#;

fn project_with_sources() -> Project {
    let project = Project::empty();
    project.tool("dot", FAKE_SVG_TOOL);
    project.tool("mmdc", FAKE_SVG_TOOL);
    project.tool("wkhtmltopdf", FAKE_PDF_TOOL);
    project.file("src/flow.dot", "digraph { a -> b }");
    project.file("src/seq.mmd", "sequenceDiagram\n A->>B: hi");
    project.file("src/page.html", "<p>hello</p>");
    project
}

#[test]
fn batch_runs_every_entry() {
    let project = project_with_sources();
    project.file("xm.toml", MANIFEST);

    let run = project
        .xm()
        .args(&["batch", "xm.toml", "--jobs", "2"])
        .passes();

    let lines: Vec<_> = run.stdout().lines().map(str::to_string).collect();
    assert_eq!(lines.len(), 3, "stdout: {}", run.stdout());
    assert!(lines[0].starts_with("graphviz->svg flow: wrote"));
    assert!(lines[1].starts_with("mermaid->svg sequence: wrote"));
    assert!(lines[2].starts_with("html->pdf page: wrote"));

    assert!(project.exists("build/flow.svg"));
    assert!(project.exists("build/sequence.svg"));
    assert!(project.exists("build/page.pdf"));
    assert!(!project.exists("build/page.html"));
}

#[test]
fn batch_paths_resolve_against_manifest_dir() {
    let project = project_with_sources();
    project.file("conf/xm.toml", &MANIFEST.replace("src/", "../src/"));

    project.xm().args(&["batch", "conf/xm.toml"]).passes();

    assert!(project.exists("conf/build/flow.svg"));
}

#[test]
fn batch_json_is_an_array() {
    let project = project_with_sources();
    project.file("xm.toml", MANIFEST);

    let json = project
        .xm()
        .args(&["batch", "xm.toml", "-o", "json"])
        .passes()
        .json();

    let records = json.as_array().unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[1]["stem"], "sequence");
    assert!(records.iter().all(|r| r["succeeded"] == true));
}

#[test]
fn batch_reports_failures_and_exits_1() {
    let project = project_with_sources();
    project.tool("mmdc", FAILING_TOOL);
    project.file("xm.toml", MANIFEST);

    project
        .xm()
        .args(&["batch", "xm.toml"])
        .fails()
        .exit_code(1)
        .stdout_has("mermaid->svg sequence: failed: mmdc execution failed")
        .stderr_has("Error: 1 of 3 exports failed");

    assert!(project.exists("build/flow.svg"));
    assert!(project.exists("build/page.pdf"));
}

#[test]
fn batch_rejects_bad_manifest_before_running() {
    let project = project_with_sources();
    project.file("xm.toml", "[[export]]\nkind = \"pptx\"\nsource = \"a\"\n");

    project
        .xm()
        .args(&["batch", "xm.toml"])
        .fails()
        .stderr_has("invalid manifest");

    assert!(!project.exists("build"));
}

#[test]
fn batch_missing_source_names_entry() {
    let project = project_with_sources();
    project.file(
        "xm.toml",
        "[[export]]\nkind = \"graphviz\"\nsource = \"src/flow.dot\"\n\n[[export]]\nkind = \"graphviz\"\nsource = \"src/gone.dot\"\n",
    );

    project
        .xm()
        .args(&["batch", "xm.toml"])
        .fails()
        .exit_code(1)
        .stdout_has("graphviz->svg gone: rejected: export #2: failed to read source")
        .stderr_has("1 of 2 exports failed");

    assert!(project.exists("flow.svg"));
}

#[test]
fn batch_writes_run_report() {
    let project = project_with_sources();
    project.file("xm.toml", MANIFEST);

    project
        .xm()
        .args(&["batch", "xm.toml", "--report", "."])
        .passes()
        .stderr_has("report: ");

    let reports = std::fs::read_dir(project.path().join("reports"))
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect::<Vec<_>>();
    assert_eq!(reports.len(), 1);
    let name = reports[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("xm_run_") && name.ends_with(".json"), "got: {name}");

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&reports[0]).unwrap()).unwrap();
    assert_eq!(report["tool"], "xm");
    assert_eq!(report["failed"], 0);
    assert_eq!(report["total"], report["exports"].as_array().unwrap().len());
}
