// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::job::SourceKind;
use serial_test::serial;
use tempfile::TempDir;
use xm_adapters::{BinaryResolver, FakeArtifact, FakeResponse, FakeRunner, SearchEnv};

fn context(runner: &FakeRunner) -> ExportContext {
    ExportContext {
        resolver: BinaryResolver::new(SearchEnv::isolated()),
        runner: Some(Arc::new(runner.clone())),
    }
}

fn graph(dir: &TempDir, stem: &str) -> ExportJob {
    ExportJob {
        kind: SourceKind::Graphviz,
        source: format!("digraph {stem} {{}}"),
        out_dir: dir.path().to_path_buf(),
        stem: stem.to_string(),
        binary: Some(PathBuf::from("/usr/bin/dot")),
        args: Vec::new(),
        keep_intermediate: true,
    }
}

#[tokio::test]
async fn outcomes_follow_job_order() {
    let dir = TempDir::new().unwrap();
    let runner = FakeRunner::always(
        FakeResponse::success().writes(FakeArtifact::AfterFlag("-o".to_string())),
    );
    let jobs = ["a", "b", "c", "d", "e"]
        .into_iter()
        .map(|stem| Ok(graph(&dir, stem)))
        .collect();

    let outcomes = run_all(jobs, context(&runner), 2).await.unwrap();

    let stems: Vec<_> = outcomes.iter().map(|o| o.stem.as_str()).collect();
    assert_eq!(stems, vec!["a", "b", "c", "d", "e"]);
    assert!(outcomes.iter().all(JobOutcome::succeeded));
    assert_eq!(runner.call_count(), 5);
}

#[tokio::test]
async fn one_failure_does_not_stop_the_rest() {
    let dir = TempDir::new().unwrap();
    let runner = FakeRunner::always(
        FakeResponse::success().writes(FakeArtifact::AfterFlag("-o".to_string())),
    );
    let mut broken = graph(&dir, "broken");
    broken.binary = None;
    let jobs = vec![Ok(graph(&dir, "ok1")), Ok(broken), Ok(graph(&dir, "ok2"))];

    let outcomes = run_all(jobs, context(&runner), 1).await.unwrap();

    let passed: Vec<_> = outcomes.iter().map(JobOutcome::succeeded).collect();
    assert_eq!(passed, vec![true, false, true]);
    assert_eq!(runner.call_count(), 2);
}

#[tokio::test]
async fn unreadable_entries_keep_their_place() {
    let dir = TempDir::new().unwrap();
    let runner = FakeRunner::always(
        FakeResponse::success().writes(FakeArtifact::AfterFlag("-o".to_string())),
    );
    let planned = crate::manifest::PlannedExport {
        index: 2,
        kind: SourceKind::Graphviz,
        source: dir.path().join("gone.dot"),
        stem: "gone".to_string(),
        out_dir: dir.path().to_path_buf(),
        args: Vec::new(),
        keep_intermediate: true,
        binary: None,
    };
    let error = planned.clone().into_job().unwrap_err();
    let jobs = vec![
        Ok(graph(&dir, "first")),
        Err(JobOutcome::unreadable(&planned, error)),
        Ok(graph(&dir, "last")),
    ];

    let outcomes = run_all(jobs, context(&runner), 2).await.unwrap();

    let summary: Vec<_> = outcomes
        .iter()
        .map(|o| (o.stem.as_str(), o.succeeded()))
        .collect();
    assert_eq!(summary, vec![("first", true), ("gone", false), ("last", true)]);
    assert_eq!(runner.call_count(), 2);
}

#[tokio::test]
async fn run_report_summarizes_outcomes() {
    let dir = TempDir::new().unwrap();
    let runner = FakeRunner::always(
        FakeResponse::success().writes(FakeArtifact::AfterFlag("-o".to_string())),
    );
    let mut broken = graph(&dir, "broken");
    broken.binary = None;
    let outcomes = run_all(vec![Ok(graph(&dir, "ok")), Ok(broken)], context(&runner), 2)
        .await
        .unwrap();

    let json = run_report(Path::new("/work/xm.toml"), &outcomes).to_json();

    assert_eq!(json["tool"], "xm");
    assert_eq!(json["manifest"], "/work/xm.toml");
    assert_eq!(json["total"], 2);
    assert_eq!(json["succeeded"], 1);
    assert_eq!(json["failed"], 1);
    assert_eq!(json["exports"][0]["stem"], "ok");
    assert_eq!(json["exports"][1]["succeeded"], false);
    assert!(json["generated_at"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn zero_limit_still_runs() {
    let dir = TempDir::new().unwrap();
    let runner = FakeRunner::new();

    let outcomes = run_all(vec![Ok(graph(&dir, "g"))], context(&runner), 0)
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 1);
}

#[test]
#[serial(env)]
fn job_limit_prefers_flag_then_env() {
    std::env::set_var("XM_JOBS", "3");
    assert_eq!(job_limit(Some(7)), 7);
    assert_eq!(job_limit(None), 3);
    assert_eq!(job_limit(Some(0)), 1);
    std::env::remove_var("XM_JOBS");
    assert!(job_limit(None) >= 1);
}
