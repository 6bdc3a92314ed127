// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `xm batch <manifest>` - Run the exports listed in a manifest

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use xm_core::RunReport;

use crate::exit_error::ExitError;
use crate::job::{ExportContext, ExportJob, JobOutcome};
use crate::output::{self, OutputFormat};
use crate::{env, manifest};

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// TOML manifest with one `[[export]]` table per job
    pub manifest: PathBuf,

    /// Maximum exports running at once (default: XM_JOBS, else CPU count)
    #[arg(short = 'j', long)]
    pub jobs: Option<usize>,

    /// Write a JSON run report to DIR/reports/xm_run_<timestamp>.json
    #[arg(long, value_name = "DIR")]
    pub report: Option<PathBuf>,
}

pub async fn handle(args: BatchArgs, ctx: ExportContext, format: OutputFormat) -> Result<()> {
    let planned = manifest::load(&args.manifest)?;
    let jobs = planned
        .into_iter()
        .map(|export| {
            let unread = export.clone();
            export
                .into_job()
                .map_err(|e| JobOutcome::unreadable(&unread, e))
        })
        .collect::<Vec<_>>();

    let limit = job_limit(args.jobs);
    tracing::debug!(jobs = jobs.len(), limit, "starting batch");
    let outcomes = run_all(jobs, ctx, limit).await?;

    output::print_outcomes(&outcomes, format)?;
    let failed = outcomes.iter().filter(|o| !o.succeeded()).count();
    if let Some(base) = &args.report {
        let path = run_report(&args.manifest, &outcomes).write(base)?;
        eprintln!("report: {}", path.display());
    }
    if failed > 0 {
        return Err(ExitError::new(
            1,
            format!("{failed} of {} exports failed", outcomes.len()),
        )
        .into());
    }
    Ok(())
}

/// Summary of one batch run: counts plus every outcome's metadata.
pub(crate) fn run_report(manifest: &Path, outcomes: &[JobOutcome]) -> RunReport {
    let failed = outcomes.iter().filter(|o| !o.succeeded()).count();
    let mut payload = serde_json::Map::new();
    payload.insert("manifest".into(), manifest.display().to_string().into());
    payload.insert("total".into(), outcomes.len().into());
    payload.insert("succeeded".into(), (outcomes.len() - failed).into());
    payload.insert("failed".into(), failed.into());
    payload.insert(
        "exports".into(),
        outcomes.iter().map(JobOutcome::to_json).collect(),
    );
    RunReport::new("xm", payload)
}

fn job_limit(flag: Option<usize>) -> usize {
    flag.or_else(env::batch_jobs)
        .unwrap_or_else(|| std::thread::available_parallelism().map_or(4, |n| n.get()))
        .max(1)
}

enum Pending {
    Running(JoinHandle<JobOutcome>),
    Done(JobOutcome),
}

/// Run every job on the blocking pool, at most `limit` at a time.
///
/// Entries that already failed pass straight through. Outcomes come back in
/// the order the jobs were given.
pub(crate) async fn run_all(
    jobs: Vec<Result<ExportJob, JobOutcome>>,
    ctx: ExportContext,
    limit: usize,
) -> Result<Vec<JobOutcome>> {
    let semaphore = Arc::new(Semaphore::new(limit.max(1)));
    let mut pending = Vec::with_capacity(jobs.len());
    for job in jobs {
        let job = match job {
            Ok(job) => job,
            Err(outcome) => {
                pending.push(Pending::Done(outcome));
                continue;
            }
        };
        let permit = Arc::clone(&semaphore).acquire_owned().await?;
        let ctx = ctx.clone();
        pending.push(Pending::Running(tokio::task::spawn_blocking(move || {
            let _permit = permit;
            job.run(&ctx)
        })));
    }

    let mut outcomes = Vec::with_capacity(pending.len());
    for entry in pending {
        outcomes.push(match entry {
            Pending::Running(handle) => handle.await?,
            Pending::Done(outcome) => outcome,
        });
    }
    Ok(outcomes)
}

#[cfg(test)]
#[path = "batch_tests.rs"]
mod tests;
