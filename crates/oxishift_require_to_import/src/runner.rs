use anyhow::{Context, Result, anyhow};
use log::{debug, info, trace, warn};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};

use oxishift_core::{CollectorConfig, collect_sources, find_git_root, source_type_for};

use crate::config::Config;
use crate::transform::transform_source;
use crate::types::{FileReport, RunResult, TransformOptions};

enum FileOutcome {
    Report(FileReport),
    Quiet,
    Failed,
}

/// Run the require-to-import codemod over a project tree.
///
/// Files are processed independently and in parallel; a file that cannot be
/// read or parsed is logged and skipped, never fatal to the run.
pub fn run_require_to_import(mut cfg: Config) -> Result<RunResult> {
    info!("Starting require-to-import codemod");

    let root = if let Some(r) = cfg.root.take() {
        debug!("Using provided root directory: {:?}", r);
        r.canonicalize().unwrap_or(r)
    } else {
        debug!("No root provided, searching for git root");
        find_git_root()?
    };
    info!("Using root directory: {}", root.display());
    cfg.root = Some(root.clone());

    let files =
        collect_sources(&CollectorConfig { root: root.clone(), include: cfg.include.clone() })?;
    if files.is_empty() {
        warn!("No source files found under {}", root.display());
        return Err(anyhow!("No source files found under {}", root.display()));
    }
    info!("Found {} source files", files.len());

    let options = cfg.transform_options();
    let write = cfg.write;

    let outcomes: Vec<FileOutcome> = files
        .par_iter()
        .map(|file| match process_file(file, &root, &options, write) {
            Ok(Some(report)) => FileOutcome::Report(report),
            Ok(None) => FileOutcome::Quiet,
            Err(e) => {
                warn!("Skipping {}: {:#}", file.display(), e);
                FileOutcome::Failed
            }
        })
        .collect();

    let mut reports: Vec<FileReport> = Vec::new();
    let mut files_failed = 0usize;
    for outcome in outcomes {
        match outcome {
            FileOutcome::Report(report) => reports.push(report),
            FileOutcome::Quiet => {}
            FileOutcome::Failed => files_failed += 1,
        }
    }
    // Parallel collection order is nondeterministic
    reports.sort_by(|a, b| a.path.cmp(&b.path));

    let files_changed = reports.iter().filter(|r| r.changed).count();
    let statements_converted = reports.iter().map(|r| r.converted).sum();
    let statements_skipped = reports.iter().map(|r| r.skipped).sum();

    info!(
        "Codemod complete: {} of {} files changed, {} failed",
        files_changed,
        files.len(),
        files_failed
    );

    Ok(RunResult {
        reports,
        files_scanned: files.len(),
        files_changed,
        files_failed,
        statements_converted,
        statements_skipped,
    })
}

fn process_file(
    file: &Path,
    root: &Path,
    options: &TransformOptions,
    write: bool,
) -> Result<Option<FileReport>> {
    trace!("Processing {}", file.display());
    let source = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let outcome = transform_source(&source, source_type_for(file), options, file)?;

    if outcome.changed && write {
        fs::write(file, &outcome.code)
            .with_context(|| format!("Failed to write {}", file.display()))?;
        debug!("Rewrote {}", file.display());
    }

    if !outcome.changed && outcome.skipped == 0 {
        return Ok(None);
    }

    let rel: PathBuf = file.strip_prefix(root).unwrap_or(file).to_path_buf();
    Ok(Some(FileReport {
        path: rel,
        converted: outcome.converted,
        skipped: outcome.skipped,
        changed: outcome.changed,
    }))
}
