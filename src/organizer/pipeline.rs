use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

use super::categorize::{self, CategoryMap};
use super::execute::{self, RelocationPlan};
use super::resolve;
use crate::common::errors::{SortError, SortResult};
use crate::duplicates::{self, DUPLICATES_DIR};
use crate::scanner::{self, FileRecord};

/// Options for one organizing run, validated before any file is touched.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub source: PathBuf,
    /// Output root; defaults to the source directory.
    pub output: PathBuf,
    pub dry_run: bool,
    pub recursive: bool,
    pub by_type: bool,
    pub by_date: bool,
    pub duplicates: bool,
    pub show_progress: bool,
}

impl RunOptions {
    /// Fatal-before-start validation: the source must be a directory and
    /// at least one stage must be selected.
    pub fn validate(&self) -> SortResult<()> {
        if !self.source.is_dir() {
            return Err(SortError::Config(format!(
                "'{}' is not a valid directory",
                self.source.display()
            )));
        }
        if !(self.by_type || self.by_date || self.duplicates) {
            return Err(SortError::Config(
                "no stages selected: pass --duplicates, --by-type, or --by-date".to_string(),
            ));
        }
        Ok(())
    }
}

/// Pipeline stage a file outcome belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Duplicates,
    ByType,
    ByDate,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Duplicates => write!(f, "duplicates"),
            Stage::ByType => write!(f, "by type"),
            Stage::ByDate => write!(f, "by date"),
        }
    }
}

/// What happened (or would happen) to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Moved,
    WouldMove,
    Skipped,
    Errored,
}

/// Per-file outcome record exposed to the reporter.
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub original: PathBuf,
    pub destination: Option<PathBuf>,
    pub stage: Stage,
    /// Category directory name, date bucket, or the duplicates folder.
    pub label: String,
    pub action: Action,
    pub error: Option<String>,
}

/// Aggregate result of one run.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub started_at: String,
    pub dry_run: bool,
    pub files_scanned: usize,
    pub outcomes: Vec<FileOutcome>,
    pub errors: Vec<String>,
}

impl RunReport {
    pub fn count(&self, action: Action) -> usize {
        self.outcomes.iter().filter(|o| o.action == action).count()
    }

    pub fn stage_count(&self, stage: Stage, action: Action) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.stage == stage && o.action == action)
            .count()
    }

    pub fn moved(&self) -> usize {
        self.count(Action::Moved)
    }

    pub fn would_move(&self) -> usize {
        self.count(Action::WouldMove)
    }

    pub fn skipped(&self) -> usize {
        self.count(Action::Skipped)
    }

    pub fn errored(&self) -> usize {
        self.count(Action::Errored)
    }
}

/// Run the fixed pipeline over one scan snapshot: duplicates, then
/// by-type, then by-date, regardless of the order flags were supplied.
///
/// Duplicate extras reach their final location in the first stage and
/// are excluded from later stages; likewise files the type stage moved
/// are excluded from the date stage. `now` is injected so date
/// bucketing is deterministic under test.
pub fn run(opts: &RunOptions, map: &CategoryMap, now: SystemTime) -> SortResult<RunReport> {
    opts.validate()?;

    let scan = scanner::scan(&opts.source, opts.recursive);
    let mut report = RunReport {
        started_at: chrono::Utc::now().to_rfc3339(),
        dry_run: opts.dry_run,
        files_scanned: scan.records.len(),
        outcomes: Vec::new(),
        errors: scan.warnings,
    };

    // Destination names promised so far in this run. Dry-run claims are
    // recorded too, so a simulated plan matches what a live run does.
    let mut claimed: HashSet<PathBuf> = HashSet::new();
    // Files that reached their final location in an earlier stage. The
    // same paths are the slots those moves vacated, so the resolver
    // treats them as free even when a dry run left them on disk.
    let mut settled: HashSet<PathBuf> = HashSet::new();

    if opts.duplicates {
        debug!("stage: duplicates");
        let detect = duplicates::find_duplicates(&scan.records, opts.show_progress);
        report.errors.extend(detect.warnings);

        let target_dir = opts.output.join(DUPLICATES_DIR);
        for set in &detect.sets {
            for record in &set.extras {
                relocate(
                    record,
                    &target_dir,
                    DUPLICATES_DIR,
                    Stage::Duplicates,
                    opts.dry_run,
                    &mut claimed,
                    &mut settled,
                    &mut report,
                );
            }
        }
    }

    if opts.by_type {
        debug!("stage: by type");
        for record in &scan.records {
            if settled.contains(&record.path) {
                continue;
            }
            let category = map.classify(&record.path);
            let target_dir = opts.output.join(category.dir_name());
            relocate(
                record,
                &target_dir,
                category.dir_name(),
                Stage::ByType,
                opts.dry_run,
                &mut claimed,
                &mut settled,
                &mut report,
            );
        }
    }

    if opts.by_date {
        debug!("stage: by date");
        for record in &scan.records {
            if settled.contains(&record.path) {
                continue;
            }
            let bucket = categorize::classify_by_date(record.modified, now);
            let target_dir = opts.output.join(bucket.dir_name());
            relocate(
                record,
                &target_dir,
                bucket.dir_name(),
                Stage::ByDate,
                opts.dry_run,
                &mut claimed,
                &mut settled,
                &mut report,
            );
        }
    }

    Ok(report)
}

/// Resolve and execute one relocation, folding the result into the
/// report. Per-file failures never abort the run.
#[allow(clippy::too_many_arguments)]
fn relocate(
    record: &FileRecord,
    target_dir: &Path,
    label: &str,
    stage: Stage,
    dry_run: bool,
    claimed: &mut HashSet<PathBuf>,
    settled: &mut HashSet<PathBuf>,
    report: &mut RunReport,
) {
    let resolved = match resolve::resolve(&record.path, target_dir, claimed, settled) {
        Ok(r) => r,
        Err(e) => {
            record_error(record, stage, label, e, report);
            return;
        }
    };

    let Some(dest) = resolved else {
        // Already at its destination.
        report.outcomes.push(FileOutcome {
            original: record.path.clone(),
            destination: Some(record.path.clone()),
            stage,
            label: label.to_string(),
            action: Action::Skipped,
            error: None,
        });
        return;
    };

    let plan = RelocationPlan {
        source: record.path.clone(),
        dest: dest.clone(),
    };

    match execute::execute(&plan, dry_run) {
        Ok(()) => {
            claimed.insert(dest.clone());
            settled.insert(record.path.clone());
            report.outcomes.push(FileOutcome {
                original: record.path.clone(),
                destination: Some(dest),
                stage,
                label: label.to_string(),
                action: if dry_run {
                    Action::WouldMove
                } else {
                    Action::Moved
                },
                error: None,
            });
        }
        Err(e) => record_error(record, stage, label, e, report),
    }
}

fn record_error(
    record: &FileRecord,
    stage: Stage,
    label: &str,
    error: SortError,
    report: &mut RunReport,
) {
    let message = error.to_string();
    report.errors.push(message.clone());
    report.outcomes.push(FileOutcome {
        original: record.path.clone(),
        destination: None,
        stage,
        label: label.to_string(),
        action: Action::Errored,
        error: Some(message),
    });
}
