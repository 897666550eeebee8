use std::thread;

use anyhow::Result;

use crate::changes::{ChangeRecord, DiffMode};
use crate::error::PipelineError;
use crate::git::VersionControl;
use crate::report::{Reporter, Severity};

/// Build one diff text block for everything that will be committed, staging
/// working-tree changes so the committed diff matches the summary.
///
/// Failures degrade instead of aborting: a single unreadable file becomes a
/// placeholder line, and a failed batch becomes a plain status listing. The
/// result is never empty for a non-empty change list.
pub fn assemble(
    vcs: &dyn VersionControl,
    changes: &[ChangeRecord],
    mode: DiffMode,
    reporter: &dyn Reporter,
) -> Result<String, PipelineError> {
    let text = match collect_and_stage(vcs, changes, mode, reporter) {
        Ok(text) => text,
        Err(err) => {
            reporter.report(
                Severity::Warning,
                &format!("Falling back to a file listing: {err:#}"),
            );
            status_listing(changes)
        }
    };

    if text.trim().is_empty() {
        return Err(PipelineError::DiffUnavailable(
            "no analyzable changes were found".into(),
        ));
    }
    Ok(text)
}

fn collect_and_stage(
    vcs: &dyn VersionControl,
    changes: &[ChangeRecord],
    mode: DiffMode,
    reporter: &dyn Reporter,
) -> Result<String> {
    let fragments: Vec<String> = thread::scope(|scope| {
        let handles: Vec<_> = changes
            .iter()
            .map(|change| scope.spawn(move || per_file_diff(vcs, change, mode)))
            .collect();
        handles
            .into_iter()
            .zip(changes)
            .map(|(handle, change)| {
                handle.join().unwrap_or_else(|_| placeholder(change, mode))
            })
            .collect()
    });

    let text = fragments
        .into_iter()
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    if mode == DiffMode::WorkingTree {
        let paths: Vec<String> = changes.iter().map(|c| c.path.clone()).collect();
        vcs.stage(&paths)?;
        reporter.report(Severity::Info, &format!("Staged {} file(s)", paths.len()));
    }

    Ok(text)
}

/// Diff a single path, falling back to a placeholder line when the diff is
/// unavailable or empty (untracked files diff to nothing against HEAD).
fn per_file_diff(vcs: &dyn VersionControl, change: &ChangeRecord, mode: DiffMode) -> String {
    let retrieved = match mode {
        DiffMode::WorkingTree => vcs.diff_with_head(&change.path),
        DiffMode::Staged => vcs.staged_diff_with_head(&change.path),
    };
    match retrieved {
        Ok(diff) if !diff.trim().is_empty() => diff,
        _ => placeholder(change, mode),
    }
}

fn placeholder(change: &ChangeRecord, mode: DiffMode) -> String {
    match mode {
        DiffMode::WorkingTree => format!("Modified: {}", change.path),
        DiffMode::Staged => format!("Staged: {}", change.path),
    }
}

fn status_listing(changes: &[ChangeRecord]) -> String {
    changes
        .iter()
        .map(|change| format!("{}: {}", change.status, change.path))
        .collect::<Vec<_>>()
        .join("\n")
}
