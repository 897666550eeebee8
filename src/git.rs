use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::process::{Command, Output};

use crate::changes::{ChangeRecord, ChangeStatus, DiffMode, PendingChanges};

/// Everything the pipeline needs from the version-control system. `Sync`
/// because per-file diff retrieval fans out across scoped threads.
pub trait VersionControl: Sync {
    /// Root of the checked-out tree, or `None` when the current directory is
    /// not inside a repository.
    fn workspace_root(&self) -> Result<Option<PathBuf>>;

    /// Pending changes, preferring unstaged working-tree edits over the index.
    fn pending_changes(&self) -> Result<PendingChanges>;

    /// Diff of a single path against the last commit.
    fn diff_with_head(&self, path: &str) -> Result<String>;

    /// Diff of a single path, staged content against the last commit.
    fn staged_diff_with_head(&self, path: &str) -> Result<String>;

    /// Stage the given paths in one batch.
    fn stage(&self, paths: &[String]) -> Result<()>;

    /// Complete `git diff --staged` output, for the raw-command mode.
    fn staged_diff(&self) -> Result<String>;
}

/// Backend that shells out to the `git` binary in the current directory.
#[derive(Debug, Default)]
pub struct GitCli;

impl GitCli {
    pub fn new() -> Self {
        Self
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        Command::new("git")
            .args(args)
            .output()
            .with_context(|| format!("Failed to run git {}", args.join(" ")))
    }

    fn run_checked(&self, args: &[&str]) -> Result<String> {
        let output = self.run(args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("git {} failed: {}", args.join(" "), stderr.trim());
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl VersionControl for GitCli {
    fn workspace_root(&self) -> Result<Option<PathBuf>> {
        let output = self.run(&["rev-parse", "--show-toplevel"])?;
        if !output.status.success() {
            return Ok(None);
        }
        let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(Some(PathBuf::from(root)))
    }

    fn pending_changes(&self) -> Result<PendingChanges> {
        let listing = self.run_checked(&["status", "--porcelain"])?;
        Ok(parse_porcelain(&listing))
    }

    fn diff_with_head(&self, path: &str) -> Result<String> {
        self.run_checked(&["diff", "HEAD", "--", path])
    }

    fn staged_diff_with_head(&self, path: &str) -> Result<String> {
        self.run_checked(&["diff", "--staged", "--", path])
    }

    fn stage(&self, paths: &[String]) -> Result<()> {
        let mut args = vec!["add", "--"];
        args.extend(paths.iter().map(String::as_str));
        self.run_checked(&args)?;
        Ok(())
    }

    fn staged_diff(&self) -> Result<String> {
        self.run_checked(&["diff", "--staged"])
    }
}

/// Locate the repository's git directory (for the commit-message sink).
pub fn resolve_git_dir() -> Result<PathBuf> {
    let output = Command::new("git")
        .args(["rev-parse", "--git-dir"])
        .output()
        .context("Failed to run git rev-parse --git-dir")?;

    if !output.status.success() {
        bail!("Not in a git repository");
    }

    Ok(PathBuf::from(
        String::from_utf8_lossy(&output.stdout).trim(),
    ))
}

/// Split `git status --porcelain` output into pending changes. Working-tree
/// entries (unstaged edits and untracked files) win over index entries so
/// the summarized diff matches what will be staged.
fn parse_porcelain(listing: &str) -> PendingChanges {
    let mut working = Vec::new();
    let mut staged = Vec::new();

    for line in listing.lines() {
        if line.len() < 4 {
            continue;
        }
        let mut chars = line.chars();
        let index_code = chars.next().unwrap_or(' ');
        let tree_code = chars.next().unwrap_or(' ');
        let path = clean_path(&line[3..]);
        if path.is_empty() {
            continue;
        }

        if index_code == '?' {
            working.push(ChangeRecord::new(path, ChangeStatus::Added));
            continue;
        }
        if tree_code != ' ' {
            working.push(ChangeRecord::new(path, status_for(tree_code)));
        } else if index_code != ' ' {
            staged.push(ChangeRecord::new(path, status_for(index_code)));
        }
    }

    if !working.is_empty() {
        PendingChanges {
            changes: working,
            mode: DiffMode::WorkingTree,
        }
    } else if !staged.is_empty() {
        PendingChanges {
            changes: staged,
            mode: DiffMode::Staged,
        }
    } else {
        PendingChanges::none()
    }
}

fn status_for(code: char) -> ChangeStatus {
    match code {
        'M' | 'R' | 'C' | 'T' => ChangeStatus::Modified,
        'A' => ChangeStatus::Added,
        'D' => ChangeStatus::Deleted,
        _ => ChangeStatus::Unknown,
    }
}

/// Porcelain prints `old -> new` for renames and quotes unusual paths.
fn clean_path(raw: &str) -> String {
    let raw = match raw.rsplit_once(" -> ") {
        Some((_, new_path)) => new_path,
        None => raw,
    };
    raw.trim().trim_matches('"').to_string()
}
