use anyhow::{Context, Result};

use crate::git::resolve_git_dir;

/// Destination for the finished commit message.
pub trait MessageSink {
    fn publish(&self, message: &str) -> Result<()>;
}

/// Writes the message to `<git-dir>/COMMIT_EDITMSG`, the closest CLI
/// equivalent of an editor's commit-input box. The git dir is resolved at
/// publish time so a missing repository surfaces as a publish failure.
#[derive(Debug, Default)]
pub struct CommitEditMsgSink;

impl MessageSink for CommitEditMsgSink {
    fn publish(&self, message: &str) -> Result<()> {
        let path = resolve_git_dir()?.join("COMMIT_EDITMSG");
        std::fs::write(&path, format!("{message}\n"))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

/// Prints the bare message to stdout, for `--dry-run` and piping.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl MessageSink for StdoutSink {
    fn publish(&self, message: &str) -> Result<()> {
        println!("{message}");
        Ok(())
    }
}
