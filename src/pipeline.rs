use crate::client::CompletionApi;
use crate::config::AppConfig;
use crate::credentials::{CredentialStore, OPENROUTER_KEY};
use crate::diff;
use crate::error::PipelineError;
use crate::git::VersionControl;
use crate::message;
use crate::prompt;
use crate::report::{Reporter, Severity};
use crate::sink::MessageSink;

/// How the diff text is acquired: per-file diffs of whatever is pending
/// (staging working-tree edits along the way), or the already-staged diff
/// verbatim with no staging action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffStrategy {
    Tracked,
    StagedOnly,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Generated(String),
    NoChanges,
}

/// The full generation run, wired through explicit collaborators so it can
/// be exercised without git, a terminal, or a network.
pub struct Pipeline<'a> {
    pub vcs: &'a dyn VersionControl,
    pub client: &'a dyn CompletionApi,
    pub credentials: &'a dyn CredentialStore,
    pub sink: &'a dyn MessageSink,
    pub reporter: &'a dyn Reporter,
    pub config: &'a AppConfig,
    pub strategy: DiffStrategy,
}

impl Pipeline<'_> {
    pub fn run(&self) -> Result<Outcome, PipelineError> {
        let root = self
            .vcs
            .workspace_root()
            .map_err(|err| PipelineError::DiffUnavailable(format!("{err:#}")))?;
        if root.is_none() {
            return Err(PipelineError::NoRepository);
        }

        let diff_text = match self.strategy {
            DiffStrategy::Tracked => {
                let pending = self
                    .vcs
                    .pending_changes()
                    .map_err(|err| PipelineError::DiffUnavailable(format!("{err:#}")))?;
                if pending.is_empty() {
                    self.reporter
                        .report(Severity::Info, "No changes found to commit.");
                    return Ok(Outcome::NoChanges);
                }
                diff::assemble(self.vcs, &pending.changes, pending.mode, self.reporter)?
            }
            DiffStrategy::StagedOnly => {
                let staged = self
                    .vcs
                    .staged_diff()
                    .map_err(|err| PipelineError::DiffUnavailable(format!("{err:#}")))?;
                if staged.trim().is_empty() {
                    self.reporter
                        .report(Severity::Info, "No staged changes found to commit.");
                    return Ok(Outcome::NoChanges);
                }
                staged
            }
        };

        // Unreadable store and missing token share one remedy: `cmg auth`.
        let credential = self
            .credentials
            .get(OPENROUTER_KEY)
            .map_err(|_| PipelineError::MissingCredential)?
            .ok_or(PipelineError::MissingCredential)?;

        let prompt = prompt::build(&diff_text, &self.config.model);
        let raw = self.client.complete(&prompt, &credential)?;
        let commit_message = message::normalize(&raw);

        self.reporter
            .report(Severity::Info, &format!("Generated: \"{commit_message}\""));

        // Publish failures are reported but never abort a finished run.
        if let Err(err) = self.sink.publish(&commit_message) {
            self.reporter.report(
                Severity::Error,
                &format!("Could not write the commit message: {err:#}"),
            );
        }

        Ok(Outcome::Generated(commit_message))
    }
}
