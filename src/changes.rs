use std::fmt;

/// How a pending file differs from the last commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeStatus {
    Modified,
    Added,
    Deleted,
    Unknown,
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChangeStatus::Modified => "Modified",
            ChangeStatus::Added => "Added",
            ChangeStatus::Deleted => "Deleted",
            ChangeStatus::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// One pending file, as reported by the change source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub path: String,
    pub status: ChangeStatus,
}

impl ChangeRecord {
    pub fn new(path: impl Into<String>, status: ChangeStatus) -> Self {
        Self {
            path: path.into(),
            status,
        }
    }
}

/// Which side of the index the pending changes live on.
///
/// `WorkingTree` means the caller must stage them before committing so the
/// committed diff matches what was summarized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffMode {
    WorkingTree,
    Staged,
}

/// Everything the change source found. An empty `changes` list means there
/// is nothing to summarize and the pipeline stops.
#[derive(Debug, Clone)]
pub struct PendingChanges {
    pub changes: Vec<ChangeRecord>,
    pub mode: DiffMode,
}

impl PendingChanges {
    pub fn none() -> Self {
        Self {
            changes: Vec::new(),
            mode: DiffMode::Staged,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}
