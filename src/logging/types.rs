//! Task summary types.

/// Task execution result for summary reporting.
#[derive(Debug, Clone)]
pub struct TaskEntry {
    /// Human-readable task name.
    pub name: String,
    /// Final status of the task.
    pub status: TaskStatus,
    /// Optional detail message (e.g., skip reason or error description).
    pub message: Option<String>,
}

/// Status of a completed task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Task completed successfully.
    Ok,
    /// Task does not apply to this host (e.g. Rosetta 2 on Intel).
    NotApplicable,
    /// Task chose not to act (e.g. unsupported shell).
    Skipped,
    /// Task ran in dry-run mode; no changes were applied.
    DryRun,
    /// Task finished but part of its work failed.
    Degraded,
    /// Task encountered an error and could not complete.
    Failed,
}

impl TaskStatus {
    /// Summary icon and ANSI color for this status.
    #[must_use]
    pub const fn style(self) -> (&'static str, &'static str) {
        match self {
            Self::Ok => ("✓", "\x1b[32m"),
            Self::NotApplicable => ("·", "\x1b[2m"),
            Self::Skipped => ("○", "\x1b[33m"),
            Self::DryRun => ("~", "\x1b[37m"),
            Self::Degraded => ("!", "\x1b[33m"),
            Self::Failed => ("✗", "\x1b[31m"),
        }
    }
}
