//! Named, ordered steps that orchestrate resource changes.
pub mod applications;
mod context;
pub mod homebrew;
pub mod platform;
pub mod profile;
pub mod rosetta;

pub use context::Context;

use anyhow::Result;

use crate::logging::TaskStatus;

/// Outcome of a task that did not error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResult {
    /// Task completed successfully.
    Ok,
    /// Task was skipped with a reason.
    Skipped(String),
    /// Dry-run mode: changes were logged but not applied.
    DryRun,
    /// Task finished but part of its work failed.
    Degraded(String),
}

/// A named, executable provisioning step.
pub trait Task {
    /// Human-readable task name.
    fn name(&self) -> &'static str;

    /// Whether this task applies to the current host.
    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    /// Whether an error from [`run`](Self::run) aborts the whole run.
    fn fatal(&self) -> bool {
        true
    }

    /// Execute the task.
    ///
    /// # Errors
    ///
    /// Returns an error if the task could not bring the host to the desired
    /// state, such as when an installer exits non-zero.
    fn run(&self, ctx: &Context) -> Result<TaskResult>;
}

/// The provisioning steps, in execution order.
#[must_use]
pub fn all_provision_tasks() -> Vec<Box<dyn Task>> {
    vec![
        Box::new(platform::CheckPlatform),
        Box::new(rosetta::InstallRosetta),
        Box::new(homebrew::InstallHomebrew),
        Box::new(applications::InstallApplications),
        Box::new(profile::PatchShellProfile),
    ]
}

/// Execute a task, recording the result in the logger.
///
/// # Errors
///
/// Returns the task's error if it failed and [`Task::fatal`] is set; other
/// failures are only recorded.
pub fn execute(task: &dyn Task, ctx: &Context) -> Result<()> {
    if !task.should_run(ctx) {
        ctx.log
            .debug(&format!("skipping task: {} (not applicable)", task.name()));
        ctx.log
            .record_task(task.name(), TaskStatus::NotApplicable, None);
        return Ok(());
    }

    ctx.log.stage(task.name());

    match task.run(ctx) {
        Ok(TaskResult::Ok) => {
            ctx.log.record_task(task.name(), TaskStatus::Ok, None);
        }
        Ok(TaskResult::Skipped(reason)) => {
            ctx.log.info(&format!("skipped: {reason}"));
            ctx.log
                .record_task(task.name(), TaskStatus::Skipped, Some(&reason));
        }
        Ok(TaskResult::DryRun) => {
            ctx.log.record_task(task.name(), TaskStatus::DryRun, None);
        }
        Ok(TaskResult::Degraded(reason)) => {
            ctx.log.warn(&format!("{}: {reason}", task.name()));
            ctx.log
                .record_task(task.name(), TaskStatus::Degraded, Some(&reason));
        }
        Err(e) => {
            ctx.log
                .record_task(task.name(), TaskStatus::Failed, Some(&format!("{e:#}")));
            if task.fatal() {
                return Err(e);
            }
            ctx.log.error(&format!("{}: {e:#}", task.name()));
        }
    }
    Ok(())
}


#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use test_helpers::{make_context, test_config};

    /// A mock task for testing `execute()`.
    struct MockTask {
        name: &'static str,
        should_run: bool,
        fatal: bool,
        result: Result<TaskResult, String>,
    }

    impl MockTask {
        fn returning(result: Result<TaskResult, String>) -> Self {
            Self {
                name: "mock-task",
                should_run: true,
                fatal: true,
                result,
            }
        }
    }

    impl Task for MockTask {
        fn name(&self) -> &'static str {
            self.name
        }
        fn should_run(&self, _ctx: &Context) -> bool {
            self.should_run
        }
        fn fatal(&self) -> bool {
            self.fatal
        }
        fn run(&self, _ctx: &Context) -> Result<TaskResult> {
            self.result.clone().map_err(|s| anyhow::anyhow!("{s}"))
        }
    }

    fn single_status(ctx: &Context) -> TaskStatus {
        let entries = ctx.log.task_entries();
        assert_eq!(entries.len(), 1);
        entries[0].status
    }

    #[test]
    fn execute_records_non_applicable_task() {
        let (ctx, _) = make_context(test_config());
        let task = MockTask {
            should_run: false,
            ..MockTask::returning(Ok(TaskResult::Ok))
        };

        execute(&task, &ctx).unwrap();
        assert_eq!(single_status(&ctx), TaskStatus::NotApplicable);
    }

    #[test]
    fn execute_records_ok_task() {
        let (ctx, _) = make_context(test_config());
        execute(&MockTask::returning(Ok(TaskResult::Ok)), &ctx).unwrap();
        assert_eq!(single_status(&ctx), TaskStatus::Ok);
    }

    #[test]
    fn execute_records_skipped_task() {
        let (ctx, _) = make_context(test_config());
        let task = MockTask::returning(Ok(TaskResult::Skipped("not needed".to_string())));
        execute(&task, &ctx).unwrap();
        assert_eq!(single_status(&ctx), TaskStatus::Skipped);
        assert_eq!(
            ctx.log.task_entries()[0].message.as_deref(),
            Some("not needed")
        );
    }

    #[test]
    fn execute_records_dry_run_task() {
        let (ctx, _) = make_context(test_config());
        execute(&MockTask::returning(Ok(TaskResult::DryRun)), &ctx).unwrap();
        assert_eq!(single_status(&ctx), TaskStatus::DryRun);
    }

    #[test]
    fn execute_records_degraded_task() {
        let (ctx, _) = make_context(test_config());
        let task = MockTask::returning(Ok(TaskResult::Degraded("1 of 3 failed".to_string())));
        execute(&task, &ctx).unwrap();
        assert_eq!(single_status(&ctx), TaskStatus::Degraded);
        assert_eq!(ctx.log.failure_count(), 0);
    }

    #[test]
    fn fatal_failure_is_returned() {
        let (ctx, _) = make_context(test_config());
        let err = execute(&MockTask::returning(Err("kaboom".to_string())), &ctx).unwrap_err();
        assert_eq!(err.to_string(), "kaboom");
        assert_eq!(single_status(&ctx), TaskStatus::Failed);
    }

    #[test]
    fn non_fatal_failure_is_only_recorded() {
        let (ctx, _) = make_context(test_config());
        let task = MockTask {
            fatal: false,
            ..MockTask::returning(Err("disk full".to_string()))
        };
        execute(&task, &ctx).unwrap();
        assert_eq!(single_status(&ctx), TaskStatus::Failed);
        assert_eq!(ctx.log.failure_count(), 1);
    }

    #[test]
    fn tasks_run_in_declared_order() {
        let names: Vec<&str> = all_provision_tasks().iter().map(|t| t.name()).collect();
        assert_eq!(
            names,
            vec![
                "Check platform",
                "Install Rosetta 2",
                "Install Homebrew",
                "Install applications",
                "Patch shell profile",
            ]
        );
    }
}
