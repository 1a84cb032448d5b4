//! Top-level command orchestration.
pub mod provision;

use anyhow::Result;

use crate::tasks::{self, Context, Task};

/// Execute tasks in order, stopping at the first fatal failure.
///
/// # Errors
///
/// Returns the error of the first task that failed fatally.
pub fn run_tasks<'a>(tasks: impl IntoIterator<Item = &'a dyn Task>, ctx: &Context) -> Result<()> {
    for task in tasks {
        tasks::execute(task, ctx)?;
    }
    Ok(())
}
