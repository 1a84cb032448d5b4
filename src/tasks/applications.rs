//! Cask batch install.
use anyhow::Result;

use super::{Context, Task, TaskResult};
use crate::resources::Applicable;
use crate::resources::cask::CaskResource;

/// Result of installing one cask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppStatus {
    /// `brew install --cask` succeeded.
    Installed,
    /// Dry run: the install was only logged.
    DryRun,
    /// The install failed; carries the error text.
    Failed(String),
}

/// Per-cask record returned by [`install_applications`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppOutcome {
    /// Cask token.
    pub cask: String,
    /// What happened to it.
    pub status: AppStatus,
}

/// Install every planned cask, continuing past failures.
///
/// Returns one outcome per plan entry, in plan order.
#[must_use]
pub fn install_applications(ctx: &Context) -> Vec<AppOutcome> {
    let search_path = ctx.search_path_os();
    let total = ctx.config.applications.len();

    ctx.config
        .applications
        .iter()
        .enumerate()
        .map(|(i, app)| {
            let resource = CaskResource::new(app.cask.clone(), &*ctx.executor, &search_path);
            let status = if ctx.dry_run() {
                ctx.log
                    .dry_run(&format!("would run: brew install --cask {}", app.cask));
                AppStatus::DryRun
            } else {
                ctx.log
                    .info(&format!("[{}/{total}] {}", i + 1, resource.description()));
                match resource.apply() {
                    Ok(_) => AppStatus::Installed,
                    Err(e) => {
                        ctx.log.warn(&format!("{}: {e:#}", app.cask));
                        AppStatus::Failed(format!("{e:#}"))
                    }
                }
            };
            AppOutcome {
                cask: app.cask.clone(),
                status,
            }
        })
        .collect()
}

/// Install the GUI applications in the plan.
#[derive(Debug)]
pub struct InstallApplications;

impl Task for InstallApplications {
    fn name(&self) -> &'static str {
        "Install applications"
    }

    fn fatal(&self) -> bool {
        false
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        if ctx.config.applications.is_empty() {
            return Ok(TaskResult::Skipped("no applications planned".to_string()));
        }

        let outcomes = install_applications(ctx);
        let failed: Vec<&str> = outcomes
            .iter()
            .filter(|o| matches!(o.status, AppStatus::Failed(_)))
            .map(|o| o.cask.as_str())
            .collect();

        if !failed.is_empty() {
            return Ok(TaskResult::Degraded(format!(
                "{} of {} failed: {}",
                failed.len(),
                outcomes.len(),
                failed.join(", ")
            )));
        }
        if ctx.dry_run() {
            return Ok(TaskResult::DryRun);
        }
        Ok(TaskResult::Ok)
    }
}
