//! Homebrew bootstrap and update.
use anyhow::Result;

use super::{Context, Task, TaskResult};
use crate::error::{InstallError, ProvisionError};
use crate::resources::homebrew::HomebrewResource;
use crate::resources::{Applicable, Resource};

/// Install Homebrew, or update it when already present.
#[derive(Debug)]
pub struct InstallHomebrew;

impl Task for InstallHomebrew {
    fn name(&self) -> &'static str {
        "Install Homebrew"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let layout = &ctx.config.homebrew;
        let search_path = ctx.search_path_os();
        let resource =
            HomebrewResource::new(layout, &*ctx.executor, &*ctx.fetcher, &search_path);

        if !resource.needs_change().map_err(package_manager)? {
            ctx.log.debug("brew found on search path");
            return update(ctx, &resource);
        }

        if ctx.dry_run() {
            ctx.log.dry_run(&format!(
                "would download {} and run it with /bin/bash",
                layout.install_url
            ));
            return Ok(TaskResult::DryRun);
        }

        ctx.log
            .info("installing Homebrew (may prompt for your password)");
        resource.apply().map_err(package_manager)?;

        ctx.prepend_search_path(&layout.sbin_dir());
        ctx.prepend_search_path(&layout.bin_dir());
        ctx.log.debug(&format!(
            "search path now starts with {}",
            layout.bin_dir().display()
        ));
        ctx.log.info("Homebrew installed");
        Ok(TaskResult::Ok)
    }
}

/// `brew update`; a failure leaves the step degraded instead of failed.
fn update(ctx: &Context, resource: &HomebrewResource<'_>) -> Result<TaskResult> {
    if ctx.dry_run() {
        ctx.log.dry_run("would run: brew update");
        return Ok(TaskResult::DryRun);
    }

    ctx.log.info("updating Homebrew");
    match resource.update() {
        Ok(result) if result.success => {
            ctx.log.info("Homebrew up to date");
            Ok(TaskResult::Ok)
        }
        Ok(result) => Ok(TaskResult::Degraded(format!(
            "brew update exited with code {}",
            result.code.unwrap_or(-1)
        ))),
        Err(e) => Ok(TaskResult::Degraded(format!("brew update: {e:#}"))),
    }
}

fn package_manager(e: anyhow::Error) -> ProvisionError {
    InstallError::PackageManager { source: e.into() }.into()
}
