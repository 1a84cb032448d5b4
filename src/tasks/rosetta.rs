//! Rosetta 2 on Apple Silicon.
use anyhow::Result;

use super::{Context, Task, TaskResult};
use crate::error::{InstallError, ProvisionError};
use crate::platform::is_apple_silicon;
use crate::resources::rosetta::RosettaResource;
use crate::resources::{Applicable, Resource};

/// Install Rosetta 2 on Apple Silicon.
#[derive(Debug)]
pub struct InstallRosetta;

impl Task for InstallRosetta {
    fn name(&self) -> &'static str {
        "Install Rosetta 2"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        is_apple_silicon(&ctx.config.arch)
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let resource = RosettaResource::new(&*ctx.executor);

        if !resource.needs_change().map_err(compatibility_layer)? {
            ctx.log.info("Rosetta 2 already installed");
            return Ok(TaskResult::Ok);
        }

        if ctx.dry_run() {
            let (program, args) = RosettaResource::install_command();
            ctx.log
                .dry_run(&format!("would run: {program} {}", args.join(" ")));
            return Ok(TaskResult::DryRun);
        }

        ctx.log.info("installing Rosetta 2 (may prompt for your password)");
        resource.apply().map_err(compatibility_layer)?;
        ctx.log.info("Rosetta 2 installed");
        Ok(TaskResult::Ok)
    }
}

fn compatibility_layer(e: anyhow::Error) -> ProvisionError {
    InstallError::CompatibilityLayer { source: e.into() }.into()
}
