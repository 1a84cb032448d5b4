//! Host platform gate.
use anyhow::Result;

use super::{Context, Task, TaskResult};
use crate::error::ProvisionError;
use crate::platform::ensure_target;

/// Refuse to provision anything but macOS.
#[derive(Debug)]
pub struct CheckPlatform;

impl Task for CheckPlatform {
    fn name(&self) -> &'static str {
        "Check platform"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let config = &ctx.config;
        ensure_target(&config.os_type).map_err(ProvisionError::from)?;
        ctx.log
            .info(&format!("detected {} ({})", config.os_type, config.arch));
        Ok(TaskResult::Ok)
    }
}
