//! Shell profile patching.
use anyhow::{Result, bail};

use super::{Context, Task, TaskResult};
use crate::config::homebrew::SHELLENV_MARKER;
use crate::platform::Shell;
use crate::resources::profile::ProfileBlockResource;
use crate::resources::{Applicable, Resource, ResourceState};

/// Make new login shells pick up Homebrew's environment.
#[derive(Debug)]
pub struct PatchShellProfile;

/// Profile patch for the configured login shell, or `None` if the shell is
/// not zsh or bash.
#[must_use]
pub fn profile_resource(ctx: &Context) -> Option<ProfileBlockResource> {
    let shell = Shell::from_path(ctx.config.shell.as_deref().unwrap_or_default());
    let path = shell.profile_path(&ctx.config.home)?;
    Some(ProfileBlockResource::new(
        path,
        SHELLENV_MARKER,
        vec![
            "# Homebrew".to_string(),
            ctx.config.homebrew.shellenv_line(),
        ],
    ))
}

impl Task for PatchShellProfile {
    fn name(&self) -> &'static str {
        "Patch shell profile"
    }

    fn fatal(&self) -> bool {
        false
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let Some(resource) = profile_resource(ctx) else {
            let shell = Shell::from_path(ctx.config.shell.as_deref().unwrap_or_default());
            ctx.log.warn(&format!(
                "unsupported shell {shell}; add `{}` to your profile manually",
                ctx.config.homebrew.shellenv_line()
            ));
            return Ok(TaskResult::Skipped(format!("unsupported shell {shell}")));
        };

        match resource.current_state()? {
            ResourceState::Correct => {
                ctx.log
                    .info(&format!("{} already sets up Homebrew", resource.path.display()));
                return Ok(TaskResult::Ok);
            }
            ResourceState::Invalid { reason } => bail!(reason),
            ResourceState::Missing => {}
        }

        if ctx.dry_run() {
            ctx.log.dry_run(&format!(
                "would append Homebrew shellenv to {}",
                resource.path.display()
            ));
            return Ok(TaskResult::DryRun);
        }

        resource.apply()?;
        ctx.log
            .info(&format!("patched {}", resource.path.display()));
        Ok(TaskResult::Ok)
    }
}
