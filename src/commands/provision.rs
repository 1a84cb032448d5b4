//! The `provision` command.
use anyhow::Result;

use crate::tasks::profile::profile_resource;
use crate::tasks::{self, Context};

/// Run the full provisioning sequence.
///
/// Non-fatal step failures are reported in the summary and do not make
/// this return an error.
///
/// # Errors
///
/// Returns an error if the platform check fails or Rosetta 2 or Homebrew
/// cannot be installed.
pub fn run(ctx: &Context) -> Result<()> {
    let version = option_env!("PROVISION_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    ctx.log.info(&format!("provision {version}"));
    if ctx.dry_run() {
        ctx.log.info("dry run: no changes will be made");
    }

    let all_tasks = tasks::all_provision_tasks();
    super::run_tasks(all_tasks.iter().map(AsRef::as_ref), ctx)?;

    ctx.log.print_summary();

    ctx.log.stage("Next steps");
    for line in next_steps(ctx) {
        ctx.log.info(&line);
    }
    Ok(())
}

/// Closing instructions: what was installed and how to load Homebrew.
#[must_use]
pub fn next_steps(ctx: &Context) -> Vec<String> {
    let casks: Vec<&str> = ctx
        .config
        .applications
        .iter()
        .map(|a| a.cask.as_str())
        .collect();

    let mut lines = vec![format!("applications: {}", casks.join(", "))];
    match profile_resource(ctx) {
        Some(profile) => lines.push(format!(
            "open a new terminal or run `source {}` to use brew",
            profile.path.display()
        )),
        None => lines.push(format!(
            "add `{}` to your shell profile to use brew",
            ctx.config.homebrew.shellenv_line()
        )),
    }
    lines
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::Application;
    use crate::logging::TaskStatus;
    use crate::tasks::test_helpers::{make_context, test_config};

    #[test]
    fn next_steps_name_profile_to_source() {
        let mut config = test_config();
        config.applications = vec![Application::new("firefox"), Application::new("slack")];
        let (ctx, _) = make_context(config);

        let lines = next_steps(&ctx);
        assert_eq!(lines[0], "applications: firefox, slack");
        assert_eq!(
            lines[1],
            "open a new terminal or run `source /Users/test/.zprofile` to use brew"
        );
    }

    #[test]
    fn next_steps_for_unknown_shell_show_shellenv_line() {
        let mut config = test_config();
        config.shell = Some("/usr/bin/fish".to_string());
        let (ctx, _) = make_context(config);

        let lines = next_steps(&ctx);
        assert!(lines[1].contains("eval \"$(/opt/homebrew/bin/brew shellenv)\""));
    }

    #[test]
    fn platform_mismatch_stops_before_other_steps() {
        let mut config = test_config();
        config.os_type = "linux-gnu".to_string();
        let (ctx, exec) = make_context(config);

        assert!(run(&ctx).is_err());
        assert!(exec.calls().is_empty());
        let entries = ctx.log.task_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].status, TaskStatus::Failed);
    }
}
