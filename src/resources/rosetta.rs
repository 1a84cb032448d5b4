//! Rosetta 2 presence probe and installer.
use anyhow::Result;

use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::exec::Executor;

/// Background daemon that runs while Rosetta 2 is installed.
const ROSETTA_DAEMON: &str = "oahd";

/// Rosetta 2, Apple's x86_64 translation layer.
#[derive(Debug)]
pub struct RosettaResource<'a> {
    executor: &'a dyn Executor,
}

impl<'a> RosettaResource<'a> {
    /// Create a new Rosetta resource.
    #[must_use]
    pub const fn new(executor: &'a dyn Executor) -> Self {
        Self { executor }
    }

    /// Elevated installer command line.
    #[must_use]
    pub const fn install_command() -> (&'static str, &'static [&'static str]) {
        (
            "sudo",
            &[
                "softwareupdate",
                "--install-rosetta",
                "--agree-to-license",
            ],
        )
    }
}

impl Applicable for RosettaResource<'_> {
    fn description(&self) -> String {
        "Rosetta 2".to_string()
    }

    fn apply(&self) -> Result<ResourceChange> {
        let (program, args) = Self::install_command();
        self.executor.run(program, args, &[])?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for RosettaResource<'_> {
    fn current_state(&self) -> Result<ResourceState> {
        let probe = self.executor.run_unchecked("pgrep", &[ROSETTA_DAEMON])?;
        if probe.success {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Missing)
        }
    }
}
