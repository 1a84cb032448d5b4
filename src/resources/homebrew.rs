//! Homebrew itself: presence probe, bootstrap install, and self-update.
use std::ffi::OsStr;

use anyhow::{Context as _, Result};

use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::config::HomebrewLayout;
use crate::exec::{ExecResult, Executor};
use crate::net::Fetch;

/// The Homebrew package manager.
pub struct HomebrewResource<'a> {
    layout: &'a HomebrewLayout,
    executor: &'a dyn Executor,
    fetcher: &'a dyn Fetch,
    search_path: &'a OsStr,
}

impl std::fmt::Debug for HomebrewResource<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HomebrewResource")
            .field("layout", &self.layout)
            .field("executor", &self.executor)
            .field("fetcher", &"<dyn Fetch>")
            .field("search_path", &self.search_path)
            .finish()
    }
}

impl<'a> HomebrewResource<'a> {
    /// Create a Homebrew resource probing and invoking `brew` via
    /// `search_path`.
    #[must_use]
    pub const fn new(
        layout: &'a HomebrewLayout,
        executor: &'a dyn Executor,
        fetcher: &'a dyn Fetch,
        search_path: &'a OsStr,
    ) -> Self {
        Self {
            layout,
            executor,
            fetcher,
            search_path,
        }
    }

    /// Run `brew update`. The caller decides what a failure means.
    ///
    /// # Errors
    ///
    /// Returns an error only if `brew` cannot be spawned.
    pub fn update(&self) -> Result<ExecResult> {
        self.executor
            .run_interactive("brew", &["update"], &[("PATH", self.search_path)])
    }
}

impl Applicable for HomebrewResource<'_> {
    fn description(&self) -> String {
        format!("Homebrew ({})", self.layout.prefix.display())
    }

    fn apply(&self) -> Result<ResourceChange> {
        let script = self
            .fetcher
            .fetch_text(&self.layout.install_url)
            .context("downloading Homebrew install script")?;
        self.executor
            .run("/bin/bash", &["-c", &script], &[])
            .context("running Homebrew install script")?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for HomebrewResource<'_> {
    fn current_state(&self) -> Result<ResourceState> {
        if self.executor.which("brew", self.search_path) {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Missing)
        }
    }
}
