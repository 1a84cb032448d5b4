//! Homebrew casks.
use std::ffi::OsStr;

use anyhow::Result;

use super::{Applicable, ResourceChange};
use crate::exec::Executor;

/// A Homebrew cask to install.
#[derive(Debug)]
pub struct CaskResource<'a> {
    /// Cask token.
    pub name: String,
    executor: &'a dyn Executor,
    search_path: &'a OsStr,
}

impl<'a> CaskResource<'a> {
    /// Create a cask resource installed with `brew` found via `search_path`.
    #[must_use]
    pub const fn new(name: String, executor: &'a dyn Executor, search_path: &'a OsStr) -> Self {
        Self {
            name,
            executor,
            search_path,
        }
    }
}

impl Applicable for CaskResource<'_> {
    fn description(&self) -> String {
        format!("{} (cask)", self.name)
    }

    fn apply(&self) -> Result<ResourceChange> {
        self.executor
            .run_interactive(
                "brew",
                &["install", "--cask", &self.name],
                &[("PATH", self.search_path)],
            )?
            .ensure_success(&format!("brew install --cask {}", self.name))?;
        Ok(ResourceChange::Applied)
    }
}
