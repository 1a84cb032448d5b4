use std::ffi::OsString;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use crate::config::Config;
use crate::exec::{Executor, SearchPath};
use crate::logging::Logger;
use crate::net::Fetch;

/// Shared context for task execution.
pub struct Context {
    /// Configuration read from the environment at startup.
    pub config: Arc<Config>,
    /// Logger for output and task recording.
    pub log: Arc<Logger>,
    /// Command executor (for testing or real system calls).
    pub executor: Arc<dyn Executor>,
    /// HTTP client used to download the Homebrew install script.
    pub fetcher: Arc<dyn Fetch>,
    /// Search path handed to child processes.
    ///
    /// Starts as `config.search_path` and grows when Homebrew is installed,
    /// so later steps find `brew` without touching the process environment.
    search_path: RwLock<SearchPath>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .field("log", &"<Logger>")
            .field("executor", &"<dyn Executor>")
            .field("fetcher", &"<dyn Fetch>")
            .field("search_path", &self.search_path)
            .finish()
    }
}

impl Context {
    /// Creates a new context for task execution.
    #[must_use]
    pub fn new(
        config: Arc<Config>,
        log: Arc<Logger>,
        executor: Arc<dyn Executor>,
        fetcher: Arc<dyn Fetch>,
    ) -> Self {
        let search_path = RwLock::new(config.search_path.clone());
        Self {
            config,
            log,
            executor,
            fetcher,
            search_path,
        }
    }

    /// Whether mutating commands should be logged instead of run.
    #[must_use]
    pub fn dry_run(&self) -> bool {
        self.config.dry_run
    }

    /// Snapshot of the current search path.
    ///
    /// Recovers from a poisoned lock by taking the inner value.
    #[must_use]
    pub fn search_path(&self) -> SearchPath {
        self.search_path
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Current search path in `PATH` form.
    #[must_use]
    pub fn search_path_os(&self) -> OsString {
        self.search_path().to_os_string()
    }

    /// Put `dir` at the front of the search path.
    pub fn prepend_search_path(&self, dir: &Path) {
        self.search_path
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .prepend(dir);
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tasks::test_helpers::{make_context, test_config};
    use std::path::PathBuf;

    #[test]
    fn search_path_starts_from_config() {
        let config = test_config();
        let expected = config.search_path.clone();
        let (ctx, _) = make_context(config);
        assert_eq!(ctx.search_path(), expected);
    }

    #[test]
    fn prepend_search_path_puts_dir_first() {
        let (ctx, _) = make_context(test_config());
        ctx.prepend_search_path(Path::new("/opt/homebrew/bin"));
        assert_eq!(
            ctx.search_path().dirs().first(),
            Some(&PathBuf::from("/opt/homebrew/bin"))
        );
        assert!(
            ctx.search_path_os()
                .to_string_lossy()
                .starts_with("/opt/homebrew/bin:")
        );
    }

    #[test]
    fn prepend_does_not_change_config() {
        let (ctx, _) = make_context(test_config());
        ctx.prepend_search_path(Path::new("/opt/homebrew/bin"));
        assert!(!ctx.config.search_path.contains(Path::new("/opt/homebrew/bin")));
    }

    #[test]
    fn debug_format_includes_key_fields() {
        let (ctx, _) = make_context(test_config());
        let debug = format!("{ctx:?}");
        assert!(debug.contains("Context"));
        assert!(debug.contains("search_path"));
    }
}
