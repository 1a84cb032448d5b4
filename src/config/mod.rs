//! Run configuration, read once from the environment at startup.
pub mod applications;
pub mod homebrew;

use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::exec::SearchPath;
use crate::platform;

pub use applications::Application;
pub use homebrew::HomebrewLayout;

/// Everything a provisioning run reads from its environment.
///
/// Tasks receive this through the [`Context`](crate::tasks::Context) rather
/// than consulting the process environment, so each step can be exercised
/// in isolation.
#[derive(Debug, Clone)]
pub struct Config {
    /// OS identifier (`OSTYPE`, or the compiled target when unset).
    pub os_type: String,
    /// CPU architecture, as in [`std::env::consts::ARCH`].
    pub arch: String,
    /// Login shell path from `SHELL`, if set.
    pub shell: Option<String>,
    /// Home directory from `HOME`.
    pub home: PathBuf,
    /// Executable search path at startup.
    pub search_path: SearchPath,
    /// Log mutating commands instead of running them.
    pub dry_run: bool,
    /// Echo debug output on the console.
    pub verbose: bool,
    /// Homebrew prefix and bootstrap script location.
    pub homebrew: HomebrewLayout,
    /// Casks to install, in order.
    pub applications: Vec<Application>,
}

impl Config {
    /// Build the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVar`] if `HOME` is unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVar`] if `HOME` is unset or empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let text = |key: &str| {
            lookup(key)
                .map(|v| v.to_string_lossy().trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let home = text("HOME")
            .map(PathBuf::from)
            .ok_or(ConfigError::MissingVar("HOME"))?;
        let arch = std::env::consts::ARCH.to_string();

        Ok(Self {
            os_type: text("OSTYPE").unwrap_or_else(platform::native_os_type),
            homebrew: HomebrewLayout::for_arch(&arch),
            arch,
            shell: text("SHELL"),
            home,
            search_path: lookup("PATH")
                .map(|p| SearchPath::parse(&p))
                .unwrap_or_default(),
            dry_run: text("PROVISION_DRY_RUN").is_some_and(|v| is_truthy(&v)),
            verbose: text("PROVISION_VERBOSE").is_some_and(|v| is_truthy(&v)),
            applications: applications::plan(),
        })
    }
}

/// Interpret a flag-style environment value.
fn is_truthy(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}
