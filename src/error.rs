//! Domain-specific error types for the provisioner.
//!
//! Tasks return [`anyhow::Result`]; the fatal conditions are raised as the
//! typed errors below so the command boundary (and tests) can tell them
//! apart with [`anyhow::Error::downcast_ref`]. Each tier names only itself
//! and leaves the detail to its `source`, so `{:#}` prints every message once.
//!
//! # Error hierarchy
//!
//! ```text
//! ProvisionError
//! ├── Config(ConfigError)    : environment could not be read
//! ├── Platform(PlatformError): host is not the target OS
//! └── Install(InstallError)  : Rosetta 2 or Homebrew could not be installed
//! ```

use thiserror::Error;

/// Boxed error used as the `source` of install failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error type for the provisioner.
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// Configuration could not be assembled from the environment.
    #[error("Configuration error")]
    Config(#[from] ConfigError),

    /// The host is not a supported platform.
    #[error("Platform error")]
    Platform(#[from] PlatformError),

    /// A required component failed to install.
    #[error("Install error")]
    Install(#[from] InstallError),
}

/// Errors that arise while reading the startup environment.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required environment variable is unset or empty.
    #[error("{0} environment variable is not set")]
    MissingVar(&'static str),
}

/// Errors that arise from the platform check.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The OS identifier does not name the target platform.
    #[error("unsupported operating system '{os_type}' (expected {expected})")]
    Unsupported {
        /// OS identifier reported by the host.
        os_type: String,
        /// Substring the identifier must contain.
        expected: &'static str,
    },
}

/// Errors that abort the run while installing a prerequisite.
#[derive(Error, Debug)]
pub enum InstallError {
    /// Rosetta 2 could not be installed.
    #[error("failed to install Rosetta 2")]
    CompatibilityLayer {
        /// Underlying installer failure.
        source: BoxError,
    },

    /// Homebrew could not be installed.
    #[error("failed to install Homebrew")]
    PackageManager {
        /// Underlying bootstrap failure.
        source: BoxError,
    },
}
