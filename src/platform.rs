//! Platform identification: target OS, CPU architecture, login shell.
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::PlatformError;

/// Substring the OS identifier must contain for provisioning to proceed.
pub const TARGET_OS: &str = "darwin";

/// OS identifier of the platform this binary was compiled for.
///
/// Used when `OSTYPE` is not exported: bash sets it as a shell variable
/// only, so a child process usually does not see it.
#[must_use]
pub fn native_os_type() -> String {
    if cfg!(target_os = "macos") {
        TARGET_OS.to_string()
    } else {
        std::env::consts::OS.to_string()
    }
}

/// Fail unless `os_type` names the target platform.
///
/// # Errors
///
/// Returns [`PlatformError::Unsupported`] when `os_type` does not contain
/// [`TARGET_OS`] (case-insensitive).
pub fn ensure_target(os_type: &str) -> Result<(), PlatformError> {
    if os_type.to_ascii_lowercase().contains(TARGET_OS) {
        Ok(())
    } else {
        Err(PlatformError::Unsupported {
            os_type: os_type.to_string(),
            expected: TARGET_OS,
        })
    }
}

/// Whether `arch` is Apple Silicon, the only hardware that needs Rosetta 2.
#[must_use]
pub fn is_apple_silicon(arch: &str) -> bool {
    matches!(arch, "aarch64" | "arm64")
}

/// Login shells whose profile file the provisioner knows how to patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shell {
    /// Z shell; profile `~/.zprofile`.
    Zsh,
    /// Bourne-again shell; profile `~/.bash_profile`.
    Bash,
    /// Any other shell, carrying the raw `SHELL` value.
    Unsupported(String),
}

impl Shell {
    /// Classify a `SHELL` value such as `/bin/zsh`.
    #[must_use]
    pub fn from_path(shell: &str) -> Self {
        let name = Path::new(shell)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        match name {
            "zsh" => Self::Zsh,
            "bash" => Self::Bash,
            _ => Self::Unsupported(shell.to_string()),
        }
    }

    /// Profile file for this shell under `home`, or `None` when unsupported.
    #[must_use]
    pub fn profile_path(&self, home: &Path) -> Option<PathBuf> {
        match self {
            Self::Zsh => Some(home.join(".zprofile")),
            Self::Bash => Some(home.join(".bash_profile")),
            Self::Unsupported(_) => None,
        }
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zsh => write!(f, "zsh"),
            Self::Bash => write!(f, "bash"),
            Self::Unsupported(raw) if raw.is_empty() => write!(f, "<unset>"),
            Self::Unsupported(raw) => write!(f, "{raw}"),
        }
    }
}
