//! Homebrew installation layout.
use std::path::{Path, PathBuf};

/// Official Homebrew bootstrap script.
pub const INSTALL_SCRIPT_URL: &str =
    "https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh";

/// Substring whose presence in a profile file means Homebrew's environment
/// is already activated there.
pub const SHELLENV_MARKER: &str = "brew shellenv";

/// Where Homebrew lives and how to bootstrap it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomebrewLayout {
    /// Installation prefix (`/opt/homebrew` or `/usr/local`).
    pub prefix: PathBuf,
    /// URL of the bootstrap script.
    pub install_url: String,
}

impl HomebrewLayout {
    /// Default layout for a CPU architecture as reported by
    /// [`std::env::consts::ARCH`].
    #[must_use]
    pub fn for_arch(arch: &str) -> Self {
        let prefix = if crate::platform::is_apple_silicon(arch) {
            "/opt/homebrew"
        } else {
            "/usr/local"
        };
        Self::with_prefix(Path::new(prefix))
    }

    /// Layout rooted at an explicit prefix.
    #[must_use]
    pub fn with_prefix(prefix: &Path) -> Self {
        Self {
            prefix: prefix.to_path_buf(),
            install_url: INSTALL_SCRIPT_URL.to_string(),
        }
    }

    /// `<prefix>/bin`.
    #[must_use]
    pub fn bin_dir(&self) -> PathBuf {
        self.prefix.join("bin")
    }

    /// `<prefix>/sbin`.
    #[must_use]
    pub fn sbin_dir(&self) -> PathBuf {
        self.prefix.join("sbin")
    }

    /// Absolute path of the `brew` executable.
    #[must_use]
    pub fn brew_binary(&self) -> PathBuf {
        self.bin_dir().join("brew")
    }

    /// Line that activates Homebrew's environment in a login shell.
    #[must_use]
    pub fn shellenv_line(&self) -> String {
        format!("eval \"$({} shellenv)\"", self.brew_binary().display())
    }
}
