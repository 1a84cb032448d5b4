//! External command execution and executable search paths.
use anyhow::{Context, Result, bail};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Output};

/// Result of a command execution.
#[derive(Debug, Clone, Default)]
pub struct ExecResult {
    /// Captured standard output (empty for interactive commands).
    pub stdout: String,
    /// Captured standard error (empty for interactive commands).
    pub stderr: String,
    /// Whether the process exited with status 0.
    pub success: bool,
    /// Exit code, if the process was not killed by a signal.
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

impl From<ExitStatus> for ExecResult {
    fn from(status: ExitStatus) -> Self {
        Self {
            stdout: String::new(),
            stderr: String::new(),
            success: status.success(),
            code: status.code(),
        }
    }
}

impl ExecResult {
    /// Turn a non-zero exit into an error labelled with `label`.
    ///
    /// # Errors
    ///
    /// Returns an error when the command did not succeed.
    pub fn ensure_success(self, label: &str) -> Result<Self> {
        if !self.success {
            let stderr = self.stderr.trim();
            if stderr.is_empty() {
                bail!("{label} failed (exit {})", self.code.unwrap_or(-1));
            }
            bail!("{label} failed (exit {}): {stderr}", self.code.unwrap_or(-1));
        }
        Ok(self)
    }
}

/// Process execution seam.
///
/// Every external command the provisioner issues goes through this trait so
/// that tasks can be exercised against a recording fake.
pub trait Executor: std::fmt::Debug {
    /// Run a command with captured output. A non-zero exit is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error only if the process cannot be spawned.
    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult>;

    /// Run a command attached to the terminal, with extra environment
    /// variables. A non-zero exit is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error only if the process cannot be spawned.
    fn run_interactive(
        &self,
        program: &str,
        args: &[&str],
        env: &[(&str, &OsStr)],
    ) -> Result<ExecResult>;

    /// Check whether `program` resolves against `search_path`.
    fn which(&self, program: &str, search_path: &OsStr) -> bool;

    /// Run a command attached to the terminal, failing on non-zero exit.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exits non-zero.
    fn run(&self, program: &str, args: &[&str], env: &[(&str, &OsStr)]) -> Result<ExecResult> {
        self.run_interactive(program, args, env)?
            .ensure_success(program)
    }
}

/// [`Executor`] backed by [`Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        let output = Command::new(program)
            .args(args)
            .output()
            .with_context(|| format!("failed to execute: {program}"))?;
        Ok(ExecResult::from(output))
    }

    fn run_interactive(
        &self,
        program: &str,
        args: &[&str],
        env: &[(&str, &OsStr)],
    ) -> Result<ExecResult> {
        let mut cmd = Command::new(program);
        cmd.args(args);
        for (k, v) in env {
            cmd.env(k, v);
        }
        let status = cmd
            .status()
            .with_context(|| format!("failed to execute: {program}"))?;
        Ok(ExecResult::from(status))
    }

    fn which(&self, program: &str, search_path: &OsStr) -> bool {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
        which::which_in(program, Some(search_path), cwd).is_ok()
    }
}

/// Ordered list of directories searched for executables.
///
/// Owned by the run context instead of the process environment; installing
/// Homebrew prepends its directories here and every later `brew`
/// invocation receives the result as its `PATH`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    /// Parse a `PATH`-style value.
    #[must_use]
    pub fn parse(value: &OsStr) -> Self {
        Self {
            dirs: std::env::split_paths(value)
                .filter(|p| !p.as_os_str().is_empty())
                .collect(),
        }
    }

    /// Move `dir` to the front, removing any later duplicate.
    pub fn prepend(&mut self, dir: &Path) {
        self.dirs.retain(|d| d != dir);
        self.dirs.insert(0, dir.to_path_buf());
    }

    /// Whether `dir` is on the path.
    #[must_use]
    pub fn contains(&self, dir: &Path) -> bool {
        self.dirs.iter().any(|d| d == dir)
    }

    /// Directories in search order.
    #[must_use]
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Render as a `PATH` value.
    #[must_use]
    pub fn to_os_string(&self) -> OsString {
        // join_paths only rejects entries containing the separator, which
        // split_paths never yields.
        std::env::join_paths(&self.dirs).unwrap_or_default()
    }
}
