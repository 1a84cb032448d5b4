// Shared helpers for integration tests.
//
// Provides a scripted executor and a canned fetcher so the provisioning
// sequence can run end to end without touching the host.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code, clippy::unwrap_used)]

use std::collections::{HashMap, VecDeque};
use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::sync::{Arc, Mutex};

use provision_cli::config::{Config, HomebrewLayout};
use provision_cli::exec::{ExecResult, Executor};
use provision_cli::logging::Logger;
use provision_cli::net::Fetch;
use provision_cli::tasks::Context;

/// One command issued to a [`ScriptedExecutor`], with the `PATH` it got.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issued {
    /// `program arg1 arg2 …`.
    pub line: String,
    /// `PATH` passed to the child, if any.
    pub path: Option<OsString>,
}

/// Executor that records commands and answers from per-command scripts.
///
/// Exit codes are looked up by the full command line; a command without a
/// script exits 0. `which` reports a program as present only if one of the
/// search path's directories was registered for it with
/// [`ScriptedExecutor::install`].
#[derive(Debug, Default)]
pub struct ScriptedExecutor {
    issued: Mutex<Vec<Issued>>,
    exit_codes: Mutex<HashMap<String, VecDeque<i32>>>,
    installed: Mutex<Vec<(String, OsString)>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `line` exit with `codes`, one per invocation.
    pub fn exits(self, line: &str, codes: &[i32]) -> Self {
        self.exit_codes
            .lock()
            .unwrap()
            .insert(line.to_string(), codes.iter().copied().collect());
        self
    }

    /// Make `program` discoverable in `dir`.
    pub fn install(self, program: &str, dir: &str) -> Self {
        self.installed
            .lock()
            .unwrap()
            .push((program.to_string(), OsString::from(dir)));
        self
    }

    pub fn issued(&self) -> Vec<Issued> {
        self.issued.lock().unwrap().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.issued().into_iter().map(|i| i.line).collect()
    }

    fn record(&self, program: &str, args: &[&str], env: &[(&str, &OsStr)]) -> ExecResult {
        let line = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        let path = env
            .iter()
            .find(|(k, _)| *k == "PATH")
            .map(|(_, v)| v.to_os_string());
        let code = self
            .exit_codes
            .lock()
            .unwrap()
            .get_mut(&line)
            .and_then(VecDeque::pop_front)
            .unwrap_or(0);
        self.issued.lock().unwrap().push(Issued { line, path });
        ExecResult {
            success: code == 0,
            code: Some(code),
            ..ExecResult::default()
        }
    }
}

impl Executor for ScriptedExecutor {
    fn run_unchecked(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
        Ok(self.record(program, args, &[]))
    }

    fn run_interactive(
        &self,
        program: &str,
        args: &[&str],
        env: &[(&str, &OsStr)],
    ) -> anyhow::Result<ExecResult> {
        Ok(self.record(program, args, env))
    }

    fn which(&self, program: &str, search_path: &OsStr) -> bool {
        let dirs: Vec<_> = std::env::split_paths(search_path).collect();
        self.installed
            .lock()
            .unwrap()
            .iter()
            .any(|(p, dir)| p == program && dirs.iter().any(|d| d.as_os_str() == dir))
    }
}

/// Fetcher that serves a fixed body and counts requests.
#[derive(Debug, Default)]
pub struct CannedFetcher {
    pub body: String,
    pub requests: Mutex<Vec<String>>,
}

impl CannedFetcher {
    pub fn new(body: &str) -> Self {
        Self {
            body: body.to_string(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Fetch for CannedFetcher {
    fn fetch_text(&self, url: &str) -> anyhow::Result<String> {
        self.requests.lock().unwrap().push(url.to_string());
        Ok(self.body.clone())
    }
}

/// Config for an Apple Silicon Mac whose home is `home`.
pub fn mac_config(home: &Path, shell: &str) -> Config {
    let vars: HashMap<&str, OsString> = HashMap::from([
        ("HOME", home.as_os_str().to_os_string()),
        ("OSTYPE", OsString::from("darwin23")),
        ("SHELL", OsString::from(shell)),
        ("PATH", OsString::from("/usr/bin:/bin:/usr/sbin:/sbin")),
    ]);
    let mut config = Config::from_lookup(|key| vars.get(key).cloned()).unwrap();
    config.arch = "aarch64".to_string();
    config.homebrew = HomebrewLayout::for_arch("aarch64");
    config
}

/// Build a run context around the given fakes.
pub fn context(
    config: Config,
    executor: Arc<ScriptedExecutor>,
    fetcher: Arc<CannedFetcher>,
) -> Context {
    Context::new(
        Arc::new(config),
        Arc::new(Logger::new("provision-test")),
        executor,
        fetcher,
    )
}
