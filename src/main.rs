//! `provision`: bring a fresh macOS machine to a baseline.
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use provision_cli::cli::Cli;
use provision_cli::commands;
use provision_cli::config::Config;
use provision_cli::error::ProvisionError;
use provision_cli::exec::SystemExecutor;
use provision_cli::logging::{Logger, init_subscriber};
use provision_cli::net::HttpFetcher;
use provision_cli::tasks::Context;

const COMMAND: &str = "provision";

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let _args = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_subscriber(false, COMMAND);
            let e = anyhow::Error::from(ProvisionError::from(e));
            Logger::new(COMMAND).error(&format!("{e:#}"));
            return ExitCode::FAILURE;
        }
    };

    init_subscriber(config.verbose, COMMAND);
    let log = Arc::new(Logger::new(COMMAND));
    let ctx = Context::new(
        Arc::new(config),
        Arc::clone(&log),
        Arc::new(SystemExecutor),
        Arc::new(HttpFetcher),
    );

    match commands::provision::run(&ctx) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log.error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
