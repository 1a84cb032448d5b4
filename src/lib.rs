//! macOS host provisioner.
//!
//! Brings a fresh Mac to a baseline in a fixed sequence of steps: check the
//! platform, install Rosetta 2 on Apple Silicon, install or update Homebrew,
//! install a fixed list of GUI applications as casks, and patch the login
//! shell profile so new shells find `brew`.
//!
//! The crate is organised into layers:
//!
//! - **[`config`]**: run configuration read once from the environment
//! - **[`resources`]**: idempotent `check + apply` primitives
//! - **[`tasks`]**: named steps wired to resources, with status recording
//! - **[`commands`]**: the top-level provisioning sequence
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod net;
pub mod platform;
pub mod resources;
pub mod tasks;
