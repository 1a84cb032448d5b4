//! Command-line parsing.
use clap::Parser;

/// Command line of the `provision` binary.
///
/// Provisioning takes no options: behavior is controlled through the
/// environment (`PROVISION_DRY_RUN`, `PROVISION_VERBOSE`). Any arguments,
/// including ones that look like flags, are accepted and ignored.
#[derive(Parser, Debug)]
#[command(
    name = "provision",
    about = "Provision a fresh macOS machine with Homebrew and applications",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Ignored.
    #[arg(
        hide = true,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        num_args = 0..
    )]
    pub ignored: Vec<String>,
}
