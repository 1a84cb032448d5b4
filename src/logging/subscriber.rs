//! Tracing subscriber: console rendering, the run log file, and setup.
use std::fmt::Write as _;
use std::fs::File;
use std::io::Write as _;
use std::sync::Mutex;

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use super::utils::{log_file_path, strip_ansi, utc_now};

/// Target used for stage headers.
pub(super) const STAGE_TARGET: &str = "provision::stage";
/// Target used for dry-run notices.
pub(super) const DRY_RUN_TARGET: &str = "provision::dry_run";

/// How an event is rendered, derived from its level and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Stage,
    DryRun,
    Error,
    Warn,
    Info,
    Debug,
}

impl Kind {
    fn of(event: &Event<'_>) -> Self {
        let metadata = event.metadata();
        match (*metadata.level(), metadata.target()) {
            (Level::ERROR, _) => Self::Error,
            (Level::WARN, _) => Self::Warn,
            (Level::INFO, STAGE_TARGET) => Self::Stage,
            (Level::INFO, DRY_RUN_TARGET) => Self::DryRun,
            (Level::INFO, _) => Self::Info,
            _ => Self::Debug,
        }
    }

    /// Fixed-width label used in the log file.
    const fn label(self) -> &'static str {
        match self {
            Self::Stage => "STAGE",
            Self::DryRun => "DRYRUN",
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        }
    }
}

/// The `message` field of an event.
fn message(event: &Event<'_>) -> String {
    struct Visitor(String);

    impl tracing::field::Visit for Visitor {
        fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
            if field.name() == "message" {
                self.0.push_str(value);
            }
        }

        fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                let _ = write!(self.0, "{value:?}");
            }
        }
    }

    let mut visitor = Visitor(String::new());
    event.record(&mut visitor);
    visitor.0
}

/// Appends every event to the run log as `HH:MM:SS LABEL  message`, with
/// ANSI codes stripped.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<File>,
}

impl FileLayer {
    /// Start a fresh log for `command` with a header line.
    ///
    /// Returns `None` if the log directory or file cannot be created; the
    /// run then continues with console output only.
    pub(super) fn create(command: &str) -> Option<Self> {
        let mut file = File::create(log_file_path(command)?).ok()?;
        let version = option_env!("PROVISION_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
        writeln!(
            file,
            "# provision {version}, started {} UTC",
            utc_now("%Y-%m-%d %H:%M:%S")
        )
        .ok()?;
        Some(Self::with_file(file))
    }

    const fn with_file(file: File) -> Self {
        Self {
            file: Mutex::new(file),
        }
    }
}

impl<S: Subscriber> Layer<S> for FileLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let line = format!(
            "{} {:<6} {}",
            utc_now("%H:%M:%S"),
            Kind::of(event).label(),
            strip_ansi(&message(event))
        );
        if let Ok(mut file) = self.file.lock() {
            writeln!(file, "{line}").ok();
        }
    }
}

/// Console rendering: `==>` stage headers, `[DRY RUN]` notices, colored
/// `ERROR`/`WARN` prefixes, indented info, dimmed debug.
struct ConsoleFormat;

impl<S, N> FormatEvent<S, N> for ConsoleFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let msg = message(event);
        match Kind::of(event) {
            Kind::Stage => writeln!(writer, "\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m"),
            Kind::DryRun => writeln!(writer, "  \x1b[33m[DRY RUN]\x1b[0m {msg}"),
            Kind::Error => writeln!(writer, "\x1b[31mERROR\x1b[0m {msg}"),
            Kind::Warn => writeln!(writer, "\x1b[33mWARN\x1b[0m  {msg}"),
            Kind::Info => writeln!(writer, "  {msg}"),
            Kind::Debug => writeln!(writer, "  \x1b[2m{msg}\x1b[0m"),
        }
    }
}

/// Install the global subscriber. Call once, before any logging.
///
/// Warnings and errors go to stderr, everything else to stdout. Debug
/// events reach the console only when `verbose`; the run log at
/// `$XDG_CACHE_HOME/provision/<command>.log` always gets them.
pub fn init_subscriber(verbose: bool, command: &str) {
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::layer::SubscriberExt as _;
    use tracing_subscriber::util::SubscriberInitExt as _;

    let console_filter = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let console_writer = std::io::stderr
        .with_max_level(Level::WARN)
        .or_else(std::io::stdout);

    let console = tracing_subscriber::fmt::layer()
        .event_format(ConsoleFormat)
        .with_writer(console_writer)
        .with_filter(console_filter);
    let run_log = FileLayer::create(command).map(|layer| layer.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console)
        .with(run_log)
        .init();
}


#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::test_helpers::capture;

    #[test]
    fn file_layer_labels_each_kind() {
        let lines = capture(|| {
            tracing::info!(target: "provision::stage", "Install Homebrew");
            tracing::info!(target: "provision::dry_run", "would run: brew update");
            tracing::warn!("\x1b[33mfirefox\x1b[0m: install failed");
            tracing::error!("failed to install Homebrew");
            tracing::debug!("brew found on search path");
        });

        assert_eq!(lines.len(), 5, "{lines:?}");
        assert!(lines[0].ends_with("STAGE  Install Homebrew"), "{}", lines[0]);
        assert!(lines[1].ends_with("DRYRUN would run: brew update"), "{}", lines[1]);
        assert!(lines[2].ends_with("WARN   firefox: install failed"), "{}", lines[2]);
        assert!(lines[3].ends_with("ERROR  failed to install Homebrew"), "{}", lines[3]);
        assert!(lines[4].ends_with("DEBUG  brew found on search path"), "{}", lines[4]);
    }

    #[test]
    fn file_layer_keeps_formatted_arguments() {
        let lines = capture(|| {
            let cask = "slack";
            tracing::info!("[2/8] {cask} (cask)");
        });
        assert!(lines[0].ends_with("INFO   [2/8] slack (cask)"), "{}", lines[0]);
    }
}
