use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Verbosity of the stderr diagnostics.
///
/// Frame data goes to stdout; everything the logger emits stays on stderr
/// so dumps can be piped cleanly.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn directive(self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Install the process-wide stderr logger.
///
/// The `BIDCOS_LOG` environment variable takes precedence over the CLI
/// level and accepts full filter expressions, so a single layer (say,
/// `bidcos_frame=trace`) can be turned up without flooding the rest.
pub fn init_logging(level: LogLevel) {
    let filter = EnvFilter::try_from_env("BIDCOS_LOG")
        .unwrap_or_else(|_| EnvFilter::new(level.directive()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .compact()
        .try_init();
}
