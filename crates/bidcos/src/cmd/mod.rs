use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::exit::CliResult;

pub mod boot;
pub mod dump;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Drive the radio module into its bootloader.
    Boot(BootArgs),
    /// Read frames from the serial link and print them as hex.
    Dump(DumpArgs),
    /// Show version information.
    Version,
}

pub fn run(command: Command) -> CliResult<i32> {
    match command {
        Command::Boot(args) => boot::run(args),
        Command::Dump(args) => dump::run(args),
        Command::Version => version::run(),
    }
}

#[derive(Args, Debug)]
pub struct BootArgs {
    /// Serial device the module is attached to (already configured).
    pub device: PathBuf,

    /// Give up after this long (e.g. "30s", "500ms"). Default: retry
    /// until interrupted.
    #[arg(long, value_name = "DURATION")]
    pub timeout: Option<String>,

    /// Pause between attempts after an unrecognized reply.
    #[arg(long, value_name = "DURATION", default_value = "10ms")]
    pub retry_delay: String,

    /// Log every assembled reply frame.
    #[arg(long)]
    pub trace_frames: bool,
}

#[derive(Args, Debug)]
pub struct DumpArgs {
    /// Serial device to read from (already configured).
    pub device: PathBuf,

    /// Number of frames to read before exiting.
    #[arg(long, default_value_t = 1)]
    pub count: usize,

    /// Frame buffer capacity in raw bytes.
    #[arg(long, default_value_t = bidcos_frame::DEFAULT_MAX_FRAME_SIZE)]
    pub max_frame_size: usize,
}
