use std::path::PathBuf;

/// Errors that can occur on a byte channel.
///
/// Read and write faults surface through the `std::io` traits directly;
/// this enum covers the channel's own operations.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// Failed to open the device at the given path.
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to discard buffered bytes.
    #[error("failed to discard pending bytes: {0}")]
    Flush(std::io::Error),
}

pub type Result<T> = std::result::Result<T, ChannelError>;
