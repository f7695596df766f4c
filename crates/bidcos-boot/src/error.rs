use std::time::Duration;

/// Errors that can occur during the bootloader handshake.
#[derive(Debug, thiserror::Error)]
pub enum BootError {
    /// Channel-level error (flush or open).
    #[error("channel error: {0}")]
    Channel(#[from] bidcos_channel::ChannelError),

    /// Frame-level error while sending the command or reading the reply.
    #[error("frame error: {0}")]
    Frame(#[from] bidcos_frame::FrameError),

    /// No recognized reply arrived within the configured timeout.
    #[error("bootloader handshake timed out after {0:?}")]
    TimedOut(Duration),

    /// The handshake was cancelled.
    #[error("bootloader handshake cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, BootError>;
