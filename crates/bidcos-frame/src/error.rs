/// Errors that can occur while assembling or sending frames.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// A byte arrived where a sync byte was required but is not one.
    #[error("sync error: expected sync byte 0xFD, got {byte:#04x}")]
    SyncError { byte: u8 },

    /// The frame buffer filled up before the frame completed.
    #[error("incomplete frame: buffer capacity ({capacity} bytes) exhausted")]
    BufferExhausted { capacity: usize },

    /// The payload does not fit the 16-bit length field.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// An I/O error occurred while reading or writing.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The channel closed before a complete frame was received or sent.
    #[error("channel closed (incomplete frame)")]
    ChannelClosed,
}

pub type Result<T> = std::result::Result<T, FrameError>;
