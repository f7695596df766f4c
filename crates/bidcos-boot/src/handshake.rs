use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use bidcos_channel::{ByteChannel, ChannelError};
use bidcos_frame::{write_all, Frame, FrameConfig, FrameError, FrameReader, TraceDump};

use crate::clock::{Clock, SystemClock};
use crate::error::{BootError, Result};
use crate::signature::{is_bootloader_reply, ENTER_BOOTLOADER};

/// Reply frame buffer capacity. Bootloader acknowledgments are 17 and 18
/// raw bytes; 80 leaves room for unrelated traffic on a busy line.
pub const REPLY_BUFFER_SIZE: usize = 80;

/// Delay between handshake attempts after an unrecognized reply.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(10);

/// Cooperative cancellation flag checked before each handshake attempt.
///
/// Clones share the flag, so a signal handler or another thread can stop a
/// handshake that would otherwise retry indefinitely.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. The handshake observes it at the next retry
    /// boundary, not mid-read.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Configuration for the bootloader-entry handshake.
#[derive(Debug, Clone)]
pub struct HandshakeConfig {
    /// Delay between attempts after an unrecognized reply.
    pub retry_delay: Duration,
    /// Overall deadline. `None` retries until success, an I/O fault or
    /// cancellation.
    pub timeout: Option<Duration>,
    /// Frame buffer capacity for reply frames.
    pub max_frame_size: usize,
    /// Report every assembled reply buffer through `tracing`.
    pub trace_frames: bool,
    /// Cancellation flag checked before each attempt.
    pub cancel: CancelToken,
}

impl Default for HandshakeConfig {
    fn default() -> Self {
        Self {
            retry_delay: DEFAULT_RETRY_DELAY,
            timeout: None,
            max_frame_size: REPLY_BUFFER_SIZE,
            trace_frames: false,
            cancel: CancelToken::new(),
        }
    }
}

/// Drive the module into bootloader mode with default configuration.
///
/// Retries indefinitely, as the module firmware expects; use
/// [`enter_bootloader_with_config`] to bound the loop.
pub fn enter_bootloader<C: ByteChannel>(channel: &mut C) -> Result<Frame> {
    enter_bootloader_with_config(channel, &HandshakeConfig::default(), &SystemClock)
}

/// Drive the module into bootloader mode.
///
/// Each attempt discards stale bytes in both directions, sends the fixed
/// entry command and reads back exactly one frame. A frame matching either
/// known acknowledgment signature ends the loop; any other frame schedules a
/// retry after `retry_delay`. Write and read faults propagate immediately
/// and are never retried.
pub fn enter_bootloader_with_config<C: ByteChannel, K: Clock>(
    channel: &mut C,
    config: &HandshakeConfig,
    clock: &K,
) -> Result<Frame> {
    let started = clock.now();
    let mut attempt = 0usize;

    loop {
        if config.cancel.is_cancelled() {
            return Err(BootError::Cancelled);
        }
        if let Some(timeout) = config.timeout {
            if clock.now().duration_since(started) >= timeout {
                return Err(BootError::TimedOut(timeout));
            }
        }
        attempt += 1;

        channel.discard_pending().map_err(ChannelError::Flush)?;
        write_all(&mut *channel, &ENTER_BOOTLOADER)?;
        debug!(attempt, "sent bootloader entry command");

        // The in-progress frame is transient per attempt; a fresh reader
        // guarantees nothing read before the flush leaks into this reply.
        let frame_config = FrameConfig {
            max_frame_size: config.max_frame_size,
        };
        let mut reader = FrameReader::with_config(&mut *channel, frame_config);
        if config.trace_frames {
            reader = reader.with_dump(Box::new(TraceDump));
        }
        let frame = match reader.read_frame() {
            Ok(frame) => frame,
            // An overflowing reply is line garbage, not an I/O fault: the
            // next attempt flushes the leftovers and tries again.
            Err(FrameError::BufferExhausted { .. }) => {
                warn!(attempt, "reply overflowed buffer, retrying");
                clock.sleep(config.retry_delay);
                continue;
            }
            Err(err) => return Err(err.into()),
        };

        if is_bootloader_reply(frame.raw()) {
            debug!(attempt, len = frame.len(), "bootloader reply recognized");
            return Ok(frame);
        }

        warn!(attempt, len = frame.len(), "unrecognized reply, retrying");
        clock.sleep(config.retry_delay);
    }
}
