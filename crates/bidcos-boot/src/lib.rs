//! Bootloader-entry handshake for BidCoS radio modules.
//!
//! Drives a module into firmware-update mode: the fixed entry command is
//! sent over the channel, one reply frame is read back, and the exchange
//! repeats every 10 milliseconds until the reply carries one of the two
//! known acknowledgment signatures. I/O faults abort immediately; an
//! unrecognized reply only means "not yet".
//!
//! By default the loop retries forever, matching the module firmware's
//! expectations. It can be bounded by a timeout and interrupted through a
//! [`CancelToken`], and the retry delay runs on an injected [`Clock`] so
//! tests never sleep for real.

pub mod clock;
pub mod error;
pub mod handshake;
pub mod signature;

pub use clock::{Clock, SystemClock};
pub use error::{BootError, Result};
pub use handshake::{
    enter_bootloader, enter_bootloader_with_config, CancelToken, HandshakeConfig,
    DEFAULT_RETRY_DELAY, REPLY_BUFFER_SIZE,
};
pub use signature::{is_bootloader_reply, BOOTLOADER_REPLY, BOOTLOADER_REPLY2, ENTER_BOOTLOADER};
