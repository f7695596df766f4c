//! Blocking byte-channel abstraction for BidCoS serial links.
//!
//! The framing and handshake layers above this crate only need three things
//! from the transport: blocking reads, reliable writes, and a way to discard
//! bytes buffered in either direction. [`ByteChannel`] captures exactly that,
//! so tests can substitute in-memory fakes for real serial hardware.
//!
//! [`SerialChannel`] is the production implementation: a thin wrapper around
//! an already-opened, already-configured serial device. Baud rate, parity and
//! raw-mode setup remain the caller's responsibility.

pub mod error;
#[cfg(unix)]
pub mod serial;
pub mod traits;

pub use error::{ChannelError, Result};
#[cfg(unix)]
pub use serial::SerialChannel;
pub use traits::ByteChannel;
