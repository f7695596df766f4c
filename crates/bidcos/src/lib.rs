//! Umbrella crate for talking to BidCoS radio modules over a serial link.
//!
//! Re-exports the byte-channel abstraction, the sync/escape/length framing
//! layer and the bootloader-entry handshake. The `bidcos` binary wraps the
//! same pieces in a small CLI.

pub use bidcos_boot as boot;
pub use bidcos_channel as channel;
pub use bidcos_frame as frame;
