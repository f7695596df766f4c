//! BidCoS serial frame assembly with sync/escape/length handling.
//!
//! Every frame on the wire looks like this:
//!
//! ```text
//! ┌──────────┬─────────────────┬──────────────┬──────────────┐
//! │ Sync     │ Length (2B BE,  │ Payload      │ Trailer (2B, │
//! │ 0xFD     │ escape-adjusted)│              │ opaque)      │
//! └──────────┴─────────────────┴──────────────┴──────────────┘
//! ```
//!
//! Two byte values are special everywhere after the sync byte:
//!
//! - `0xFD` forces resynchronization: frame assembly restarts from that byte,
//!   no matter how far into a frame the reader already was. This makes the
//!   reader self-healing against line noise and truncated frames.
//! - `0xFC` escapes the following raw byte; its logical value is the raw
//!   value with bit `0x80` set. Escape bytes shift the positions of the
//!   length field and count toward the total raw length of the frame.
//!
//! A frame is complete once `length + escape_count + 5` raw bytes have been
//! consumed since the last sync byte. The fixed 5-byte overhead covers the
//! sync byte, the two length bytes and a two-byte trailer whose layout is
//! undocumented; the reader carries it verbatim and never validates it.

pub mod codec;
pub mod dump;
pub mod error;
pub mod reader;
pub mod writer;

pub use codec::{
    encode_frame, Frame, FrameConfig, DEFAULT_MAX_FRAME_SIZE, ESCAPE, FRAME_OVERHEAD, SYNC,
};
pub use dump::{hex_line, FrameDump, TraceDump};
pub use error::{FrameError, Result};
pub use reader::FrameReader;
pub use writer::{write_all, FrameWriter};
