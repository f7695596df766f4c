use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{FrameError, Result};

/// Sync byte: starts every frame and forces resynchronization wherever it
/// appears.
pub const SYNC: u8 = 0xFD;

/// Escape marker: the following raw byte is interpreted with bit 0x80 set.
pub const ESCAPE: u8 = 0xFC;

/// Fixed per-frame overhead in raw bytes: sync + two length bytes + the
/// opaque two-byte trailer.
pub const FRAME_OVERHEAD: usize = 5;

/// Default frame-buffer capacity.
pub const DEFAULT_MAX_FRAME_SIZE: usize = 1024;

/// Largest payload the 16-bit length field can declare.
pub const MAX_PAYLOAD: usize = u16::MAX as usize;

/// True if a raw byte value must be escaped on the wire.
///
/// Values from 0xFC upward collide with the escape and sync markers, so they
/// travel as `0xFC` followed by the value with bit 0x80 cleared.
pub fn needs_escape(byte: u8) -> bool {
    byte >= ESCAPE
}

/// One assembled BidCoS frame.
///
/// Holds the raw wire bytes, including the sync byte, any escape markers,
/// the length field and the trailer.
#[derive(Debug, Clone)]
pub struct Frame {
    raw: Bytes,
    declared_len: u16,
    escape_count: usize,
}

impl Frame {
    pub(crate) fn new(raw: Bytes, declared_len: u16, escape_count: usize) -> Self {
        Self {
            raw,
            declared_len,
            escape_count,
        }
    }

    /// The raw wire bytes of this frame.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Consume the frame and return its raw bytes.
    pub fn into_raw(self) -> Bytes {
        self.raw
    }

    /// Total raw byte count, equal to `declared_len + escape_count + 5`.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// The length declared in the frame header, after escape adjustment.
    pub fn declared_len(&self) -> u16 {
        self.declared_len
    }

    /// Number of escape markers in the raw bytes.
    pub fn escape_count(&self) -> usize {
        self.escape_count
    }
}

/// Encode a payload into the wire format.
///
/// Escapable bytes in the length field, payload and trailer are written as
/// an escape marker followed by the value with bit 0x80 cleared. The trailer
/// is caller-supplied: its layout (likely a checksum) is undocumented, and
/// peers are not known to validate it.
pub fn encode_frame(payload: &[u8], trailer: [u8; 2], dst: &mut BytesMut) -> Result<()> {
    if payload.len() > MAX_PAYLOAD {
        return Err(FrameError::PayloadTooLarge {
            size: payload.len(),
            max: MAX_PAYLOAD,
        });
    }

    let len = payload.len() as u16;
    dst.reserve(FRAME_OVERHEAD + payload.len());
    dst.put_u8(SYNC);
    put_escaped(dst, (len >> 8) as u8);
    put_escaped(dst, len as u8);
    for &byte in payload {
        put_escaped(dst, byte);
    }
    for byte in trailer {
        put_escaped(dst, byte);
    }
    Ok(())
}

fn put_escaped(dst: &mut BytesMut, byte: u8) {
    if needs_escape(byte) {
        dst.put_u8(ESCAPE);
        dst.put_u8(byte & 0x7F);
    } else {
        dst.put_u8(byte);
    }
}

/// Configuration for frame assembly.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Frame buffer capacity in raw bytes. A frame that does not complete
    /// within this many bytes is reported as incomplete.
    pub max_frame_size: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
        }
    }
}
