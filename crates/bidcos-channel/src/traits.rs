use std::io::{self, Read, Write};

/// A bidirectional byte channel to a BidCoS radio module.
///
/// Reads and writes block the calling thread. Exactly one frame read or
/// handshake is expected to be in flight per channel at a time; the trait
/// carries no locking.
pub trait ByteChannel: Read + Write {
    /// Discard bytes buffered but not yet read (input) or not yet
    /// transmitted (output).
    ///
    /// The handshake layer calls this before every attempt so stale replies
    /// from an earlier attempt cannot be mistaken for fresh ones. On a real
    /// serial line this is `tcflush(fd, TCIOFLUSH)`.
    fn discard_pending(&mut self) -> io::Result<()>;
}

impl<C: ByteChannel + ?Sized> ByteChannel for &mut C {
    fn discard_pending(&mut self) -> io::Result<()> {
        (**self).discard_pending()
    }
}
