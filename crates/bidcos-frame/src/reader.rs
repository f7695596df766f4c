use std::io::{ErrorKind, Read};

use bytes::{BufMut, BytesMut};

use crate::codec::{Frame, FrameConfig, ESCAPE, FRAME_OVERHEAD, SYNC};
use crate::dump::FrameDump;
use crate::error::{FrameError, Result};

/// Reads one complete BidCoS frame at a time from any `Read` stream.
///
/// Bytes are consumed one at a time, so no lookahead is buffered across
/// calls: after `read_frame` returns, the underlying stream is positioned
/// exactly past the frame and the channel can be flushed safely.
pub struct FrameReader<T> {
    inner: T,
    buf: BytesMut,
    config: FrameConfig,
    dump: Option<Box<dyn FrameDump>>,
}

impl<T: Read> FrameReader<T> {
    /// Create a new frame reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new frame reader with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(config.max_frame_size),
            config,
            dump: None,
        }
    }

    /// Attach a diagnostic sink that receives every assembled raw buffer.
    pub fn with_dump(mut self, dump: Box<dyn FrameDump>) -> Self {
        self.dump = Some(dump);
        self
    }

    /// Read and assemble exactly one frame (blocking).
    ///
    /// A sync byte observed at any position restarts assembly from that
    /// byte. A non-sync byte before the first sync byte is a
    /// [`FrameError::SyncError`]. If the buffer capacity fills before the
    /// frame completes, the partial frame is reported to the dump sink and
    /// [`FrameError::BufferExhausted`] is returned.
    pub fn read_frame(&mut self) -> Result<Frame> {
        let result = self.assemble();

        match result {
            Ok((declared_len, escape_count)) => {
                if let Some(dump) = &mut self.dump {
                    dump.dump(&self.buf);
                }
                let raw = self.buf.split().freeze();
                Ok(Frame::new(raw, declared_len, escape_count))
            }
            Err(err) => {
                if matches!(err, FrameError::BufferExhausted { .. }) && !self.buf.is_empty() {
                    if let Some(dump) = &mut self.dump {
                        dump.dump(&self.buf);
                    }
                }
                self.buf.clear();
                Err(err)
            }
        }
    }

    fn assemble(&mut self) -> Result<(u16, usize)> {
        self.buf.clear();
        let mut declared_len: u16 = 0;
        let mut escape_count: usize = 0;
        let mut have_length = false;
        let mut pending_escape = false;

        while self.buf.len() < self.config.max_frame_size {
            let byte = self.read_byte()?;

            if byte == SYNC {
                // Resynchronize: any partial frame is discarded and
                // accounting restarts from this byte.
                self.buf.clear();
                declared_len = 0;
                escape_count = 0;
                have_length = false;
                pending_escape = false;
                self.buf.put_u8(SYNC);
                continue;
            }
            if self.buf.is_empty() {
                return Err(FrameError::SyncError { byte });
            }

            self.buf.put_u8(byte);
            let position = self.buf.len();

            if byte == ESCAPE {
                // The marker itself is never data; it shifts every later
                // position by one raw byte. It can also never complete a
                // frame, since it raises the completion target along with
                // the position.
                escape_count += 1;
                pending_escape = true;
                continue;
            }

            let logical = if pending_escape { byte | 0x80 } else { byte };
            pending_escape = false;

            if !have_length {
                // Length bytes sit at logical positions 2 and 3; each escape
                // marker seen so far shifts them one raw byte further out.
                if position == 2 + escape_count {
                    declared_len = u16::from(logical) << 8;
                } else if position == 3 + escape_count {
                    declared_len |= u16::from(logical);
                    have_length = true;
                }
            } else if position >= usize::from(declared_len) + escape_count + FRAME_OVERHEAD {
                return Ok((declared_len, escape_count));
            }
        }

        Err(FrameError::BufferExhausted {
            capacity: self.config.max_frame_size,
        })
    }

    fn read_byte(&mut self) -> Result<u8> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Err(FrameError::ChannelClosed),
                Ok(_) => return Ok(byte[0]),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current reader configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}
