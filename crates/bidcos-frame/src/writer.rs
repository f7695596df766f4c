use std::io::{ErrorKind, Write};

use bytes::BytesMut;

use crate::codec::encode_frame;
use crate::error::{FrameError, Result};

/// Write all of `buf`, looping over partial writes.
///
/// Returns the number of bytes written, always `buf.len()` on success. A
/// hard write error aborts immediately; bytes already on the wire stay
/// there (no rollback). Interrupted writes are retried, a zero-length write
/// means the channel closed.
pub fn write_all<W: Write>(writer: &mut W, buf: &[u8]) -> Result<usize> {
    let mut offset = 0usize;
    while offset < buf.len() {
        match writer.write(&buf[offset..]) {
            Ok(0) => return Err(FrameError::ChannelClosed),
            Ok(n) => offset += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(FrameError::Io(err)),
        }
    }
    Ok(buf.len())
}

/// Writes complete frames to any `Write` stream.
pub struct FrameWriter<T> {
    inner: T,
    buf: BytesMut,
}

impl<T: Write> FrameWriter<T> {
    /// Create a new frame writer.
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            buf: BytesMut::new(),
        }
    }

    /// Send pre-encoded raw frame bytes, such as the fixed protocol
    /// commands.
    pub fn write_raw(&mut self, raw: &[u8]) -> Result<usize> {
        let written = write_all(&mut self.inner, raw)?;
        self.flush()?;
        Ok(written)
    }

    /// Encode a payload with the given trailer and send it.
    pub fn send(&mut self, payload: &[u8], trailer: [u8; 2]) -> Result<usize> {
        self.buf.clear();
        encode_frame(payload, trailer, &mut self.buf)?;
        let written = write_all(&mut self.inner, &self.buf)?;
        self.flush()?;
        Ok(written)
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
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

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::codec::FRAME_OVERHEAD;
    use crate::reader::FrameReader;

    #[test]
    fn write_all_returns_full_length() {
        let mut sink = Vec::new();
        let written = write_all(&mut sink, &[1, 2, 3, 4]).unwrap();
        assert_eq!(written, 4);
        assert_eq!(sink, vec![1, 2, 3, 4]);
    }

    #[test]
    fn write_all_loops_over_partial_writes() {
        let mut sink = ChunkedWriter {
            max_chunk: 3,
            calls: 0,
            data: Vec::new(),
        };
        let buf = [0u8; 10];

        let written = write_all(&mut sink, &buf).unwrap();

        assert_eq!(written, 10);
        assert_eq!(sink.data.len(), 10);
        // ceil(10 / 3) underlying writes.
        assert_eq!(sink.calls, 4);
    }

    struct ChunkedWriter {
        max_chunk: usize,
        calls: usize,
        data: Vec<u8>,
    }

    impl Write for ChunkedWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.calls += 1;
            let n = buf.len().min(self.max_chunk);
            self.data.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_all_aborts_on_first_failure() {
        let mut sink = FailingWriter { calls: 0 };
        let err = write_all(&mut sink, &[1, 2, 3]).unwrap_err();

        assert!(matches!(err, FrameError::Io(e) if e.kind() == ErrorKind::BrokenPipe));
        assert_eq!(sink.calls, 1);
    }

    struct FailingWriter {
        calls: usize,
    }

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            self.calls += 1;
            Err(std::io::Error::from(ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_all_maps_zero_write_to_channel_closed() {
        struct ZeroWriter;

        impl Write for ZeroWriter {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Ok(0)
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let err = write_all(&mut ZeroWriter, &[1]).unwrap_err();
        assert!(matches!(err, FrameError::ChannelClosed));
    }

    #[test]
    fn write_all_retries_interrupted() {
        struct InterruptedOnce {
            interrupted: bool,
            data: Vec<u8>,
        }

        impl Write for InterruptedOnce {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                if !self.interrupted {
                    self.interrupted = true;
                    return Err(std::io::Error::from(ErrorKind::Interrupted));
                }
                self.data.extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut sink = InterruptedOnce {
            interrupted: false,
            data: Vec::new(),
        };
        let written = write_all(&mut sink, &[9, 8, 7]).unwrap();
        assert_eq!(written, 3);
        assert_eq!(sink.data, vec![9, 8, 7]);
    }

    #[test]
    fn sent_frames_read_back() {
        let mut writer = FrameWriter::new(Cursor::new(Vec::<u8>::new()));
        let payload = [0x10u8, 0xFD, 0x20];
        writer.send(&payload, [0x00, 0x00]).unwrap();

        let wire = writer.into_inner().into_inner();
        let mut reader = FrameReader::new(Cursor::new(wire));
        let frame = reader.read_frame().unwrap();

        assert_eq!(frame.declared_len() as usize, payload.len());
        assert_eq!(frame.escape_count(), 1);
        assert_eq!(frame.len(), payload.len() + 1 + FRAME_OVERHEAD);
    }

    #[test]
    fn write_raw_passes_bytes_through() {
        let command = [0xFDu8, 0x00, 0x03, 0x00, 0x00, 0x03, 0x18, 0x0A];
        let mut writer = FrameWriter::new(Cursor::new(Vec::<u8>::new()));

        let written = writer.write_raw(&command).unwrap();

        assert_eq!(written, command.len());
        assert_eq!(writer.into_inner().into_inner(), command);
    }

    #[test]
    fn send_flushes_the_stream() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        #[derive(Default)]
        struct FlushTracker {
            flushed: Arc<AtomicBool>,
        }

        impl Write for FlushTracker {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                self.flushed.store(true, Ordering::SeqCst);
                Ok(())
            }
        }

        let sink = FlushTracker::default();
        let flag = Arc::clone(&sink.flushed);
        let mut writer = FrameWriter::new(sink);

        writer.send(b"x", [0x00, 0x00]).unwrap();
        assert!(flag.load(Ordering::SeqCst));
    }
}
