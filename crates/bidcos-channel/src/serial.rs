use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::os::fd::AsRawFd;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ChannelError, Result};
use crate::traits::ByteChannel;

/// Byte channel over a serial device file.
///
/// The device is expected to be configured already (baud rate, parity, raw
/// mode); this type only moves bytes and flushes line buffers.
pub struct SerialChannel {
    file: File,
    path: Option<PathBuf>,
}

impl SerialChannel {
    /// Wrap an already-opened device file.
    pub fn from_file(file: File) -> Self {
        Self { file, path: None }
    }

    /// Open a serial device by path.
    ///
    /// Opens read-write with no termios changes; line settings stay as the
    /// caller configured them.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|e| ChannelError::Open {
                path: path.clone(),
                source: e,
            })?;
        debug!(?path, "opened serial device");
        Ok(Self {
            file,
            path: Some(path),
        })
    }

    /// The path this channel was opened from, if known.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Borrow the underlying file.
    pub fn get_ref(&self) -> &File {
        &self.file
    }

    /// Mutably borrow the underlying file.
    pub fn get_mut(&mut self) -> &mut File {
        &mut self.file
    }

    /// Consume the channel and return the underlying file.
    pub fn into_inner(self) -> File {
        self.file
    }
}

impl Read for SerialChannel {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl Write for SerialChannel {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl ByteChannel for SerialChannel {
    fn discard_pending(&mut self) -> io::Result<()> {
        let fd = self.file.as_raw_fd();
        // SAFETY: `fd` is an open descriptor owned by `self.file` for the
        // lifetime of this call.
        let rc = unsafe { libc::tcflush(fd, libc::TCIOFLUSH) };
        if rc == 0 {
            debug!("discarded pending serial bytes");
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }
}

impl std::fmt::Debug for SerialChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialChannel")
            .field("path", &self.path)
            .finish()
    }
}
