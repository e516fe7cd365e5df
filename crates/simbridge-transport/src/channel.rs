use std::fs::File;
use std::io::{Read, Write};
use std::os::fd::{FromRawFd, RawFd};

use tracing::debug;

use crate::error::{Result, TransportError};

/// Well-known descriptor carrying parent→bridge command frames.
pub const COMMAND_FD: RawFd = 3;

/// Well-known descriptor carrying bridge→parent output frames.
pub const OUTPUT_FD: RawFd = 4;

/// The read side of the channel pair: command frames from the parent.
///
/// The channel is unidirectional and its lifetime is independent of the
/// outbound channel; the parent closing it ends command delivery but nothing
/// else.
#[derive(Debug)]
pub struct InboundChannel {
    inner: File,
}

impl InboundChannel {
    /// Adopt a descriptor inherited from the parent.
    ///
    /// The descriptor must be open; ownership transfers to the returned
    /// channel, which closes it on drop.
    pub fn from_inherited_fd(fd: RawFd) -> Result<Self> {
        adopt_fd(fd).map(|inner| Self { inner })
    }
}

impl Read for InboundChannel {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.inner.read(buf)
    }
}

/// The write side of the channel pair: device-output frames to the parent.
#[derive(Debug)]
pub struct OutboundChannel {
    inner: File,
}

impl OutboundChannel {
    /// Adopt a descriptor inherited from the parent.
    pub fn from_inherited_fd(fd: RawFd) -> Result<Self> {
        adopt_fd(fd).map(|inner| Self { inner })
    }
}

impl Write for OutboundChannel {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

/// Whether `fd` currently denotes an open descriptor in this process.
pub fn descriptor_open(fd: RawFd) -> bool {
    if fd < 0 {
        return false;
    }
    // SAFETY: F_GETFD only queries descriptor flags; it never changes
    // process state regardless of what `fd` refers to.
    unsafe { libc::fcntl(fd, libc::F_GETFD) != -1 }
}

fn adopt_fd(fd: RawFd) -> Result<File> {
    if !descriptor_open(fd) {
        return Err(TransportError::BadDescriptor {
            fd,
            source: std::io::Error::last_os_error(),
        });
    }
    debug!(fd, "adopted inherited descriptor");
    // SAFETY: the descriptor was verified open above and is owned by nothing
    // else in this process; the File takes ownership and closes it on drop.
    Ok(unsafe { File::from_raw_fd(fd) })
}
