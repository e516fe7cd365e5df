use std::os::fd::RawFd;

/// Errors that can occur while binding the bridge's channels.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The well-known descriptor was not open in this process.
    #[error("descriptor {fd} is not open: {source}")]
    BadDescriptor { fd: RawFd, source: std::io::Error },
}

pub type Result<T> = std::result::Result<T, TransportError>;
