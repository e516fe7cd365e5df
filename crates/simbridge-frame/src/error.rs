/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The payload length does not fit in the 4-byte prefix.
    #[error("payload too large for a 4-byte length prefix ({size} bytes)")]
    PayloadTooLarge { size: usize },

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The channel closed before a frame was fully written.
    #[error("channel closed mid-write")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, FrameError>;
