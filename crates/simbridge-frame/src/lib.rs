//! Length-prefixed message framing for the device bridge.
//!
//! Every message crossing the bridge is framed as a 4-byte big-endian
//! unsigned length followed by exactly that many payload bytes. Payloads are
//! opaque binary with no magic and no type tag, so length-prefixing is the
//! only framing that survives arbitrary byte values, including bytes that
//! happen to look like a prefix.
//!
//! The one transport-level payload rule lives here too: the device's `wait`
//! keep-alive marker is filtered on the encode path and never reaches the
//! parent, whatever carries the bytes.

pub mod codec;
pub mod error;
pub mod reader;
pub mod writer;

pub use codec::{decode_frame, encode_frame, HEADER_SIZE, SENTINEL};
pub use error::{FrameError, Result};
pub use reader::FrameReader;
pub use writer::FrameWriter;
