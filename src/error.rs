//! Errors produced while querying a server.
//!
//! Every variant is fatal to the query that raised it. Nothing is retried and
//! no partially decoded record is ever returned.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    /// Fewer bytes remain than the field starting at `offset` requires.
    #[error("truncated buffer: field at offset {offset} needs {needed} bytes, {available} available")]
    TruncatedBuffer {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// A string field is not valid UTF-8.
    #[error("string field at offset {offset} is not valid UTF-8")]
    InvalidEncoding {
        offset: usize,
        #[source]
        source: std::str::Utf8Error,
    },

    /// The server answered with a split (multi-datagram) response.
    #[error("split packet responses are not supported")]
    UnsupportedFraming,

    /// The 4-byte packet prefix matches neither the single nor the split marker.
    #[error("unknown packet frame type 0x{0:08X}")]
    UnknownFrameType(u32),

    /// The outgoing payload does not fit in a single packet.
    #[error("payload of {0} bytes exceeds the single packet limit")]
    UnsupportedSize(usize),

    /// A list is longer than its response's count field can express.
    #[error("{0} entries do not fit the response count field")]
    TooManyEntries(usize),

    #[error("unexpected header 0x{found:02X}, expected 0x{expected:02X}")]
    UnexpectedHeader { expected: u8, found: u8 },

    /// Bytes were left over after a complete decode.
    #[error("{0} residual bytes after decoding")]
    ResidualData(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to resolve host: {0}")]
    Resolve(String),
}

pub type Result<T> = std::result::Result<T, QueryError>;
