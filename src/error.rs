//! The `error` module defines the closed set of failures the codec can report.

use std::error;
use std::fmt;

/// `CodecError` enumerates every way an encode or decode call can fail.
///
/// The set is closed: callers are expected to match on it exhaustively rather
/// than inspect a formatted message. `Display` renders a human-readable line
/// for logging; it is not meant to be parsed.
#[derive(Debug)]
pub enum CodecError {
    /// A sample was non-finite, or `dt` was not strictly positive.
    InvalidInput(&'static str),
    /// The container did not start with the `LSG2` magic bytes.
    BadMagic,
    /// The container's version field does not match a version this crate decodes.
    UnsupportedVersion(u16),
    /// The fixed header is shorter than the buffer, or `reserved` was non-zero.
    TruncatedHeader,
    /// The context block was not valid UTF-8 JSON, or carried unexpected keys/types.
    MalformedContext(String),
    /// The segment table's declared size does not fit within the remaining buffer.
    TruncatedSegmentTable,
    /// A residual block was truncated, overran its declared length, or a varint
    /// continued past its block boundary or exceeded 10 bytes.
    MalformedResidualBlock,
    /// Segments do not tile `[0, n_points)` exactly.
    CoverageMismatch,
    /// Declared counts disagree with each other or with the buffer's actual contents.
    InconsistentCounts(&'static str),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CodecError::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            CodecError::BadMagic => write!(f, "container does not start with the LSG2 magic"),
            CodecError::UnsupportedVersion(v) => write!(f, "unsupported container version {}", v),
            CodecError::TruncatedHeader => write!(f, "fixed header truncated or malformed"),
            CodecError::MalformedContext(msg) => write!(f, "malformed context block: {}", msg),
            CodecError::TruncatedSegmentTable => {
                write!(f, "segment table truncated or exceeds buffer bounds")
            }
            CodecError::MalformedResidualBlock => {
                write!(f, "residual block truncated, overran its bounds, or corrupt")
            }
            CodecError::CoverageMismatch => {
                write!(f, "segments do not tile the declared sample range")
            }
            CodecError::InconsistentCounts(msg) => write!(f, "inconsistent counts: {}", msg),
        }
    }
}

impl error::Error for CodecError {}

/// function to create an invalid-input error.
pub fn invalid_input<T>(msg: &'static str) -> Result<T> {
    Err(CodecError::InvalidInput(msg))
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, CodecError>;
