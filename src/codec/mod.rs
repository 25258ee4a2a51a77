//! Byte-level wire codec: self-delimiting frames and variable-length fields.
//!
//! Every trace record is a string of fields encoded by [`varint`] and wrapped
//! into one [`cobs`] frame. Frames never contain an interior `0x00` and end
//! with a single `0x00`, so a consumer that attaches mid-stream can
//! resynchronize on the next delimiter.

pub use cobs::{frame_max_len, unstuff, FrameWriter};
pub use varint::{FieldReader, MAX_VARINT32_LEN, MAX_VARINT64_LEN};

use thiserror::Error;

mod cobs;
mod varint;

#[cfg(test)]
mod test;

/// Errors of the receive direction. The transmit direction cannot fail: the
/// caller provides a buffer of at least [`frame_max_len`] bytes and a
/// violation is a programmer error (it panics on the out-of-bounds write).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Input ended before the frame terminator.
    #[error("frame ended before its terminator")]
    TruncatedFrame,

    /// The unstuffed payload does not fit the output buffer.
    #[error("output buffer too small for unstuffed payload")]
    PayloadOverflow,

    /// A field extends past the end of the record.
    #[error("field extends past the end of the record")]
    TruncatedField,

    /// A varint does not terminate within its maximum width, or its value
    /// does not fit the requested integer type.
    #[error("malformed varint")]
    MalformedVarint,

    /// A string field is longer than [`MAX_STR_LEN`](crate::config::MAX_STR_LEN)
    /// or is not valid UTF-8.
    #[error("malformed string field")]
    MalformedStr,
}
