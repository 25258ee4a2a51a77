use core::str;

use super::cobs::FrameWriter;
use super::CodecError;
use crate::config::MAX_STR_LEN;

/// Worst-case encoded length of a `u32` field.
pub const MAX_VARINT32_LEN: usize = 5;

/// Worst-case encoded length of a `u64` (or `s64`) field.
pub const MAX_VARINT64_LEN: usize = 10;

// Field writers. Little-endian 7-bit groups with the continuation bit in the
// MSB; strings are raw bytes delimited by the frame boundary.
impl FrameWriter<'_> {
    /// One raw byte.
    pub fn u8(&mut self, v: u8) {
        self.write(v);
    }

    pub fn u32(&mut self, v: u32) {
        self.u64(v as u64);
    }

    pub fn u64(&mut self, mut v: u64) {
        loop {
            let mut byte = (v & 0x7F) as u8;
            v >>= 7;
            if v != 0 {
                byte |= 0x80;
            }
            self.write(byte);
            if v == 0 {
                return;
            }
        }
    }

    /// Sign goes into the LSB of the absolute value. `i64::MIN` has no
    /// positive magnitude and escapes as the single byte `0x01` (which no
    /// other value produces).
    pub fn s64(&mut self, v: i64) {
        if v == i64::MIN {
            self.write(0x01);
            return;
        }
        let sign = (v < 0) as u64;
        self.u64((v.unsigned_abs() << 1) | sign);
    }

    /// String bytes, stopping at the first NUL, truncated to [`MAX_STR_LEN`].
    /// The empty string writes nothing: the frame boundary delimits the field.
    pub fn str(&mut self, s: &str) {
        for &b in s
            .as_bytes()
            .iter()
            .take_while(|&&b| b != 0)
            .take(MAX_STR_LEN)
        {
            self.write(b);
        }
    }
}

/// Cursor over the fields of one unstuffed record payload.
pub struct FieldReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> FieldReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// True once every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos == self.buf.len()
    }

    fn byte(&mut self) -> Result<u8, CodecError> {
        let b = *self.buf.get(self.pos).ok_or(CodecError::TruncatedField)?;
        self.pos += 1;
        Ok(b)
    }

    pub fn u8(&mut self) -> Result<u8, CodecError> {
        self.byte()
    }

    pub fn u32(&mut self) -> Result<u32, CodecError> {
        let v = self.u64()?;
        u32::try_from(v).map_err(|_| CodecError::MalformedVarint)
    }

    pub fn u64(&mut self) -> Result<u64, CodecError> {
        let mut v = 0u64;
        for i in 0..MAX_VARINT64_LEN {
            let b = self.byte()?;
            let group = (b & 0x7F) as u64;
            // The 10th group holds the topmost bit only.
            if i == MAX_VARINT64_LEN - 1 && group > 1 {
                return Err(CodecError::MalformedVarint);
            }
            v |= group << (7 * i);
            if b & 0x80 == 0 {
                return Ok(v);
            }
        }
        Err(CodecError::MalformedVarint)
    }

    pub fn s64(&mut self) -> Result<i64, CodecError> {
        let raw = self.u64()?;
        if raw == 1 {
            return Ok(i64::MIN);
        }
        let mag = (raw >> 1) as i64;
        Ok(if raw & 1 == 1 { -mag } else { mag })
    }

    /// Remaining bytes of the record as a string field.
    pub fn str(&mut self) -> Result<&'a str, CodecError> {
        let bytes = &self.buf[self.pos..];
        self.pos = self.buf.len();
        if bytes.len() > MAX_STR_LEN {
            return Err(CodecError::MalformedStr);
        }
        str::from_utf8(bytes).map_err(|_| CodecError::MalformedStr)
    }
}
