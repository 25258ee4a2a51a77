use arrayvec::ArrayVec;

/// Append-only per-core buffer of metadata records, replayed to the sink on
/// stream start so late-attaching consumers learn entity names and static
/// attributes.
pub(crate) struct MetadataBuf<const SIZE: usize> {
    bytes: ArrayVec<u8, SIZE>,
    overflowed: bool,
}

impl<const SIZE: usize> MetadataBuf<SIZE> {
    pub const fn new() -> Self {
        Self {
            bytes: ArrayVec::new_const(),
            overflowed: false,
        }
    }

    /// Appends one whole record. Once a record did not fit, the overflow
    /// flag latches and all further appends are refused, keeping the buffer
    /// a clean record-boundary prefix.
    pub fn append(&mut self, record: &[u8]) {
        if self.overflowed {
            return;
        }
        if self.bytes.try_extend_from_slice(record).is_err() {
            self.overflowed = true;
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn overflowed(&self) -> bool {
        self.overflowed
    }
}
