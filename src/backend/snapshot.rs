use core::ops::Deref;

use arrayvec::ArrayVec;
use spin::mutex::SpinMutexGuard;

use super::{Backend, SubmitOutcome};
use crate::port::SnapshotPort;

/// Buffers records locally, per core, and stops tracing at buffer fill.
///
/// `SIZE` is the per-core buffer capacity in bytes.
pub struct Snapshot<const SIZE: usize = 32768>;

/// Record storage of one core. Holds only whole records, so the content is
/// always a decodable prefix of the event sequence.
pub struct SnapshotBuf<const SIZE: usize> {
    bytes: ArrayVec<u8, SIZE>,
}

impl<const SIZE: usize> SnapshotBuf<SIZE> {
    const NEW: Self = Self {
        bytes: ArrayVec::new_const(),
    };

    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl<P: SnapshotPort, const SIZE: usize> Backend<P> for Snapshot<SIZE> {
    type CoreBuf = SnapshotBuf<SIZE>;
    const INIT: SnapshotBuf<SIZE> = SnapshotBuf::NEW;

    fn submit(buf: &mut SnapshotBuf<SIZE>, record: &[u8]) -> SubmitOutcome {
        match buf.bytes.try_extend_from_slice(record) {
            Ok(()) => SubmitOutcome::Accepted,
            Err(_) => SubmitOutcome::BufFull,
        }
    }

    fn clear(buf: &mut SnapshotBuf<SIZE>) {
        buf.bytes.clear();
    }

    fn on_halt() {
        P::on_snapshot_buf_full();
    }
}

/// Read guard over one core's snapshot buffer.
///
/// Holding the view keeps that core's backend lock, which in turn keeps
/// `trigger_snapshot` and `reset_snapshot` reporting
/// [`NotQuiescent`](crate::TraceError::NotQuiescent) until it is dropped.
pub struct SnapshotView<'a, const SIZE: usize> {
    pub(crate) guard: SpinMutexGuard<'a, SnapshotBuf<SIZE>>,
}

impl<const SIZE: usize> Deref for SnapshotView<'_, SIZE> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.guard.as_slice()
    }
}
