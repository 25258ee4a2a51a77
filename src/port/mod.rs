//! Platform capabilities the tracer needs from its target.
//!
//! A port supplies timestamps, the executing core's id, and a critical
//! section that suppresses interrupts and preemption on the calling core.
//! Backends add their own requirements on top ([`StreamPort`],
//! [`SnapshotPort`]).

use core::marker::PhantomData;

#[cfg(feature = "std")]
pub use posix::PosixPort;

#[cfg(feature = "std")]
mod posix;

pub trait Port {
    /// Nanoseconds per [`timestamp`](Self::timestamp) tick.
    const TIMESTAMP_RESOLUTION_NS: u64;

    /// Monotonic tick count. Must be non-decreasing on every single core.
    fn timestamp() -> u64;

    /// Id of the executing core, `0..CORES`.
    fn core_id() -> u32;

    /// Suppresses interrupts (at or below the trace priority) and preemption
    /// on the calling core. Nesting is allowed and must be reference-counted
    /// by the port.
    fn enter_critical();

    /// Leaves one nesting level of the critical section.
    fn exit_critical();
}

/// Sink for the [`Streaming`](crate::backend::Streaming) backend.
pub trait StreamPort: Port {
    /// Hands one encoded record to the sink. Returns `true` if the sink
    /// dropped it. Called with interrupts and preemption suppressed; must
    /// not block.
    fn stream(bytes: &[u8]) -> bool;
}

/// Callbacks for the [`Snapshot`](crate::backend::Snapshot) backend.
pub trait SnapshotPort: Port {
    /// Invoked exactly once when a core's snapshot buffer fills and tracing
    /// stops. Must not call back into the session.
    fn on_snapshot_buf_full() {}
}

// Scoped critical section. Exit runs on every path, including early returns
// from the error paths of the control API.
pub(crate) struct CriticalGuard<P: Port>(PhantomData<P>);

impl<P: Port> CriticalGuard<P> {
    pub fn enter() -> Self {
        P::enter_critical();
        Self(PhantomData)
    }
}

impl<P: Port> Drop for CriticalGuard<P> {
    fn drop(&mut self) {
        P::exit_critical();
    }
}
