//! Backend policies: where a record goes once the dispatcher accepts it.
//!
//! Exactly one backend is wired into a [`Session`](crate::Session) through
//! its type parameter. The built-in policies are [`Streaming`] and
//! [`Snapshot`]; implementing [`Backend`] plugs in an external one.

pub use snapshot::{Snapshot, SnapshotBuf, SnapshotView};
pub use streaming::Streaming;

mod snapshot;
mod streaming;

use crate::port::Port;

/// What happened to one record inside the per-core backend lock.
pub enum SubmitOutcome {
    /// Record fully accepted.
    Accepted,

    /// Record wholly dropped; the drop accountant counts it.
    Dropped,

    /// No space left for the record. The session stops tracing and invokes
    /// [`Backend::on_halt`]; this never counts as a drop.
    BufFull,
}

/// A backend policy.
///
/// `submit` runs with the calling core's backend spinlock held and
/// interrupts suppressed: it must be short and must never block. Each record
/// is either fully accepted or wholly rejected; partial writes are not an
/// option the dispatcher can represent.
pub trait Backend<P: Port> {
    /// Per-core backend storage.
    type CoreBuf: Send;

    /// Initial per-core storage, usable in `const` context so sessions can
    /// be placed in `static`s.
    const INIT: Self::CoreBuf;

    /// Handles one encoded record.
    fn submit(buf: &mut Self::CoreBuf, record: &[u8]) -> SubmitOutcome;

    /// Clears one core's storage (called by `reset` while quiescent).
    fn clear(buf: &mut Self::CoreBuf);

    /// Runs after the session stopped tracing because `submit` returned
    /// [`SubmitOutcome::BufFull`]. No locks are held at this point.
    fn on_halt() {}
}
