//! The tracing session: enable-flag state machine, backend dispatcher,
//! drop accounting and the metadata replay buffer.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use spin::mutex::SpinMutex;
use thiserror::Error;

use crate::backend::{Backend, Snapshot, SnapshotView, Streaming, SubmitOutcome};
use crate::config::TRACE_DROP_CNT_EVERY;
use crate::encode::{CoreId, DroppedEvtCnt};
use crate::port::{CriticalGuard, Port, SnapshotPort, StreamPort};

pub(crate) mod dropcnt;
#[cfg(feature = "metadata-buf")]
pub(crate) mod metadata;


/// Errors of the control API. The hot-path hooks never fail; they surface
/// loss only through the in-band drop counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TraceError {
    /// `start`/`reset` refused: tracing is enabled or a backend is still
    /// mid-record.
    #[error("tracing is not quiescent")]
    NotQuiescent,

    /// `stop` called while tracing was already disabled.
    #[error("tracing is already stopped")]
    AlreadyStopped,

    /// The sink dropped part of the metadata replay during stream start.
    #[error("metadata dropped during stream start")]
    MetadataDropOnStart,
}

/// A process-wide tracing session.
///
/// The session owns every piece of mutable tracer state: the enable flag and
/// its spinlock, the per-core backend and metadata buffers with their locks,
/// the cross-core drop counter and the entity-id counter. `new` is `const`,
/// so the natural home of a session is a `static` shared between the hooks
/// and the control code:
///
/// ```rust
/// use tband::backend::Snapshot;
/// use tband::port::{Port, SnapshotPort};
/// use tband::Session;
///
/// struct TickPort;
///
/// impl Port for TickPort {
///     const TIMESTAMP_RESOLUTION_NS: u64 = 1_000;
///     fn timestamp() -> u64 {
///         use std::sync::atomic::{AtomicU64, Ordering};
///         static TICKS: AtomicU64 = AtomicU64::new(0);
///         TICKS.fetch_add(1, Ordering::Relaxed)
///     }
///     fn core_id() -> u32 { 0 }
///     fn enter_critical() {}
///     fn exit_critical() {}
/// }
///
/// impl SnapshotPort for TickPort {}
///
/// static TRACE: Session<TickPort, Snapshot<1024>> = Session::new();
///
/// TRACE.evtmarker_name(1, "boot");
/// TRACE.trigger_snapshot().unwrap();
/// TRACE.evtmarker_begin(1, "");
/// TRACE.evtmarker_end(1);
/// TRACE.stop_snapshot().unwrap();
/// assert!(TRACE.snapshot_buf_amount(0) > 0);
/// ```
///
/// # Concurrency
///
/// Hooks may run in interrupt context, in task context, and on several cores
/// at once. Every entry point runs inside the port's critical section; the
/// lock order is `enable_lock` before a core's backend lock before its
/// metadata lock, and no two backend locks are ever held together. The
/// enable flag uses acquire/release ordering: the "check flag, take backend
/// lock, re-check flag" sequence in [`submit`](Self::submit) is what makes
/// the quiescence probes of the control API sound.
pub struct Session<
    P: Port,
    B: Backend<P>,
    const CORES: usize = 1,
    const METADATA_BUF_SIZE: usize = 256,
> {
    enabled: AtomicBool,
    enable_lock: SpinMutex<()>,
    drop_count: AtomicU32,
    next_entity_id: AtomicU32,
    cores: [CoreState<P, B, METADATA_BUF_SIZE>; CORES],
}

struct CoreState<P: Port, B: Backend<P>, const METADATA_BUF_SIZE: usize> {
    backend: SpinMutex<B::CoreBuf>,
    #[cfg(feature = "metadata-buf")]
    metadata: SpinMutex<metadata::MetadataBuf<METADATA_BUF_SIZE>>,
    drops: dropcnt::DropState,
}

impl<P: Port, B: Backend<P>, const METADATA_BUF_SIZE: usize>
    CoreState<P, B, METADATA_BUF_SIZE>
{
    const fn new() -> Self {
        Self {
            backend: SpinMutex::new(B::INIT),
            #[cfg(feature = "metadata-buf")]
            metadata: SpinMutex::new(metadata::MetadataBuf::new()),
            drops: dropcnt::DropState::new(),
        }
    }
}

impl<P: Port, B: Backend<P>, const CORES: usize, const METADATA_BUF_SIZE: usize>
    Session<P, B, CORES, METADATA_BUF_SIZE>
{
    /// Creates a session with tracing disabled and all buffers empty.
    pub const fn new() -> Self {
        Self {
            enabled: AtomicBool::new(false),
            enable_lock: SpinMutex::new(()),
            drop_count: AtomicU32::new(0),
            next_entity_id: AtomicU32::new(1),
            cores: [const { CoreState::new() }; CORES],
        }
    }

    /// True while the session accepts live events.
    pub fn tracing_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// True once tracing is disabled and no backend is mid-record anywhere.
    /// After this returns true, no further bytes reach any backend buffer
    /// until the next start.
    pub fn tracing_finished(&self) -> bool {
        let _cs = CriticalGuard::<P>::enter();
        let _lock = self.enable_lock.lock();
        self.quiescent()
    }

    /// Per-core variant of [`tracing_finished`](Self::tracing_finished).
    pub fn tracing_backend_finished(&self, core_id: u32) -> bool {
        let _cs = CriticalGuard::<P>::enter();
        let _lock = self.enable_lock.lock();
        self.backend_quiescent(core_id as usize)
    }

    /// Total number of events dropped so far. Monotone non-decreasing.
    pub fn drop_count(&self) -> u32 {
        self.drop_count.load(Ordering::Relaxed)
    }

    /// Hands out a fresh id for a newly observed RTOS resource. Ids start
    /// at 1 and only grow; 0 is reserved as "no id".
    pub fn alloc_entity_id(&self) -> u32 {
        self.next_entity_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Runs `f` over the metadata bytes captured on `core_id` and the
    /// buffer's overflow flag. `f` runs inside the critical section with the
    /// metadata lock held: keep it short and do not call back into the
    /// session.
    #[cfg(feature = "metadata-buf")]
    pub fn with_metadata_buf<R>(&self, core_id: u32, f: impl FnOnce(&[u8], bool) -> R) -> R {
        let _cs = CriticalGuard::<P>::enter();
        let buf = self.cores[core_id as usize].metadata.lock();
        f(buf.as_slice(), buf.overflowed())
    }

    /// Number of metadata bytes captured on `core_id`.
    #[cfg(feature = "metadata-buf")]
    pub fn metadata_buf_amount(&self, core_id: u32) -> usize {
        self.with_metadata_buf(core_id, |bytes, _| bytes.len())
    }

    // Caller holds the enable lock, so no new backend-lock owner can appear
    // while the probe walks the cores.
    fn quiescent(&self) -> bool {
        (0..CORES).all(|core| self.backend_quiescent(core))
    }

    fn backend_quiescent(&self, core: usize) -> bool {
        if self.enabled.load(Ordering::Acquire) {
            return false;
        }
        // Release of `enabled` happens-before a successful probe, and every
        // submit re-checks the flag after locking: probing all locks while
        // the flag is clear proves no backend is mid-record.
        self.cores[core].backend.try_lock().is_some()
    }

    /// Emits one already-encoded record from the current core, with drop
    /// accounting around it. Caller must hold the critical section.
    pub(crate) fn emit(&self, record: &[u8], is_metadata: bool) {
        let core = P::core_id() as usize;
        if !self.publish_drop_cnt(core) {
            // The publish itself was dropped; the caller's event is
            // sacrificed rather than emitted with unaccounted loss before it.
            return;
        }
        if self.submit(core, record, is_metadata) {
            self.drop_count.fetch_add(1, Ordering::Relaxed);
        }
    }

    // Publishes the drop counter when it changed, or periodically as a
    // keep-alive. Returns false if the publish was attempted and dropped.
    fn publish_drop_cnt(&self, core: usize) -> bool {
        let drops = &self.cores[core].drops;
        let cnt = self.drop_count.load(Ordering::Relaxed);
        let due = (TRACE_DROP_CNT_EVERY != 0 && drops.countdown() == 0)
            || drops.last_published() != cnt;
        if !due {
            drops.tick();
            return true;
        }

        let mut buf = [0u8; DroppedEvtCnt::MAX_LEN];
        let len = DroppedEvtCnt {
            ts: P::timestamp(),
            cnt,
        }
        .encode(&mut buf);
        if self.submit(core, &buf[..len], false) {
            self.drop_count.fetch_add(1, Ordering::Relaxed);
            return false;
        }
        drops.published(cnt);
        true
    }

    /// Routes one record. Returns true if the backend dropped it.
    ///
    /// Two cores may race to publish the same drop count through here; the
    /// record is idempotent for the consumer, so no dedup is attempted.
    fn submit(&self, core: usize, record: &[u8], is_metadata: bool) -> bool {
        self.append_metadata(core, record, is_metadata);

        // Fast path: discarded records while disabled are not drops.
        if !self.enabled.load(Ordering::Acquire) {
            return false;
        }
        let mut backend = self.cores[core].backend.lock();
        // `stop` may have won the race before the lock was ours. Re-checking
        // under the lock guarantees a disable cannot leave a backend
        // mid-record, which the quiescence probe relies on.
        if !self.enabled.load(Ordering::Acquire) {
            return false;
        }
        match B::submit(&mut backend, record) {
            SubmitOutcome::Accepted => false,
            SubmitOutcome::Dropped => true,
            SubmitOutcome::BufFull => {
                drop(backend);
                self.halt_from_backend();
                false
            }
        }
    }

    // Names defined before start must be replayable, so metadata lands in
    // the buffer regardless of the enable flag.
    #[cfg(feature = "metadata-buf")]
    fn append_metadata(&self, core: usize, record: &[u8], is_metadata: bool) {
        if is_metadata {
            self.cores[core].metadata.lock().append(record);
        }
    }

    #[cfg(not(feature = "metadata-buf"))]
    fn append_metadata(&self, _core: usize, _record: &[u8], _is_metadata: bool) {}

    // Backend ran out of space: stop tracing. Runs with no backend lock held,
    // so taking the enable lock respects the lock order. The swap decides the
    // race against an explicit stop; only the actual winner fires the
    // callback, hence exactly once.
    fn halt_from_backend(&self) {
        let was_enabled = {
            let _lock = self.enable_lock.lock();
            self.enabled.swap(false, Ordering::AcqRel)
        };
        if was_enabled {
            log::warn!("backend buffer full, tracing stopped");
            B::on_halt();
        }
    }

    fn arm(&self) -> Result<(), TraceError> {
        let _cs = CriticalGuard::<P>::enter();
        let _lock = self.enable_lock.lock();
        if !self.quiescent() {
            return Err(TraceError::NotQuiescent);
        }
        self.enabled.store(true, Ordering::Release);
        log::debug!("tracing enabled");
        Ok(())
    }

    fn disarm(&self) -> Result<(), TraceError> {
        let _cs = CriticalGuard::<P>::enter();
        let _lock = self.enable_lock.lock();
        if !self.enabled.swap(false, Ordering::AcqRel) {
            return Err(TraceError::AlreadyStopped);
        }
        log::debug!("tracing disabled");
        Ok(())
    }
}

impl<P: Port, B: Backend<P>, const CORES: usize, const METADATA_BUF_SIZE: usize> Default
    for Session<P, B, CORES, METADATA_BUF_SIZE>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P: StreamPort, const CORES: usize, const METADATA_BUF_SIZE: usize>
    Session<P, Streaming, CORES, METADATA_BUF_SIZE>
{
    /// Replays the captured metadata to the sink, then opens the live
    /// stream.
    ///
    /// The sink first receives, for every core with captured metadata and in
    /// core-id order, a `core_id` record followed by that core's metadata
    /// bytes; then a `core_id` record for the current core, so live events
    /// are attributed correctly. Any sink drop during this sequence aborts
    /// the start with [`TraceError::MetadataDropOnStart`].
    pub fn start_streaming(&self) -> Result<(), TraceError> {
        let _cs = CriticalGuard::<P>::enter();
        let _lock = self.enable_lock.lock();
        if !self.quiescent() {
            return Err(TraceError::NotQuiescent);
        }

        self.replay_metadata()?;
        if Self::stream_core_id(P::core_id()) {
            return Err(TraceError::MetadataDropOnStart);
        }

        self.enabled.store(true, Ordering::Release);
        log::debug!("streaming started");
        Ok(())
    }

    /// Closes the live stream.
    pub fn stop_streaming(&self) -> Result<(), TraceError> {
        self.disarm()
    }

    #[cfg(feature = "metadata-buf")]
    fn replay_metadata(&self) -> Result<(), TraceError> {
        for (core, state) in self.cores.iter().enumerate() {
            let meta = state.metadata.lock();
            if meta.as_slice().is_empty() {
                continue;
            }
            if meta.overflowed() {
                log::warn!("core {} metadata buffer overflowed, replay is incomplete", core);
            }
            if Self::stream_core_id(core as u32) || P::stream(meta.as_slice()) {
                return Err(TraceError::MetadataDropOnStart);
            }
        }
        Ok(())
    }

    #[cfg(not(feature = "metadata-buf"))]
    fn replay_metadata(&self) -> Result<(), TraceError> {
        Ok(())
    }

    fn stream_core_id(core_id: u32) -> bool {
        let mut buf = [0u8; CoreId::MAX_LEN];
        let len = CoreId { ts: 0, core_id }.encode(&mut buf);
        P::stream(&buf[..len])
    }
}

impl<P: SnapshotPort, const SIZE: usize, const CORES: usize, const METADATA_BUF_SIZE: usize>
    Session<P, Snapshot<SIZE>, CORES, METADATA_BUF_SIZE>
{
    /// Starts recording into the per-core snapshot buffers.
    pub fn trigger_snapshot(&self) -> Result<(), TraceError> {
        self.arm()
    }

    /// Stops recording. Buffers keep their content until
    /// [`reset_snapshot`](Self::reset_snapshot).
    pub fn stop_snapshot(&self) -> Result<(), TraceError> {
        self.disarm()
    }

    /// Clears every core's snapshot buffer. Tracing must be stopped and all
    /// [`SnapshotView`]s dropped.
    pub fn reset_snapshot(&self) -> Result<(), TraceError> {
        let _cs = CriticalGuard::<P>::enter();
        let _lock = self.enable_lock.lock();
        if self.enabled.load(Ordering::Acquire) {
            return Err(TraceError::NotQuiescent);
        }
        for state in &self.cores {
            match state.backend.try_lock() {
                Some(mut buf) => <Snapshot<SIZE> as Backend<P>>::clear(&mut buf),
                None => return Err(TraceError::NotQuiescent),
            }
        }
        log::debug!("snapshot buffers reset");
        Ok(())
    }

    /// The records captured on `core_id`, or `None` while that core's
    /// backend is not quiescent.
    pub fn snapshot_buf(&self, core_id: u32) -> Option<SnapshotView<'_, SIZE>> {
        let _cs = CriticalGuard::<P>::enter();
        let _lock = self.enable_lock.lock();
        if self.enabled.load(Ordering::Acquire) {
            return None;
        }
        let guard = self.cores[core_id as usize].backend.try_lock()?;
        Some(SnapshotView { guard })
    }

    /// Number of captured bytes on `core_id`; 0 while not quiescent.
    pub fn snapshot_buf_amount(&self, core_id: u32) -> usize {
        self.snapshot_buf(core_id).map_or(0, |view| view.len())
    }
}
