//! Per-core event tracer for small multi-core real-time systems.
//!
//! The core of the crate is a lock-free-ish per-core event serializer: each
//! hook call encodes one event into a compact self-delimiting record
//! ([`codec`], [`encode`]), routes it to the session's backend under strict
//! concurrency rules ([`Session`], [`backend`]), and accounts every lost
//! record in a drop counter that is published in-band so consumers can
//! always quantify loss. Per-core metadata buffers retain entity names and
//! static attributes for consumers that attach late.
//!
//! Producers never block: if the sink cannot keep up, events are dropped and
//! the decoder sees a growing drop count. If the snapshot buffer fills,
//! tracing stops by itself and the port is told exactly once.
//!
//! ## Example
//!
//! Record a pair of instrumented regions into an in-memory snapshot:
//!
//! ```rust
//! use tband::backend::Snapshot;
//! use tband::decode::{Record, RecordIter};
//! use tband::port::{Port, SnapshotPort};
//! use tband::Session;
//!
//! // A minimal single-core port. Real targets wire these to a hardware
//! // timer and the kernel's critical-section primitives.
//! struct TickPort;
//!
//! impl Port for TickPort {
//!     const TIMESTAMP_RESOLUTION_NS: u64 = 1_000;
//!     fn timestamp() -> u64 {
//!         use std::sync::atomic::{AtomicU64, Ordering};
//!         static TICKS: AtomicU64 = AtomicU64::new(0);
//!         TICKS.fetch_add(1, Ordering::Relaxed)
//!     }
//!     fn core_id() -> u32 { 0 }
//!     fn enter_critical() {}
//!     fn exit_critical() {}
//! }
//!
//! impl SnapshotPort for TickPort {}
//!
//! static TRACE: Session<TickPort, Snapshot<1024>> = Session::new();
//!
//! TRACE.gather_system_metadata();
//! TRACE.evtmarker_name(1, "boot");
//!
//! TRACE.trigger_snapshot().unwrap();
//! TRACE.evtmarker_begin(1, "");
//! // ... traced work ...
//! TRACE.evtmarker_end(1);
//! TRACE.stop_snapshot().unwrap();
//!
//! let snap = TRACE.snapshot_buf(0).unwrap();
//! let records: Vec<_> = RecordIter::new(&snap).collect::<Result<_, _>>().unwrap();
//! assert!(matches!(records[0], Record::EvtmarkerBegin { id: 1, .. }));
//! assert!(matches!(records[1], Record::EvtmarkerEnd { id: 1, .. }));
//! ```
//!
//! ## Porting
//!
//! The platform supplies a [`port::Port`] (timestamp source, core id,
//! critical section) plus the backend-specific capability:
//! [`port::StreamPort`] for [`backend::Streaming`], [`port::SnapshotPort`]
//! for [`backend::Snapshot`]. The RTOS integration shim maps scheduler
//! callbacks onto the hook methods of [`Session`]; everything it needs is a
//! `&'static Session`.

#![no_std]

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod backend;
pub mod codec;
pub mod config;
#[cfg(feature = "decode")]
pub mod decode;
pub mod encode;
mod hooks;
pub mod port;
pub mod session;

pub use session::{Session, TraceError};
