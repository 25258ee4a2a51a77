//! The hook surface: thin entry points the application and the RTOS
//! integration shim call at well-defined events.
//!
//! Every hook follows the same shape: enter the critical section, read the
//! timestamp, encode into a stack buffer of the event's exact worst-case
//! size, then hand the record to the dispatcher with drop accounting around
//! it. Hooks never fail and never block beyond the bounded spinlock waits of
//! the dispatcher.

use crate::backend::Backend;
use crate::encode::TsResolutionNs;
#[cfg(feature = "isr-trace")]
use crate::encode::{IsrEnter, IsrExit, IsrName};
#[cfg(feature = "marker-trace")]
use crate::encode::{
    Evtmarker, EvtmarkerBegin, EvtmarkerEnd, EvtmarkerName, Valmarker, ValmarkerName,
};
use crate::port::{CriticalGuard, Port};
use crate::session::Session;

#[cfg(feature = "freertos-trace")]
mod freertos;

// One hook, one event. The `ts` marker makes the hook sample the port clock
// into the event's timestamp field; metadata events have no such field.
macro_rules! hook {
    ($(#[$m:meta])* fn $hook:ident($($arg:ident: $ty:ty),*) => $evt:ident { ts $(, $f:ident: $v:expr)* $(,)? }) => {
        $(#[$m])*
        pub fn $hook(&self, $($arg: $ty),*) {
            let _cs = CriticalGuard::<P>::enter();
            let mut buf = [0u8; $evt::MAX_LEN];
            let len = $evt { ts: P::timestamp() $(, $f: $v)* }.encode(&mut buf);
            self.emit(&buf[..len], $evt::IS_METADATA);
        }
    };
    ($(#[$m:meta])* fn $hook:ident($($arg:ident: $ty:ty),*) => $evt:ident { $($f:ident: $v:expr),* $(,)? }) => {
        $(#[$m])*
        pub fn $hook(&self, $($arg: $ty),*) {
            let _cs = CriticalGuard::<P>::enter();
            let mut buf = [0u8; $evt::MAX_LEN];
            let len = $evt { $($f: $v),* }.encode(&mut buf);
            self.emit(&buf[..len], $evt::IS_METADATA);
        }
    };
}
pub(crate) use hook;

impl<P: Port, B: Backend<P>, const CORES: usize, const METADATA_BUF_SIZE: usize>
    Session<P, B, CORES, METADATA_BUF_SIZE>
{
    /// Emits the static system description (currently the timestamp
    /// resolution). Call once after init so consumers can scale timestamps;
    /// with the metadata buffer enabled it reaches every later stream start
    /// through replay.
    pub fn gather_system_metadata(&self) {
        let _cs = CriticalGuard::<P>::enter();
        let mut buf = [0u8; TsResolutionNs::MAX_LEN];
        let len = TsResolutionNs {
            ns: P::TIMESTAMP_RESOLUTION_NS,
        }
        .encode(&mut buf);
        self.emit(&buf[..len], TsResolutionNs::IS_METADATA);
    }

    #[cfg(feature = "isr-trace")]
    hook! {
        /// Names an interrupt handler.
        fn isr_name(isr_id: u32, name: &str) => IsrName { isr_id: isr_id, name: name }
    }

    #[cfg(feature = "isr-trace")]
    hook! {
        /// Marks entry into an interrupt handler.
        fn isr_enter(isr_id: u32) => IsrEnter { ts, isr_id: isr_id }
    }

    #[cfg(feature = "isr-trace")]
    hook! {
        /// Marks exit from an interrupt handler.
        fn isr_exit(isr_id: u32) => IsrExit { ts, isr_id: isr_id }
    }

    #[cfg(feature = "marker-trace")]
    hook! {
        /// Names a user event marker.
        fn evtmarker_name(id: u32, name: &str) => EvtmarkerName { id: id, name: name }
    }

    #[cfg(feature = "marker-trace")]
    hook! {
        /// Records an instantaneous user event.
        fn evtmarker(id: u32, msg: &str) => Evtmarker { ts, id: id, msg: msg }
    }

    #[cfg(feature = "marker-trace")]
    hook! {
        /// Opens a user-defined span.
        fn evtmarker_begin(id: u32, msg: &str) => EvtmarkerBegin { ts, id: id, msg: msg }
    }

    #[cfg(feature = "marker-trace")]
    hook! {
        /// Closes a user-defined span.
        fn evtmarker_end(id: u32) => EvtmarkerEnd { ts, id: id }
    }

    #[cfg(feature = "marker-trace")]
    hook! {
        /// Names a user value marker.
        fn valmarker_name(id: u32, name: &str) => ValmarkerName { id: id, name: name }
    }

    #[cfg(feature = "marker-trace")]
    hook! {
        /// Samples a user value.
        fn valmarker(id: u32, val: i64) => Valmarker { ts, id: id, val: val }
    }
}
