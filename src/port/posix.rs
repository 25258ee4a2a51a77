//! Reference port for POSIX hosts, mainly for simulation and tests.
//!
//! A process cannot disable preemption, so the critical section is
//! approximated with a process-wide recursive spinlock keyed on
//! `pthread_self`. That preserves the mutual-exclusion and nesting contract
//! of [`Port`], which is all the core relies on off-target.

use core::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

use super::{Port, SnapshotPort};

pub struct PosixPort;

static OWNER: AtomicUsize = AtomicUsize::new(0);
static DEPTH: AtomicU32 = AtomicU32::new(0);

impl Port for PosixPort {
    const TIMESTAMP_RESOLUTION_NS: u64 = 1;

    fn timestamp() -> u64 {
        let mut ts = libc::timespec {
            tv_sec: 0,
            tv_nsec: 0,
        };
        // CLOCK_MONOTONIC cannot fail with a valid timespec pointer.
        unsafe { libc::clock_gettime(libc::CLOCK_MONOTONIC, &mut ts) };
        ts.tv_sec as u64 * 1_000_000_000 + ts.tv_nsec as u64
    }

    fn core_id() -> u32 {
        #[cfg(target_os = "linux")]
        {
            let cpu = unsafe { libc::sched_getcpu() };
            if cpu >= 0 {
                return cpu as u32;
            }
        }
        0
    }

    fn enter_critical() {
        // pthread_self is never 0, which doubles as the "unowned" marker.
        let me = unsafe { libc::pthread_self() } as usize;
        if OWNER.load(Ordering::Acquire) == me {
            DEPTH.fetch_add(1, Ordering::Relaxed);
            return;
        }
        while OWNER
            .compare_exchange_weak(0, me, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            core::hint::spin_loop();
        }
        DEPTH.store(1, Ordering::Relaxed);
    }

    fn exit_critical() {
        if DEPTH.fetch_sub(1, Ordering::Relaxed) == 1 {
            OWNER.store(0, Ordering::Release);
        }
    }
}

impl SnapshotPort for PosixPort {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn timestamp_is_monotonic() {
        let a = PosixPort::timestamp();
        let b = PosixPort::timestamp();
        assert!(b >= a);
    }

    #[test]
    fn critical_section_nests() {
        PosixPort::enter_critical();
        PosixPort::enter_critical();
        PosixPort::exit_critical();
        PosixPort::exit_critical();

        // Fully released: a fresh enter must not deadlock.
        PosixPort::enter_critical();
        PosixPort::exit_critical();
    }
}
