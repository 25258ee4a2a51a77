//! Build-time configuration.
//!
//! These constants size stack and static buffers, so they are fixed at build
//! time. Override the defaults through the environment when building:
//! `TBAND_MAX_STR_LEN` (default 20) and `TBAND_TRACE_DROP_CNT_EVERY`
//! (default 50, 0 turns periodic drop-count publishing off).

include!(concat!(env!("OUT_DIR"), "/config_gen.rs"));
