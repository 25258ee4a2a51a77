//! Event encoders.
//!
//! Each event kind is a struct carrying only its real fields, with the wire
//! tag, the metadata routing bit and the worst-case framed length exposed as
//! associated constants. `MAX_LEN` is usable in array-length position, so the
//! hook surface stack-allocates its record buffers at exactly the right size.
//!
//! Field order on the wire is `(tag, ts?, id?, fields…)`. Metadata events
//! (names, static attributes) carry no timestamp and are replayed to
//! late-attaching consumers; everything else is timestamped.

pub use base::*;

mod base;

#[cfg(feature = "freertos-trace")]
pub mod freertos;

#[cfg(test)]
mod test;

macro_rules! evt {
    ($(#[$m:meta])* $name:ident(tag = $tag:literal, metadata) { $($f:ident: $t:tt),* $(,)? }) => {
        evt!(@def $(#[$m])* $name [] (tag = $tag, md = true) { $($f: $t),* });
    };
    ($(#[$m:meta])* $name:ident(tag = $tag:literal) { $($f:ident: $t:tt),* $(,)? }) => {
        evt!(@def $(#[$m])* $name [] (tag = $tag, md = false) { $($f: $t),* });
    };
    ($(#[$m:meta])* $name:ident<'a>(tag = $tag:literal, metadata) { $($f:ident: $t:tt),* $(,)? }) => {
        evt!(@def $(#[$m])* $name ['a] (tag = $tag, md = true) { $($f: $t),* });
    };
    ($(#[$m:meta])* $name:ident<'a>(tag = $tag:literal) { $($f:ident: $t:tt),* $(,)? }) => {
        evt!(@def $(#[$m])* $name ['a] (tag = $tag, md = false) { $($f: $t),* });
    };

    (@def $(#[$m:meta])* $name:ident [] (tag = $tag:literal, md = $md:literal)
     { $($f:ident: $t:tt),* }) => {
        $(#[$m])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name {
            $(pub $f: evt!(@ty $t),)*
        }

        impl $name {
            pub const TAG: u8 = $tag;
            pub const IS_METADATA: bool = $md;

            /// Worst-case framed length of this event.
            pub const MAX_LEN: usize =
                $crate::codec::frame_max_len(1 $(+ evt!(@max $t))*);

            /// Encodes the event into `buf`, which must hold at least
            /// [`MAX_LEN`](Self::MAX_LEN) bytes. Returns the framed length.
            pub fn encode(&self, buf: &mut [u8]) -> usize {
                let mut w = $crate::codec::FrameWriter::start(buf);
                w.u8(Self::TAG);
                $(evt!(@put w, self.$f, $t);)*
                w.finish()
            }
        }
    };

    (@def $(#[$m:meta])* $name:ident ['a] (tag = $tag:literal, md = $md:literal)
     { $($f:ident: $t:tt),* }) => {
        $(#[$m])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name<'a> {
            $(pub $f: evt!(@tyl $t),)*
        }

        impl<'a> $name<'a> {
            pub const TAG: u8 = $tag;
            pub const IS_METADATA: bool = $md;

            /// Worst-case framed length of this event.
            pub const MAX_LEN: usize =
                $crate::codec::frame_max_len(1 $(+ evt!(@max $t))*);

            /// Encodes the event into `buf`, which must hold at least
            /// [`MAX_LEN`](Self::MAX_LEN) bytes. Returns the framed length.
            pub fn encode(&self, buf: &mut [u8]) -> usize {
                let mut w = $crate::codec::FrameWriter::start(buf);
                w.u8(Self::TAG);
                $(evt!(@put w, self.$f, $t);)*
                w.finish()
            }
        }
    };

    (@ty u8) => { u8 };
    (@ty u32) => { u32 };
    (@ty u64) => { u64 };
    (@ty s64) => { i64 };

    (@tyl u8) => { u8 };
    (@tyl u32) => { u32 };
    (@tyl u64) => { u64 };
    (@tyl s64) => { i64 };
    (@tyl str) => { &'a str };

    (@max u8) => { 1 };
    (@max u32) => { $crate::codec::MAX_VARINT32_LEN };
    (@max u64) => { $crate::codec::MAX_VARINT64_LEN };
    (@max s64) => { $crate::codec::MAX_VARINT64_LEN };
    (@max str) => { $crate::config::MAX_STR_LEN };

    (@put $w:ident, $v:expr, u8) => { $w.u8($v) };
    (@put $w:ident, $v:expr, u32) => { $w.u32($v) };
    (@put $w:ident, $v:expr, u64) => { $w.u64($v) };
    (@put $w:ident, $v:expr, s64) => { $w.s64($v) };
    (@put $w:ident, $v:expr, str) => { $w.str($v) };
}
pub(crate) use evt;
