use std::vec;
use std::vec::Vec;

use proptest::prelude::*;

use super::{frame_max_len, unstuff, CodecError, FieldReader, FrameWriter};

fn frame(payload: &[u8]) -> Vec<u8> {
    let mut buf = vec![0u8; frame_max_len(payload.len())];
    let mut w = FrameWriter::start(&mut buf);
    for &b in payload {
        w.write(b);
    }
    let len = w.finish();
    buf.truncate(len);
    buf
}

fn unframe(framed: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; framed.len()];
    let (len, consumed) = unstuff(framed, &mut out).unwrap();
    assert_eq!(consumed, framed.len());
    out.truncate(len);
    out
}

fn frame_u64(v: u64) -> Vec<u8> {
    let mut buf = [0u8; frame_max_len(super::MAX_VARINT64_LEN)];
    let mut w = FrameWriter::start(&mut buf);
    w.u64(v);
    let len = w.finish();
    buf[..len].to_vec()
}

fn frame_s64(v: i64) -> Vec<u8> {
    let mut buf = [0u8; frame_max_len(super::MAX_VARINT64_LEN)];
    let mut w = FrameWriter::start(&mut buf);
    w.s64(v);
    let len = w.finish();
    buf[..len].to_vec()
}

#[test]
fn empty_payload_frames_to_two_bytes() {
    assert_eq!(frame(&[]), [0x01, 0x00]);
}

#[test]
fn single_zero() {
    assert_eq!(frame(&[0x00]), [0x01, 0x01, 0x00]);
    assert_eq!(unframe(&[0x01, 0x01, 0x00]), [0x00]);
}

#[test]
fn single_nonzero() {
    assert_eq!(frame(&[0x05]), [0x02, 0x05, 0x00]);
}

#[test]
fn interior_zeros() {
    assert_eq!(
        frame(&[0x11, 0x00, 0x22, 0x00]),
        [0x02, 0x11, 0x02, 0x22, 0x01, 0x00]
    );
}

#[test]
fn full_block_reuses_code_slot_as_terminator() {
    let payload = [0xAB; 254];
    let framed = frame(&payload);
    assert_eq!(framed.len(), 256);
    assert_eq!(framed[0], 0xFF);
    assert_eq!(*framed.last().unwrap(), 0x00);
    assert_eq!(unframe(&framed), payload);
}

#[test]
fn oversized_block_hits_the_length_bound() {
    let payload = [0x42; 255];
    let framed = frame(&payload);
    assert_eq!(framed.len(), frame_max_len(255));
    assert_eq!(unframe(&framed), payload);
}

#[test]
fn varint_fixtures() {
    assert_eq!(unframe(&frame_u64(0)), [0x00]);
    assert_eq!(unframe(&frame_u64(1)), [0x01]);
    assert_eq!(unframe(&frame_u64(127)), [0x7F]);
    assert_eq!(unframe(&frame_u64(128)), [0x80, 0x01]);
    assert_eq!(unframe(&frame_u64(300)), [0xAC, 0x02]);
    assert_eq!(
        unframe(&frame_u64(u32::MAX as u64)),
        [0xFF, 0xFF, 0xFF, 0xFF, 0x0F]
    );
    assert_eq!(
        unframe(&frame_u64(u64::MAX)),
        [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01]
    );
}

#[test]
fn s64_fixtures() {
    assert_eq!(unframe(&frame_s64(0)), [0x00]);
    assert_eq!(unframe(&frame_s64(1)), [0x02]);
    assert_eq!(unframe(&frame_s64(-1)), [0x03]);
    // The negative extreme is the single-byte escape.
    assert_eq!(unframe(&frame_s64(i64::MIN)), [0x01]);
}

#[test]
fn s64_boundaries_roundtrip() {
    for v in [0, 1, -1, i64::MIN, i64::MAX, i64::MIN + 1] {
        let framed = frame_s64(v);
        let payload = unframe(&framed);
        let mut r = FieldReader::new(&payload);
        assert_eq!(r.s64().unwrap(), v, "value {}", v);
        assert!(r.is_empty());
    }
}

#[test]
fn str_stops_at_nul_and_truncates() {
    let mut buf = [0u8; frame_max_len(crate::config::MAX_STR_LEN)];

    let mut w = FrameWriter::start(&mut buf);
    w.str("ab\0cd");
    let len = w.finish();
    assert_eq!(unframe(&buf[..len]), b"ab");

    let long: std::string::String = core::iter::repeat('x')
        .take(crate::config::MAX_STR_LEN + 5)
        .collect();
    let mut w = FrameWriter::start(&mut buf);
    w.str(&long);
    let len = w.finish();
    assert_eq!(unframe(&buf[..len]).len(), crate::config::MAX_STR_LEN);
}

#[test]
fn reader_rejects_dangling_continuation() {
    let mut r = FieldReader::new(&[0x80]);
    assert_eq!(r.u64(), Err(CodecError::TruncatedField));
}

#[test]
fn reader_rejects_overlong_varint() {
    let mut r = FieldReader::new(&[0xFF; 11]);
    assert_eq!(r.u64(), Err(CodecError::MalformedVarint));
}

#[test]
fn reader_rejects_u32_overflow() {
    let payload = unframe(&frame_u64(u32::MAX as u64 + 1));
    let mut r = FieldReader::new(&payload);
    assert_eq!(r.u32(), Err(CodecError::MalformedVarint));
}

#[test]
fn unstuff_rejects_truncated_frames() {
    let mut out = [0u8; 16];
    assert_eq!(unstuff(&[], &mut out), Err(CodecError::TruncatedFrame));
    assert_eq!(
        unstuff(&[0x03, 0x01], &mut out),
        Err(CodecError::TruncatedFrame)
    );
}

proptest! {
    #[test]
    fn u64_roundtrip(v: u64) {
        let payload = unframe(&frame_u64(v));
        let mut r = FieldReader::new(&payload);
        prop_assert_eq!(r.u64().unwrap(), v);
        prop_assert!(r.is_empty());
    }

    #[test]
    fn u32_roundtrip(v: u32) {
        let mut buf = [0u8; frame_max_len(super::MAX_VARINT32_LEN)];
        let mut w = FrameWriter::start(&mut buf);
        w.u32(v);
        let len = w.finish();
        let payload = unframe(&buf[..len]);
        let mut r = FieldReader::new(&payload);
        prop_assert_eq!(r.u32().unwrap(), v);
    }

    #[test]
    fn s64_roundtrip(v: i64) {
        let payload = unframe(&frame_s64(v));
        let mut r = FieldReader::new(&payload);
        prop_assert_eq!(r.s64().unwrap(), v);
    }

    // The only zero in a framed record is the terminator, and the framed
    // length never exceeds the declared worst case.
    #[test]
    fn frames_are_self_delimiting(payload in proptest::collection::vec(any::<u8>(), 0..600)) {
        let framed = frame(&payload);
        prop_assert!(framed.len() <= frame_max_len(payload.len()));
        prop_assert_eq!(*framed.last().unwrap(), 0x00);
        prop_assert!(!framed[..framed.len() - 1].contains(&0x00));
        prop_assert_eq!(unframe(&framed), payload);
    }
}
