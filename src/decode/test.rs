use std::vec::Vec;

use super::{DecodeError, Record, RecordIter};
use crate::codec::{CodecError, FrameWriter};
use crate::encode;
use crate::encode::freertos;

fn encode_into<const N: usize>(stream: &mut Vec<u8>, len: usize, buf: [u8; N]) {
    stream.extend_from_slice(&buf[..len]);
}

#[test]
fn roundtrip_mixed_stream() {
    let mut stream = Vec::new();

    let mut buf = [0u8; encode::CoreId::MAX_LEN];
    let len = encode::CoreId { ts: 0, core_id: 1 }.encode(&mut buf);
    encode_into(&mut stream, len, buf);

    let mut buf = [0u8; encode::IsrName::MAX_LEN];
    let len = encode::IsrName {
        isr_id: 2,
        name: "uart0",
    }
    .encode(&mut buf);
    encode_into(&mut stream, len, buf);

    let mut buf = [0u8; encode::Valmarker::MAX_LEN];
    let len = encode::Valmarker {
        ts: 1234,
        id: 3,
        val: -77,
    }
    .encode(&mut buf);
    encode_into(&mut stream, len, buf);

    let mut buf = [0u8; freertos::TaskSwitchedIn::MAX_LEN];
    let len = freertos::TaskSwitchedIn {
        ts: 5000,
        task_id: 4,
    }
    .encode(&mut buf);
    encode_into(&mut stream, len, buf);

    let records: Vec<_> = RecordIter::new(&stream).collect::<Result<_, _>>().unwrap();
    assert_eq!(
        records,
        [
            Record::CoreId { ts: 0, core_id: 1 },
            Record::IsrName {
                isr_id: 2,
                name: super::Str::from("uart0").unwrap(),
            },
            Record::Valmarker {
                ts: 1234,
                id: 3,
                val: -77,
            },
            Record::TaskSwitchedIn {
                ts: 5000,
                task_id: 4,
            },
        ]
    );
}

#[test]
fn unknown_tag_is_reported() {
    let mut buf = [0u8; 8];
    let mut w = FrameWriter::start(&mut buf);
    w.u8(0x30);
    let len = w.finish();

    let mut it = RecordIter::new(&buf[..len]);
    assert_eq!(it.next(), Some(Err(DecodeError::UnknownTag(0x30))));
    assert_eq!(it.next(), None);
}

#[test]
fn trailing_bytes_are_rejected() {
    let mut buf = [0u8; 16];
    let mut w = FrameWriter::start(&mut buf);
    w.u8(0x02); // ts_resolution_ns
    w.u64(1000);
    w.u64(7); // stray extra field
    let len = w.finish();

    assert_eq!(
        Record::parse_from_frame(&buf[..len]),
        Err(DecodeError::TrailingBytes)
    );
}

#[test]
fn iterator_resyncs_after_a_broken_frame() {
    // Code byte claims four payload bytes, but the frame ends first.
    let mut stream: Vec<u8> = [0x05, 0x01, 0x00].to_vec();

    let mut buf = [0u8; encode::TsResolutionNs::MAX_LEN];
    let len = encode::TsResolutionNs { ns: 125 }.encode(&mut buf);
    stream.extend_from_slice(&buf[..len]);

    let mut it = RecordIter::new(&stream);
    assert!(matches!(it.next(), Some(Err(DecodeError::Codec(_)))));
    assert_eq!(it.next(), Some(Ok(Record::TsResolutionNs { ns: 125 })));
    assert_eq!(it.next(), None);
}

#[test]
fn oversized_string_is_rejected() {
    // A frame whose tail is longer than any legal string field.
    let mut buf = [0u8; 128];
    let mut w = FrameWriter::start(&mut buf);
    w.u8(0x03); // isr_name
    w.u32(1);
    for _ in 0..crate::config::MAX_STR_LEN + 1 {
        w.write(b'x');
    }
    let len = w.finish();

    assert_eq!(
        Record::parse_from_frame(&buf[..len]),
        Err(DecodeError::Codec(CodecError::MalformedStr))
    );
}
