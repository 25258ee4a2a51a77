use std::string::String;
use std::vec;
use std::vec::Vec;

use super::*;
use crate::codec::{frame_max_len, FrameWriter};
use crate::config::MAX_STR_LEN;

// Wire compatibility: tag values and metadata bits are never renumbered.
#[test]
fn tag_table() {
    let table: &[(u8, bool)] = &[
        (CoreId::TAG, CoreId::IS_METADATA),
        (DroppedEvtCnt::TAG, DroppedEvtCnt::IS_METADATA),
        (TsResolutionNs::TAG, TsResolutionNs::IS_METADATA),
        (IsrName::TAG, IsrName::IS_METADATA),
        (IsrEnter::TAG, IsrEnter::IS_METADATA),
        (IsrExit::TAG, IsrExit::IS_METADATA),
        (EvtmarkerName::TAG, EvtmarkerName::IS_METADATA),
        (Evtmarker::TAG, Evtmarker::IS_METADATA),
        (EvtmarkerBegin::TAG, EvtmarkerBegin::IS_METADATA),
        (EvtmarkerEnd::TAG, EvtmarkerEnd::IS_METADATA),
        (ValmarkerName::TAG, ValmarkerName::IS_METADATA),
        (Valmarker::TAG, Valmarker::IS_METADATA),
    ];
    let expected: &[(u8, bool)] = &[
        (0x00, false),
        (0x01, false),
        (0x02, true),
        (0x03, true),
        (0x04, false),
        (0x05, false),
        (0x06, true),
        (0x07, false),
        (0x08, false),
        (0x09, false),
        (0x0A, true),
        (0x0B, false),
    ];
    assert_eq!(table, expected);
}

#[test]
fn freertos_tag_table() {
    use super::freertos::*;

    let table: &[(u8, bool)] = &[
        (TaskSwitchedIn::TAG, TaskSwitchedIn::IS_METADATA),
        (TaskToReadyState::TAG, TaskToReadyState::IS_METADATA),
        (TaskResumed::TAG, TaskResumed::IS_METADATA),
        (TaskResumedFromIsr::TAG, TaskResumedFromIsr::IS_METADATA),
        (TaskSuspended::TAG, TaskSuspended::IS_METADATA),
        (CurtaskDelay::TAG, CurtaskDelay::IS_METADATA),
        (CurtaskDelayUntil::TAG, CurtaskDelayUntil::IS_METADATA),
        (TaskPrioritySet::TAG, TaskPrioritySet::IS_METADATA),
        (TaskPriorityInherit::TAG, TaskPriorityInherit::IS_METADATA),
        (TaskPriorityDisinherit::TAG, TaskPriorityDisinherit::IS_METADATA),
        (TaskCreated::TAG, TaskCreated::IS_METADATA),
        (TaskName::TAG, TaskName::IS_METADATA),
        (TaskIsIdleTask::TAG, TaskIsIdleTask::IS_METADATA),
        (TaskIsTimerTask::TAG, TaskIsTimerTask::IS_METADATA),
        (TaskDeleted::TAG, TaskDeleted::IS_METADATA),
        (QueueCreated::TAG, QueueCreated::IS_METADATA),
        (QueueName::TAG, QueueName::IS_METADATA),
        (QueueKind::TAG, QueueKind::IS_METADATA),
        (QueueSend::TAG, QueueSend::IS_METADATA),
        (QueueSendFromIsr::TAG, QueueSendFromIsr::IS_METADATA),
        (QueueOverwrite::TAG, QueueOverwrite::IS_METADATA),
        (QueueOverwriteFromIsr::TAG, QueueOverwriteFromIsr::IS_METADATA),
        (QueueReceive::TAG, QueueReceive::IS_METADATA),
        (QueueReceiveFromIsr::TAG, QueueReceiveFromIsr::IS_METADATA),
        (QueuePeek::TAG, QueuePeek::IS_METADATA),
        (QueueReset::TAG, QueueReset::IS_METADATA),
        (CurtaskBlockOnQueuePeek::TAG, CurtaskBlockOnQueuePeek::IS_METADATA),
        (CurtaskBlockOnQueueSend::TAG, CurtaskBlockOnQueueSend::IS_METADATA),
        (
            CurtaskBlockOnQueueReceive::TAG,
            CurtaskBlockOnQueueReceive::IS_METADATA,
        ),
        (TaskEvtmarkerName::TAG, TaskEvtmarkerName::IS_METADATA),
        (TaskEvtmarker::TAG, TaskEvtmarker::IS_METADATA),
        (TaskEvtmarkerBegin::TAG, TaskEvtmarkerBegin::IS_METADATA),
        (TaskEvtmarkerEnd::TAG, TaskEvtmarkerEnd::IS_METADATA),
        (TaskValmarkerName::TAG, TaskValmarkerName::IS_METADATA),
        (TaskValmarker::TAG, TaskValmarker::IS_METADATA),
        (StreambufferCreated::TAG, StreambufferCreated::IS_METADATA),
        (StreambufferName::TAG, StreambufferName::IS_METADATA),
        (StreambufferSend::TAG, StreambufferSend::IS_METADATA),
        (StreambufferSendFromIsr::TAG, StreambufferSendFromIsr::IS_METADATA),
        (StreambufferReceive::TAG, StreambufferReceive::IS_METADATA),
        (
            StreambufferReceiveFromIsr::TAG,
            StreambufferReceiveFromIsr::IS_METADATA,
        ),
        (StreambufferReset::TAG, StreambufferReset::IS_METADATA),
        (
            CurtaskBlockOnStreambufferSend::TAG,
            CurtaskBlockOnStreambufferSend::IS_METADATA,
        ),
        (
            CurtaskBlockOnStreambufferReceive::TAG,
            CurtaskBlockOnStreambufferReceive::IS_METADATA,
        ),
    ];

    // Dense in 0x54..=0x7F, metadata exactly for the name/attribute events.
    let metadata_tags = [95, 96, 97, 100, 101, 113, 117, 120];
    for (i, &(tag, is_metadata)) in table.iter().enumerate() {
        assert_eq!(tag as usize, 84 + i);
        assert_eq!(is_metadata, metadata_tags.contains(&tag), "tag {}", tag);
    }
    assert_eq!(table.last().unwrap().0, 0x7F);
}

// Expected records are built through the codec itself, field by field.
fn expect_frame(build: impl FnOnce(&mut FrameWriter)) -> Vec<u8> {
    let mut buf = vec![0u8; 256];
    let mut w = FrameWriter::start(&mut buf);
    build(&mut w);
    let len = w.finish();
    buf.truncate(len);
    buf
}

#[test]
fn evtmarker_span_layout() {
    let mut buf = [0u8; EvtmarkerBegin::MAX_LEN];
    let len = EvtmarkerBegin {
        ts: 100,
        id: 7,
        msg: "hi",
    }
    .encode(&mut buf);
    let expected = expect_frame(|w| {
        w.u8(0x08);
        w.u64(100);
        w.u32(7);
        w.str("hi");
    });
    assert_eq!(&buf[..len], expected);

    let mut buf = [0u8; EvtmarkerEnd::MAX_LEN];
    let len = EvtmarkerEnd { ts: 200, id: 7 }.encode(&mut buf);
    let expected = expect_frame(|w| {
        w.u8(0x09);
        w.u64(200);
        w.u32(7);
    });
    assert_eq!(&buf[..len], expected);
}

#[test]
fn core_id_layout() {
    let mut buf = [0u8; CoreId::MAX_LEN];
    let len = CoreId { ts: 0, core_id: 0 }.encode(&mut buf);
    let expected = expect_frame(|w| {
        w.u8(0x00);
        w.u64(0);
        w.u32(0);
    });
    assert_eq!(&buf[..len], expected);
}

#[test]
fn metadata_events_carry_no_timestamp() {
    let mut buf = [0u8; IsrName::MAX_LEN];
    let len = IsrName {
        isr_id: 3,
        name: "uart",
    }
    .encode(&mut buf);
    let expected = expect_frame(|w| {
        w.u8(0x03);
        w.u32(3);
        w.str("uart");
    });
    assert_eq!(&buf[..len], expected);
}

// Worst-case field values never exceed the declared MAX_LEN.
#[test]
fn encoded_len_is_bounded_by_max_len() {
    use super::freertos::TaskEvtmarkerName;

    let worst: String = core::iter::repeat('\u{7f}').take(MAX_STR_LEN).collect();

    let mut buf = [0u8; Evtmarker::MAX_LEN];
    let len = Evtmarker {
        ts: u64::MAX,
        id: u32::MAX,
        msg: &worst,
    }
    .encode(&mut buf);
    assert!(len <= Evtmarker::MAX_LEN);

    let mut buf = [0u8; Valmarker::MAX_LEN];
    let len = Valmarker {
        ts: u64::MAX,
        id: u32::MAX,
        val: i64::MIN + 1,
    }
    .encode(&mut buf);
    assert!(len <= Valmarker::MAX_LEN);

    let mut buf = [0u8; TaskEvtmarkerName::MAX_LEN];
    let len = TaskEvtmarkerName {
        id: u32::MAX,
        task_id: u32::MAX,
        name: &worst,
    }
    .encode(&mut buf);
    assert!(len <= TaskEvtmarkerName::MAX_LEN);
}

#[test]
fn max_len_accounts_for_framing() {
    use super::freertos::QueueKind;

    // tag + 10-byte ts + 5-byte id, framed.
    assert_eq!(EvtmarkerEnd::MAX_LEN, frame_max_len(16));
    assert_eq!(Evtmarker::MAX_LEN, frame_max_len(16 + MAX_STR_LEN));
    assert_eq!(QueueKind::MAX_LEN, frame_max_len(1 + 5 + 1));
}
