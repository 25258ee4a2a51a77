//! Record parser: the receive half of the wire format.
//!
//! A trace byte stream is a concatenation of frames. [`RecordIter`] splits
//! on the `0x00` delimiters, unstuffs each frame and parses the fields of
//! the tagged event. A parse failure consumes only the broken frame; the
//! iterator resynchronizes on the next delimiter.

use arrayvec::ArrayString;
use thiserror::Error;

use crate::codec::{unstuff, CodecError, FieldReader};
use crate::config::MAX_STR_LEN;

#[cfg(test)]
mod test;

/// Decoded string field.
pub type Str = ArrayString<MAX_STR_LEN>;

// Largest possible record payload: tag, timestamp, id, string.
const MAX_PAYLOAD_LEN: usize = 1 + 10 + 5 + MAX_STR_LEN;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The event tag is not assigned (or its family is compiled out).
    #[error("unknown event tag {0:#04x}")]
    UnknownTag(u8),

    /// Bytes remained after the last field of the event.
    #[error("trailing bytes after the last field")]
    TrailingBytes,
}

/// One decoded trace event.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum Record {
    // 0x00
    CoreId { ts: u64, core_id: u32 },
    // 0x01
    DroppedEvtCnt { ts: u64, cnt: u32 },
    // 0x02
    TsResolutionNs { ns: u64 },

    // 0x03
    #[cfg(feature = "isr-trace")]
    IsrName { isr_id: u32, name: Str },
    // 0x04
    #[cfg(feature = "isr-trace")]
    IsrEnter { ts: u64, isr_id: u32 },
    // 0x05
    #[cfg(feature = "isr-trace")]
    IsrExit { ts: u64, isr_id: u32 },

    // 0x06
    #[cfg(feature = "marker-trace")]
    EvtmarkerName { id: u32, name: Str },
    // 0x07
    #[cfg(feature = "marker-trace")]
    Evtmarker { ts: u64, id: u32, msg: Str },
    // 0x08
    #[cfg(feature = "marker-trace")]
    EvtmarkerBegin { ts: u64, id: u32, msg: Str },
    // 0x09
    #[cfg(feature = "marker-trace")]
    EvtmarkerEnd { ts: u64, id: u32 },
    // 0x0A
    #[cfg(feature = "marker-trace")]
    ValmarkerName { id: u32, name: Str },
    // 0x0B
    #[cfg(feature = "marker-trace")]
    Valmarker { ts: u64, id: u32, val: i64 },

    // 84..=98
    #[cfg(feature = "task-trace")]
    TaskSwitchedIn { ts: u64, task_id: u32 },
    #[cfg(feature = "task-trace")]
    TaskToReadyState { ts: u64, task_id: u32 },
    #[cfg(feature = "task-trace")]
    TaskResumed { ts: u64, task_id: u32 },
    #[cfg(feature = "task-trace")]
    TaskResumedFromIsr { ts: u64, task_id: u32 },
    #[cfg(feature = "task-trace")]
    TaskSuspended { ts: u64, task_id: u32 },
    #[cfg(feature = "task-trace")]
    CurtaskDelay { ts: u64, ticks: u32 },
    #[cfg(feature = "task-trace")]
    CurtaskDelayUntil { ts: u64, time_to_wake: u32 },
    #[cfg(feature = "task-trace")]
    TaskPrioritySet { ts: u64, task_id: u32, priority: u32 },
    #[cfg(feature = "task-trace")]
    TaskPriorityInherit { ts: u64, task_id: u32, priority: u32 },
    #[cfg(feature = "task-trace")]
    TaskPriorityDisinherit { ts: u64, task_id: u32, priority: u32 },
    #[cfg(feature = "freertos-trace")]
    TaskCreated { ts: u64, task_id: u32 },
    #[cfg(feature = "freertos-trace")]
    TaskName { task_id: u32, name: Str },
    #[cfg(feature = "freertos-trace")]
    TaskIsIdleTask { task_id: u32, core_id: u32 },
    #[cfg(feature = "freertos-trace")]
    TaskIsTimerTask { task_id: u32 },
    #[cfg(feature = "task-trace")]
    TaskDeleted { ts: u64, task_id: u32 },

    // 99..=112
    #[cfg(feature = "freertos-trace")]
    QueueCreated { ts: u64, queue_id: u32 },
    #[cfg(feature = "freertos-trace")]
    QueueName { queue_id: u32, name: Str },
    #[cfg(feature = "freertos-trace")]
    QueueKind { queue_id: u32, kind: u8 },
    #[cfg(feature = "queue-trace")]
    QueueSend { ts: u64, queue_id: u32, len: u32 },
    #[cfg(feature = "queue-trace")]
    QueueSendFromIsr { ts: u64, queue_id: u32, len: u32 },
    #[cfg(feature = "queue-trace")]
    QueueOverwrite { ts: u64, queue_id: u32, len: u32 },
    #[cfg(feature = "queue-trace")]
    QueueOverwriteFromIsr { ts: u64, queue_id: u32, len: u32 },
    #[cfg(feature = "queue-trace")]
    QueueReceive { ts: u64, queue_id: u32, len: u32 },
    #[cfg(feature = "queue-trace")]
    QueueReceiveFromIsr { ts: u64, queue_id: u32, len: u32 },
    #[cfg(feature = "queue-trace")]
    QueuePeek { ts: u64, queue_id: u32, len: u32 },
    #[cfg(feature = "queue-trace")]
    QueueReset { ts: u64, queue_id: u32 },
    #[cfg(feature = "task-trace")]
    CurtaskBlockOnQueuePeek { ts: u64, queue_id: u32, ticks_to_wait: u32 },
    #[cfg(feature = "task-trace")]
    CurtaskBlockOnQueueSend { ts: u64, queue_id: u32, ticks_to_wait: u32 },
    #[cfg(feature = "task-trace")]
    CurtaskBlockOnQueueReceive { ts: u64, queue_id: u32, ticks_to_wait: u32 },

    // 113..=118
    #[cfg(all(feature = "marker-trace", feature = "freertos-trace"))]
    TaskEvtmarkerName { id: u32, task_id: u32, name: Str },
    #[cfg(all(feature = "marker-trace", feature = "freertos-trace"))]
    TaskEvtmarker { ts: u64, id: u32, msg: Str },
    #[cfg(all(feature = "marker-trace", feature = "freertos-trace"))]
    TaskEvtmarkerBegin { ts: u64, id: u32, msg: Str },
    #[cfg(all(feature = "marker-trace", feature = "freertos-trace"))]
    TaskEvtmarkerEnd { ts: u64, id: u32 },
    #[cfg(all(feature = "marker-trace", feature = "freertos-trace"))]
    TaskValmarkerName { id: u32, task_id: u32, name: Str },
    #[cfg(all(feature = "marker-trace", feature = "freertos-trace"))]
    TaskValmarker { ts: u64, id: u32, val: i64 },

    // 119..=127
    #[cfg(feature = "stream-buffer-trace")]
    StreambufferCreated { ts: u64, sb_id: u32 },
    #[cfg(feature = "stream-buffer-trace")]
    StreambufferName { sb_id: u32, name: Str },
    #[cfg(feature = "stream-buffer-trace")]
    StreambufferSend { ts: u64, sb_id: u32, len: u32 },
    #[cfg(feature = "stream-buffer-trace")]
    StreambufferSendFromIsr { ts: u64, sb_id: u32, len: u32 },
    #[cfg(feature = "stream-buffer-trace")]
    StreambufferReceive { ts: u64, sb_id: u32, len: u32 },
    #[cfg(feature = "stream-buffer-trace")]
    StreambufferReceiveFromIsr { ts: u64, sb_id: u32, len: u32 },
    #[cfg(feature = "stream-buffer-trace")]
    StreambufferReset { ts: u64, sb_id: u32 },
    #[cfg(feature = "stream-buffer-trace")]
    CurtaskBlockOnStreambufferSend { ts: u64, sb_id: u32, ticks_to_wait: u32 },
    #[cfg(feature = "stream-buffer-trace")]
    CurtaskBlockOnStreambufferReceive { ts: u64, sb_id: u32, ticks_to_wait: u32 },
}

fn str_field(r: &mut FieldReader) -> Result<Str, CodecError> {
    let s = r.str()?;
    Str::from(s).map_err(|_| CodecError::MalformedStr)
}

impl Record {
    /// Parses one unstuffed record payload.
    pub fn parse(payload: &[u8]) -> Result<Self, DecodeError> {
        let mut r = FieldReader::new(payload);
        let tag = r.u8()?;
        let record = match tag {
            0x00 => Self::CoreId {
                ts: r.u64()?,
                core_id: r.u32()?,
            },
            0x01 => Self::DroppedEvtCnt {
                ts: r.u64()?,
                cnt: r.u32()?,
            },
            0x02 => Self::TsResolutionNs { ns: r.u64()? },

            #[cfg(feature = "isr-trace")]
            0x03 => Self::IsrName {
                isr_id: r.u32()?,
                name: str_field(&mut r)?,
            },
            #[cfg(feature = "isr-trace")]
            0x04 => Self::IsrEnter {
                ts: r.u64()?,
                isr_id: r.u32()?,
            },
            #[cfg(feature = "isr-trace")]
            0x05 => Self::IsrExit {
                ts: r.u64()?,
                isr_id: r.u32()?,
            },

            #[cfg(feature = "marker-trace")]
            0x06 => Self::EvtmarkerName {
                id: r.u32()?,
                name: str_field(&mut r)?,
            },
            #[cfg(feature = "marker-trace")]
            0x07 => Self::Evtmarker {
                ts: r.u64()?,
                id: r.u32()?,
                msg: str_field(&mut r)?,
            },
            #[cfg(feature = "marker-trace")]
            0x08 => Self::EvtmarkerBegin {
                ts: r.u64()?,
                id: r.u32()?,
                msg: str_field(&mut r)?,
            },
            #[cfg(feature = "marker-trace")]
            0x09 => Self::EvtmarkerEnd {
                ts: r.u64()?,
                id: r.u32()?,
            },
            #[cfg(feature = "marker-trace")]
            0x0A => Self::ValmarkerName {
                id: r.u32()?,
                name: str_field(&mut r)?,
            },
            #[cfg(feature = "marker-trace")]
            0x0B => Self::Valmarker {
                ts: r.u64()?,
                id: r.u32()?,
                val: r.s64()?,
            },

            #[cfg(feature = "task-trace")]
            84 => Self::TaskSwitchedIn {
                ts: r.u64()?,
                task_id: r.u32()?,
            },
            #[cfg(feature = "task-trace")]
            85 => Self::TaskToReadyState {
                ts: r.u64()?,
                task_id: r.u32()?,
            },
            #[cfg(feature = "task-trace")]
            86 => Self::TaskResumed {
                ts: r.u64()?,
                task_id: r.u32()?,
            },
            #[cfg(feature = "task-trace")]
            87 => Self::TaskResumedFromIsr {
                ts: r.u64()?,
                task_id: r.u32()?,
            },
            #[cfg(feature = "task-trace")]
            88 => Self::TaskSuspended {
                ts: r.u64()?,
                task_id: r.u32()?,
            },
            #[cfg(feature = "task-trace")]
            89 => Self::CurtaskDelay {
                ts: r.u64()?,
                ticks: r.u32()?,
            },
            #[cfg(feature = "task-trace")]
            90 => Self::CurtaskDelayUntil {
                ts: r.u64()?,
                time_to_wake: r.u32()?,
            },
            #[cfg(feature = "task-trace")]
            91 => Self::TaskPrioritySet {
                ts: r.u64()?,
                task_id: r.u32()?,
                priority: r.u32()?,
            },
            #[cfg(feature = "task-trace")]
            92 => Self::TaskPriorityInherit {
                ts: r.u64()?,
                task_id: r.u32()?,
                priority: r.u32()?,
            },
            #[cfg(feature = "task-trace")]
            93 => Self::TaskPriorityDisinherit {
                ts: r.u64()?,
                task_id: r.u32()?,
                priority: r.u32()?,
            },
            #[cfg(feature = "freertos-trace")]
            94 => Self::TaskCreated {
                ts: r.u64()?,
                task_id: r.u32()?,
            },
            #[cfg(feature = "freertos-trace")]
            95 => Self::TaskName {
                task_id: r.u32()?,
                name: str_field(&mut r)?,
            },
            #[cfg(feature = "freertos-trace")]
            96 => Self::TaskIsIdleTask {
                task_id: r.u32()?,
                core_id: r.u32()?,
            },
            #[cfg(feature = "freertos-trace")]
            97 => Self::TaskIsTimerTask { task_id: r.u32()? },
            #[cfg(feature = "task-trace")]
            98 => Self::TaskDeleted {
                ts: r.u64()?,
                task_id: r.u32()?,
            },

            #[cfg(feature = "freertos-trace")]
            99 => Self::QueueCreated {
                ts: r.u64()?,
                queue_id: r.u32()?,
            },
            #[cfg(feature = "freertos-trace")]
            100 => Self::QueueName {
                queue_id: r.u32()?,
                name: str_field(&mut r)?,
            },
            #[cfg(feature = "freertos-trace")]
            101 => Self::QueueKind {
                queue_id: r.u32()?,
                kind: r.u8()?,
            },
            #[cfg(feature = "queue-trace")]
            102 => Self::QueueSend {
                ts: r.u64()?,
                queue_id: r.u32()?,
                len: r.u32()?,
            },
            #[cfg(feature = "queue-trace")]
            103 => Self::QueueSendFromIsr {
                ts: r.u64()?,
                queue_id: r.u32()?,
                len: r.u32()?,
            },
            #[cfg(feature = "queue-trace")]
            104 => Self::QueueOverwrite {
                ts: r.u64()?,
                queue_id: r.u32()?,
                len: r.u32()?,
            },
            #[cfg(feature = "queue-trace")]
            105 => Self::QueueOverwriteFromIsr {
                ts: r.u64()?,
                queue_id: r.u32()?,
                len: r.u32()?,
            },
            #[cfg(feature = "queue-trace")]
            106 => Self::QueueReceive {
                ts: r.u64()?,
                queue_id: r.u32()?,
                len: r.u32()?,
            },
            #[cfg(feature = "queue-trace")]
            107 => Self::QueueReceiveFromIsr {
                ts: r.u64()?,
                queue_id: r.u32()?,
                len: r.u32()?,
            },
            #[cfg(feature = "queue-trace")]
            108 => Self::QueuePeek {
                ts: r.u64()?,
                queue_id: r.u32()?,
                len: r.u32()?,
            },
            #[cfg(feature = "queue-trace")]
            109 => Self::QueueReset {
                ts: r.u64()?,
                queue_id: r.u32()?,
            },
            #[cfg(feature = "task-trace")]
            110 => Self::CurtaskBlockOnQueuePeek {
                ts: r.u64()?,
                queue_id: r.u32()?,
                ticks_to_wait: r.u32()?,
            },
            #[cfg(feature = "task-trace")]
            111 => Self::CurtaskBlockOnQueueSend {
                ts: r.u64()?,
                queue_id: r.u32()?,
                ticks_to_wait: r.u32()?,
            },
            #[cfg(feature = "task-trace")]
            112 => Self::CurtaskBlockOnQueueReceive {
                ts: r.u64()?,
                queue_id: r.u32()?,
                ticks_to_wait: r.u32()?,
            },

            #[cfg(all(feature = "marker-trace", feature = "freertos-trace"))]
            113 => Self::TaskEvtmarkerName {
                id: r.u32()?,
                task_id: r.u32()?,
                name: str_field(&mut r)?,
            },
            #[cfg(all(feature = "marker-trace", feature = "freertos-trace"))]
            114 => Self::TaskEvtmarker {
                ts: r.u64()?,
                id: r.u32()?,
                msg: str_field(&mut r)?,
            },
            #[cfg(all(feature = "marker-trace", feature = "freertos-trace"))]
            115 => Self::TaskEvtmarkerBegin {
                ts: r.u64()?,
                id: r.u32()?,
                msg: str_field(&mut r)?,
            },
            #[cfg(all(feature = "marker-trace", feature = "freertos-trace"))]
            116 => Self::TaskEvtmarkerEnd {
                ts: r.u64()?,
                id: r.u32()?,
            },
            #[cfg(all(feature = "marker-trace", feature = "freertos-trace"))]
            117 => Self::TaskValmarkerName {
                id: r.u32()?,
                task_id: r.u32()?,
                name: str_field(&mut r)?,
            },
            #[cfg(all(feature = "marker-trace", feature = "freertos-trace"))]
            118 => Self::TaskValmarker {
                ts: r.u64()?,
                id: r.u32()?,
                val: r.s64()?,
            },

            #[cfg(feature = "stream-buffer-trace")]
            119 => Self::StreambufferCreated {
                ts: r.u64()?,
                sb_id: r.u32()?,
            },
            #[cfg(feature = "stream-buffer-trace")]
            120 => Self::StreambufferName {
                sb_id: r.u32()?,
                name: str_field(&mut r)?,
            },
            #[cfg(feature = "stream-buffer-trace")]
            121 => Self::StreambufferSend {
                ts: r.u64()?,
                sb_id: r.u32()?,
                len: r.u32()?,
            },
            #[cfg(feature = "stream-buffer-trace")]
            122 => Self::StreambufferSendFromIsr {
                ts: r.u64()?,
                sb_id: r.u32()?,
                len: r.u32()?,
            },
            #[cfg(feature = "stream-buffer-trace")]
            123 => Self::StreambufferReceive {
                ts: r.u64()?,
                sb_id: r.u32()?,
                len: r.u32()?,
            },
            #[cfg(feature = "stream-buffer-trace")]
            124 => Self::StreambufferReceiveFromIsr {
                ts: r.u64()?,
                sb_id: r.u32()?,
                len: r.u32()?,
            },
            #[cfg(feature = "stream-buffer-trace")]
            125 => Self::StreambufferReset {
                ts: r.u64()?,
                sb_id: r.u32()?,
            },
            #[cfg(feature = "stream-buffer-trace")]
            126 => Self::CurtaskBlockOnStreambufferSend {
                ts: r.u64()?,
                sb_id: r.u32()?,
                ticks_to_wait: r.u32()?,
            },
            #[cfg(feature = "stream-buffer-trace")]
            127 => Self::CurtaskBlockOnStreambufferReceive {
                ts: r.u64()?,
                sb_id: r.u32()?,
                ticks_to_wait: r.u32()?,
            },

            _ => return Err(DecodeError::UnknownTag(tag)),
        };
        if !r.is_empty() {
            return Err(DecodeError::TrailingBytes);
        }
        Ok(record)
    }

    /// Unstuffs and parses one framed record.
    pub fn parse_from_frame(frame: &[u8]) -> Result<Self, DecodeError> {
        let mut payload = [0u8; MAX_PAYLOAD_LEN];
        let (len, _) = unstuff(frame, &mut payload)?;
        Self::parse(&payload[..len])
    }
}

/// Iterator over the records of a trace byte stream.
pub struct RecordIter<'a> {
    buf: &'a [u8],
}

impl<'a> RecordIter<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    // Skip past the next frame delimiter so one broken frame does not take
    // the rest of the stream with it.
    fn resync(&mut self) {
        match self.buf.iter().position(|&b| b == 0) {
            Some(i) => self.buf = &self.buf[i + 1..],
            None => self.buf = &[],
        }
    }
}

impl Iterator for RecordIter<'_> {
    type Item = Result<Record, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.buf.is_empty() {
            return None;
        }
        let mut payload = [0u8; MAX_PAYLOAD_LEN];
        match unstuff(self.buf, &mut payload) {
            Ok((len, consumed)) => {
                self.buf = &self.buf[consumed..];
                Some(Record::parse(&payload[..len]))
            }
            Err(e) => {
                self.resync();
                Some(Err(e.into()))
            }
        }
    }
}
