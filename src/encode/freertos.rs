//! Scheduler-family events. Tags are dense in `0x54..=0x7F` and never
//! renumbered; resource ids are the ones handed out by
//! [`alloc_entity_id`](crate::Session::alloc_entity_id) (0 means "no id").

use super::evt;

#[cfg(feature = "task-trace")]
evt! {
    /// A task was selected to run on the reporting core.
    TaskSwitchedIn(tag = 84) { ts: u64, task_id: u32 }
}

#[cfg(feature = "task-trace")]
evt! {
    TaskToReadyState(tag = 85) { ts: u64, task_id: u32 }
}

#[cfg(feature = "task-trace")]
evt! {
    TaskResumed(tag = 86) { ts: u64, task_id: u32 }
}

#[cfg(feature = "task-trace")]
evt! {
    TaskResumedFromIsr(tag = 87) { ts: u64, task_id: u32 }
}

#[cfg(feature = "task-trace")]
evt! {
    TaskSuspended(tag = 88) { ts: u64, task_id: u32 }
}

#[cfg(feature = "task-trace")]
evt! {
    /// The current task delays itself for `ticks`.
    CurtaskDelay(tag = 89) { ts: u64, ticks: u32 }
}

#[cfg(feature = "task-trace")]
evt! {
    CurtaskDelayUntil(tag = 90) { ts: u64, time_to_wake: u32 }
}

#[cfg(feature = "task-trace")]
evt! {
    TaskPrioritySet(tag = 91) { ts: u64, task_id: u32, priority: u32 }
}

#[cfg(feature = "task-trace")]
evt! {
    TaskPriorityInherit(tag = 92) { ts: u64, task_id: u32, priority: u32 }
}

#[cfg(feature = "task-trace")]
evt! {
    TaskPriorityDisinherit(tag = 93) { ts: u64, task_id: u32, priority: u32 }
}

evt! {
    TaskCreated(tag = 94) { ts: u64, task_id: u32 }
}

evt! {
    TaskName<'a>(tag = 95, metadata) { task_id: u32, name: str }
}

evt! {
    /// Marks a task as the idle task of one core.
    TaskIsIdleTask(tag = 96, metadata) { task_id: u32, core_id: u32 }
}

evt! {
    /// Marks a task as the timer service task.
    TaskIsTimerTask(tag = 97, metadata) { task_id: u32 }
}

#[cfg(feature = "task-trace")]
evt! {
    TaskDeleted(tag = 98) { ts: u64, task_id: u32 }
}

evt! {
    QueueCreated(tag = 99) { ts: u64, queue_id: u32 }
}

evt! {
    QueueName<'a>(tag = 100, metadata) { queue_id: u32, name: str }
}

evt! {
    /// What the queue endpoint actually is (plain queue, mutex, semaphore, …),
    /// as reported by the kernel port.
    QueueKind(tag = 101, metadata) { queue_id: u32, kind: u8 }
}

#[cfg(feature = "queue-trace")]
evt! {
    /// `len` is the number of items queued after the operation.
    QueueSend(tag = 102) { ts: u64, queue_id: u32, len: u32 }
}

#[cfg(feature = "queue-trace")]
evt! {
    QueueSendFromIsr(tag = 103) { ts: u64, queue_id: u32, len: u32 }
}

#[cfg(feature = "queue-trace")]
evt! {
    QueueOverwrite(tag = 104) { ts: u64, queue_id: u32, len: u32 }
}

#[cfg(feature = "queue-trace")]
evt! {
    QueueOverwriteFromIsr(tag = 105) { ts: u64, queue_id: u32, len: u32 }
}

#[cfg(feature = "queue-trace")]
evt! {
    QueueReceive(tag = 106) { ts: u64, queue_id: u32, len: u32 }
}

#[cfg(feature = "queue-trace")]
evt! {
    QueueReceiveFromIsr(tag = 107) { ts: u64, queue_id: u32, len: u32 }
}

#[cfg(feature = "queue-trace")]
evt! {
    QueuePeek(tag = 108) { ts: u64, queue_id: u32, len: u32 }
}

#[cfg(feature = "queue-trace")]
evt! {
    QueueReset(tag = 109) { ts: u64, queue_id: u32 }
}

#[cfg(feature = "task-trace")]
evt! {
    CurtaskBlockOnQueuePeek(tag = 110) { ts: u64, queue_id: u32, ticks_to_wait: u32 }
}

#[cfg(feature = "task-trace")]
evt! {
    CurtaskBlockOnQueueSend(tag = 111) { ts: u64, queue_id: u32, ticks_to_wait: u32 }
}

#[cfg(feature = "task-trace")]
evt! {
    CurtaskBlockOnQueueReceive(tag = 112) { ts: u64, queue_id: u32, ticks_to_wait: u32 }
}

#[cfg(feature = "marker-trace")]
evt! {
    /// Name of a task-local event marker; `task_id` scopes the marker id.
    TaskEvtmarkerName<'a>(tag = 113, metadata) { id: u32, task_id: u32, name: str }
}

#[cfg(feature = "marker-trace")]
evt! {
    TaskEvtmarker<'a>(tag = 114) { ts: u64, id: u32, msg: str }
}

#[cfg(feature = "marker-trace")]
evt! {
    TaskEvtmarkerBegin<'a>(tag = 115) { ts: u64, id: u32, msg: str }
}

#[cfg(feature = "marker-trace")]
evt! {
    TaskEvtmarkerEnd(tag = 116) { ts: u64, id: u32 }
}

#[cfg(feature = "marker-trace")]
evt! {
    TaskValmarkerName<'a>(tag = 117, metadata) { id: u32, task_id: u32, name: str }
}

#[cfg(feature = "marker-trace")]
evt! {
    TaskValmarker(tag = 118) { ts: u64, id: u32, val: s64 }
}

#[cfg(feature = "stream-buffer-trace")]
evt! {
    StreambufferCreated(tag = 119) { ts: u64, sb_id: u32 }
}

#[cfg(feature = "stream-buffer-trace")]
evt! {
    StreambufferName<'a>(tag = 120, metadata) { sb_id: u32, name: str }
}

#[cfg(feature = "stream-buffer-trace")]
evt! {
    /// `len` is the number of bytes held after the operation.
    StreambufferSend(tag = 121) { ts: u64, sb_id: u32, len: u32 }
}

#[cfg(feature = "stream-buffer-trace")]
evt! {
    StreambufferSendFromIsr(tag = 122) { ts: u64, sb_id: u32, len: u32 }
}

#[cfg(feature = "stream-buffer-trace")]
evt! {
    StreambufferReceive(tag = 123) { ts: u64, sb_id: u32, len: u32 }
}

#[cfg(feature = "stream-buffer-trace")]
evt! {
    StreambufferReceiveFromIsr(tag = 124) { ts: u64, sb_id: u32, len: u32 }
}

#[cfg(feature = "stream-buffer-trace")]
evt! {
    StreambufferReset(tag = 125) { ts: u64, sb_id: u32 }
}

#[cfg(feature = "stream-buffer-trace")]
evt! {
    CurtaskBlockOnStreambufferSend(tag = 126) { ts: u64, sb_id: u32, ticks_to_wait: u32 }
}

#[cfg(feature = "stream-buffer-trace")]
evt! {
    CurtaskBlockOnStreambufferReceive(tag = 127) { ts: u64, sb_id: u32, ticks_to_wait: u32 }
}
