//! Hooks for the FreeRTOS integration shim.
//!
//! The shim maps `trace*` macros onto these entry points and is responsible
//! for id management: it calls
//! [`alloc_entity_id`](crate::Session::alloc_entity_id) the first time it
//! observes a task, queue or stream buffer and stores the id with the
//! resource (FreeRTOS task/queue numbers are the usual place).

use super::hook;
use crate::backend::Backend;
use crate::encode::freertos::*;
use crate::port::{CriticalGuard, Port};
use crate::session::Session;

impl<P: Port, B: Backend<P>, const CORES: usize, const METADATA_BUF_SIZE: usize>
    Session<P, B, CORES, METADATA_BUF_SIZE>
{
    #[cfg(feature = "task-trace")]
    hook! {
        /// The scheduler switched `task_id` in on the calling core.
        fn task_switched_in(task_id: u32) => TaskSwitchedIn { ts, task_id: task_id }
    }

    #[cfg(feature = "task-trace")]
    hook! {
        fn task_to_ready_state(task_id: u32) => TaskToReadyState { ts, task_id: task_id }
    }

    #[cfg(feature = "task-trace")]
    hook! {
        fn task_resumed(task_id: u32) => TaskResumed { ts, task_id: task_id }
    }

    #[cfg(feature = "task-trace")]
    hook! {
        fn task_resumed_from_isr(task_id: u32) => TaskResumedFromIsr { ts, task_id: task_id }
    }

    #[cfg(feature = "task-trace")]
    hook! {
        fn task_suspended(task_id: u32) => TaskSuspended { ts, task_id: task_id }
    }

    #[cfg(feature = "task-trace")]
    hook! {
        fn curtask_delay(ticks: u32) => CurtaskDelay { ts, ticks: ticks }
    }

    #[cfg(feature = "task-trace")]
    hook! {
        fn curtask_delay_until(time_to_wake: u32) => CurtaskDelayUntil { ts, time_to_wake: time_to_wake }
    }

    #[cfg(feature = "task-trace")]
    hook! {
        fn task_priority_set(task_id: u32, priority: u32) => TaskPrioritySet { ts, task_id: task_id, priority: priority }
    }

    #[cfg(feature = "task-trace")]
    hook! {
        fn task_priority_inherit(task_id: u32, priority: u32) => TaskPriorityInherit { ts, task_id: task_id, priority: priority }
    }

    #[cfg(feature = "task-trace")]
    hook! {
        fn task_priority_disinherit(task_id: u32, priority: u32) => TaskPriorityDisinherit { ts, task_id: task_id, priority: priority }
    }

    hook! {
        /// A task was created. `task_id` comes from
        /// [`alloc_entity_id`](Self::alloc_entity_id); pair with
        /// [`task_name`](Self::task_name).
        fn task_created(task_id: u32) => TaskCreated { ts, task_id: task_id }
    }

    hook! {
        fn task_name(task_id: u32, name: &str) => TaskName { task_id: task_id, name: name }
    }

    hook! {
        fn task_is_idle_task(task_id: u32, core_id: u32) => TaskIsIdleTask { task_id: task_id, core_id: core_id }
    }

    hook! {
        fn task_is_timer_task(task_id: u32) => TaskIsTimerTask { task_id: task_id }
    }

    #[cfg(feature = "task-trace")]
    hook! {
        fn task_deleted(task_id: u32) => TaskDeleted { ts, task_id: task_id }
    }

    hook! {
        fn queue_created(queue_id: u32) => QueueCreated { ts, queue_id: queue_id }
    }

    hook! {
        /// Also used for semaphores and mutexes, which FreeRTOS builds on
        /// queues; [`queue_kind`](Self::queue_kind) tells them apart.
        fn queue_name(queue_id: u32, name: &str) => QueueName { queue_id: queue_id, name: name }
    }

    hook! {
        fn queue_kind(queue_id: u32, kind: u8) => QueueKind { queue_id: queue_id, kind: kind }
    }

    #[cfg(feature = "queue-trace")]
    hook! {
        fn queue_send(queue_id: u32, len: u32) => QueueSend { ts, queue_id: queue_id, len: len }
    }

    #[cfg(feature = "queue-trace")]
    hook! {
        fn queue_send_from_isr(queue_id: u32, len: u32) => QueueSendFromIsr { ts, queue_id: queue_id, len: len }
    }

    #[cfg(feature = "queue-trace")]
    hook! {
        fn queue_overwrite(queue_id: u32, len: u32) => QueueOverwrite { ts, queue_id: queue_id, len: len }
    }

    #[cfg(feature = "queue-trace")]
    hook! {
        fn queue_overwrite_from_isr(queue_id: u32, len: u32) => QueueOverwriteFromIsr { ts, queue_id: queue_id, len: len }
    }

    #[cfg(feature = "queue-trace")]
    hook! {
        fn queue_receive(queue_id: u32, len: u32) => QueueReceive { ts, queue_id: queue_id, len: len }
    }

    #[cfg(feature = "queue-trace")]
    hook! {
        fn queue_receive_from_isr(queue_id: u32, len: u32) => QueueReceiveFromIsr { ts, queue_id: queue_id, len: len }
    }

    #[cfg(feature = "queue-trace")]
    hook! {
        fn queue_peek(queue_id: u32, len: u32) => QueuePeek { ts, queue_id: queue_id, len: len }
    }

    #[cfg(feature = "queue-trace")]
    hook! {
        fn queue_reset(queue_id: u32) => QueueReset { ts, queue_id: queue_id }
    }

    #[cfg(feature = "task-trace")]
    hook! {
        fn curtask_block_on_queue_peek(queue_id: u32, ticks_to_wait: u32) => CurtaskBlockOnQueuePeek { ts, queue_id: queue_id, ticks_to_wait: ticks_to_wait }
    }

    #[cfg(feature = "task-trace")]
    hook! {
        fn curtask_block_on_queue_send(queue_id: u32, ticks_to_wait: u32) => CurtaskBlockOnQueueSend { ts, queue_id: queue_id, ticks_to_wait: ticks_to_wait }
    }

    #[cfg(feature = "task-trace")]
    hook! {
        fn curtask_block_on_queue_receive(queue_id: u32, ticks_to_wait: u32) => CurtaskBlockOnQueueReceive { ts, queue_id: queue_id, ticks_to_wait: ticks_to_wait }
    }

    #[cfg(feature = "marker-trace")]
    hook! {
        fn task_evtmarker_name(id: u32, task_id: u32, name: &str) => TaskEvtmarkerName { id: id, task_id: task_id, name: name }
    }

    #[cfg(feature = "marker-trace")]
    hook! {
        fn task_evtmarker(id: u32, msg: &str) => TaskEvtmarker { ts, id: id, msg: msg }
    }

    #[cfg(feature = "marker-trace")]
    hook! {
        fn task_evtmarker_begin(id: u32, msg: &str) => TaskEvtmarkerBegin { ts, id: id, msg: msg }
    }

    #[cfg(feature = "marker-trace")]
    hook! {
        fn task_evtmarker_end(id: u32) => TaskEvtmarkerEnd { ts, id: id }
    }

    #[cfg(feature = "marker-trace")]
    hook! {
        fn task_valmarker_name(id: u32, task_id: u32, name: &str) => TaskValmarkerName { id: id, task_id: task_id, name: name }
    }

    #[cfg(feature = "marker-trace")]
    hook! {
        fn task_valmarker(id: u32, val: i64) => TaskValmarker { ts, id: id, val: val }
    }

    #[cfg(feature = "stream-buffer-trace")]
    hook! {
        fn streambuffer_created(sb_id: u32) => StreambufferCreated { ts, sb_id: sb_id }
    }

    #[cfg(feature = "stream-buffer-trace")]
    hook! {
        fn streambuffer_name(sb_id: u32, name: &str) => StreambufferName { sb_id: sb_id, name: name }
    }

    #[cfg(feature = "stream-buffer-trace")]
    hook! {
        fn streambuffer_send(sb_id: u32, len: u32) => StreambufferSend { ts, sb_id: sb_id, len: len }
    }

    #[cfg(feature = "stream-buffer-trace")]
    hook! {
        fn streambuffer_send_from_isr(sb_id: u32, len: u32) => StreambufferSendFromIsr { ts, sb_id: sb_id, len: len }
    }

    #[cfg(feature = "stream-buffer-trace")]
    hook! {
        fn streambuffer_receive(sb_id: u32, len: u32) => StreambufferReceive { ts, sb_id: sb_id, len: len }
    }

    #[cfg(feature = "stream-buffer-trace")]
    hook! {
        fn streambuffer_receive_from_isr(sb_id: u32, len: u32) => StreambufferReceiveFromIsr { ts, sb_id: sb_id, len: len }
    }

    #[cfg(feature = "stream-buffer-trace")]
    hook! {
        fn streambuffer_reset(sb_id: u32) => StreambufferReset { ts, sb_id: sb_id }
    }

    #[cfg(feature = "stream-buffer-trace")]
    hook! {
        fn curtask_block_on_streambuffer_send(sb_id: u32, ticks_to_wait: u32) => CurtaskBlockOnStreambufferSend { ts, sb_id: sb_id, ticks_to_wait: ticks_to_wait }
    }

    #[cfg(feature = "stream-buffer-trace")]
    hook! {
        fn curtask_block_on_streambuffer_receive(sb_id: u32, ticks_to_wait: u32) => CurtaskBlockOnStreambufferReceive { ts, sb_id: sb_id, ticks_to_wait: ticks_to_wait }
    }
}
