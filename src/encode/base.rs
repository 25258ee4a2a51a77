use super::evt;

evt! {
    /// Attributes the records that follow on a stream to one core.
    CoreId(tag = 0x00) { ts: u64, core_id: u32 }
}

evt! {
    /// Running total of dropped events, published in-band so consumers can
    /// always detect and quantify loss.
    DroppedEvtCnt(tag = 0x01) { ts: u64, cnt: u32 }
}

evt! {
    /// Nanoseconds per timestamp tick.
    TsResolutionNs(tag = 0x02, metadata) { ns: u64 }
}

#[cfg(feature = "isr-trace")]
evt! {
    IsrName<'a>(tag = 0x03, metadata) { isr_id: u32, name: str }
}

#[cfg(feature = "isr-trace")]
evt! {
    IsrEnter(tag = 0x04) { ts: u64, isr_id: u32 }
}

#[cfg(feature = "isr-trace")]
evt! {
    IsrExit(tag = 0x05) { ts: u64, isr_id: u32 }
}

#[cfg(feature = "marker-trace")]
evt! {
    EvtmarkerName<'a>(tag = 0x06, metadata) { id: u32, name: str }
}

#[cfg(feature = "marker-trace")]
evt! {
    /// Instantaneous user event.
    Evtmarker<'a>(tag = 0x07) { ts: u64, id: u32, msg: str }
}

#[cfg(feature = "marker-trace")]
evt! {
    /// Start of a user-defined span.
    EvtmarkerBegin<'a>(tag = 0x08) { ts: u64, id: u32, msg: str }
}

#[cfg(feature = "marker-trace")]
evt! {
    /// End of a user-defined span.
    EvtmarkerEnd(tag = 0x09) { ts: u64, id: u32 }
}

#[cfg(feature = "marker-trace")]
evt! {
    ValmarkerName<'a>(tag = 0x0A, metadata) { id: u32, name: str }
}

#[cfg(feature = "marker-trace")]
evt! {
    /// Sampled user value.
    Valmarker(tag = 0x0B) { ts: u64, id: u32, val: s64 }
}
