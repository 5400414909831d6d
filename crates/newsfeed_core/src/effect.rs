use std::time::Duration;

use crate::UpstreamRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Replace any pending debounce timer with one that reports `token`.
    ScheduleDebounce { token: u64, delay: Duration },
    CancelDebounce,
    /// Issue exactly one upstream GET tagged with `seq`.
    Dispatch { seq: u64, request: UpstreamRequest },
    /// Replace any cooldown timer with one that reports `generation`.
    ArmCooldownTimer { generation: u64, delay: Duration },
    CancelCooldownTimer,
    Notify { kind: NoticeKind, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    Success,
    Error,
}
