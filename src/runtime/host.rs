use std::{cmp::Reverse, collections::BinaryHeap, time::Duration};

use crate::foundation::core::FrameDelay;

/// Identifies one registered one-shot timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(pub u64);

/// Services the host event loop offers to a window.
pub trait Host {
    /// Arm a one-shot timer that fires after `delay`.
    fn register_timer(&mut self, delay: FrameDelay) -> TimerHandle;

    /// Cancel a pending timer; returns `false` if it already fired or never existed.
    fn cancel_timer(&mut self, handle: TimerHandle) -> bool;

    /// Request a repaint before the next timer is dispatched.
    fn mark_dirty(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct PendingTimer {
    deadline: Duration,
    handle: TimerHandle, // monotonic, keeps equal deadlines FIFO
}

/// Deadline-ordered one-shot timers plus the display's dirty flag.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    pending: BinaryHeap<Reverse<PendingTimer>>,
    next_handle: u64,
    dirty: bool,
}

impl TimerQueue {
    /// Empty queue at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Time new timers are scheduled relative to.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Move the queue's notion of time; never goes backwards.
    pub fn advance_to(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Remove and return the earliest timer with its deadline.
    pub fn pop_next(&mut self) -> Option<(TimerHandle, Duration)> {
        let Reverse(t) = self.pending.pop()?;
        Some((t.handle, t.deadline))
    }

    /// Deadline of the earliest timer without removing it.
    pub fn peek_deadline(&self) -> Option<Duration> {
        self.pending.peek().map(|Reverse(t)| t.deadline)
    }

    /// Number of armed timers.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// True when nothing is armed.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Read and clear the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl Host for TimerQueue {
    fn register_timer(&mut self, delay: FrameDelay) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.pending.push(Reverse(PendingTimer {
            deadline: self.now + delay.as_duration(),
            handle,
        }));
        handle
    }

    fn cancel_timer(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|Reverse(t)| t.handle != handle);
        self.pending.len() != before
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/host.rs"]
mod tests;
