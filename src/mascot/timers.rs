//! Timer Queue: controller-owned, cancellable timers on a virtual
//! millisecond clock.
//!
//! Every timer the mascot needs (boot greeting, idle poll, mood reversion,
//! bubble auto-hide) lives here instead of in ambient callbacks, so the
//! owner can cancel one on transition-out and drop all of them on teardown.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// What should happen when a timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    BootGreeting,
    IdlePoll,
    /// Return to idle, but only if no newer transition happened since.
    MoodReversion { epoch: u64, clear_bubble: bool },
    /// Hide the bubble, but only if it was not re-shown since.
    BubbleHide { generation: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// A timer that has come due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    pub id: TimerId,
    pub deadline_ms: u64,
    pub kind: TimerKind,
}

/// Min-heap of deadlines. Ties fire in scheduling order.
#[derive(Debug, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Reverse<(u64, u64)>>,
    live: HashMap<u64, (u64, TimerKind)>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, deadline_ms: u64, kind: TimerKind) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse((deadline_ms, seq)));
        self.live.insert(seq, (deadline_ms, kind));
        TimerId(seq)
    }

    /// Returns `false` if the timer already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.live.remove(&id.0).is_some()
    }

    /// Pop the earliest live timer whose deadline is `<= now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<FiredTimer> {
        self.prune();
        let Reverse((deadline_ms, seq)) = *self.heap.peek()?;
        if deadline_ms > now_ms {
            return None;
        }
        self.heap.pop();
        let (_, kind) = self.live.remove(&seq)?;
        Some(FiredTimer {
            id: TimerId(seq),
            deadline_ms,
            kind,
        })
    }

    pub fn next_deadline(&mut self) -> Option<u64> {
        self.prune();
        self.heap.peek().map(|Reverse((deadline_ms, _))| *deadline_ms)
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.live.clear();
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Iterate over live timers in no particular order.
    pub fn pending(&self) -> impl Iterator<Item = (u64, TimerKind)> + '_ {
        self.live.values().copied()
    }

    // Drop cancelled entries sitting at the top of the heap.
    fn prune(&mut self) {
        while let Some(Reverse((_, seq))) = self.heap.peek() {
            if self.live.contains_key(seq) {
                break;
            }
            self.heap.pop();
        }
    }
}
