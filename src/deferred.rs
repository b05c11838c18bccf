//! One-shot deferred tasks keyed by absolute deadline.
//!
//! `DeferredQueue` replaces scheduled callbacks: owners push a task with the
//! instant it becomes due, and drain everything that is due once per tick.
//! Each task fires at most once and is removed when drained. Tasks with the
//! same deadline come out in the order they were scheduled.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use finisher_arena::deferred::DeferredQueue;
//!
//! let mut queue = DeferredQueue::default();
//! queue.schedule(Duration::from_millis(800), "die");
//! queue.schedule(Duration::from_secs(5), "respawn");
//!
//! assert_eq!(queue.drain_due(Duration::from_secs(1)), vec!["die"]);
//! assert_eq!(queue.drain_due(Duration::from_secs(1)), Vec::<&str>::new());
//! assert_eq!(queue.drain_due(Duration::from_secs(5)), vec!["respawn"]);
//! ```
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

/// Convert a seconds value from settings or a frame delta into a deadline
/// offset, rounded to whole microseconds so that sums of deltas land exactly
/// on configured delays. Negative and NaN inputs become zero.
#[must_use]
pub fn seconds(secs: f32) -> Duration {
    let micros = (f64::from(secs) * 1_000_000.0).round();
    if micros.is_nan() || micros <= 0.0 {
        return Duration::ZERO;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Duration::from_micros(micros as u64)
}

/// Handle returned by [`DeferredQueue::schedule`], usable for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug)]
struct Entry<T> {
    due: Duration,
    seq: u64,
    task: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due.cmp(&other.due).then(self.seq.cmp(&other.seq))
    }
}

/// Min-heap of tasks ordered by deadline, then by scheduling order.
#[derive(Debug)]
pub struct DeferredQueue<T> {
    heap: BinaryHeap<Reverse<Entry<T>>>,
    cancelled: Vec<u64>,
    next_seq: u64,
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            cancelled: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<T> DeferredQueue<T> {
    /// Schedule `task` to become due at the absolute instant `due`.
    pub fn schedule(&mut self, due: Duration, task: T) -> TaskHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry { due, seq, task }));
        TaskHandle(seq)
    }

    /// Cancel a pending task. Returns `false` if it already fired or was
    /// never scheduled on this queue.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let pending = self
            .heap
            .iter()
            .any(|Reverse(e)| e.seq == handle.0 && !self.cancelled.contains(&e.seq));
        if pending {
            self.cancelled.push(handle.0);
        }
        pending
    }

    /// Remove and return every task whose deadline is at or before `now`,
    /// earliest first.
    pub fn drain_due(&mut self, now: Duration) -> Vec<T> {
        let mut due = Vec::new();
        while let Some(Reverse(head)) = self.heap.peek() {
            if head.due > now {
                break;
            }
            let Some(Reverse(entry)) = self.heap.pop() else { break };
            if let Some(idx) = self.cancelled.iter().position(|s| *s == entry.seq) {
                self.cancelled.swap_remove(idx);
                continue;
            }
            due.push(entry.task);
        }
        due
    }

    /// Deadline of the earliest live task, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.heap
            .iter()
            .filter(|Reverse(e)| !self.cancelled.contains(&e.seq))
            .map(|Reverse(e)| e.due)
            .min()
    }

    /// Number of live (not cancelled) tasks still waiting.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len() - self.cancelled.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn fires_at_or_after_deadline_exactly_once() {
        let mut q = DeferredQueue::default();
        q.schedule(ms(100), 1);
        assert!(q.drain_due(ms(99)).is_empty());
        assert_eq!(q.drain_due(ms(150)), vec![1]);
        assert!(q.drain_due(ms(1000)).is_empty());
        assert!(q.is_empty());
    }

    #[test]
    fn equal_deadlines_keep_schedule_order() {
        let mut q = DeferredQueue::default();
        q.schedule(ms(10), "a");
        q.schedule(ms(5), "early");
        q.schedule(ms(10), "b");
        assert_eq!(q.drain_due(ms(10)), vec!["early", "a", "b"]);
    }

    #[test]
    fn seconds_round_to_micros() {
        assert_eq!(seconds(0.8), ms(800));
        assert_eq!(seconds(1.35), ms(1350));
        assert_eq!(seconds(-1.0), Duration::ZERO);
        assert_eq!(seconds(f32::NAN), Duration::ZERO);
        let mut clock = Duration::ZERO;
        for _ in 0..8 {
            clock += seconds(0.1);
        }
        assert_eq!(clock, seconds(0.8));
    }

    #[test]
    fn cancelled_task_never_fires() {
        let mut q = DeferredQueue::default();
        let keep = q.schedule(ms(10), "keep");
        let drop = q.schedule(ms(20), "drop");
        assert!(q.cancel(drop));
        assert!(!q.cancel(drop));
        assert_eq!(q.len(), 1);
        assert_eq!(q.next_deadline(), Some(ms(10)));
        assert_eq!(q.drain_due(ms(100)), vec!["keep"]);
        assert!(!q.cancel(keep));
        assert!(q.is_empty());
    }
}
