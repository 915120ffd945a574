//! Timer primitive the engine schedules its deferred work on.
//!
//! Deferred work is plain data (`Task`); whoever owns the timer hands due
//! tasks back to `Engine::dispatch`, so every state change happens on the
//! caller's thread and nothing ever sleeps.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::time::{Duration, Instant};

use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    PlayPoint { point: Point, duration_ms: u32 },
    MonitorTick,
    OutlineFinished,
    ResolveParentOutline,
}

pub trait Scheduler {
    fn now(&self) -> Instant;

    fn schedule_once(&mut self, delay: Duration, task: Task) -> TimerHandle;

    /// First run is one `period` from now.
    fn schedule_repeating(&mut self, period: Duration, task: Task) -> TimerHandle;

    /// Cancelling a handle that already fired is a no-op.
    fn cancel(&mut self, handle: TimerHandle);
}

struct Timer {
    task: Task,
    period: Option<Duration>,
}

/// Deterministic single-threaded timer queue driven by an explicit clock.
///
/// Entries are ordered by due instant, then by insertion, so tasks scheduled
/// with the same delay fire in the order they were scheduled.
pub struct TimerQueue {
    now: Instant,
    next_id: u64,
    next_seq: u64,
    heap: BinaryHeap<Reverse<(Instant, u64, u64)>>,
    timers: HashMap<u64, Timer>,
}

impl TimerQueue {
    pub fn new(now: Instant) -> Self {
        Self {
            now,
            next_id: 0,
            next_seq: 0,
            heap: BinaryHeap::new(),
            timers: HashMap::new(),
        }
    }

    /// Move the clock forward. The clock never goes backwards.
    pub fn set_now(&mut self, now: Instant) {
        if now > self.now {
            self.now = now;
        }
    }

    /// Due instant of the earliest live timer.
    pub fn next_due(&mut self) -> Option<Instant> {
        self.discard_cancelled();
        self.heap.peek().map(|Reverse((due, _, _))| *due)
    }

    /// Pop the earliest task that is due at the current clock, re-arming it
    /// when it repeats.
    pub fn pop_due(&mut self) -> Option<Task> {
        self.discard_cancelled();
        let Reverse((due, _, id)) = *self.heap.peek()?;
        if due > self.now {
            return None;
        }
        self.heap.pop();

        let timer = self.timers.get(&id)?;
        let task = timer.task.clone();
        let period = timer.period;
        match period {
            Some(period) => self.push(id, due + period),
            None => {
                self.timers.remove(&id);
            }
        }
        Some(task)
    }

    /// Number of live timers.
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    pub fn is_idle(&self) -> bool {
        self.timers.is_empty()
    }

    fn insert(&mut self, due: Instant, task: Task, period: Option<Duration>) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.timers.insert(id, Timer { task, period });
        self.push(id, due);
        TimerHandle(id)
    }

    fn push(&mut self, id: u64, due: Instant) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse((due, seq, id)));
    }

    fn discard_cancelled(&mut self) {
        while let Some(Reverse((_, _, id))) = self.heap.peek() {
            if self.timers.contains_key(id) {
                break;
            }
            self.heap.pop();
        }
    }
}

impl Scheduler for TimerQueue {
    fn now(&self) -> Instant {
        self.now
    }

    fn schedule_once(&mut self, delay: Duration, task: Task) -> TimerHandle {
        self.insert(self.now + delay, task, None)
    }

    fn schedule_repeating(&mut self, period: Duration, task: Task) -> TimerHandle {
        self.insert(self.now + period, task, Some(period))
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.remove(&handle.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(x: i32) -> Task {
        Task::PlayPoint { point: Point::new(x, 0), duration_ms: 40 }
    }

    fn drain(queue: &mut TimerQueue) -> Vec<Task> {
        std::iter::from_fn(|| queue.pop_due()).collect()
    }

    #[test]
    fn test_delays_fire_in_order() {
        let t0 = Instant::now();
        let mut queue = TimerQueue::new(t0);
        queue.schedule_once(Duration::from_millis(300), play(3));
        queue.schedule_once(Duration::from_millis(100), play(1));
        queue.schedule_once(Duration::from_millis(200), play(2));

        assert!(queue.pop_due().is_none());
        queue.set_now(t0 + Duration::from_millis(250));
        assert_eq!(drain(&mut queue), vec![play(1), play(2)]);
        queue.set_now(t0 + Duration::from_millis(300));
        assert_eq!(drain(&mut queue), vec![play(3)]);
        assert!(queue.is_idle());
    }

    #[test]
    fn test_equal_delays_keep_insertion_order() {
        let t0 = Instant::now();
        let mut queue = TimerQueue::new(t0);
        for x in 0..5 {
            queue.schedule_once(Duration::ZERO, play(x));
        }
        assert_eq!(drain(&mut queue), (0..5).map(play).collect::<Vec<_>>());
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let t0 = Instant::now();
        let mut queue = TimerQueue::new(t0);
        let first = queue.schedule_once(Duration::from_millis(10), play(1));
        queue.schedule_once(Duration::from_millis(20), play(2));
        queue.cancel(first);

        assert_eq!(queue.next_due(), Some(t0 + Duration::from_millis(20)));
        queue.set_now(t0 + Duration::from_millis(50));
        assert_eq!(drain(&mut queue), vec![play(2)]);
        // Cancelling after firing is harmless.
        queue.cancel(first);
    }

    #[test]
    fn test_repeating_timer_rearms_until_cancelled() {
        let t0 = Instant::now();
        let mut queue = TimerQueue::new(t0);
        let tick = queue.schedule_repeating(Duration::from_millis(200), Task::MonitorTick);

        queue.set_now(t0 + Duration::from_millis(199));
        assert!(queue.pop_due().is_none());
        queue.set_now(t0 + Duration::from_millis(600));
        assert_eq!(drain(&mut queue).len(), 3);
        assert_eq!(queue.next_due(), Some(t0 + Duration::from_millis(800)));

        queue.cancel(tick);
        assert_eq!(queue.next_due(), None);
        assert_eq!(queue.pending(), 0);
    }
}
