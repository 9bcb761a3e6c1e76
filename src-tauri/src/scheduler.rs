//! Deferred callbacks for the single-threaded event loop.
//!
//! Tasks are plain values run by whoever owns the scheduler. A task scheduled
//! and then cancelled through its handle never comes out of [`Scheduler::pop_due`].

use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug)]
pub struct Scheduler<T> {
    next_id: u64,
    queue: BTreeMap<(Instant, u64), T>,
    deadlines: HashMap<u64, Instant>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            queue: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration, task: T) -> TaskHandle {
        self.schedule_at(now + delay, task)
    }

    fn schedule_at(&mut self, deadline: Instant, task: T) -> TaskHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.queue.insert((deadline, id), task);
        self.deadlines.insert(id, deadline);
        TaskHandle(id)
    }

    /// Returns false when the task already ran or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        match self.deadlines.remove(&handle.0) {
            Some(deadline) => self.queue.remove(&(deadline, handle.0)).is_some(),
            None => false,
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Removes the earliest task whose deadline is at or before `now`. Tasks
    /// sharing a deadline come out in scheduling order.
    pub fn pop_due(&mut self, now: Instant) -> Option<T> {
        let key = *self.queue.keys().next()?;
        if key.0 > now {
            return None;
        }
        self.deadlines.remove(&key.1);
        self.queue.remove(&key)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
