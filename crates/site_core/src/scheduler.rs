//! Cooperative single-threaded event loop over a virtual millisecond clock.
//!
//! Timers and animation-frame requests share one queue ordered by due time
//! and then by submission order. Nothing runs until the owner pops it, so
//! every callback observes the state left by the previous one.

use std::collections::{BTreeMap, HashMap};

pub type Millis = u64;

pub const DEFAULT_FRAME_INTERVAL_MS: Millis = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug)]
pub struct Scheduler<T> {
    now: Millis,
    next_seq: u64,
    frame_interval: Millis,
    queue: BTreeMap<(Millis, u64), T>,
    due_by_id: HashMap<TaskId, Millis>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_INTERVAL_MS)
    }
}

impl<T> Scheduler<T> {
    pub fn new(frame_interval: Millis) -> Self {
        Self {
            now: 0,
            next_seq: 0,
            frame_interval: frame_interval.max(1),
            queue: BTreeMap::new(),
            due_by_id: HashMap::new(),
        }
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn frame_interval(&self) -> Millis {
        self.frame_interval
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.due_by_id.contains_key(&id)
    }

    pub fn schedule(&mut self, delay: Millis, task: T) -> TaskId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let due = self.now.saturating_add(delay);
        self.queue.insert((due, seq), task);
        let id = TaskId(seq);
        self.due_by_id.insert(id, due);
        id
    }

    /// Runs `task` on the next animation frame.
    pub fn request_frame(&mut self, task: T) -> TaskId {
        self.schedule(self.frame_interval, task)
    }

    /// Drops a pending task. Returns false when it already ran or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        match self.due_by_id.remove(&id) {
            Some(due) => self.queue.remove(&(due, id.0)).is_some(),
            None => false,
        }
    }

    /// Pops the earliest task due at or before `until`, moving the clock to its due time.
    pub fn pop_due(&mut self, until: Millis) -> Option<(TaskId, T)> {
        let (&(due, seq), _) = self.queue.first_key_value()?;
        if due > until {
            return None;
        }
        let task = self.queue.remove(&(due, seq))?;
        let id = TaskId(seq);
        self.due_by_id.remove(&id);
        self.now = self.now.max(due);
        Some((id, task))
    }

    /// Moves the clock forward without running anything.
    pub fn advance_clock_to(&mut self, at: Millis) {
        self.now = self.now.max(at);
    }
}

#[cfg(test)]
#[path = "tests/scheduler_tests.rs"]
mod tests;
