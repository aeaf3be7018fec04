//! Cancellable scheduled tasks driven by an injected [`Clock`].
//!
//! Nothing here runs on its own: the host calls [`Timers::poll`] from its
//! frame loop and dispatches whatever came due. A task value doubles as its
//! debounce key, so [`Timers::debounce`] replaces any pending task that
//! compares equal.

use std::sync::Arc;

use slotmap::{SlotMap, new_key_type};
use web_time::{Duration, Instant};

use crate::animation::Clock;

new_key_type! {
    pub struct TimerId;
}

struct Scheduled<T> {
    due: Instant,
    task: T,
}

pub struct Timers<T> {
    clock: Arc<dyn Clock>,
    pending: SlotMap<TimerId, Scheduled<T>>,
}

impl<T: Copy + PartialEq> Timers<T> {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            pending: SlotMap::with_key(),
        }
    }

    pub fn schedule(&mut self, after: Duration, task: T) -> TimerId {
        let due = self.clock.now() + after;
        self.pending.insert(Scheduled { due, task })
    }

    /// Cancel every pending `task` and schedule a fresh one.
    pub fn debounce(&mut self, after: Duration, task: T) -> TimerId {
        let before = self.pending.len();
        self.pending.retain(|_, s| s.task != task);
        if self.pending.len() < before {
            log::trace!("debounce: restarted pending task");
        }
        self.schedule(after, task)
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.pending.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.pending.values().map(|s| s.due).min()
    }

    /// Remove and return every task due by now, earliest first.
    pub fn poll(&mut self) -> Vec<T> {
        let now = self.clock.now();
        let mut due: Vec<(Instant, TimerId)> = self
            .pending
            .iter()
            .filter(|(_, s)| s.due <= now)
            .map(|(id, s)| (s.due, id))
            .collect();
        due.sort_by_key(|(at, _)| *at);
        due.into_iter()
            .filter_map(|(_, id)| self.pending.remove(id))
            .map(|s| s.task)
            .collect()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
