//! Tick-indexed delay queue
//!
//! Deferred work is keyed to the simulation tick counter rather than wall
//! time, so anything that stops the counter (pause) also holds the queue.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Scheduled<T> {
    due_tick: u64,
    item: T,
}

/// Items released once the tick counter reaches their due tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelayQueue<T> {
    entries: Vec<Scheduled<T>>,
}

impl<T> Default for DelayQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DelayQueue<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn schedule(&mut self, due_tick: u64, item: T) {
        // Keep sorted by due tick; equal ticks stay in insertion order
        let at = self.entries.partition_point(|e| e.due_tick <= due_tick);
        self.entries.insert(at, Scheduled { due_tick, item });
    }

    /// Remove and return every item due at or before `now`, earliest first
    pub fn drain_due(&mut self, now: u64) -> Vec<T> {
        let ready = self.entries.partition_point(|e| e.due_tick <= now);
        self.entries.drain(..ready).map(|e| e.item).collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
