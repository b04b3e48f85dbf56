//! Future events against the logical clock
//!
//! Replaces ambient timers: landing linger and paced batch drops are queued
//! here and fired by `tick` once the clock passes their due time.

use serde::{Deserialize, Serialize};

/// Something that should happen at a later logical time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduledEvent {
    /// Deactivate a landed ball after its linger
    RetireBall { ball_id: u32 },
    /// Drop one ball; reschedules itself while `remaining > 1`
    BatchSpawn { remaining: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Entry {
    due_ms: f64,
    /// Insertion order, breaks ties between equal due times
    seq: u64,
    event: ScheduledEvent,
}

/// Pending events, fired in (due time, insertion order)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scheduler {
    entries: Vec<Entry>,
    next_seq: u64,
}

impl Scheduler {
    pub fn schedule(&mut self, due_ms: f64, event: ScheduledEvent) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry { due_ms, seq, event });
    }

    /// Remove and return the earliest event due at or before `now_ms`
    pub fn pop_due(&mut self, now_ms: f64) -> Option<(f64, ScheduledEvent)> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= now_ms)
            .min_by(|(_, a), (_, b)| {
                a.due_ms
                    .partial_cmp(&b.due_ms)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.seq.cmp(&b.seq))
            })
            .map(|(i, _)| i)?;
        let entry = self.entries.remove(idx);
        Some((entry.due_ms, entry.event))
    }

    /// Earliest pending due time
    pub fn next_due(&self) -> Option<f64> {
        self.entries
            .iter()
            .map(|e| e.due_ms)
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }

    /// Balls still waiting to be dropped by in-flight batches
    pub fn pending_spawns(&self) -> u32 {
        self.entries
            .iter()
            .map(|e| match e.event {
                ScheduledEvent::BatchSpawn { remaining } => remaining,
                ScheduledEvent::RetireBall { .. } => 0,
            })
            .sum()
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
