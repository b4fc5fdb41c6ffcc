use std::time::{Duration, Instant};

use crate::models::QuestionKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Move on after a correct answer.
    AutoAdvance,
    /// Stop the shake that followed wrong attempt number `attempt`.
    EndShake { attempt: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTimer {
    pub due: Instant,
    pub key: QuestionKey,
    pub kind: TimerKind,
}

/// Single-shot deferred tasks, fired from the UI loop.
#[derive(Debug, Default)]
pub struct Scheduler {
    timers: Vec<ScheduledTimer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration, key: QuestionKey, kind: TimerKind) {
        self.timers.push(ScheduledTimer {
            due: now + delay,
            key,
            kind,
        });
    }

    /// Remove and return every timer due at `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<ScheduledTimer> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.timers.drain(..).partition(|t| t.due <= now);
        self.timers = pending;
        due.sort_by_key(|t| t.due);
        due
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.timers.iter().map(|t| t.due).min()
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
