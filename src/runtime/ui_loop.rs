//! Single-threaded timer queue standing in for the toolkit's event loop
//!
//! Callbacks run on the thread that drives the loop, in deadline order
//! (ties broken by scheduling order).

use std::time::{Duration, Instant};

use crate::poller::{Timer, TimerCallback};

/// Longer delays are clamped so the deadline stays representable
const MAX_DELAY: Duration = Duration::from_secs(365 * 24 * 60 * 60);

struct Pending {
    due: Instant,
    seq: u64,
    callback: TimerCallback,
}

/// Timer facility for the UI thread
#[derive(Default)]
pub struct UiLoop {
    pending: Vec<Pending>,
    next_seq: u64,
}

impl UiLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of callbacks waiting to fire
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Deadline of the earliest pending callback
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.iter().map(|p| p.due).min()
    }

    /// Fire every callback due at or before `now`
    ///
    /// Callbacks scheduled while this runs wait for the next call, so a
    /// zero-delay self-rescheduling callback cannot spin forever.
    pub fn run_due(&mut self, now: Instant) -> usize {
        let cutoff = self.next_seq;
        let mut fired = 0;

        while let Some(idx) = self.next_ready(now, cutoff) {
            let pending = self.pending.swap_remove(idx);
            let timer: &mut dyn Timer = self;
            (pending.callback)(timer);
            fired += 1;
        }

        fired
    }

    /// Drive the loop until `done` holds
    ///
    /// Sleeps between deadlines. Returns `false` if `deadline` passes first,
    /// or if nothing is left to fire and `done` still does not hold.
    pub fn run_until(&mut self, mut done: impl FnMut() -> bool, deadline: Option<Instant>) -> bool {
        loop {
            if done() {
                return true;
            }

            let now = Instant::now();
            if deadline.is_some_and(|d| now >= d) {
                return false;
            }

            self.run_due(now);
            if done() {
                return true;
            }

            let wake = match (self.next_due(), deadline) {
                (Some(due), Some(d)) => due.min(d),
                (Some(due), None) => due,
                (None, Some(d)) => d,
                (None, None) => return false,
            };
            std::thread::sleep(wake.saturating_duration_since(Instant::now()));
        }
    }

    fn next_ready(&self, now: Instant, cutoff: u64) -> Option<usize> {
        self.pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= now && p.seq < cutoff)
            .min_by_key(|(_, p)| (p.due, p.seq))
            .map(|(idx, _)| idx)
    }
}

impl Timer for UiLoop {
    fn after(&mut self, delay: Duration, callback: TimerCallback) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending {
            due: Instant::now() + delay.min(MAX_DELAY),
            seq,
            callback,
        });
    }
}
