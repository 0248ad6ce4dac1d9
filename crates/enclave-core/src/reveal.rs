#![forbid(unsafe_code)]

//! Staggered reveal timeline.
//!
//! [`Timeline`] replaces nested timer callbacks with a declarative list of
//! `(delay, payload)` steps. The host schedules a batch with
//! [`run`](Timeline::run), then drains due payloads from its own loop via
//! [`poll`](Timeline::poll) and applies them itself. Payloads are plain
//! data rather than stored closures, which composes better in Elm-style
//! hosts; [`fire_due`](Timeline::fire_due) covers the boxed-callback case
//! for hosts that want the timeline to invoke effects directly.
//!
//! # Design
//!
//! ## Invariants
//! 1. Every step's delay is measured from the instant the batch was
//!    scheduled: `run(now, [(100, a), (50, b)])` makes `b` due at +50ms
//!    and `a` at +100ms. Independent delayed effects, not a pipeline.
//! 2. `poll` returns due payloads ordered by deadline; ties are broken by
//!    scheduling order, so same-instant steps fire in list order.
//! 3. Cancelling a run drops its not-yet-polled steps; already-delivered
//!    payloads are unaffected. Cancelling a finished or already-cancelled
//!    run is a no-op.
//! 4. All time is caller-supplied. The timeline never reads a clock, so
//!    tests drive it with synthetic [`Instant`]s and no real timers.
//!
//! ## Failure Modes
//! None. Steps carry no failure channel; payloads are presentation
//! mutations by contract.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use enclave_core::reveal::Timeline;
//!
//! let mut timeline = Timeline::new();
//! let t = Instant::now();
//! timeline.run(t, [(Duration::from_millis(100), "late"), (Duration::from_millis(50), "early")]);
//!
//! assert_eq!(timeline.poll(t + Duration::from_millis(60)), vec!["early"]);
//! assert_eq!(timeline.poll(t + Duration::from_millis(120)), vec!["late"]);
//! ```

use std::time::{Duration, Instant};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Handle identifying one scheduled batch, used for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunHandle(u64);

#[derive(Debug)]
struct Entry<T> {
    run: u64,
    seq: u64,
    due: Instant,
    payload: T,
}

/// A set of pending timed reveal steps.
///
/// One timeline typically lives in the host model and carries steps from
/// any number of runs; ordering between runs is by deadline, exactly like
/// independently started timers sharing one thread.
pub struct Timeline<T> {
    entries: Vec<Entry<T>>,
    next_run: u64,
    next_seq: u64,
}

impl<T> std::fmt::Debug for Timeline<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timeline")
            .field("pending", &self.entries.len())
            .finish()
    }
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Scheduling
// ---------------------------------------------------------------------------

impl<T> Timeline<T> {
    /// Create an empty timeline.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_run: 0,
            next_seq: 0,
        }
    }

    /// Schedule a batch of `(delay, payload)` steps.
    ///
    /// Each delay is measured from `now`. Returns a handle that cancels
    /// the batch's not-yet-fired steps via [`cancel`](Self::cancel).
    pub fn run<I>(&mut self, now: Instant, steps: I) -> RunHandle
    where
        I: IntoIterator<Item = (Duration, T)>,
    {
        let run = self.next_run;
        self.next_run += 1;

        let before = self.entries.len();
        for (delay, payload) in steps {
            let seq = self.next_seq;
            self.next_seq += 1;
            self.entries.push(Entry {
                run,
                seq,
                due: now + delay,
                payload,
            });
        }
        tracing::trace!(run, steps = self.entries.len() - before, "scheduled reveal batch");
        RunHandle(run)
    }

    /// Schedule a single payload after `delay`.
    ///
    /// Convenience for transient effects and delayed clears.
    pub fn schedule(&mut self, now: Instant, delay: Duration, payload: T) -> RunHandle {
        self.run(now, [(delay, payload)])
    }

    /// Schedule payloads with linear stagger: payload `i` is due at
    /// `i * interval` from `now`.
    ///
    /// This is the typewriter case: one payload per revealed grapheme.
    pub fn run_staggered<I>(&mut self, now: Instant, interval: Duration, payloads: I) -> RunHandle
    where
        I: IntoIterator<Item = T>,
    {
        let steps = payloads
            .into_iter()
            .enumerate()
            .map(|(i, payload)| (interval.saturating_mul(i as u32), payload));
        self.run(now, steps)
    }

    /// Drop the not-yet-fired steps of a batch.
    ///
    /// No-op if the batch already completed or was already cancelled.
    pub fn cancel(&mut self, handle: RunHandle) {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.run != handle.0);
        if self.entries.len() != before {
            tracing::trace!(run = handle.0, dropped = before - self.entries.len(), "cancelled reveal batch");
        }
    }

    /// Remove and return every payload due at or before `now`, ordered by
    /// deadline (ties in scheduling order).
    pub fn poll(&mut self, now: Instant) -> Vec<T> {
        if self.entries.is_empty() {
            return Vec::new();
        }

        let mut due = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].due <= now {
                due.push(self.entries.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by(|a, b| a.due.cmp(&b.due).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|entry| entry.payload).collect()
    }

    /// Earliest pending deadline, if any.
    ///
    /// Hosts use this to size their event-poll timeout instead of
    /// spinning.
    #[must_use]
    pub fn next_due(&self) -> Option<Instant> {
        self.entries.iter().map(|entry| entry.due).min()
    }

    /// Number of steps still pending.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// True when no steps are pending.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Direct-callback surface
// ---------------------------------------------------------------------------

impl Timeline<Box<dyn FnOnce()>> {
    /// Invoke every due callback, in deadline order, on the calling
    /// thread. Returns the number of callbacks fired.
    pub fn fire_due(&mut self, now: Instant) -> usize {
        let due = self.poll(now);
        let fired = due.len();
        for action in due {
            action();
        }
        fired
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
