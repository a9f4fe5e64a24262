//! One-shot timers that feed the controller inbox.
//!
//! A timer never touches controller state directly: when it fires it sends
//! its [`ChatEvent`] into the inbox like any other input. A timer that fires
//! after its controller is gone is dropped by [`deliver`].
//!
//! Two backends: [`TokioTimers`] for native hosts and tests, and
//! `GlooTimers` (with `hydrate`) on top of `setTimeout`.

#[cfg(test)]
#[path = "timers_test.rs"]
mod timers_test;

use std::time::Duration;

use crate::hook::event::ChatEvent;
#[cfg(any(feature = "hydrate", not(target_arch = "wasm32")))]
use crate::hook::event::{EventSink, deliver};

/// Identifies a scheduled timer for cancellation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

impl TimerId {
    #[must_use]
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

pub trait Timers {
    /// Deliver `event` to the controller after `delay`.
    fn schedule(&mut self, delay: Duration, event: ChatEvent) -> TimerId;

    /// Cancel a pending timer. Unknown or already fired ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

// =============================================================================
// TOKIO
// =============================================================================

#[cfg(not(target_arch = "wasm32"))]
pub struct TokioTimers {
    sink: EventSink,
    next_id: u64,
    pending: std::collections::HashMap<TimerId, tokio::task::AbortHandle>,
}

#[cfg(not(target_arch = "wasm32"))]
impl TokioTimers {
    /// Timers delivering into `sink`. Must be used inside a tokio runtime.
    #[must_use]
    pub fn new(sink: EventSink) -> Self {
        Self { sink, next_id: 0, pending: std::collections::HashMap::new() }
    }

    /// Number of timers that have not fired or been cancelled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.values().filter(|h| !h.is_finished()).count()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Timers for TokioTimers {
    fn schedule(&mut self, delay: Duration, event: ChatEvent) -> TimerId {
        self.pending.retain(|_, handle| !handle.is_finished());

        self.next_id += 1;
        let id = TimerId(self.next_id);
        let sink = self.sink.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            deliver(&sink, event);
        });
        self.pending.insert(id, task.abort_handle());
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(handle) = self.pending.remove(&id) {
            handle.abort();
        }
    }
}

// =============================================================================
// BROWSER
// =============================================================================

#[cfg(feature = "hydrate")]
pub struct GlooTimers {
    sink: EventSink,
    next_id: u64,
    pending: std::collections::HashMap<TimerId, (gloo_timers::callback::Timeout, std::rc::Rc<std::cell::Cell<bool>>)>,
}

#[cfg(feature = "hydrate")]
impl GlooTimers {
    #[must_use]
    pub fn new(sink: EventSink) -> Self {
        Self { sink, next_id: 0, pending: std::collections::HashMap::new() }
    }
}

#[cfg(feature = "hydrate")]
impl Timers for GlooTimers {
    fn schedule(&mut self, delay: Duration, event: ChatEvent) -> TimerId {
        // Fired timeouts are safe to drop once their callback has returned.
        self.pending.retain(|_, (_, fired)| !fired.get());

        self.next_id += 1;
        let id = TimerId(self.next_id);
        let sink = self.sink.clone();
        let fired = std::rc::Rc::new(std::cell::Cell::new(false));
        let fired_flag = fired.clone();
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        let timeout = gloo_timers::callback::Timeout::new(millis, move || {
            fired_flag.set(true);
            deliver(&sink, event);
        });
        self.pending.insert(id, (timeout, fired));
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some((timeout, _)) = self.pending.remove(&id) {
            timeout.cancel();
        }
    }
}
