//! Trailing-edge debounce for search boxes.
//!
//! Each keystroke arms a new generation; when the timer fires only the action
//! whose generation is still current runs. Earlier timers wake up, see they
//! are stale, and do nothing.

#[cfg(test)]
#[path = "debounce_test.rs"]
mod debounce_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Generation counter shared by a debounced input and its timers.
#[derive(Clone, Debug, Default)]
pub struct DebounceGate {
    generation: Arc<AtomicU64>,
}

impl DebounceGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation, invalidating every pending one.
    pub fn arm(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::Relaxed) + 1
    }

    #[must_use]
    pub fn is_current(&self, ticket: u64) -> bool {
        self.generation.load(Ordering::Relaxed) == ticket
    }
}

/// Run `action` after `delay_ms` unless `gate` is re-armed first.
///
/// Outside the browser there is no timer, so the action runs immediately.
pub fn debounce(gate: &DebounceGate, delay_ms: u32, action: impl FnOnce() + 'static) {
    let ticket = gate.arm();
    #[cfg(feature = "csr")]
    {
        let gate = gate.clone();
        leptos::task::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(delay_ms).await;
            if gate.is_current(ticket) {
                action();
            }
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = delay_ms;
        if gate.is_current(ticket) {
            action();
        }
    }
}
