//! Timer slots for work that must wait
//!
//! Two kinds of delayed work exist in the picker:
//!
//! - **Debounced** work runs once the triggering calls stop for a given
//!   delay. [`Debounce`] is a single trailing-edge slot: every call re-arms
//!   the deadline and the last payload wins.
//! - **Deferred** work runs after the current update settles, before
//!   control returns to the host. [`DeferredQueue`] holds it in order.
//!
//! Neither owns a clock. The engine passes `now` in and polls.

use std::collections::VecDeque;

use crate::types::Millis;

/// Trailing-edge debounce slot
#[derive(Clone, Debug)]
pub struct Debounce<T> {
    delay_ms: Millis,
    pending: Option<(Millis, T)>,
}

impl<T> Debounce<T> {
    /// Create an idle slot with the given delay
    pub fn new(delay_ms: Millis) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    /// Configured delay
    pub fn delay_ms(&self) -> Millis {
        self.delay_ms
    }

    /// Arm (or re-arm) the slot, replacing any pending payload
    pub fn call(&mut self, now: Millis, payload: T) {
        self.pending = Some((now + self.delay_ms, payload));
    }

    /// Arm the slot so the next poll releases `payload`, whatever the time
    pub fn call_immediately(&mut self, payload: T) {
        self.pending = Some((Millis::NEG_INFINITY, payload));
    }

    /// Release the payload if its deadline has passed
    pub fn poll(&mut self, now: Millis) -> Option<T> {
        match self.pending {
            Some((deadline, _)) if now >= deadline => self.pending.take().map(|(_, p)| p),
            _ => None,
        }
    }

    /// Disarm; returns the dropped payload, if any
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, p)| p)
    }

    /// Check if a call is waiting
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending call fires
    pub fn deadline(&self) -> Option<Millis> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }
}

/// FIFO of work to run once the current update settles
#[derive(Clone, Debug)]
pub struct DeferredQueue<T> {
    items: VecDeque<T>,
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }
}

impl<T> DeferredQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: T) {
        self.items.push_back(item);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
