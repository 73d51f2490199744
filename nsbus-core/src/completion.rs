//! The completion-override extension point.
//!
//! A decorator may ask to observe the final outcome of the dispatch call it
//! is running in, independently of the normal delivery of that outcome to the
//! `process` caller. The bus fires the override exactly once, after the
//! handler chain settles (or the call aborts), ahead of returning to the
//! caller.

use crate::error::Outcome;
use crate::message::{Message, Resolution};

/// A view of a settled dispatch call, handed to a completion override.
pub struct Settled<'a, M, V> {
    /// The namespace the call targeted.
    pub namespace: &'a str,
    /// The message in its final, post-chain state.
    pub message: &'a M,
    /// The outcome about to be delivered to the caller.
    pub outcome: &'a Outcome<V>,
}

type OverrideFn<M, V> = Box<dyn FnOnce(Settled<'_, M, V>) + Send>;

/// Per-call slot for a completion override, handed to each decorator.
///
/// The slot holds at most one override: installing a second one replaces the
/// first, so when several decorators compete, the **last** decorator to run
/// wins. Decorators that need to cooperate should compose above the bus.
pub struct Completion<M, V> {
    slot: Option<OverrideFn<M, V>>,
}

impl<M: Message, V: Resolution> Completion<M, V> {
    /// Create an empty slot. Called by the bus once per dispatch call.
    pub fn new() -> Self {
        Self { slot: None }
    }

    /// Install (or replace) the completion override for this call.
    pub fn on_settled<F>(&mut self, f: F)
    where
        F: FnOnce(Settled<'_, M, V>) + Send + 'static,
    {
        self.slot = Some(Box::new(f));
    }

    /// Whether an override is currently installed.
    pub fn is_armed(&self) -> bool {
        self.slot.is_some()
    }

    /// Fire the override, if any. Called by the bus after the call settles.
    pub fn fire(self, settled: Settled<'_, M, V>) {
        if let Some(f) = self.slot {
            f(settled);
        }
    }
}

impl<M: Message, V: Resolution> Default for Completion<M, V> {
    fn default() -> Self {
        Self::new()
    }
}
