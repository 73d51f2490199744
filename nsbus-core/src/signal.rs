//! The per-step signal returned by handler invocations.

use crate::error::BoxError;

/// What a handler decided to do with a dispatch call.
///
/// Exactly one signal is produced per invocation — the signature makes
/// double-signalling unrepresentable. The chain executor folds signals into
/// its latch: the first `Resolve` or `Reject` settles the call and no later
/// handler runs.
#[derive(Debug)]
pub enum Signal<V> {
    /// Defer to the following handler in the chain.
    Next,
    /// Terminate the call; `V` becomes the resolved outcome.
    Resolve(V),
    /// Terminate the call; the error becomes the rejected outcome.
    Reject(BoxError),
}

impl<V> Signal<V> {
    /// Build a rejection from anything convertible into a boxed error.
    ///
    /// ```rust,ignore
    /// return Signal::reject("magic text");
    /// ```
    pub fn reject(error: impl Into<BoxError>) -> Self {
        Signal::Reject(error.into())
    }

    /// Whether this signal defers to the next handler.
    pub fn is_next(&self) -> bool {
        matches!(self, Signal::Next)
    }
}
