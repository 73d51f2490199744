//! Outcome observation through the completion override.

use nsbus_core::{BoxError, Completion, Decorator, Message, Outcome, Resolution};

/// A decorator that forwards every settled outcome to a callback.
///
/// Installs a completion override on each dispatch call it decorates; the
/// callback receives the target namespace and the final outcome after the
/// handler chain settles, ahead of delivery to the `process` caller.
///
/// The override slot is last-wins: if a decorator running after this one
/// installs its own override, this one is displaced for that call.
pub struct ObserveOutcome<F> {
    callback: F,
}

impl<F> ObserveOutcome<F> {
    /// Observe outcomes with `callback`.
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<M, V, F> Decorator<M, V> for ObserveOutcome<F>
where
    M: Message,
    V: Resolution,
    F: Fn(&str, &Outcome<V>) + Clone + Send + Sync + 'static,
{
    async fn decorate(
        &self,
        _namespace: &str,
        _message: &mut M,
        completion: &mut Completion<M, V>,
    ) -> Result<(), BoxError> {
        let callback = self.callback.clone();
        completion.on_settled(move |settled| callback(settled.namespace, settled.outcome));
        Ok(())
    }
}
