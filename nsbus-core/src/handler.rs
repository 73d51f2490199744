//! The handler contract.
//!
//! Handlers are the terminal entries of a dispatch chain: each one may
//! resolve the call, reject it, or defer to the handler after it. They run
//! strictly sequentially; at most one handler is in flight per dispatch call,
//! so the `&mut M` message access is race-free by construction.

use crate::message::{Message, Resolution};
use crate::signal::Signal;
use std::{future::Future, pin::Pin};

/// An entry that may terminate a dispatch call.
///
/// Receives the target namespace and exclusive access to the call's message,
/// and answers with exactly one [`Signal`]. The invocation may suspend for an
/// arbitrary duration before signalling; the chain does not advance until it
/// does.
///
/// # Static vs Dynamic Dispatch
///
/// This trait uses native `async fn` for zero-cost static dispatch. The bus
/// registries store the object-safe [`DynHandler`] form, which every
/// `Handler` implements automatically.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle messages of type `{M}`",
    label = "missing `Handler<{M}, {V}>` implementation",
    note = "implement `handle`, or wrap a closure with `handler_fn`"
)]
pub trait Handler<M: Message, V: Resolution>: Send + Sync + 'static {
    /// Called when a dispatch call reaches this handler.
    fn handle(&self, namespace: &str, message: &mut M)
    -> impl Future<Output = Signal<V>> + Send;
}

/// Dynamic object-safe version of [`Handler`], used by the bus registries.
pub trait DynHandler<M: Message, V: Resolution>: Send + Sync {
    /// Called when a dispatch call reaches this handler (dynamic dispatch
    /// version).
    fn handle_dyn<'a>(
        &'a self,
        namespace: &'a str,
        message: &'a mut M,
    ) -> Pin<Box<dyn Future<Output = Signal<V>> + Send + 'a>>;
}

// Blanket implementation: any Handler is a DynHandler.
impl<M: Message, V: Resolution, T: Handler<M, V>> DynHandler<M, V> for T {
    fn handle_dyn<'a>(
        &'a self,
        namespace: &'a str,
        message: &'a mut M,
    ) -> Pin<Box<dyn Future<Output = Signal<V>> + Send + 'a>> {
        Box::pin(self.handle(namespace, message))
    }
}

/// A [`Handler`] wrapping a plain synchronous closure.
///
/// Most handlers that don't suspend are one-liners; this adapter spares them
/// a struct and an `impl` block. Built with [`handler_fn`].
pub struct HandlerFn<F>(F);

/// Wrap a synchronous closure as a [`Handler`].
///
/// ```rust,ignore
/// bus.add_handler("billing.invoice", handler_fn(|_ns, invoice: &mut Invoice| {
///     invoice.total += 1;
///     Signal::Next
/// }));
/// ```
pub fn handler_fn<M, V, F>(f: F) -> HandlerFn<F>
where
    M: Message,
    V: Resolution,
    F: Fn(&str, &mut M) -> Signal<V> + Send + Sync + 'static,
{
    HandlerFn(f)
}

impl<M, V, F> Handler<M, V> for HandlerFn<F>
where
    M: Message,
    V: Resolution,
    F: Fn(&str, &mut M) -> Signal<V> + Send + Sync + 'static,
{
    async fn handle(&self, namespace: &str, message: &mut M) -> Signal<V> {
        (self.0)(namespace, message)
    }
}
