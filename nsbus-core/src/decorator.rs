//! The decorator contract.
//!
//! Decorators run before any handler, strictly sequentially, in the same
//! resolved order handlers would use. They prepare or validate the shared
//! message, and may install a [`Completion`] override to observe the call's
//! final outcome. Unlike handlers they cannot resolve a call — their only
//! short-circuit is the abort path, which fails the whole call with the
//! decorator's error before any handler runs.

use crate::completion::Completion;
use crate::error::BoxError;
use crate::message::{Message, Resolution};
use std::{future::Future, pin::Pin};

/// An entry that prepares or validates a dispatch call before its handlers.
///
/// Returning `Ok(())` proceeds to the next decorator; returning `Err` aborts
/// the call with that error, verbatim.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot decorate messages of type `{M}`",
    label = "missing `Decorator<{M}, {V}>` implementation",
    note = "implement `decorate`, or wrap a closure with `decorator_fn`"
)]
pub trait Decorator<M: Message, V: Resolution>: Send + Sync + 'static {
    /// Called before the handler chain, once per matching dispatch call.
    fn decorate(
        &self,
        namespace: &str,
        message: &mut M,
        completion: &mut Completion<M, V>,
    ) -> impl Future<Output = Result<(), BoxError>> + Send;
}

/// Dynamic object-safe version of [`Decorator`], used by the bus registries.
pub trait DynDecorator<M: Message, V: Resolution>: Send + Sync {
    /// Called before the handler chain (dynamic dispatch version).
    fn decorate_dyn<'a>(
        &'a self,
        namespace: &'a str,
        message: &'a mut M,
        completion: &'a mut Completion<M, V>,
    ) -> Pin<Box<dyn Future<Output = Result<(), BoxError>> + Send + 'a>>;
}

// Blanket implementation: any Decorator is a DynDecorator.
impl<M: Message, V: Resolution, T: Decorator<M, V>> DynDecorator<M, V> for T {
    fn decorate_dyn<'a>(
        &'a self,
        namespace: &'a str,
        message: &'a mut M,
        completion: &'a mut Completion<M, V>,
    ) -> Pin<Box<dyn Future<Output = Result<(), BoxError>> + Send + 'a>> {
        Box::pin(self.decorate(namespace, message, completion))
    }
}

/// A [`Decorator`] wrapping a plain synchronous closure.
///
/// Built with [`decorator_fn`].
pub struct DecoratorFn<F>(F);

/// Wrap a synchronous closure as a [`Decorator`].
///
/// ```rust,ignore
/// bus.add_decorator("io.connection", decorator_fn(|_ns, conn: &mut Conn, _c| {
///     conn.accepted_at = Some(Instant::now());
///     Ok(())
/// }));
/// ```
pub fn decorator_fn<M, V, F>(f: F) -> DecoratorFn<F>
where
    M: Message,
    V: Resolution,
    F: Fn(&str, &mut M, &mut Completion<M, V>) -> Result<(), BoxError> + Send + Sync + 'static,
{
    DecoratorFn(f)
}

impl<M, V, F> Decorator<M, V> for DecoratorFn<F>
where
    M: Message,
    V: Resolution,
    F: Fn(&str, &mut M, &mut Completion<M, V>) -> Result<(), BoxError> + Send + Sync + 'static,
{
    async fn decorate(
        &self,
        namespace: &str,
        message: &mut M,
        completion: &mut Completion<M, V>,
    ) -> Result<(), BoxError> {
        (self.0)(namespace, message, completion)
    }
}
