//! The bus: two append-only registries and the `process` orchestration.

use crate::chain::Latch;
use crate::matcher::{self, Registry};
use nsbus_core::{
    Completion, Decorator, DispatchError, DynDecorator, DynHandler, Handler, Message, Outcome,
    Resolution, Settled, Signal,
};

/// The root namespace: ancestor of every namespace, always dispatched first.
pub const ROOT: &str = "";

/// A hierarchical, namespace-scoped message dispatch bus.
///
/// `M` is the message type threaded mutably through each dispatch call; `V`
/// is the type handlers resolve with.
///
/// Registration borrows the bus mutably and dispatch borrows it shared, so
/// the type system enforces the setup-then-dispatch lifecycle: wrap the bus
/// in an `Arc` once registration is done and `process` freely from any
/// number of tasks. Entries are never removed.
///
/// # Example
///
/// ```rust,ignore
/// let mut bus: Bus<Order, Receipt> = Bus::new();
/// bus.add_handler("shop.order", Checkout::new());
/// let bus = Arc::new(bus);
///
/// let receipt = bus.process("shop.order.express", order).await?;
/// ```
pub struct Bus<M: Message, V: Resolution> {
    handlers: Registry<Box<dyn DynHandler<M, V>>>,
    decorators: Registry<Box<dyn DynDecorator<M, V>>>,
}

impl<M: Message, V: Resolution> Bus<M, V> {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self {
            handlers: Registry::new(),
            decorators: Registry::new(),
        }
    }

    /// Append a handler to `namespace`'s chain (`""` is the root).
    pub fn add_handler(&mut self, namespace: impl Into<String>, handler: impl Handler<M, V>) {
        self.handlers
            .entry(namespace.into())
            .or_default()
            .push(Box::new(handler));
    }

    /// Append a handler to the root chain, which runs for every namespace.
    pub fn add_root_handler(&mut self, handler: impl Handler<M, V>) {
        self.add_handler(ROOT, handler);
    }

    /// Append a decorator to `namespace`'s chain (`""` is the root).
    pub fn add_decorator(&mut self, namespace: impl Into<String>, decorator: impl Decorator<M, V>) {
        self.decorators
            .entry(namespace.into())
            .or_default()
            .push(Box::new(decorator));
    }

    /// Append a decorator to the root chain, which runs for every namespace.
    pub fn add_root_decorator(&mut self, decorator: impl Decorator<M, V>) {
        self.add_decorator(ROOT, decorator);
    }

    /// Dispatch `message` to `namespace`.
    ///
    /// Runs the applicable decorators sequentially (any error aborts the call
    /// before a handler runs), then the applicable handlers sequentially
    /// until one resolves or rejects. An exhausted handler chain fails with
    /// [`DispatchError::NoHandlers`]. If a decorator installed a completion
    /// override, it fires after settlement, ahead of the return to the
    /// caller.
    pub async fn process(&self, namespace: &str, mut message: M) -> Outcome<V> {
        let mut completion = Completion::new();

        let decorators = matcher::resolve(namespace, &self.decorators);
        // Boxed so the opaque `drive` future never leaks into `process`'s
        // own future; rustc cannot prove the unboxed form `Send` (see
        // rust-lang/rust#110338).
        // Both chains inline `chain::drive`'s loop verbatim: an async
        // closure capturing `&mut message` defeats rustc's auto-trait
        // solver, leaving `process`'s future unprovably `Send`
        // (rust-lang/rust#110338).
        let mut latch: Latch<V> = Latch::Pending;
        for decorator in decorators {
            if !latch.is_pending() {
                break;
            }
            let signal = match decorator
                .decorate_dyn(namespace, &mut message, &mut completion)
                .await
            {
                Ok(()) => Signal::Next,
                Err(error) => Signal::Reject(error),
            };
            latch.settle(signal);
        }

        let outcome = match latch {
            Latch::Rejected(error) => Err(DispatchError::Decorator(error)),
            // Decorators cannot resolve; exhaustion means success.
            Latch::Pending | Latch::Resolved(_) => {
                let handlers = matcher::resolve(namespace, &self.handlers);
                let mut latch: Latch<V> = Latch::Pending;
                for handler in handlers {
                    if !latch.is_pending() {
                        break;
                    }
                    let signal = handler.handle_dyn(namespace, &mut message).await;
                    latch.settle(signal);
                }

                match latch {
                    Latch::Resolved(value) => Ok(value),
                    Latch::Rejected(error) => Err(DispatchError::Handler(error)),
                    Latch::Pending => Err(DispatchError::NoHandlers),
                }
            }
        };

        completion.fire(Settled {
            namespace,
            message: &message,
            outcome: &outcome,
        });

        outcome
    }
}

impl<M: Message, V: Resolution> Default for Bus<M, V> {
    fn default() -> Self {
        Self::new()
    }
}
