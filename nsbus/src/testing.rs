//! Testing utilities for nsbus.
//!
//! Reusable doubles for exercising buses in tests:
//!
//! - [`RecordingHandler`]: records its label in a shared order log, defers
//! - [`CountingHandler`]: counts invocations, defers
//! - [`ResolveHandler`] / [`RejectHandler`]: settle immediately
//! - [`UnreachableHandler`]: panics if ever invoked
//! - [`CountingDecorator`] / [`AbortDecorator`]: decorator counterparts

use nsbus_core::{
    BoxError, Completion, Decorator, Handler, Message, Resolution, Signal,
};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

/// A shared, append-only execution order log.
pub type OrderLog = Arc<Mutex<Vec<String>>>;

/// Create an empty [`OrderLog`].
pub fn order_log() -> OrderLog {
    Arc::new(Mutex::new(Vec::new()))
}

// ============================================================================
// Handler doubles
// ============================================================================

/// A handler that records its label in a shared log and defers.
///
/// # Example
///
/// ```rust,ignore
/// let log = order_log();
/// bus.add_handler("a", RecordingHandler::new("a", log.clone()));
/// bus.add_handler("a.b", RecordingHandler::new("a.b", log.clone()));
///
/// let _ = bus.process("a.b", message).await;
/// assert_eq!(*log.lock().unwrap(), ["a", "a.b"]);
/// ```
pub struct RecordingHandler {
    label: String,
    log: OrderLog,
}

impl RecordingHandler {
    /// Record `label` into `log` on every invocation.
    pub fn new(label: impl Into<String>, log: OrderLog) -> Self {
        Self {
            label: label.into(),
            log,
        }
    }
}

impl<M: Message, V: Resolution> Handler<M, V> for RecordingHandler {
    async fn handle(&self, _namespace: &str, _message: &mut M) -> Signal<V> {
        self.log.lock().unwrap().push(self.label.clone());
        Signal::Next
    }
}

/// A handler that counts invocations and defers.
pub struct CountingHandler {
    count: Arc<AtomicUsize>,
}

impl CountingHandler {
    /// Create a new counting handler.
    pub fn new() -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl Default for CountingHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CountingHandler {
    fn clone(&self) -> Self {
        Self {
            count: self.count.clone(),
        }
    }
}

impl<M: Message, V: Resolution> Handler<M, V> for CountingHandler {
    async fn handle(&self, _namespace: &str, _message: &mut M) -> Signal<V> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Signal::Next
    }
}

/// A handler that immediately resolves with a canned value.
pub struct ResolveHandler<V> {
    value: V,
}

impl<V> ResolveHandler<V> {
    /// Resolve every matching call with `value`.
    pub fn new(value: V) -> Self {
        Self { value }
    }
}

impl<M: Message, V: Resolution + Clone + Sync> Handler<M, V> for ResolveHandler<V> {
    async fn handle(&self, _namespace: &str, _message: &mut M) -> Signal<V> {
        Signal::Resolve(self.value.clone())
    }
}

/// A handler that immediately rejects with a canned error message.
pub struct RejectHandler {
    error: String,
}

impl RejectHandler {
    /// Reject every matching call with `error`.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

impl<M: Message, V: Resolution> Handler<M, V> for RejectHandler {
    async fn handle(&self, _namespace: &str, _message: &mut M) -> Signal<V> {
        Signal::reject(self.error.clone())
    }
}

/// A handler that must never run; panics (failing the test) if it does.
pub struct UnreachableHandler;

impl<M: Message, V: Resolution> Handler<M, V> for UnreachableHandler {
    async fn handle(&self, namespace: &str, _message: &mut M) -> Signal<V> {
        panic!("handler for {namespace:?} ran after the chain settled");
    }
}

// ============================================================================
// Decorator doubles
// ============================================================================

/// A decorator that counts invocations and proceeds.
pub struct CountingDecorator {
    count: Arc<AtomicUsize>,
}

impl CountingDecorator {
    /// Create a new counting decorator.
    pub fn new() -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl Default for CountingDecorator {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CountingDecorator {
    fn clone(&self) -> Self {
        Self {
            count: self.count.clone(),
        }
    }
}

impl<M: Message, V: Resolution> Decorator<M, V> for CountingDecorator {
    async fn decorate(
        &self,
        _namespace: &str,
        _message: &mut M,
        _completion: &mut Completion<M, V>,
    ) -> Result<(), BoxError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// A decorator that aborts every matching call with a canned error message.
pub struct AbortDecorator {
    error: String,
}

impl AbortDecorator {
    /// Abort every matching call with `error`.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

impl<M: Message, V: Resolution> Decorator<M, V> for AbortDecorator {
    async fn decorate(
        &self,
        _namespace: &str,
        _message: &mut M,
        _completion: &mut Completion<M, V>,
    ) -> Result<(), BoxError> {
        Err(self.error.clone().into())
    }
}
