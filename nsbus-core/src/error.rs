//! Error types for nsbus.
//!
//! The bus never wraps or transforms application-supplied errors: it only
//! distinguishes *how* a dispatch call terminated. Decorator aborts and
//! handler rejections are carried verbatim inside their [`DispatchError`]
//! variant; the only synthetic failure is [`DispatchError::NoHandlers`].

use thiserror::Error;

/// A boxed error type for application errors carried through the bus.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The final state of one dispatch call: a resolved value or a failure.
pub type Outcome<V> = Result<V, DispatchError>;

/// Terminal failure of a dispatch call.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The handler chain was exhausted without any handler resolving or
    /// rejecting (including the case where no handler matched at all).
    #[error("no handlers")]
    NoHandlers,

    /// A decorator aborted the call before any handler ran.
    ///
    /// The inner error is the decorator's, untransformed.
    #[error(transparent)]
    Decorator(BoxError),

    /// A handler rejected the call.
    ///
    /// The inner error is the handler's, untransformed.
    #[error(transparent)]
    Handler(BoxError),
}

impl DispatchError {
    /// Whether this is the synthetic exhaustion failure.
    pub fn is_no_handlers(&self) -> bool {
        matches!(self, DispatchError::NoHandlers)
    }
}
