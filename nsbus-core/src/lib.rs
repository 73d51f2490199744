//! # nsbus-core
//!
//! Core contracts for the nsbus namespace-scoped dispatch bus.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! handler and decorator implementations that don't need the full `nsbus`
//! runtime.
//!
//! # Dispatch Model
//!
//! A dispatch call targets a dot-delimited **namespace** (the empty string is
//! the root, an implicit ancestor of every namespace) and carries one mutable
//! **message**. Two kinds of entries participate:
//!
//! ## Decorators ([`Decorator`])
//!
//! Run first, strictly one at a time, in resolved order. A decorator may
//! mutate the shared message, install a [`Completion`] override to observe
//! the final outcome, or abort the whole call by returning an error. An
//! abort short-circuits: no handler runs.
//!
//! ## Handlers ([`Handler`])
//!
//! Run after the decorators, strictly one at a time, in resolved order.
//! Each invocation returns exactly one [`Signal`]:
//!
//! - [`Signal::Next`] — defer to the following handler
//! - [`Signal::Resolve`] — terminate the call with a value
//! - [`Signal::Reject`] — terminate the call with an error
//!
//! Once a handler resolves or rejects, no further handler runs. If the chain
//! is exhausted with every handler deferring, the call fails with
//! [`DispatchError::NoHandlers`].
//!
//! # Error Types
//!
//! - [`DispatchError`] — terminal failure of a dispatch call
//! - [`BoxError`] — boxed application error carried verbatim through the bus

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod completion;
mod decorator;
mod error;
mod handler;
mod message;
mod signal;

pub use completion::{Completion, Settled};
pub use decorator::{Decorator, DecoratorFn, DynDecorator, decorator_fn};
pub use error::{BoxError, DispatchError, Outcome};
pub use handler::{DynHandler, Handler, HandlerFn, handler_fn};
pub use message::{Message, Resolution};
pub use signal::Signal;
