//! # nsbus - Namespace-Scoped Message Dispatch Bus
//!
//! `nsbus` dispatches a mutable message to the ordered set of handlers and
//! decorators registered under a dot-delimited namespace and all of its
//! ancestors, root (`""`) first.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use nsbus::{Bus, Signal, handler_fn};
//!
//! let mut bus: Bus<Ticket, String> = Bus::new();
//!
//! bus.add_root_handler(handler_fn(|_ns, ticket: &mut Ticket| {
//!     ticket.audited = true;
//!     Signal::Next
//! }));
//! bus.add_handler("support.ticket", handler_fn(|_ns, ticket: &mut Ticket| {
//!     Signal::Resolve(format!("filed #{}", ticket.id))
//! }));
//!
//! let reply = bus.process("support.ticket.urgent", ticket).await?;
//! ```
//!
//! Dispatch order is deterministic: the root chain, then each matching
//! ancestor namespace in lexicographic order, each contributing its entries
//! in registration order. Decorators run first and may mutate the message or
//! abort the call; handlers then run until one resolves or rejects, and an
//! exhausted chain fails with `no handlers`.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod bus;
mod chain;
mod matcher;

pub mod decorators;
pub mod testing;

pub use bus::{Bus, ROOT};

pub use nsbus_core::{
    BoxError, Completion, Decorator, DecoratorFn, DispatchError, DynDecorator, DynHandler,
    Handler, HandlerFn, Message, Outcome, Resolution, Settled, Signal, decorator_fn, handler_fn,
};

/// Prelude module - common imports for nsbus.
///
/// # Usage
///
/// ```rust,ignore
/// use nsbus::prelude::*;
/// ```
pub mod prelude {
    pub use crate::bus::{Bus, ROOT};
    pub use nsbus_core::{
        BoxError, Decorator, DispatchError, Handler, Outcome, Signal, decorator_fn, handler_fn,
    };
}
