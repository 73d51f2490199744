//! TCP transport adapter for the nsbus dispatch bus.
//!
//! Feeds inbound connection and message events into a shared [`NetBus`]:
//! every accepted socket is dispatched as `io.connection` (a failed outcome
//! closes the socket), and every newline-delimited JSON frame read from an
//! accepted socket is dispatched as `io.message`. Frames are observed through
//! the transport's public read API only; no library internals are patched.

pub mod event;
pub mod observability;
pub mod server;

pub use event::{Connection, Envelope, Frame, NetBus, NetEvent, ns};
pub use server::IoServer;
