//! Marker traits for message payloads and resolution values.

/// A marker trait for the mutable payload threaded through one dispatch call.
///
/// The message is owned by the dispatch call and handed to every decorator
/// and handler as `&mut M`, one step at a time. It never crosses calls, so
/// `Sync` is not required.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Message",
    label = "must be `Send + 'static`",
    note = "Dispatch calls may hop threads between steps, so payloads must be thread-safe to move."
)]
pub trait Message: Send + 'static {}

impl<T: Send + 'static> Message for T {}

/// A marker trait for the value a handler may resolve a dispatch call with.
pub trait Resolution: Send + 'static {}

impl<T: Send + 'static> Resolution for T {}
