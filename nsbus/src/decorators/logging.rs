//! Logging decorator for dispatch observation.

use nsbus_core::{BoxError, Completion, Decorator, Message, Resolution};

/// A decorator that logs each dispatch for debugging/observation.
///
/// Never mutates the message and never aborts.
pub struct LoggingDecorator;

impl<M: Message + std::fmt::Debug, V: Resolution> Decorator<M, V> for LoggingDecorator {
    async fn decorate(
        &self,
        namespace: &str,
        message: &mut M,
        _completion: &mut Completion<M, V>,
    ) -> Result<(), BoxError> {
        #[cfg(feature = "tracing")]
        {
            tracing::info!(namespace, message = ?*message, "dispatching");
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = (namespace, message); // Suppress unused warning
        }
        Ok(())
    }
}
