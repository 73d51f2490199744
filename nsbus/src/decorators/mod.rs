//! Stock decorators.

mod logging;
mod observe;

pub use logging::LoggingDecorator;
pub use observe::ObserveOutcome;
