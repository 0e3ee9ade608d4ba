//! Stock behaviors for common cross-cutting concerns.
//!
//! Each behavior here is a small configured struct; append them with
//! `MediatorBuilder::with_behavior` in the order they should run.

pub mod logging;
pub mod retry;
#[cfg(feature = "timeout")]
pub mod timeout;
pub mod validation;

pub use logging::LoggingBehavior;
pub use retry::RetryBehavior;
#[cfg(feature = "timeout")]
pub use timeout::{TimeoutBehavior, TimeoutError};
pub use validation::ValidationBehavior;
