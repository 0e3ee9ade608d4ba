//! Timeout behavior for time-limited dispatch.

use std::time::Duration;

use medius_core::{Behavior, Context, DispatchError, DispatchResult, Next, Request};
use thiserror::Error;

/// Error returned when the rest of the chain outruns its time budget.
#[derive(Debug, Clone, Error)]
#[error("dispatch timed out after {timeout:?}")]
pub struct TimeoutError {
    /// The budget that was exceeded.
    pub timeout: Duration,
}

/// A behavior that bounds the rest of the chain with a timeout.
///
/// The continuation runs under a derived context carrying the tightened
/// deadline, so downstream behaviors and the handler can see how much
/// budget is left. If the continuation does not finish in time the
/// dispatch fails with [`TimeoutError`]; the abandoned future is
/// dropped.
pub struct TimeoutBehavior {
    timeout: Duration,
}

impl TimeoutBehavior {
    /// Creates a behavior enforcing `timeout` per dispatch.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Behavior for TimeoutBehavior {
    async fn process(
        &self,
        ctx: &Context,
        _request: &dyn Request,
        next: Next<'_>,
    ) -> DispatchResult {
        let bounded = ctx.with_timeout(self.timeout);
        match tokio::time::timeout(self.timeout, next.run(&bounded)).await {
            Ok(result) => result,
            Err(_) => Err(DispatchError::custom(TimeoutError {
                timeout: self.timeout,
            })),
        }
    }
}
