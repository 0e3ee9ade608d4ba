//! Logging behavior for dispatch observation.

use std::time::Instant;

use medius_core::{Behavior, Context, DispatchResult, Next, Request};

/// A behavior that logs every dispatch around the rest of the chain.
///
/// Emits a debug event before continuing and an info/warn event with the
/// elapsed time once the rest of the chain has finished. The outcome
/// passes through untouched, so the behavior can sit anywhere in the
/// chain without changing semantics.
#[derive(Default)]
pub struct LoggingBehavior;

impl LoggingBehavior {
    /// Creates the logging behavior.
    pub fn new() -> Self {
        Self
    }
}

impl Behavior for LoggingBehavior {
    async fn process(
        &self,
        ctx: &Context,
        request: &dyn Request,
        next: Next<'_>,
    ) -> DispatchResult {
        let key = request.key();
        tracing::debug!(key, "dispatching request");

        let started = Instant::now();
        let result = next.run(ctx).await;
        let elapsed = started.elapsed();

        match &result {
            Ok(response) => {
                tracing::info!(key, ?elapsed, response = response.type_name(), "request handled");
            }
            Err(err) => {
                tracing::warn!(key, ?elapsed, error = %err, "request failed");
            }
        }
        result
    }
}
