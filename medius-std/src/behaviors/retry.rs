//! Retry behavior re-running the rest of the chain on failure.

use medius_core::{Behavior, Context, DispatchError, DispatchResult, Next, Request};

/// A behavior that re-runs the rest of the chain when it fails.
///
/// Each retry re-enters every behavior behind this one and asks the
/// handler factory for a fresh handler, exactly like a new dispatch.
/// Retrying stops at the first success, once `attempts` tries have been
/// used, or as soon as the context is cancelled or expired.
///
/// [`DispatchError::HandlerNotFound`] is never retried: the registry is
/// frozen, so a key that is unknown now stays unknown.
pub struct RetryBehavior {
    attempts: u32,
}

impl RetryBehavior {
    /// Creates a behavior that runs the rest of the chain up to
    /// `attempts` times. The first try always happens, so `0` behaves
    /// like `1`.
    pub fn new(attempts: u32) -> Self {
        Self { attempts }
    }
}

impl Behavior for RetryBehavior {
    async fn process(
        &self,
        ctx: &Context,
        request: &dyn Request,
        next: Next<'_>,
    ) -> DispatchResult {
        let mut attempt: u32 = 1;
        loop {
            match next.run(ctx).await {
                Ok(response) => return Ok(response),
                Err(err @ DispatchError::HandlerNotFound(_)) => return Err(err),
                Err(err) => {
                    if attempt >= self.attempts || ctx.is_cancelled() || ctx.is_expired() {
                        return Err(err);
                    }
                    tracing::debug!(
                        key = request.key(),
                        attempt,
                        error = %err,
                        "retrying dispatch"
                    );
                    attempt += 1;
                }
            }
        }
    }
}
