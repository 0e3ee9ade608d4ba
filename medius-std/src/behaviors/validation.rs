//! Validation behavior guarding the rest of the chain.

use medius_core::{Behavior, BoxError, Context, DispatchResult, Next, Request};

/// A behavior that lets a request through only if a check accepts it.
///
/// A rejected request never reaches the behaviors or handler behind this
/// one; the check's error becomes the chain's error. The check sees the
/// erased request and can downcast when it needs concrete fields.
///
/// # Example
///
/// ```rust
/// use medius_core::Request;
/// use medius_std::behaviors::ValidationBehavior;
///
/// let non_empty_key = ValidationBehavior::new(|request: &dyn Request| {
///     if request.key().is_empty() {
///         return Err("request key is empty".into());
///     }
///     Ok(())
/// });
/// # let _ = non_empty_key;
/// ```
pub struct ValidationBehavior<F> {
    check: F,
}

impl<F> ValidationBehavior<F>
where
    F: Fn(&dyn Request) -> Result<(), BoxError> + Send + Sync + 'static,
{
    /// Wraps `check` as a gate in front of the rest of the chain.
    pub fn new(check: F) -> Self {
        Self { check }
    }
}

impl<F> Behavior for ValidationBehavior<F>
where
    F: Fn(&dyn Request) -> Result<(), BoxError> + Send + Sync + 'static,
{
    async fn process(
        &self,
        ctx: &Context,
        request: &dyn Request,
        next: Next<'_>,
    ) -> DispatchResult {
        if let Err(err) = (self.check)(request) {
            tracing::debug!(key = request.key(), error = %err, "request rejected");
            return Err(medius_core::DispatchError::Custom(err));
        }
        next.run(ctx).await
    }
}
