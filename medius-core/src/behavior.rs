//! Pipeline behaviors, the middleware layer of a dispatch chain.
//!
//! Behaviors wrap the path between the caller and the handler. Each one
//! receives the context, the erased request and a [`Next`] continuation,
//! and decides what happens around, instead of, or after the rest of the
//! chain:
//!
//! - run pre/post logic and pass the inner result through (logging,
//!   metrics, tracing)
//! - refuse to continue and return its own result or error (validation,
//!   short-circuit caching)
//! - run the continuation and replace what came back (result shaping,
//!   error translation)
//! - run the continuation more than once (retries)
//!
//! Behaviors execute in registration order; each sees the work of all
//! behaviors registered after it, plus the handler, behind its `next`.

use std::future::Future;

use crate::context::Context;
use crate::error::DispatchResult;
use crate::handler::BoxFuture;
use crate::request::Request;

/// A cross-cutting step wrapped around request dispatch.
///
/// # Static vs Dynamic Dispatch
///
/// This trait uses native `async fn` for static dispatch. The composed
/// chain stores behaviors type-erased via [`DynBehavior`], which every
/// `Behavior` implements automatically.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a pipeline behavior",
    label = "missing `Behavior` implementation",
    note = "Behaviors must implement the async `process` method and call `next.run(ctx)` to continue the chain."
)]
pub trait Behavior: Send + Sync + 'static {
    /// Processes one dispatch.
    ///
    /// Call `next.run(ctx)` to hand control to the remainder of the chain;
    /// return without calling it to short-circuit. The request itself is
    /// fixed for the whole dispatch, but the context passed to `next` may
    /// be a derived one.
    fn process(
        &self,
        ctx: &Context,
        request: &dyn Request,
        next: Next<'_>,
    ) -> impl Future<Output = DispatchResult> + Send;
}

/// Dynamic object-safe version of [`Behavior`].
pub trait DynBehavior: Send + Sync + 'static {
    /// Processes one dispatch (dynamic dispatch version).
    fn process_dyn<'a>(
        &'a self,
        ctx: &'a Context,
        request: &'a dyn Request,
        next: Next<'a>,
    ) -> BoxFuture<'a, DispatchResult>;
}

// Blanket implementation: any type implementing Behavior implements DynBehavior.
impl<T: Behavior> DynBehavior for T {
    fn process_dyn<'a>(
        &'a self,
        ctx: &'a Context,
        request: &'a dyn Request,
        next: Next<'a>,
    ) -> BoxFuture<'a, DispatchResult> {
        Box::pin(self.process(ctx, request, next))
    }
}

/// The remainder of a dispatch chain, as a single resumable capability.
///
/// Implemented by the chain machinery; behaviors only ever see it through
/// [`Next`]. The request is captured inside the continuation, so resuming
/// takes nothing but the context to run under.
pub trait Continuation: Send + Sync {
    /// Runs the rest of the chain under `ctx`.
    fn resume<'a>(&'a self, ctx: &'a Context) -> BoxFuture<'a, DispatchResult>;
}

/// Handle a behavior uses to invoke the rest of its chain.
///
/// `run` borrows rather than consumes, so a behavior may invoke the
/// remainder several times (retries) or not at all (short-circuit). Each
/// invocation re-enters the downstream behaviors and the handler from the
/// top.
pub struct Next<'a> {
    continuation: &'a dyn Continuation,
}

impl<'a> Next<'a> {
    /// Wraps a continuation for hand-off to a behavior.
    pub fn new(continuation: &'a dyn Continuation) -> Self {
        Self { continuation }
    }

    /// Runs the remainder of the chain under `ctx`.
    ///
    /// Pass the context unchanged to keep the caller's cancellation and
    /// deadline in force, or pass a derived one to tighten them.
    pub async fn run(&self, ctx: &Context) -> DispatchResult {
        self.continuation.resume(ctx).await
    }
}

impl std::fmt::Debug for Next<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Next")
    }
}

/// Adapts a plain function into a [`Behavior`].
///
/// For one-off behaviors a free function is often lighter than a struct.
/// The function returns a boxed future so it stays nameable:
///
/// ```rust
/// use medius_core::{BehaviorFn, BoxFuture, Context, DispatchResult, Next, Request};
///
/// fn tag_errors<'a>(
///     ctx: &'a Context,
///     request: &'a dyn Request,
///     next: Next<'a>,
/// ) -> BoxFuture<'a, DispatchResult> {
///     Box::pin(async move {
///         let key = request.key().to_owned();
///         next.run(ctx).await.map_err(|err| {
///             medius_core::DispatchError::custom(format!("{key}: {err}"))
///         })
///     })
/// }
///
/// let behavior = BehaviorFn::new(tag_errors);
/// ```
pub struct BehaviorFn<F>(F);

impl<F> BehaviorFn<F>
where
    F: for<'a> Fn(&'a Context, &'a dyn Request, Next<'a>) -> BoxFuture<'a, DispatchResult>
        + Send
        + Sync
        + 'static,
{
    /// Wraps `f` as a behavior.
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> Behavior for BehaviorFn<F>
where
    F: for<'a> Fn(&'a Context, &'a dyn Request, Next<'a>) -> BoxFuture<'a, DispatchResult>
        + Send
        + Sync
        + 'static,
{
    async fn process(
        &self,
        ctx: &Context,
        request: &dyn Request,
        next: Next<'_>,
    ) -> DispatchResult {
        (self.0)(ctx, request, next).await
    }
}
