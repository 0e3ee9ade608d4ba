//! Handlers and handler factories, the terminal point of a dispatch.
//!
//! A handler is where the business logic for a request key lives. The
//! mediator never holds handlers directly: it holds [`HandlerFactory`]
//! values and asks the factory for a handler once per dispatch, so
//! per-dispatch state is possible and instance reuse stays an explicit
//! choice of the factory.
//!
//! # Static vs Dynamic Dispatch
//!
//! [`Handler`] uses native `async fn` for static dispatch. The registry
//! stores handlers type-erased, so every handler also needs an
//! object-safe form; [`DynHandler`] is that form, and a blanket impl
//! derives it from [`Handler`] automatically.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::context::Context;
use crate::error::{BoxError, DispatchResult};
use crate::request::Request;

/// A boxed future, the dynamic-dispatch currency of the chain.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A type-erased handler shared between dispatches.
pub type SharedHandler = Arc<dyn DynHandler>;

/// The terminal endpoint of a dispatch chain.
///
/// Handlers receive the context and the erased request and produce the
/// chain's result. One handler serves every request registered under its
/// key; it recovers the concrete type with the downcast helpers on
/// [`dyn Request`](crate::Request#impl-dyn+Request).
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle requests",
    label = "missing `Handler` implementation",
    note = "Handlers must implement the async `handle` method."
)]
pub trait Handler: Send + Sync + 'static {
    /// Executes the handler logic.
    fn handle(
        &self,
        ctx: &Context,
        request: &dyn Request,
    ) -> impl Future<Output = DispatchResult> + Send;
}

/// Dynamic object-safe version of [`Handler`].
///
/// Use this trait when you need runtime polymorphism (the registry stores
/// `Arc<dyn DynHandler>`).
pub trait DynHandler: Send + Sync + 'static {
    /// Executes the handler logic (dynamic dispatch version).
    fn handle_dyn<'a>(
        &'a self,
        ctx: &'a Context,
        request: &'a dyn Request,
    ) -> BoxFuture<'a, DispatchResult>;
}

// Blanket implementation: any type implementing Handler implements DynHandler.
impl<T: Handler> DynHandler for T {
    fn handle_dyn<'a>(
        &'a self,
        ctx: &'a Context,
        request: &'a dyn Request,
    ) -> BoxFuture<'a, DispatchResult> {
        Box::pin(self.handle(ctx, request))
    }
}

// Allow a shared erased handler to be used where Handler is expected.
impl Handler for Arc<dyn DynHandler> {
    async fn handle(&self, ctx: &Context, request: &dyn Request) -> DispatchResult {
        // `as_ref` pins the call to the inner trait object; on the `Arc`
        // itself it would resolve to the blanket impl and recurse.
        self.as_ref().handle_dyn(ctx, request).await
    }
}

/// Produces the handler for one dispatch.
///
/// The mediator invokes the factory every time a request reaches the
/// terminal step, and never caches the result. A factory that always
/// returns the same `Arc` opts into instance reuse; a factory that
/// constructs a fresh handler gets per-dispatch state.
///
/// A factory failure aborts the dispatch and surfaces unaltered to the
/// caller.
pub trait HandlerFactory: Send + Sync + 'static {
    /// Builds or fetches the handler that will serve this dispatch.
    fn create(&self) -> Result<SharedHandler, BoxError>;
}

// Blanket impl for closures
impl<F> HandlerFactory for F
where
    F: Fn() -> Result<SharedHandler, BoxError> + Send + Sync + 'static,
{
    fn create(&self) -> Result<SharedHandler, BoxError> {
        (self)()
    }
}
