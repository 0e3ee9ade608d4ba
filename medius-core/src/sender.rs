//! Sender core traits.

use std::future::Future;

use crate::context::Context;
use crate::error::DispatchResult;
use crate::handler::BoxFuture;
use crate::request::Request;

/// A dispatcher that routes a request through its chain to a handler.
///
/// `Mediator` in `medius-std` is the standard implementation; code that
/// only needs to send requests can depend on this trait instead and stay
/// easy to stub out in tests.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot send requests",
    label = "missing `Sender` implementation",
    note = "Implement `Sender` (or use `medius_std::Mediator`) to dispatch requests."
)]
pub trait Sender: Send + Sync {
    /// Dispatches the request and returns the chain's outcome.
    fn send(
        &self,
        ctx: &Context,
        request: &dyn Request,
    ) -> impl Future<Output = DispatchResult> + Send;
}

/// Object-safe version of [`Sender`] for dynamic dispatch.
pub trait DynSender: Send + Sync {
    /// Dispatches the request and returns the chain's outcome.
    fn send_dyn<'a>(
        &'a self,
        ctx: &'a Context,
        request: &'a dyn Request,
    ) -> BoxFuture<'a, DispatchResult>;
}

impl<T: Sender> DynSender for T {
    fn send_dyn<'a>(
        &'a self,
        ctx: &'a Context,
        request: &'a dyn Request,
    ) -> BoxFuture<'a, DispatchResult> {
        Box::pin(self.send(ctx, request))
    }
}
