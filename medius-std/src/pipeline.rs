//! Composition of behaviors around the terminal dispatch step.

use std::sync::Arc;

use futures::future::BoxFuture;
use medius_core::{
    Context, Continuation, DispatchError, DispatchResult, DynBehavior, DynHandler, Next, Request,
};

use crate::registry::Registry;

/// One step of a composed dispatch chain.
///
/// Built once at mediator construction and immutable afterwards. Each
/// link holds its behavior and the step behind it, so running the head
/// visits behaviors in registration order and bottoms out at the
/// terminal registry lookup.
pub(crate) enum ChainStep {
    /// A behavior wrapped around the rest of the chain.
    Link {
        behavior: Arc<dyn DynBehavior>,
        next: Arc<ChainStep>,
    },
    /// The innermost step: resolve the handler and invoke it.
    Terminal { registry: Arc<Registry> },
}

impl ChainStep {
    /// Wraps `behaviors` around the terminal step for `registry`.
    ///
    /// Behaviors are folded in reverse registration order, so the first
    /// registered becomes the outermost link and runs first. Zero
    /// behaviors build no chain at all; the mediator then calls the
    /// terminal step directly.
    pub(crate) fn compose(
        registry: Arc<Registry>,
        behaviors: Vec<Arc<dyn DynBehavior>>,
    ) -> Option<Arc<ChainStep>> {
        if behaviors.is_empty() {
            return None;
        }
        let mut step = Arc::new(ChainStep::Terminal { registry });
        for behavior in behaviors.into_iter().rev() {
            step = Arc::new(ChainStep::Link {
                behavior,
                next: step,
            });
        }
        Some(step)
    }

    /// Runs this step and everything behind it.
    pub(crate) fn run<'a>(
        &'a self,
        ctx: &'a Context,
        request: &'a dyn Request,
    ) -> BoxFuture<'a, DispatchResult> {
        Box::pin(async move {
            match self {
                ChainStep::Link { behavior, next } => {
                    let rest = Rest {
                        step: next.as_ref(),
                        request,
                    };
                    behavior.process_dyn(ctx, request, Next::new(&rest)).await
                }
                ChainStep::Terminal { registry } => {
                    dispatch_to_handler(registry, ctx, request).await
                }
            }
        })
    }
}

/// The chain behind one behavior, with the request already bound.
/// Resuming takes only a context, so a behavior can substitute a derived
/// one without being able to swap the request.
struct Rest<'a> {
    step: &'a ChainStep,
    request: &'a dyn Request,
}

impl Continuation for Rest<'_> {
    fn resume<'a>(&'a self, ctx: &'a Context) -> BoxFuture<'a, DispatchResult> {
        self.step.run(ctx, self.request)
    }
}

/// The terminal step: look the handler factory up under the request's
/// key, build the handler for this dispatch and invoke it.
///
/// The factory runs every time a request reaches this point; nothing is
/// cached. Factory errors abort the dispatch and surface unaltered.
pub(crate) async fn dispatch_to_handler(
    registry: &Registry,
    ctx: &Context,
    request: &dyn Request,
) -> DispatchResult {
    let factory = registry.lookup(request.key())?;
    let handler = factory.create().map_err(DispatchError::Custom)?;
    handler.handle_dyn(ctx, request).await
}
