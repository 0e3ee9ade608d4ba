//! The mediator: a frozen registry plus a composed behavior chain.

use std::sync::Arc;

use medius_core::{
    Behavior, BehaviorFn, BoxError, BoxFuture, BuildError, Context, DispatchResult, DynBehavior,
    Handler, HandlerFactory, Next, Request, Sender, SharedHandler,
};

use crate::pipeline::{self, ChainStep};
use crate::registry::Registry;

/// In-process request dispatcher.
///
/// A mediator owns a key-to-factory [`Registry`] and an immutable chain
/// of behaviors composed around the terminal lookup step. It is built
/// once through [`MediatorBuilder`], holds no per-dispatch state and is
/// safe to share (`Arc`) and call concurrently for the life of the
/// process.
///
/// # Example
///
/// ```rust
/// use medius_core::{Context, Handler, Request, Response};
/// use medius_std::Mediator;
///
/// struct Ping;
///
/// impl Request for Ping {
///     fn key(&self) -> &str {
///         "ping"
///     }
/// }
///
/// struct PingHandler;
///
/// impl Handler for PingHandler {
///     async fn handle(
///         &self,
///         _ctx: &Context,
///         _request: &dyn Request,
///     ) -> medius_core::DispatchResult {
///         Ok(Response::new("pong"))
///     }
/// }
///
/// # futures::executor::block_on(async {
/// let mediator = Mediator::builder()
///     .with_handler(&Ping, PingHandler)
///     .build()
///     .unwrap();
///
/// let response = mediator.send(&Context::background(), &Ping).await.unwrap();
/// assert_eq!(response.downcast_ref::<&str>(), Some(&"pong"));
/// # });
/// ```
pub struct Mediator {
    registry: Arc<Registry>,
    chain: Option<Arc<ChainStep>>,
}

impl Mediator {
    /// Starts assembling a mediator.
    pub fn builder() -> MediatorBuilder {
        MediatorBuilder::new()
    }

    /// Dispatches `request` through the behavior chain to its handler.
    ///
    /// With no behaviors registered this goes straight to the terminal
    /// step; otherwise the outermost behavior runs first and the rest of
    /// the chain sits behind its continuation.
    pub async fn send(&self, ctx: &Context, request: &dyn Request) -> DispatchResult {
        match &self.chain {
            Some(chain) => chain.run(ctx, request).await,
            None => pipeline::dispatch_to_handler(&self.registry, ctx, request).await,
        }
    }

    /// The registry this mediator resolves handlers from.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

impl Sender for Mediator {
    async fn send(&self, ctx: &Context, request: &dyn Request) -> DispatchResult {
        Mediator::send(self, ctx, request).await
    }
}

/// Factory that hands out the same shared handler on every dispatch.
struct SharedInstanceFactory(SharedHandler);

impl HandlerFactory for SharedInstanceFactory {
    fn create(&self) -> Result<SharedHandler, BoxError> {
        Ok(Arc::clone(&self.0))
    }
}

/// Builder assembling a [`Mediator`] from registration directives.
///
/// Directives apply in call order. The first failing directive latches
/// its error; later directives become no-ops and [`build`] returns the
/// latched error instead of a mediator.
///
/// [`build`]: MediatorBuilder::build
#[derive(Default)]
pub struct MediatorBuilder {
    registry: Registry,
    behaviors: Vec<Arc<dyn DynBehavior>>,
    error: Option<BuildError>,
}

impl MediatorBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the prototype's key to a single handler instance, shared by
    /// every dispatch of that key.
    ///
    /// The prototype is only consulted for its key. Binding a key twice
    /// keeps the later binding.
    pub fn with_handler<H: Handler>(self, prototype: &dyn Request, handler: H) -> Self {
        let shared: SharedHandler = Arc::new(handler);
        self.with_handler_factory(prototype, SharedInstanceFactory(shared))
    }

    /// Binds the prototype's key to a factory invoked once per dispatch.
    ///
    /// Use this instead of [`with_handler`] when handlers carry
    /// per-dispatch state or construction can fail.
    ///
    /// [`with_handler`]: MediatorBuilder::with_handler
    pub fn with_handler_factory<F>(mut self, prototype: &dyn Request, factory: F) -> Self
    where
        F: HandlerFactory,
    {
        if self.error.is_some() {
            return self;
        }
        if let Err(err) = self.registry.register(prototype, Arc::new(factory)) {
            self.error = Some(err);
        }
        self
    }

    /// Appends a behavior to the chain.
    ///
    /// Behaviors run in the order they were appended; each wraps
    /// everything appended after it plus the handler.
    pub fn with_behavior<B: Behavior>(mut self, behavior: B) -> Self {
        if self.error.is_some() {
            return self;
        }
        self.behaviors.push(Arc::new(behavior));
        self
    }

    /// Appends a plain function as a behavior, via [`BehaviorFn`].
    pub fn with_behavior_fn<F>(self, f: F) -> Self
    where
        F: for<'a> Fn(&'a Context, &'a dyn Request, Next<'a>) -> BoxFuture<'a, DispatchResult>
            + Send
            + Sync
            + 'static,
    {
        self.with_behavior(BehaviorFn::new(f))
    }

    /// Freezes the registry, composes the chain and produces the
    /// mediator, or returns the first directive error.
    pub fn build(self) -> Result<Mediator, BuildError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        let behavior_count = self.behaviors.len();
        let registry = Arc::new(self.registry);
        let chain = ChainStep::compose(Arc::clone(&registry), self.behaviors);
        tracing::debug!(
            handlers = registry.len(),
            behaviors = behavior_count,
            "mediator assembled"
        );
        Ok(Mediator { registry, chain })
    }
}
