//! Testing utilities for Medius.
//!
//! This module provides utilities to make testing behaviors, handlers and
//! whole mediators easier.
//!
//! # Features
//!
//! - [`RecordingBehavior`]: records enter/exit marks into a shared log for
//!   order assertions
//! - [`PassthroughBehavior`]: forwards to the rest of the chain untouched
//! - [`ShortCircuitBehavior`]: answers without continuing the chain
//! - [`ReplaceResponseBehavior`]: continues, then substitutes the response
//! - [`CountingHandler`], [`ConstHandler`], [`FailingHandler`]: canned
//!   handlers
//! - [`CountingFactory`]: counts how often a handler is manufactured
//! - [`StubContinuation`]: a canned continuation for unit-testing a
//!   behavior without building a mediator

use medius_core::{
    Behavior, BoxError, BoxFuture, Context, Continuation, DispatchError, DispatchResult, Handler,
    HandlerFactory, Next, Request, Response, SharedHandler,
};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Recording Behavior
// ============================================================================

/// A behavior that records when control enters and leaves it.
///
/// Several recording behaviors sharing one log make execution order
/// visible: each pushes `"<label>:before"` on the way in and
/// `"<label>:after"` on the way out, around the continuation.
///
/// # Example
///
/// ```rust,ignore
/// let log = Arc::new(Mutex::new(Vec::new()));
/// let mediator = Mediator::builder()
///     .with_behavior(RecordingBehavior::new("outer", Arc::clone(&log)))
///     .with_behavior(RecordingBehavior::new("inner", Arc::clone(&log)))
///     .with_handler(&Ping, PingHandler)
///     .build()?;
///
/// mediator.send(&Context::background(), &Ping).await?;
/// assert_eq!(
///     *log.lock().unwrap(),
///     ["outer:before", "inner:before", "inner:after", "outer:after"],
/// );
/// ```
pub struct RecordingBehavior {
    label: String,
    log: Arc<Mutex<Vec<String>>>,
}

impl RecordingBehavior {
    /// Creates a recording behavior pushing into `log` under `label`.
    pub fn new(label: impl Into<String>, log: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            label: label.into(),
            log,
        }
    }

    fn mark(&self, suffix: &str) {
        self.log.lock().unwrap().push(format!("{}:{suffix}", self.label));
    }
}

impl Behavior for RecordingBehavior {
    async fn process(
        &self,
        ctx: &Context,
        _request: &dyn Request,
        next: Next<'_>,
    ) -> DispatchResult {
        self.mark("before");
        let result = next.run(ctx).await;
        self.mark("after");
        result
    }
}

// ============================================================================
// Pass-through Behavior
// ============================================================================

/// A behavior that does nothing but continue the chain.
///
/// A chain with only pass-through behaviors is observationally identical
/// to a chain with none.
#[derive(Default)]
pub struct PassthroughBehavior;

impl PassthroughBehavior {
    /// Creates a pass-through behavior.
    pub fn new() -> Self {
        Self
    }
}

impl Behavior for PassthroughBehavior {
    async fn process(
        &self,
        ctx: &Context,
        _request: &dyn Request,
        next: Next<'_>,
    ) -> DispatchResult {
        next.run(ctx).await
    }
}

// ============================================================================
// Short-circuit Behavior
// ============================================================================

/// A behavior that answers by itself and never continues the chain.
///
/// Everything registered behind it, including the handler, stays
/// untouched.
pub struct ShortCircuitBehavior<T> {
    value: T,
}

impl<T: Clone + Send + Sync + 'static> ShortCircuitBehavior<T> {
    /// Creates a behavior that always answers with `value`.
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T: Clone + Send + Sync + 'static> Behavior for ShortCircuitBehavior<T> {
    async fn process(
        &self,
        _ctx: &Context,
        _request: &dyn Request,
        _next: Next<'_>,
    ) -> DispatchResult {
        Ok(Response::new(self.value.clone()))
    }
}

// ============================================================================
// Replace-response Behavior
// ============================================================================

/// A behavior that lets the chain run, then substitutes its own response.
///
/// Errors from the chain pass through untouched; only a success is
/// replaced. The handler still executes, which distinguishes this from
/// [`ShortCircuitBehavior`].
pub struct ReplaceResponseBehavior<T> {
    value: T,
}

impl<T: Clone + Send + Sync + 'static> ReplaceResponseBehavior<T> {
    /// Creates a behavior that replaces every success with `value`.
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T: Clone + Send + Sync + 'static> Behavior for ReplaceResponseBehavior<T> {
    async fn process(
        &self,
        ctx: &Context,
        _request: &dyn Request,
        next: Next<'_>,
    ) -> DispatchResult {
        next.run(ctx)
            .await
            .map(|_| Response::new(self.value.clone()))
    }
}

// ============================================================================
// Counting Handler
// ============================================================================

/// A handler that counts invocations and answers with the empty response.
///
/// # Example
///
/// ```rust,ignore
/// let counter = CountingHandler::new();
/// let mediator = Mediator::builder()
///     .with_handler(&Ping, counter.clone())
///     .build()?;
///
/// mediator.send(&Context::background(), &Ping).await?;
/// assert_eq!(counter.count(), 1);
/// ```
pub struct CountingHandler {
    count: Arc<AtomicUsize>,
}

impl CountingHandler {
    /// Creates a new counting handler.
    pub fn new() -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl Default for CountingHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CountingHandler {
    fn clone(&self) -> Self {
        Self {
            count: self.count.clone(),
        }
    }
}

impl Handler for CountingHandler {
    async fn handle(&self, _ctx: &Context, _request: &dyn Request) -> DispatchResult {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(Response::empty())
    }
}

// ============================================================================
// Const Handler
// ============================================================================

/// A handler that always answers with a clone of a fixed value.
pub struct ConstHandler<T> {
    value: T,
}

impl<T: Clone + Send + Sync + 'static> ConstHandler<T> {
    /// Creates a handler that always answers with `value`.
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T: Clone + Send + Sync + 'static> Handler for ConstHandler<T> {
    async fn handle(&self, _ctx: &Context, _request: &dyn Request) -> DispatchResult {
        Ok(Response::new(self.value.clone()))
    }
}

// ============================================================================
// Failing Handler
// ============================================================================

/// A handler that always fails with a fixed message.
pub struct FailingHandler {
    message: String,
}

impl FailingHandler {
    /// Creates a handler that always fails with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Handler for FailingHandler {
    async fn handle(&self, _ctx: &Context, _request: &dyn Request) -> DispatchResult {
        Err(DispatchError::custom(self.message.clone()))
    }
}

// ============================================================================
// Counting Factory
// ============================================================================

/// A factory that counts how often it manufactures its handler.
///
/// Useful for asserting the once-per-dispatch factory contract.
pub struct CountingFactory {
    handler: SharedHandler,
    created: Arc<AtomicUsize>,
}

impl CountingFactory {
    /// Creates a factory handing out `handler` and counting each call.
    pub fn new<H: Handler>(handler: H) -> Self {
        Self {
            handler: Arc::new(handler),
            created: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// How many times `create` has been called.
    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

impl Clone for CountingFactory {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            created: Arc::clone(&self.created),
        }
    }
}

impl HandlerFactory for CountingFactory {
    fn create(&self) -> Result<SharedHandler, BoxError> {
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::clone(&self.handler))
    }
}

// ============================================================================
// Stub Continuation
// ============================================================================

/// A canned continuation for unit-testing a behavior in isolation.
///
/// Hand it to [`Next::new`] and the behavior under test can run without
/// a mediator behind it. Counts how often it is resumed.
///
/// # Example
///
/// ```rust,ignore
/// let next = StubContinuation::ok(42u32);
/// let result = my_behavior
///     .process(&Context::background(), &Ping, Next::new(&next))
///     .await;
/// assert_eq!(next.calls(), 1);
/// ```
pub struct StubContinuation {
    produce: Box<dyn Fn() -> DispatchResult + Send + Sync>,
    calls: AtomicUsize,
}

impl StubContinuation {
    /// Creates a stub producing each resumption's outcome with `produce`.
    pub fn new(produce: impl Fn() -> DispatchResult + Send + Sync + 'static) -> Self {
        Self {
            produce: Box::new(produce),
            calls: AtomicUsize::new(0),
        }
    }

    /// A stub that always succeeds with a clone of `value`.
    pub fn ok<T: Clone + Send + Sync + 'static>(value: T) -> Self {
        Self::new(move || Ok(Response::new(value.clone())))
    }

    /// A stub that always fails with `message`.
    pub fn failing(message: &'static str) -> Self {
        Self::new(move || Err(DispatchError::custom(message)))
    }

    /// How many times the stub has been resumed.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Continuation for StubContinuation {
    fn resume<'a>(&'a self, _ctx: &'a Context) -> BoxFuture<'a, DispatchResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let result = (self.produce)();
        Box::pin(async move { result })
    }
}
