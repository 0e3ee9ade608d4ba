use medius::{Behavior, Context, DispatchError, DispatchResult, Handler, Next, Request, Response};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Test Request Types
// ============================================================================

pub struct EchoCommand {
    pub name: String,
}

impl Request for EchoCommand {
    fn key(&self) -> &str {
        "EchoCommand"
    }
}

pub struct RejectCommand {
    pub name: String,
}

impl Request for RejectCommand {
    fn key(&self) -> &str {
        "RejectCommand"
    }
}

pub struct Probe;

impl Request for Probe {
    fn key(&self) -> &str {
        "Probe"
    }
}

// ============================================================================
// Test Handlers
// ============================================================================

pub struct CapturingHandler {
    pub seen: Arc<Mutex<Option<String>>>,
}

impl Handler for CapturingHandler {
    async fn handle(&self, _ctx: &Context, request: &dyn Request) -> DispatchResult {
        let cmd = request
            .downcast_ref::<EchoCommand>()
            .ok_or_else(|| DispatchError::custom("expected an EchoCommand"))?;
        *self.seen.lock().unwrap() = Some(cmd.name.clone());
        Ok(Response::new(cmd.name.clone()))
    }
}

pub struct RejectingHandler;

impl Handler for RejectingHandler {
    async fn handle(&self, _ctx: &Context, request: &dyn Request) -> DispatchResult {
        let cmd = request
            .downcast_ref::<RejectCommand>()
            .ok_or_else(|| DispatchError::custom("expected a RejectCommand"))?;
        Err(DispatchError::custom(cmd.name.clone()))
    }
}

// Handler that records what the context looked like when it ran
pub struct ContextProbeHandler {
    pub saw_deadline: Arc<Mutex<Option<bool>>>,
    pub saw_cancelled: Arc<Mutex<Option<bool>>>,
}

impl Handler for ContextProbeHandler {
    async fn handle(&self, ctx: &Context, _request: &dyn Request) -> DispatchResult {
        *self.saw_deadline.lock().unwrap() = Some(ctx.deadline().is_some());
        *self.saw_cancelled.lock().unwrap() = Some(ctx.is_cancelled());
        Ok(Response::empty())
    }
}

// Handler that fails a fixed number of times before succeeding
pub struct FlakyHandler {
    pub failures_left: Arc<AtomicUsize>,
    pub attempts: Arc<AtomicUsize>,
}

impl Handler for FlakyHandler {
    async fn handle(&self, _ctx: &Context, _request: &dyn Request) -> DispatchResult {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let left = self.failures_left.load(Ordering::SeqCst);
        if left > 0 {
            self.failures_left.store(left - 1, Ordering::SeqCst);
            return Err(DispatchError::custom("still warming up"));
        }
        Ok(Response::new("warmed up"))
    }
}

pub struct SlowHandler {
    pub delay: std::time::Duration,
}

impl Handler for SlowHandler {
    async fn handle(&self, _ctx: &Context, _request: &dyn Request) -> DispatchResult {
        tokio::time::sleep(self.delay).await;
        Ok(Response::new("finally"))
    }
}

// ============================================================================
// Test Behaviors
// ============================================================================

// Records the payload of the request it saw, proving behaviors observe
// the same value the caller sent
pub struct RequestSpyBehavior {
    pub seen: Arc<Mutex<Option<String>>>,
}

impl Behavior for RequestSpyBehavior {
    async fn process(&self, ctx: &Context, request: &dyn Request, next: Next<'_>) -> DispatchResult {
        let mark = match request.downcast_ref::<EchoCommand>() {
            Some(cmd) => cmd.name.clone(),
            None => request.key().to_string(),
        };
        *self.seen.lock().unwrap() = Some(mark);
        next.run(ctx).await
    }
}
